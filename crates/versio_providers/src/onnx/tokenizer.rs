//! `tokenizers` bindings.

use crate::codec::TextCodec;
use std::path::Path;
use tokenizers::{Encoding, Tokenizer, TruncationParams};
use versio_engines::{EngineError, LoadError};

/// Token ids of one encoded sequence, ready to feed a model.
pub(crate) struct Encoded {
    pub ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub type_ids: Vec<i64>,
    pub special: Vec<bool>,
}

impl Encoded {
    fn from_encoding(encoding: &Encoding, max_len: usize) -> Self {
        let take = encoding.len().min(max_len);
        let widen = |values: &[u32]| values[..take].iter().map(|&v| i64::from(v)).collect();
        Self {
            ids: widen(encoding.get_ids()),
            attention_mask: widen(encoding.get_attention_mask()),
            type_ids: widen(encoding.get_type_ids()),
            special: encoding.get_special_tokens_mask()[..take]
                .iter()
                .map(|&flag| flag == 1)
                .collect(),
        }
    }

    /// Pads every field to `len` with `pad_id`.
    pub fn pad_to(&mut self, len: usize, pad_id: i64) {
        if self.ids.len() >= len {
            return;
        }
        self.ids.resize(len, pad_id);
        self.attention_mask.resize(len, 0);
        self.type_ids.resize(len, 0);
        self.special.resize(len, true);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// A `tokenizer.json` loaded with the `tokenizers` crate.
pub(crate) struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    /// Loads `path`, truncating every encoding to `max_len` tokens
    /// including special tokens.
    pub fn load(path: &Path, max_len: usize) -> Result<Self, LoadError> {
        let mut inner = Tokenizer::from_file(path)
            .map_err(|err| LoadError::model(format!("failed to load tokenizer: {err}")))?;
        inner
            .with_truncation(Some(TruncationParams {
                max_length: max_len,
                ..TruncationParams::default()
            }))
            .map_err(|err| LoadError::model(format!("invalid truncation: {err}")))?;
        Ok(Self { inner })
    }

    /// Encodes one sentence with special tokens, truncated to `max_len`.
    pub fn encode_single(&self, text: &str, max_len: usize) -> Result<Encoded, EngineError> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|err| EngineError::tokenization(err.to_string()))?;
        Ok(Encoded::from_encoding(&encoding, max_len))
    }

    /// Encodes a sentence pair with special tokens, truncated to `max_len`.
    pub fn encode_pair(&self, first: &str, second: &str, max_len: usize) -> Result<Encoded, EngineError> {
        let encoding = self
            .inner
            .encode((first, second), true)
            .map_err(|err| EngineError::tokenization(err.to_string()))?;
        Ok(Encoded::from_encoding(&encoding, max_len))
    }

    /// Id of the padding token, if the tokenizer defines one.
    pub fn pad_id(&self) -> i64 {
        self.inner
            .get_padding()
            .map(|padding| i64::from(padding.pad_id))
            .or_else(|| self.inner.token_to_id("<pad>").map(i64::from))
            .or_else(|| self.inner.token_to_id("[PAD]").map(i64::from))
            .unwrap_or_default()
    }
}

impl TextCodec for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<i64>, EngineError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|err| EngineError::tokenization(err.to_string()))?;
        Ok(encoding.get_ids().iter().map(|&id| i64::from(id)).collect())
    }

    fn decode(&self, ids: &[i64]) -> Result<String, EngineError> {
        let ids: Vec<u32> = ids
            .iter()
            .map(|&id| u32::try_from(id).map_err(|_| EngineError::tokenization(format!("invalid id {id}"))))
            .collect::<Result<_, _>>()?;
        self.inner
            .decode(&ids, true)
            .map_err(|err| EngineError::tokenization(err.to_string()))
    }

    fn token_id(&self, token: &str) -> Option<i64> {
        self.inner.token_to_id(token).map(i64::from)
    }
}
