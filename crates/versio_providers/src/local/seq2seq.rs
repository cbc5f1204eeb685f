//! Local translator over an encoder-decoder model.

use super::generation::{GenerationConfig, MAX_LENGTH, Seq2SeqBackend, greedy_decode};
use super::languages::flores_code;
use crate::catalog::{ModelCatalog, ModelSource};
use crate::codec::TextCodec;
use std::sync::Arc;
use versio_engines::{EngineError, LoadError};
use versio_engines::translate::LocalTranslator;

/// How the encoder input and decoder prefix are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Multilingual: language tokens on both sides.
    Nllb,
    /// Bilingual: the model is bound to one pair.
    Marian,
}

/// A [`LocalTranslator`] decoding greedily with a [`Seq2SeqBackend`].
pub struct Seq2SeqTranslator {
    backend: Box<dyn Seq2SeqBackend>,
    codec: Box<dyn TextCodec>,
    config: GenerationConfig,
    style: PromptStyle,
}

impl core::fmt::Debug for Seq2SeqTranslator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Seq2SeqTranslator")
            .field("config", &self.config)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Seq2SeqTranslator {
    /// Creates a translator.
    #[must_use]
    pub fn new(
        backend: Box<dyn Seq2SeqBackend>,
        codec: Box<dyn TextCodec>,
        config: GenerationConfig,
        style: PromptStyle,
    ) -> Self {
        Self {
            backend,
            codec,
            config,
            style,
        }
    }

    fn language_token(&self, iso: &str) -> Result<i64, EngineError> {
        flores_code(iso)
            .and_then(|flores| self.codec.token_id(flores))
            .ok_or_else(|| EngineError::Unsupported(format!("language '{iso}'")))
    }

    /// Builds the encoder input and decoder prefix for one request.
    fn frame(
        &self,
        mut text_ids: Vec<i64>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<(Vec<i64>, Vec<i64>), EngineError> {
        let eos = self.config.eos_token_id;
        let start = self.config.decoder_start_token_id;

        match self.style {
            PromptStyle::Nllb => {
                let src = self.language_token(source_lang)?;
                let tgt = self.language_token(target_lang)?;
                text_ids.truncate(MAX_LENGTH - 2);

                let mut input = Vec::with_capacity(text_ids.len() + 2);
                input.push(src);
                input.extend(text_ids);
                input.push(eos);
                Ok((input, vec![start, tgt]))
            }
            PromptStyle::Marian => {
                text_ids.truncate(MAX_LENGTH - 1);
                text_ids.push(eos);
                Ok((text_ids, vec![start]))
            }
        }
    }
}

impl LocalTranslator for Seq2SeqTranslator {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, EngineError> {
        let text_ids = self.codec.encode(text)?;
        let (input, prefix) = self.frame(text_ids, source_lang, target_lang)?;

        let output = greedy_decode(
            self.backend.as_ref(),
            &input,
            &prefix,
            self.config.eos_token_id,
            MAX_LENGTH,
        )?;

        tracing::debug!(
            input_tokens = input.len(),
            output_tokens = output.len(),
            "seq2seq translation finished"
        );

        self.codec.decode(&output)
    }
}

/// Loads a seq2seq translator from `source`.
#[cfg(feature = "onnx")]
pub(super) fn load_seq2seq(
    source: &ModelSource,
    catalog: &ModelCatalog,
    style: PromptStyle,
) -> Result<Arc<dyn LocalTranslator>, LoadError> {
    let translator = crate::onnx::load_seq2seq(source, &catalog.cache_dir, style)?;
    Ok(Arc::new(translator))
}

/// Loads a seq2seq translator from `source`.
#[cfg(not(feature = "onnx"))]
pub(super) fn load_seq2seq(
    _source: &ModelSource,
    _catalog: &ModelCatalog,
    _style: PromptStyle,
) -> Result<Arc<dyn LocalTranslator>, LoadError> {
    Err(LoadError::unavailable(
        "local neural translation requires the onnx feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::generation::EncoderOutput;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    const EOS: i64 = 2;
    const START: i64 = 2;

    /// Word-level codec over a fixed vocabulary.
    struct WordCodec {
        vocab: HashMap<String, i64>,
    }

    impl WordCodec {
        fn new(words: &[&str]) -> Self {
            let vocab = words
                .iter()
                .enumerate()
                .map(|(i, w)| (w.to_string(), i64::try_from(i).unwrap() + 10))
                .collect();
            Self { vocab }
        }
    }

    impl TextCodec for WordCodec {
        fn encode(&self, text: &str) -> Result<Vec<i64>, EngineError> {
            text.split_whitespace()
                .map(|w| {
                    self.vocab
                        .get(w)
                        .copied()
                        .ok_or_else(|| EngineError::tokenization(format!("unknown word {w}")))
                })
                .collect()
        }

        fn decode(&self, ids: &[i64]) -> Result<String, EngineError> {
            let words: Vec<&str> = ids
                .iter()
                .filter_map(|id| {
                    self.vocab
                        .iter()
                        .find(|(_, v)| *v == id)
                        .map(|(k, _)| k.as_str())
                })
                .filter(|w| !w.contains('_'))
                .collect();
            Ok(words.join(" "))
        }

        fn token_id(&self, token: &str) -> Option<i64> {
            self.vocab.get(token).copied()
        }
    }

    /// Echoes the encoder input (minus framing) as the translation.
    struct EchoBackend {
        inputs: Arc<Mutex<Vec<Vec<i64>>>>,
    }

    impl Seq2SeqBackend for EchoBackend {
        fn encode(&self, input_ids: &[i64]) -> Result<EncoderOutput, EngineError> {
            self.inputs.lock().push(input_ids.to_vec());
            Ok(EncoderOutput {
                hidden: input_ids.iter().map(|&id| id as f32).collect(),
                seq_len: input_ids.len(),
                hidden_size: 1,
            })
        }

        fn next_token_logits(
            &self,
            encoded: &EncoderOutput,
            decoder_ids: &[i64],
        ) -> Result<Vec<f32>, EngineError> {
            let words: Vec<i64> = encoded
                .hidden
                .iter()
                .map(|&v| v as i64)
                .filter(|&id| id != EOS && !(40..50).contains(&id))
                .collect();
            let produced = decoder_ids
                .iter()
                .filter(|id| (10..40).contains(*id))
                .count();
            let next = words.get(produced).copied().unwrap_or(EOS);

            let mut logits = vec![0.0; 64];
            logits[usize::try_from(next).unwrap()] = 1.0;
            Ok(logits)
        }
    }

    fn translator(style: PromptStyle) -> (Seq2SeqTranslator, Arc<Mutex<Vec<Vec<i64>>>>) {
        let mut codec = WordCodec::new(&["hello", "world"]);
        codec.vocab.insert("eng_Latn".to_string(), 40);
        codec.vocab.insert("deu_Latn".to_string(), 41);

        let inputs = Arc::new(Mutex::new(Vec::new()));
        let backend = EchoBackend {
            inputs: Arc::clone(&inputs),
        };
        let config = GenerationConfig {
            decoder_start_token_id: START,
            eos_token_id: EOS,
        };
        (
            Seq2SeqTranslator::new(Box::new(backend), Box::new(codec), config, style),
            inputs,
        )
    }

    #[test]
    fn nllb_frames_input_with_language_tokens() {
        let (translator, inputs) = translator(PromptStyle::Nllb);
        let output = translator.translate("hello world", "en", "de").unwrap();

        assert_eq!(output, "hello world");
        assert_eq!(inputs.lock()[0], vec![40, 10, 11, EOS]);
    }

    #[test]
    fn marian_input_has_no_language_tokens() {
        let (translator, inputs) = translator(PromptStyle::Marian);
        translator.translate("world", "en", "de").unwrap();
        assert_eq!(inputs.lock()[0], vec![11, EOS]);
    }

    #[test]
    fn nllb_rejects_languages_without_tokens() {
        let (translator, inputs) = translator(PromptStyle::Nllb);
        let err = translator.translate("hello", "en", "fr").unwrap_err();

        assert!(matches!(err, EngineError::Unsupported(_)));
        assert!(inputs.lock().is_empty());
    }

    #[test]
    fn long_input_is_truncated() {
        let (translator, inputs) = translator(PromptStyle::Nllb);
        let text = vec!["hello"; 600].join(" ");
        translator.translate(&text, "en", "de").unwrap();

        let input = &inputs.lock()[0];
        assert_eq!(input.len(), MAX_LENGTH);
        assert_eq!(input.last(), Some(&EOS));
    }
}
