//! ONNX implementations of the metric model traits.

use super::session::{Input, OnnxSession, Output};
use super::tokenizer::{Encoded, HfTokenizer};
use crate::metrics::{
    Estimator, PairEncoder, PairRegressor, SentenceEncoder, TokenEmbedder, first_token,
    masked_mean,
};
use versio_engines::EngineError;

/// A transformer encoder producing per-token hidden states.
pub(crate) struct OnnxEncoder {
    pub session: OnnxSession,
    pub tokenizer: HfTokenizer,
    /// Name of the `[batch, seq, hidden]` output.
    pub output: &'static str,
    pub max_len: usize,
}

impl OnnxEncoder {
    fn hidden_states(&self, encoded: &Encoded) -> Result<(Output, usize), EngineError> {
        let len = encoded.len();
        let output = self.session.run(
            vec![
                ("input_ids", Input::I64(vec![1, len], encoded.ids.clone())),
                (
                    "attention_mask",
                    Input::I64(vec![1, len], encoded.attention_mask.clone()),
                ),
            ],
            self.output,
        )?;

        let width = output.shape.last().copied().unwrap_or_default();
        if width == 0 || output.data.len() != len * width {
            return Err(EngineError::inference(format!(
                "unexpected encoder output shape {:?}",
                output.shape
            )));
        }
        Ok((output, width))
    }
}

impl TokenEmbedder for OnnxEncoder {
    fn embed_tokens(&self, text: &str) -> Result<Vec<Vec<f32>>, EngineError> {
        let encoded = self.tokenizer.encode_single(text, self.max_len)?;
        let (output, width) = self.hidden_states(&encoded)?;

        Ok(output
            .data
            .chunks_exact(width)
            .zip(&encoded.special)
            .filter(|(_, special)| !**special)
            .map(|(row, _)| row.to_vec())
            .collect())
    }
}

impl SentenceEncoder for OnnxEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        let encoded = self.tokenizer.encode_single(text, self.max_len)?;
        let (output, width) = self.hidden_states(&encoded)?;
        Ok(masked_mean(&output.data, &encoded.attention_mask, width))
    }
}

impl PairEncoder for OnnxEncoder {
    fn encode_pair(&self, first: &str, second: &str) -> Result<Vec<f32>, EngineError> {
        let encoded = self.tokenizer.encode_pair(first, second, self.max_len)?;
        let (output, width) = self.hidden_states(&encoded)?;
        Ok(first_token(&output.data, width))
    }
}

/// A feed-forward regression head taking `features` and producing `score`.
pub(crate) struct OnnxEstimator {
    pub session: OnnxSession,
}

impl Estimator for OnnxEstimator {
    fn estimate(&self, features: &[f32]) -> Result<f32, EngineError> {
        let output = self.session.run(
            vec![(
                "features",
                Input::F32(vec![1, features.len()], features.to_vec()),
            )],
            "score",
        )?;
        output
            .data
            .first()
            .copied()
            .ok_or_else(|| EngineError::inference("estimator returned no score"))
    }
}

/// A sequence-pair classifier whose single logit is the score.
pub(crate) struct OnnxPairRegressor {
    pub session: OnnxSession,
    pub tokenizer: HfTokenizer,
    /// Inputs are padded or truncated to exactly this many tokens.
    pub seq_len: usize,
}

impl PairRegressor for OnnxPairRegressor {
    fn regress(&self, first: &str, second: &str) -> Result<f32, EngineError> {
        let mut encoded = self.tokenizer.encode_pair(first, second, self.seq_len)?;
        encoded.pad_to(self.seq_len, self.tokenizer.pad_id());
        let len = encoded.len();

        let output = self.session.run(
            vec![
                ("input_ids", Input::I64(vec![1, len], encoded.ids)),
                ("attention_mask", Input::I64(vec![1, len], encoded.attention_mask)),
                ("token_type_ids", Input::I64(vec![1, len], encoded.type_ids)),
            ],
            "logits",
        )?;
        output
            .data
            .first()
            .copied()
            .ok_or_else(|| EngineError::inference("model returned no logits"))
    }
}
