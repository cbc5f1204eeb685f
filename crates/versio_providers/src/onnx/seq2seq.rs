//! Encoder-decoder backend over two ONNX sessions.

use super::session::{Input, OnnxSession};
use crate::local::{EncoderOutput, Seq2SeqBackend};
use versio_engines::EngineError;

/// Runs an Optimum-style export: `encoder_model.onnx` producing
/// `last_hidden_state` and `decoder_model.onnx` producing `logits`.
///
/// The decoder is re-run over the whole prefix at every step; no key/value
/// cache is kept.
pub(crate) struct OnnxSeq2Seq {
    pub encoder: OnnxSession,
    pub decoder: OnnxSession,
}

impl Seq2SeqBackend for OnnxSeq2Seq {
    fn encode(&self, input_ids: &[i64]) -> Result<EncoderOutput, EngineError> {
        let len = input_ids.len();
        let output = self.encoder.run(
            vec![
                ("input_ids", Input::I64(vec![1, len], input_ids.to_vec())),
                ("attention_mask", Input::I64(vec![1, len], vec![1; len])),
            ],
            "last_hidden_state",
        )?;

        let hidden_size = output.shape.last().copied().unwrap_or_default();
        if hidden_size == 0 || output.data.len() != len * hidden_size {
            return Err(EngineError::inference(format!(
                "unexpected encoder output shape {:?}",
                output.shape
            )));
        }

        Ok(EncoderOutput {
            hidden: output.data,
            seq_len: len,
            hidden_size,
        })
    }

    fn next_token_logits(
        &self,
        encoded: &EncoderOutput,
        decoder_ids: &[i64],
    ) -> Result<Vec<f32>, EngineError> {
        let steps = decoder_ids.len();
        let output = self.decoder.run(
            vec![
                ("input_ids", Input::I64(vec![1, steps], decoder_ids.to_vec())),
                (
                    "encoder_attention_mask",
                    Input::I64(vec![1, encoded.seq_len], vec![1; encoded.seq_len]),
                ),
                (
                    "encoder_hidden_states",
                    Input::F32(
                        vec![1, encoded.seq_len, encoded.hidden_size],
                        encoded.hidden.clone(),
                    ),
                ),
            ],
            "logits",
        )?;

        let vocab = output.shape.last().copied().unwrap_or_default();
        if vocab == 0 || output.data.len() < vocab {
            return Err(EngineError::inference(format!(
                "unexpected decoder output shape {:?}",
                output.shape
            )));
        }

        let last = output.data.len() - vocab;
        Ok(output.data[last..].to_vec())
    }
}
