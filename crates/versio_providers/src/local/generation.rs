//! Greedy decoding over an encoder-decoder model.

use serde::Deserialize;
use versio_engines::EngineError;

/// Upper bound on both encoder input and decoder output length, in tokens.
pub const MAX_LENGTH: usize = 512;

/// Token ids from a model's `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GenerationConfig {
    /// First token fed to the decoder.
    pub decoder_start_token_id: i64,
    /// End-of-sequence token; stops decoding.
    pub eos_token_id: i64,
}

/// Encoder hidden states for one input sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOutput {
    /// Row-major `[seq_len, hidden_size]` values.
    pub hidden: Vec<f32>,
    /// Number of input tokens.
    pub seq_len: usize,
    /// Width of each hidden state.
    pub hidden_size: usize,
}

/// The two halves of an encoder-decoder model.
pub trait Seq2SeqBackend: Send + Sync + 'static {
    /// Runs the encoder over `input_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Inference`] if the model fails.
    fn encode(&self, input_ids: &[i64]) -> Result<EncoderOutput, EngineError>;

    /// Runs the decoder and returns the logits for the token following
    /// `decoder_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Inference`] if the model fails.
    fn next_token_logits(
        &self,
        encoded: &EncoderOutput,
        decoder_ids: &[i64],
    ) -> Result<Vec<f32>, EngineError>;
}

/// Decodes greedily until `eos` or until the decoder sequence reaches
/// `max_length` tokens.
///
/// Returns the generated ids without `prefix` and without the final `eos`.
///
/// # Errors
///
/// Propagates backend failures; returns [`EngineError::Inference`] if the
/// backend yields empty logits.
pub fn greedy_decode<B: Seq2SeqBackend + ?Sized>(
    backend: &B,
    input_ids: &[i64],
    prefix: &[i64],
    eos: i64,
    max_length: usize,
) -> Result<Vec<i64>, EngineError> {
    let encoded = backend.encode(input_ids)?;
    let mut ids = prefix.to_vec();

    while ids.len() < max_length {
        let logits = backend.next_token_logits(&encoded, &ids)?;
        let next = argmax(&logits)
            .ok_or_else(|| EngineError::inference("decoder returned empty logits"))?;
        if next == eos {
            break;
        }
        ids.push(next);
    }

    Ok(ids.split_off(prefix.len()))
}

fn argmax(logits: &[f32]) -> Option<i64> {
    logits
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .and_then(|(index, _)| i64::try_from(index).ok())
}
