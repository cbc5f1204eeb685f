//! Text-to-token conversion used by the local translators.

use versio_engines::EngineError;

/// Converts between text and model token ids.
pub trait TextCodec: Send + Sync + 'static {
    /// Encodes `text` without adding special tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Tokenization`] if the text cannot be encoded.
    fn encode(&self, text: &str) -> Result<Vec<i64>, EngineError>;

    /// Decodes `ids`, skipping special tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Tokenization`] if an id is out of vocabulary.
    fn decode(&self, ids: &[i64]) -> Result<String, EngineError>;

    /// Looks up the id of a single token, such as a language code.
    fn token_id(&self, token: &str) -> Option<i64>;
}
