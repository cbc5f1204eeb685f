//! Error types shared by every engine.

/// Error constructing an engine handle.
///
/// Load errors are returned to the caller and never stored, so the next
/// request for the same engine retries the load from scratch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// The engine's backing library was not compiled into this build.
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// Model files could not be fetched or located.
    #[error("failed to fetch model files: {0}")]
    Fetch(String),

    /// Model files were present but could not be turned into a usable engine.
    #[error("failed to load model: {0}")]
    Model(String),

    /// The loader task panicked or was cancelled.
    #[error("loader task failed: {0}")]
    Join(String),
}

impl LoadError {
    /// Creates an [`Unavailable`](Self::Unavailable) error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates a [`Fetch`](Self::Fetch) error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Creates a [`Model`](Self::Model) error.
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }
}

/// Error running a loaded engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Text could not be converted to or from token ids.
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    /// The model produced an error or an output of unexpected shape.
    #[error("inference failed: {0}")]
    Inference(String),

    /// The engine does not handle the requested language or input.
    #[error("unsupported input: {0}")]
    Unsupported(String),

    /// Inference task panicked or was cancelled.
    #[error("inference task failed: {0}")]
    Join(String),
}

impl EngineError {
    /// Creates a [`Tokenization`](Self::Tokenization) error.
    pub fn tokenization(msg: impl Into<String>) -> Self {
        Self::Tokenization(msg.into())
    }

    /// Creates an [`Inference`](Self::Inference) error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }
}
