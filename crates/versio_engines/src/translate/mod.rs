//! Translation requests, results and engine traits.
//!
//! Two kinds of engines produce translations:
//!
//! - [`LocalTranslator`]: a model loaded into this process. Calls are
//!   synchronous and CPU bound; callers run them on the blocking pool.
//! - [`RemoteTranslator`]: a third-party HTTP API. Calls are async and carry
//!   the caller's API key inside the request.
//!
//! Both report failures through [`TranslateError`], whose variants map onto
//! HTTP status codes.

mod error;
mod provider;
mod types;

pub use error::TranslateError;
pub use provider::{LocalTranslator, RemoteTranslator};
pub use types::{
    DEFAULT_SOURCE_LANG, DEFAULT_SYSTEM_PROMPT, DEFAULT_TARGET_LANG, TranslationRequest,
    TranslationResult,
};
