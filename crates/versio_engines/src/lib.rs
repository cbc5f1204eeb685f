//! Engine cache, provider registry and shared types for Versio.
//!
//! Versio compares machine-translation providers and scores their output with
//! automatic metrics. This crate holds the pieces every provider and every
//! consumer agrees on:
//!
//! - [`EngineCache`]: lazily constructs expensive engines (local translation
//!   models, metric scorers) on first use and memoizes them for the lifetime
//!   of the process. Failed loads are never cached.
//! - [`ProviderRegistry`]: remote translation providers registered by name.
//! - [`translate`] and [`metric`]: request/response types, engine traits and
//!   the error taxonomy of the two dispatchers.
//! - [`Capability`] and [`Device`]: values reported by the status endpoints.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use versio_engines::EngineCache;
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # runtime.block_on(async {
//! let cache: EngineCache<String> = EngineCache::new();
//!
//! let handle = cache
//!     .get_or_load("greeting", || async { Ok(Arc::new("hello".to_string())) })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(handle.as_str(), "hello");
//! assert!(cache.is_loaded("greeting"));
//! # });
//! ```

mod cache;
mod capability;
mod device;
pub mod error;
pub mod metric;
mod registry;
pub mod translate;

pub use cache::EngineCache;
pub use capability::Capability;
pub use device::Device;
pub use error::{EngineError, LoadError};
pub use registry::ProviderRegistry;
