//! A local backend for comparing machine-translation providers.
//!
//! Versio puts local neural models, installable phrase packages and remote
//! translation APIs behind one JSON convention, and scores their output with
//! automatic metrics. Expensive engines are loaded on first use and kept for
//! the life of the process.
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`engines`] | Engine cache, provider registry, request/result types, errors |
//! | [`providers`] | Remote API clients, local translation families, metric scorers |
//! | [`server`] | Configuration, logging, dispatchers and the HTTP routes |

pub use versio_engines as engines;
pub use versio_providers as providers;
pub use versio_server as server;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use versio_engines::metric::{MetricKind, MetricRequest, MetricScore, Scorer};
    pub use versio_engines::translate::{
        LocalTranslator, RemoteTranslator, TranslateError, TranslationRequest, TranslationResult,
    };
    pub use versio_engines::{Capability, Device, EngineCache, LoadError, ProviderRegistry};
    pub use versio_providers::{ModelCatalog, RemoteEndpoints, remote_registry};
    pub use versio_server::{Engines, LogConfig, ServerConfig};
}
