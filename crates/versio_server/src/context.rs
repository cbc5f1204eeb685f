//! The engine context shared by every request.

use crate::config::ServerConfig;
use std::sync::Arc;
use versio_engines::metric::{MetricKind, Scorer};
use versio_engines::translate::LocalTranslator;
use versio_engines::{Capability, Device, EngineCache, LoadError, ProviderRegistry};
use versio_providers::argos::ArgosStore;
use versio_providers::local::{NllbVariant, load_nllb, load_opus};
use versio_providers::{ModelCatalog, metrics, remote_registry};

/// Constructs the neural engines.
///
/// Every method blocks on disk and network I/O and is called on the blocking
/// pool, once per successful load.
pub trait ModelLoader: Send + Sync + 'static {
    /// Loads an NLLB-200 variant.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the model cannot be fetched or built.
    fn nllb(&self, variant: NllbVariant) -> Result<Arc<dyn LocalTranslator>, LoadError>;

    /// Loads the OPUS-MT model for a language pair.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the model cannot be fetched or built.
    fn opus(&self, src: &str, tgt: &str) -> Result<Arc<dyn LocalTranslator>, LoadError>;

    /// Loads a metric scorer.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the model cannot be fetched or built.
    fn scorer(&self, kind: MetricKind) -> Result<Arc<dyn Scorer>, LoadError>;

    /// Reports whether neural engines can run in this build.
    fn capability(&self) -> Capability;

    /// Returns the device engines would run on right now.
    fn device(&self) -> Device;
}

/// Loads engines from a [`ModelCatalog`] with ONNX Runtime.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    catalog: ModelCatalog,
}

impl CatalogLoader {
    /// Creates a loader reading model sources from `catalog`.
    #[must_use]
    pub fn new(catalog: ModelCatalog) -> Self {
        Self { catalog }
    }
}

impl ModelLoader for CatalogLoader {
    fn nllb(&self, variant: NllbVariant) -> Result<Arc<dyn LocalTranslator>, LoadError> {
        load_nllb(variant, &self.catalog)
    }

    fn opus(&self, src: &str, tgt: &str) -> Result<Arc<dyn LocalTranslator>, LoadError> {
        load_opus(src, tgt, &self.catalog)
    }

    fn scorer(&self, kind: MetricKind) -> Result<Arc<dyn Scorer>, LoadError> {
        metrics::load_scorer(kind, &self.catalog)
    }

    fn capability(&self) -> Capability {
        versio_providers::neural_capability()
    }

    fn device(&self) -> Device {
        versio_providers::detect_device()
    }
}

/// Engines owned by the server.
///
/// Holds the two engine caches (local translators keyed by engine id, metric
/// scorers keyed by metric id), the remote provider registry and the Argos
/// package store. Handlers reach it through axum state.
pub struct Engines {
    pub(crate) translators: EngineCache<dyn LocalTranslator>,
    pub(crate) scorers: EngineCache<dyn Scorer>,
    pub(crate) remote: ProviderRegistry,
    pub(crate) argos: ArgosStore,
    pub(crate) loader: Arc<dyn ModelLoader>,
}

impl core::fmt::Debug for Engines {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engines")
            .field("translators", &self.translators)
            .field("scorers", &self.scorers)
            .field("remote", &self.remote)
            .field("argos", &self.argos)
            .finish_non_exhaustive()
    }
}

impl Engines {
    /// Creates empty caches around the given providers.
    #[must_use]
    pub fn new(remote: ProviderRegistry, argos: ArgosStore, loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            translators: EngineCache::new(),
            scorers: EngineCache::new(),
            remote,
            argos,
            loader,
        }
    }

    /// Builds the production engine set from `config`.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            remote_registry(&config.endpoints),
            ArgosStore::new(&config.data_dir, config.argos_index_url.clone()),
            Arc::new(CatalogLoader::new(config.catalog.clone())),
        )
    }

    /// Returns the remote provider registry.
    #[must_use]
    pub fn remote(&self) -> &ProviderRegistry {
        &self.remote
    }

    /// Returns the Argos package store.
    #[must_use]
    pub fn argos(&self) -> &ArgosStore {
        &self.argos
    }

    /// Reports whether the neural families can run.
    #[must_use]
    pub fn neural_capability(&self) -> Capability {
        self.loader.capability()
    }

    /// Returns the device neural engines run on.
    #[must_use]
    pub fn device(&self) -> Device {
        self.loader.device()
    }

    /// Checks whether the scorer for `kind` has been loaded.
    #[must_use]
    pub fn is_metric_loaded(&self, kind: MetricKind) -> bool {
        self.scorers.is_loaded(kind.id())
    }

    /// Lists loaded local translator ids starting with `prefix`, sorted.
    #[must_use]
    pub fn loaded_translators(&self, prefix: &str) -> Vec<String> {
        self.translators
            .loaded_ids()
            .into_iter()
            .filter(|id| id.starts_with(prefix))
            .collect()
    }
}
