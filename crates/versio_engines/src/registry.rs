//! Remote provider registry.

use crate::translate::RemoteTranslator;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of remote translation providers.
///
/// Remote providers hold no model, only an HTTP client and an endpoint, so
/// they are constructed eagerly and registered once at startup. The registry
/// is then shared read-only for the lifetime of the server.
///
/// ```
/// # use std::sync::Arc;
/// # use async_trait::async_trait;
/// # use versio_engines::ProviderRegistry;
/// # use versio_engines::translate::{RemoteTranslator, TranslateError, TranslationRequest, TranslationResult};
/// # struct EchoProvider;
/// # #[async_trait]
/// # impl RemoteTranslator for EchoProvider {
/// #     async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslateError> {
/// #         unimplemented!()
/// #     }
/// # }
/// let mut registry = ProviderRegistry::new();
/// registry.register("echo", Arc::new(EchoProvider));
///
/// assert!(registry.has("echo"));
/// assert!(registry.get("missing").is_none());
/// ```
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn RemoteTranslator>>,
}

impl core::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registers a remote provider under `name`.
    ///
    /// # Panics
    ///
    /// Panics if a provider with the same name is already registered.
    pub fn register<P: RemoteTranslator>(&mut self, name: impl Into<String>, provider: Arc<P>) {
        let name = name.into();
        assert!(
            !self.providers.contains_key(&name),
            "remote provider '{name}' is already registered"
        );
        self.providers
            .insert(name, provider as Arc<dyn RemoteTranslator>);
    }

    /// Returns a provider by name.
    #[must_use]
    pub fn get(&self, name: impl AsRef<str>) -> Option<Arc<dyn RemoteTranslator>> {
        self.providers.get(name.as_ref()).cloned()
    }

    /// Checks if a provider is registered.
    #[must_use]
    pub fn has(&self, name: impl AsRef<str>) -> bool {
        self.providers.contains_key(name.as_ref())
    }

    /// Lists registered provider names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
