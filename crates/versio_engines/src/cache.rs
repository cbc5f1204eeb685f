//! Lazily populated engine cache.

use crate::error::LoadError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

type Slot<H> = Arc<OnceCell<Arc<H>>>;

/// Memoizes engine handles by identifier.
///
/// Each identifier owns a slot that is filled by the first successful load and
/// never replaced afterwards. There is no eviction, no size bound and no
/// expiry: handles live until the process exits.
///
/// Loads for the same identifier are serialized by the slot, so concurrent
/// first requests construct the engine once. Loads for different identifiers
/// run independently.
///
/// A failed load is not remembered. The error goes back to the caller, the
/// empty slot is dropped once no other caller waits on it, and the next
/// request retries the load from scratch.
pub struct EngineCache<H: ?Sized> {
    slots: Mutex<HashMap<String, Slot<H>>>,
}

impl<H: ?Sized> Default for EngineCache<H> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<H: ?Sized> core::fmt::Debug for EngineCache<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let slots = self.slots.lock();
        let mut loaded: Vec<&str> = slots
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(id, _)| id.as_str())
            .collect();
        loaded.sort_unstable();
        f.debug_struct("EngineCache")
            .field("loaded", &loaded)
            .finish()
    }
}

impl<H: ?Sized + Send + Sync + 'static> EngineCache<H> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `id`, running `load` if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns the loader's error unchanged. The error is not cached.
    pub async fn get_or_load<F, Fut>(&self, id: &str, load: F) -> Result<Arc<H>, LoadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<H>, LoadError>>,
    {
        let slot = self.slot(id);
        if let Some(handle) = slot.get() {
            return Ok(Arc::clone(handle));
        }

        let loaded = slot
            .get_or_try_init(|| async move {
                tracing::info!(engine = id, "loading engine");
                let started = Instant::now();
                match load().await {
                    Ok(handle) => {
                        tracing::info!(
                            engine = id,
                            elapsed_ms = started.elapsed().as_millis(),
                            "engine loaded"
                        );
                        Ok(handle)
                    }
                    Err(err) => {
                        tracing::error!(engine = id, error = %err, "engine load failed");
                        Err(err)
                    }
                }
            })
            .await;

        match loaded {
            Ok(handle) => Ok(Arc::clone(handle)),
            Err(err) => {
                self.discard_empty(id, &slot);
                Err(err)
            }
        }
    }

    /// Like [`get_or_load`](Self::get_or_load), but runs a synchronous loader
    /// on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, or [`LoadError::Join`] if the loader panicked.
    pub async fn get_or_load_blocking<F>(&self, id: &str, load: F) -> Result<Arc<H>, LoadError>
    where
        F: FnOnce() -> Result<Arc<H>, LoadError> + Send + 'static,
    {
        self.get_or_load(id, || async move {
            tokio::task::spawn_blocking(load)
                .await
                .map_err(|err| LoadError::Join(err.to_string()))?
        })
        .await
    }

    /// Returns the handle for `id` if it has been loaded.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<H>> {
        self.slots
            .lock()
            .get(id)
            .and_then(|slot| slot.get().cloned())
    }

    /// Checks whether `id` has a loaded handle.
    #[must_use]
    pub fn is_loaded(&self, id: &str) -> bool {
        self.slots
            .lock()
            .get(id)
            .is_some_and(|slot| slot.initialized())
    }

    /// Lists identifiers with a loaded handle, sorted.
    #[must_use]
    pub fn loaded_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort_unstable();
        ids
    }

    fn slot(&self, id: &str) -> Slot<H> {
        let mut slots = self.slots.lock();
        Arc::clone(slots.entry(id.to_string()).or_default())
    }

    /// Removes the slot for `id` after a failed load. A slot that another
    /// caller still holds is kept, since that caller may fill it.
    fn discard_empty(&self, id: &str, slot: &Slot<H>) {
        let mut slots = self.slots.lock();
        // Clones are only taken under this lock: the map and `slot` account for two.
        let unused = slots.get(id).is_some_and(|current| {
            Arc::ptr_eq(current, slot) && !current.initialized() && Arc::strong_count(current) == 2
        });
        if unused {
            slots.remove(id);
        }
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.slots.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use core::time::Duration;

    #[tokio::test]
    async fn load_runs_once_for_repeated_calls() {
        let cache: EngineCache<String> = EngineCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let handle = cache
                .get_or_load("nllb-200-600m", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new("model".to_string()))
                })
                .await
                .expect("load should succeed");
            assert_eq!(handle.as_str(), "model");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let cache: EngineCache<String> = EngineCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_load("comet", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(LoadError::fetch("network unreachable"))
            })
            .await;
        assert!(matches!(first, Err(LoadError::Fetch(_))));
        assert!(!cache.is_loaded("comet"));

        let second = cache
            .get_or_load("comet", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new("scorer".to_string()))
            })
            .await
            .expect("retry should succeed");

        assert_eq!(second.as_str(), "scorer");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_loaded("comet"));
    }

    #[tokio::test]
    async fn failed_loads_leave_no_slots_behind() {
        let cache: EngineCache<String> = EngineCache::new();

        for n in 0..1000 {
            let result = cache
                .get_or_load(&format!("opus-mt-en-x{n}"), || async {
                    Err(LoadError::fetch("repository not found"))
                })
                .await;
            assert!(result.is_err());
        }

        assert!(cache.loaded_ids().is_empty());
        assert_eq!(cache.slot_count(), 0);

        cache
            .get_or_load("opus-mt-en-de", || async { Ok(Arc::new("de".to_string())) })
            .await
            .unwrap();
        assert_eq!(cache.slot_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failure_shared_with_a_waiter_keeps_the_winning_load() {
        let cache: Arc<EngineCache<String>> = Arc::new(EngineCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_load("comet", || async move {
                            let attempt = calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            if attempt == 0 {
                                Err(LoadError::fetch("first download failed"))
                            } else {
                                Ok(Arc::new("comet".to_string()))
                            }
                        })
                        .await
                })
            })
            .collect();

        let mut loaded = 0;
        for task in tasks {
            if task.await.expect("task panicked").is_ok() {
                loaded += 1;
            }
        }

        assert_eq!(loaded, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_loaded("comet"));
        assert_eq!(cache.slot_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_calls_load_once() {
        let cache: Arc<EngineCache<String>> = Arc::new(EngineCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_load("bleurt", || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok(Arc::new("bleurt".to_string()))
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            let handle = task.await.expect("task panicked").expect("load failed");
            assert_eq!(handle.as_str(), "bleurt");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_ids_get_distinct_handles() {
        let cache: EngineCache<String> = EngineCache::new();

        let de = cache
            .get_or_load("opus-mt-en-de", || async { Ok(Arc::new("de".to_string())) })
            .await
            .unwrap();
        let fr = cache
            .get_or_load("opus-mt-en-fr", || async { Ok(Arc::new("fr".to_string())) })
            .await
            .unwrap();

        assert_eq!(de.as_str(), "de");
        assert_eq!(fr.as_str(), "fr");
        assert_eq!(cache.loaded_ids(), vec!["opus-mt-en-de", "opus-mt-en-fr"]);
    }

    #[tokio::test]
    async fn blocking_loader_runs_off_the_runtime() {
        let cache: EngineCache<String> = EngineCache::new();

        let handle = cache
            .get_or_load_blocking("argos-en-de", || Ok(Arc::new("phrases".to_string())))
            .await
            .unwrap();

        assert_eq!(handle.as_str(), "phrases");
        assert!(cache.get("argos-en-de").is_some());
    }

    #[tokio::test]
    async fn panicking_loader_reports_join_error() {
        let cache: EngineCache<String> = EngineCache::new();

        let result = cache
            .get_or_load_blocking("broken", || panic!("loader exploded"))
            .await;

        assert!(matches!(result, Err(LoadError::Join(_))));
        assert!(!cache.is_loaded("broken"));
    }

    #[test]
    fn unknown_id_is_not_loaded() {
        let cache: EngineCache<str> = EngineCache::new();
        assert!(!cache.is_loaded("missing"));
        assert!(cache.get("missing").is_none());
        assert!(cache.loaded_ids().is_empty());
    }
}
