//! Shared helpers for server integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use core::sync::atomic::{AtomicUsize, Ordering};
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;
use versio_engines::metric::{MetricKind, MetricRequest, MetricScore, Scorer};
use versio_engines::translate::LocalTranslator;
use versio_engines::{Capability, Device, EngineError, LoadError, ProviderRegistry};
use versio_providers::argos::ArgosStore;
use versio_providers::local::NllbVariant;
use versio_server::{Assets, Engines, ModelLoader, router};

/// Translator that tags the text with the target language.
struct TaggingTranslator;

impl LocalTranslator for TaggingTranslator {
    fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String, EngineError> {
        Ok(format!("[{target}] {text}"))
    }
}

/// Scorer returning 1.0 for exact matches and 0.5 otherwise.
struct MatchScorer(MetricKind);

impl Scorer for MatchScorer {
    fn score(&self, request: &MetricRequest) -> Result<MetricScore, EngineError> {
        let value = if request.candidate_or_empty() == request.reference_or_empty() {
            1.0
        } else {
            0.5
        };
        Ok(match self.0 {
            MetricKind::BertScore => MetricScore::Prf {
                precision: value,
                recall: value,
                f1: value,
            },
            _ => MetricScore::scalar(value),
        })
    }
}

/// Model loader that counts load attempts and can fail on demand.
#[derive(Default)]
pub struct StubLoader {
    attempts: AtomicUsize,
    failures_left: AtomicUsize,
}

impl StubLoader {
    /// Creates a loader whose first `n` load attempts fail.
    pub fn failing(n: usize) -> Self {
        Self {
            attempts: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(n),
        }
    }

    /// Number of load attempts so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn attempt(&self) -> Result<(), LoadError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            Err(LoadError::fetch("stub download failed"))
        } else {
            Ok(())
        }
    }
}

impl ModelLoader for StubLoader {
    fn nllb(&self, _variant: NllbVariant) -> Result<Arc<dyn LocalTranslator>, LoadError> {
        self.attempt()?;
        Ok(Arc::new(TaggingTranslator))
    }

    fn opus(&self, _src: &str, _tgt: &str) -> Result<Arc<dyn LocalTranslator>, LoadError> {
        self.attempt()?;
        Ok(Arc::new(TaggingTranslator))
    }

    fn scorer(&self, kind: MetricKind) -> Result<Arc<dyn Scorer>, LoadError> {
        self.attempt()?;
        Ok(Arc::new(MatchScorer(kind)))
    }

    fn capability(&self) -> Capability {
        Capability::Available
    }

    fn device(&self) -> Device {
        Device::Cpu
    }
}

/// Builds a router over `loader` and `remote`, with Argos packages and static
/// assets under `root`.
pub fn app(root: &Path, loader: Arc<StubLoader>, remote: ProviderRegistry) -> Router {
    let engines = Engines::new(remote, ArgosStore::new(root, None), loader);
    router(Arc::new(engines), Assets::new(root))
}

/// Writes an installed Argos package under `root`.
pub fn install_argos(root: &Path, from: &str, to: &str, phrases: &str) {
    let dir = root.join("argos/packages").join(format!("{from}-{to}"));
    std::fs::create_dir_all(&dir).expect("create package dir");
    std::fs::write(
        dir.join("metadata.json"),
        format!(r#"{{"from_code":"{from}","to_code":"{to}"}}"#),
    )
    .expect("write metadata");
    std::fs::write(dir.join("phrases.tsv"), phrases).expect("write phrases");
}

/// Sends a JSON POST and returns the status and parsed body.
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

/// Sends a GET and returns the status and parsed body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

/// Sends a GET and returns the status and raw body.
pub async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Sends `request` and parses the response body as JSON.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock upstream");
    });
    format!("http://{addr}")
}
