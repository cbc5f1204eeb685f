//! Argos package installation from a mock index.

mod common;

use axum::Router;
use axum::routing::get;
use common::spawn_upstream;
use serde_json::json;
use versio_engines::LoadError;
use versio_providers::argos::ArgosStore;

async fn index_server() -> String {
    let base_holder = std::sync::Arc::new(std::sync::OnceLock::<String>::new());
    let links = std::sync::Arc::clone(&base_holder);

    let router = Router::new()
        .route(
            "/index.json",
            get(move || {
                let base = links.get().cloned().unwrap_or_default();
                async move {
                    axum::Json(json!([
                        {
                            "from_code": "en",
                            "to_code": "fr",
                            "package_version": "1.0",
                            "links": [format!("{base}/missing.tsv"), format!("{base}/en-fr.tsv")]
                        },
                        {"from_code": "en", "to_code": "it", "links": []}
                    ]))
                }
            }),
        )
        .route("/en-fr.tsv", get(|| async { "hello\tbonjour\ngood evening\tbonsoir\n" }));

    let base = spawn_upstream(router).await;
    base_holder.set(base.clone()).expect("base set once");
    base
}

#[tokio::test]
async fn missing_pair_is_installed_from_index() {
    let base = index_server().await;
    let data = tempfile::tempdir().unwrap();
    let store = ArgosStore::new(data.path(), Some(format!("{base}/index.json")));

    assert!(store.installed_pairs().is_empty());

    let table = store.load("en", "fr").await.unwrap();
    assert_eq!(table.apply("Good evening, friend"), "Bonsoir, friend");
    assert_eq!(store.installed_pairs(), vec!["en-fr"]);

    let metadata: serde_json::Value = serde_json::from_slice(
        &std::fs::read(data.path().join("argos/packages/en-fr/metadata.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        metadata,
        json!({"from_code": "en", "to_code": "fr", "package_version": "1.0"})
    );
}

#[tokio::test]
async fn package_without_links_fails_to_install() {
    let base = index_server().await;
    let data = tempfile::tempdir().unwrap();
    let store = ArgosStore::new(data.path(), Some(format!("{base}/index.json")));

    let err = store.load("en", "it").await.unwrap_err();
    assert!(matches!(err, LoadError::Fetch(_)), "{err}");
    assert!(store.installed_pairs().is_empty());
}

#[tokio::test]
async fn pair_absent_from_index_is_unavailable() {
    let base = index_server().await;
    let data = tempfile::tempdir().unwrap();
    let store = ArgosStore::new(data.path(), Some(format!("{base}/index.json")));

    let err = store.load("fr", "en").await.unwrap_err();
    assert!(matches!(err, LoadError::Unavailable(_)), "{err}");
}
