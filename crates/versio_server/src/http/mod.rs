//! HTTP routes.
//!
//! | Route | Method | Handler |
//! |-------|--------|---------|
//! | `/translate/{provider}` | POST | translation dispatcher |
//! | `/bertscore`, `/comet`, `/comet-qe`, `/bleurt` | POST | metric dispatcher |
//! | `/batch` | POST | every metric over many pairs |
//! | `/local/status` | GET | local family availability |
//! | `/health` | GET | device and loaded metrics |
//! | `/`, `/translator.html`, `/synonyms.js`, `/{file}` | GET | static assets |
//!
//! Every failure is answered with `{"error": message}`, handler panics
//! included.

mod assets;
mod error;
mod handlers;
mod json;
mod status;

pub use assets::{Assets, PAGE, SYNONYMS};
pub use error::ApiError;
pub use json::ApiJson;
pub use status::{FamilyStatus, Health, LocalStatus};

use crate::context::Engines;
use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState {
    /// Engine caches and providers.
    pub engines: Arc<Engines>,
    /// Static files.
    pub assets: Assets,
}

/// Builds the router.
pub fn router(engines: Arc<Engines>, assets: Assets) -> Router {
    let files = ServeDir::new(assets.root()).not_found_service(assets::file_not_found.into_service());
    let state = Arc::new(AppState { engines, assets });

    Router::new()
        .route("/translate/:provider", post(handlers::translate))
        .route("/bertscore", post(handlers::bertscore))
        .route("/comet", post(handlers::comet))
        .route("/comet-qe", post(handlers::comet_qe))
        .route("/bleurt", post(handlers::bleurt))
        .route("/batch", post(handlers::batch))
        .route("/local/status", get(handlers::local_status))
        .route("/health", get(handlers::health))
        .route("/", get(handlers::page))
        .route("/translator.html", get(handlers::page))
        .route("/synonyms.js", get(handlers::synonyms))
        .fallback_service(files)
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
