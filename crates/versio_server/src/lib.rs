//! HTTP backend for comparing machine-translation providers.
//!
//! Serves one JSON route per translation provider and per evaluation metric,
//! plus the static frontend. Local models and metric scorers are loaded on
//! first use and kept for the life of the process; see [`Engines`].
//!
//! # Example
//!
//! ```no_run
//! use versio_server::ServerConfig;
//!
//! # async fn start() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! config.log.init();
//! versio_server::serve(config).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
pub mod dispatch;
pub mod http;
mod logging;

pub use config::{ConfigError, DEFAULT_PORT, ServerConfig};
pub use context::{CatalogLoader, Engines, ModelLoader};
pub use http::{AppState, Assets, router};
pub use logging::{LogConfig, LogFormat};

use std::sync::Arc;

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns the I/O error if the address cannot be bound or the server fails.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let engines = Arc::new(Engines::from_config(&config));
    let assets = Assets::new(&config.root);

    tracing::info!(
        url = %format!("http://localhost:{}", config.port),
        device = %engines.device(),
        root = %config.root.display(),
        "Versio translation backend"
    );
    tracing::info!(
        translator_html = assets.has(http::PAGE),
        synonyms_js = assets.has(http::SYNONYMS),
        remote_providers = ?engines.remote().names(),
        "frontend assets"
    );

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!(addr = %config.addr(), "listening, press Ctrl+C to stop");

    axum::serve(listener, router(engines, assets))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for Ctrl-C");
        return;
    }
    tracing::info!("shutting down");
}
