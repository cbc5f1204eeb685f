//! Versio translation backend.
//!
//! # Usage
//!
//! ```bash
//! PORT=5000 versio
//! ```
//!
//! Settings come from the environment and an optional `.env` file; see
//! [`ServerConfig::from_lookup`] for the variables.

use std::process::ExitCode;
use versio_server::{LogConfig, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            LogConfig::default().init();
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    config.log.init();

    match versio_server::serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "server failed");
            ExitCode::FAILURE
        }
    }
}
