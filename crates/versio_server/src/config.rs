//! Server configuration from environment variables.

use crate::logging::{LogConfig, LogFormat};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use versio_providers::{ModelCatalog, RemoteEndpoints};

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Error building a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The working directory could not be determined.
    #[error("cannot determine the current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Application root. Static assets are served from here.
    pub root: PathBuf,
    /// Directory Argos packages are installed under.
    pub data_dir: PathBuf,
    /// Argos package index. `None` disables refresh and install.
    pub argos_index_url: Option<String>,
    /// Remote API endpoints.
    pub endpoints: RemoteEndpoints,
    /// Local model sources and the download cache directory.
    pub catalog: ModelCatalog,
    /// Logging setup.
    pub log: LogConfig,
}

impl ServerConfig {
    /// Creates a configuration rooted at `root` with every other setting at
    /// its default.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_dir: root.clone(),
            argos_index_url: None,
            endpoints: RemoteEndpoints::default(),
            catalog: ModelCatalog {
                cache_dir: root.join("hf_cache"),
                ..ModelCatalog::default()
            },
            log: LogConfig::default(),
            root,
        }
    }

    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable cannot be parsed or the
    /// current directory is needed and unavailable.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns a variable's value.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let root = match var("VERSIO_ROOT") {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir()?,
        };
        let mut config = Self::with_root(root);

        if let Some(host) = var("VERSIO_HOST") {
            config.host = parse("VERSIO_HOST", &host)?;
        }
        if let Some(port) = var("PORT") {
            config.port = parse("PORT", &port)?;
        }
        if let Some(dir) = var("VERSIO_CACHE_DIR") {
            config.catalog.cache_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var("VERSIO_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.argos_index_url = var("VERSIO_ARGOS_INDEX_URL");

        let endpoints = &mut config.endpoints;
        for (name, slot) in [
            ("ANTHROPIC_API_URL", &mut endpoints.anthropic),
            ("OPENAI_API_URL", &mut endpoints.openai),
            ("DEEPSEEK_API_URL", &mut endpoints.deepseek),
            ("DEEPL_FREE_API_URL", &mut endpoints.deepl_free),
            ("DEEPL_PRO_API_URL", &mut endpoints.deepl_pro),
        ] {
            if let Some(url) = var(name) {
                *slot = url;
            }
        }

        let catalog = &mut config.catalog;
        for (name, slot) in [
            ("VERSIO_NLLB_600M_REPO", &mut catalog.nllb_600m),
            ("VERSIO_NLLB_1_3B_REPO", &mut catalog.nllb_1_3b),
            ("VERSIO_NLLB_3_3B_REPO", &mut catalog.nllb_3_3b),
            ("VERSIO_OPUS_REPO_TEMPLATE", &mut catalog.opus_template),
            ("VERSIO_BERTSCORE_REPO", &mut catalog.bertscore),
            ("VERSIO_COMET_REPO", &mut catalog.comet),
            ("VERSIO_BLEURT_REPO", &mut catalog.bleurt),
        ] {
            if let Some(repo) = var(name) {
                *slot = repo;
            }
        }
        if let Some(repos) = var("VERSIO_COMET_QE_REPOS") {
            catalog.comet_qe = repos
                .split(',')
                .map(str::trim)
                .filter(|repo| !repo.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(directive) = var("VERSIO_LOG").or_else(|| var("RUST_LOG")) {
            config.log = config.log.with_env_filter(directive);
        }
        if let Some(format) = var("VERSIO_LOG_FORMAT") {
            let format = LogFormat::parse(&format).ok_or(ConfigError::Invalid {
                name: "VERSIO_LOG_FORMAT",
                value: format,
            })?;
            config.log = config.log.with_format(format);
        }

        Ok(config)
    }

    /// Returns the socket address to bind.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T: core::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_live_under_the_root() {
        let config = ServerConfig::from_lookup(lookup(&[("VERSIO_ROOT", "/srv/versio")])).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.root, PathBuf::from("/srv/versio"));
        assert_eq!(config.data_dir, PathBuf::from("/srv/versio"));
        assert_eq!(config.catalog.cache_dir, PathBuf::from("/srv/versio/hf_cache"));
        assert!(config.argos_index_url.is_none());
        assert_eq!(config.endpoints, RemoteEndpoints::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("VERSIO_ROOT", "/srv/versio"),
            ("PORT", "8080"),
            ("VERSIO_HOST", "127.0.0.1"),
            ("VERSIO_CACHE_DIR", "/var/cache/models"),
            ("VERSIO_ARGOS_INDEX_URL", "http://localhost:9000/index.json"),
            ("DEEPL_FREE_API_URL", "http://localhost:9000/free"),
            ("VERSIO_COMET_QE_REPOS", "a/kiwi, b/qe ,"),
            ("VERSIO_LOG_FORMAT", "json"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.catalog.cache_dir, PathBuf::from("/var/cache/models"));
        assert_eq!(
            config.argos_index_url.as_deref(),
            Some("http://localhost:9000/index.json")
        );
        assert_eq!(config.endpoints.deepl_free, "http://localhost:9000/free");
        assert_eq!(config.catalog.comet_qe, vec!["a/kiwi", "b/qe"]);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn versio_log_wins_over_rust_log() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("VERSIO_ROOT", "/srv"),
            ("VERSIO_LOG", "versio_server=trace"),
            ("RUST_LOG", "warn"),
        ]))
        .unwrap();

        assert_eq!(config.log.env_filter.as_deref(), Some("versio_server=trace"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config =
            ServerConfig::from_lookup(lookup(&[("VERSIO_ROOT", "/srv"), ("PORT", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("VERSIO_ROOT", "/srv"), ("PORT", "http")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for PORT: \"http\"");
    }

    #[test]
    fn bad_log_format_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("VERSIO_ROOT", "/srv"),
            ("VERSIO_LOG_FORMAT", "xml"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "VERSIO_LOG_FORMAT",
                ..
            }
        ));
    }
}
