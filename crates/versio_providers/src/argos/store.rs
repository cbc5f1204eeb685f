//! Installed package store and on-demand installation.

use super::index::PackageEntry;
use super::phrase_table::PhraseTable;
use crate::local::is_language_code;
use parking_lot::Mutex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use versio_engines::{Capability, LoadError};

const METADATA_FILE: &str = "metadata.json";
const PHRASES_FILE: &str = "phrases.tsv";
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Returns the engine id of the Argos package for a language pair.
#[must_use]
pub fn argos_id(from: &str, to: &str) -> String {
    format!("argos-{from}-{to}")
}

/// Returns the directory name a package for `from`-`to` is installed under,
/// or `None` unless both codes are non-empty ASCII alphanumeric.
#[must_use]
pub fn package_dir_name(from: &str, to: &str) -> Option<String> {
    (is_language_code(from) && is_language_code(to)).then(|| format!("{from}-{to}"))
}

/// Argos packages on disk plus the remote index they are installed from.
pub struct ArgosStore {
    packages_dir: PathBuf,
    index_url: Option<String>,
    client: reqwest::Client,
    index: Mutex<Vec<PackageEntry>>,
}

impl core::fmt::Debug for ArgosStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArgosStore")
            .field("packages_dir", &self.packages_dir)
            .field("index_url", &self.index_url)
            .field("indexed_packages", &self.index.lock().len())
            .finish_non_exhaustive()
    }
}

impl ArgosStore {
    /// Creates a store keeping packages under `<data_dir>/argos/packages`.
    ///
    /// Without an `index_url` no package can be installed; only packages
    /// already on disk are used.
    #[must_use]
    pub fn new(data_dir: &Path, index_url: Option<String>) -> Self {
        Self {
            packages_dir: data_dir.join("argos").join("packages"),
            index_url,
            client: reqwest::Client::new(),
            index: Mutex::new(Vec::new()),
        }
    }

    /// Directory holding one subdirectory per installed package.
    #[must_use]
    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }

    /// Reports whether the package directory can be read.
    ///
    /// A missing directory is fine: it is created by the first install.
    #[must_use]
    pub fn capability(&self) -> Capability {
        match std::fs::read_dir(&self.packages_dir) {
            Ok(_) => Capability::Available,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Capability::Available,
            Err(err) => Capability::error(format!(
                "cannot read {}: {err}",
                self.packages_dir.display()
            )),
        }
    }

    /// Lists `{from}-{to}` for every installed package, sorted.
    ///
    /// A directory counts only if [`load`](Self::load) would use it: its name
    /// is the pair's [`package_dir_name`] and its metadata serves that pair.
    #[must_use]
    pub fn installed_pairs(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.packages_dir) else {
            return Vec::new();
        };

        let mut pairs: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let (from, to) = name.split_once('-')?;
                self.installed_dir(from, to).map(|_| name.clone())
            })
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    /// Fetches the package index. Failures are logged and swallowed.
    pub async fn refresh_index(&self) {
        let Some(url) = self.index_url.as_deref() else {
            tracing::debug!("argos index url not configured, skipping refresh");
            return;
        };

        match self.fetch_index(url).await {
            Ok(entries) => {
                tracing::debug!(packages = entries.len(), "argos index refreshed");
                *self.index.lock() = entries;
            }
            Err(err) => tracing::warn!(url, error = %err, "argos index refresh failed"),
        }
    }

    async fn fetch_index(&self, url: &str) -> Result<Vec<PackageEntry>, reqwest::Error> {
        self.client
            .get(url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Loads the phrase table for a pair, installing it from the index if
    /// it is not on disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Unavailable`] if no package exists for the pair,
    /// [`LoadError::Fetch`] if installation fails, and [`LoadError::Model`]
    /// if the package files cannot be read.
    pub async fn load(&self, from: &str, to: &str) -> Result<Arc<PhraseTable>, LoadError> {
        if package_dir_name(from, to).is_none() {
            return Err(LoadError::unavailable(format!(
                "invalid language pair {from:?}-{to:?}"
            )));
        }
        self.refresh_index().await;

        if let Some(dir) = self.installed_dir(from, to) {
            return read_package(&dir).await.map(Arc::new);
        }

        let entry = self
            .index
            .lock()
            .iter()
            .find(|entry| entry.serves(from, to))
            .cloned()
            .ok_or_else(|| LoadError::unavailable(format!("no package for {from}-{to}")))?;

        tracing::info!(pair = %entry.pair(), "installing argos package");
        let dir = self.install(&entry).await?;
        read_package(&dir).await.map(Arc::new)
    }

    fn installed_dir(&self, from: &str, to: &str) -> Option<PathBuf> {
        let dir = self.packages_dir.join(package_dir_name(from, to)?);
        read_metadata(&dir)
            .ok()
            .filter(|metadata| metadata.serves(from, to))
            .map(|_| dir)
    }

    async fn install(&self, entry: &PackageEntry) -> Result<PathBuf, LoadError> {
        let name = package_dir_name(&entry.from_code, &entry.to_code).ok_or_else(|| {
            LoadError::fetch(format!("index lists an invalid pair {:?}", entry.pair()))
        })?;
        let phrases = self.download(entry).await?;

        let dir = self.packages_dir.join(name);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| LoadError::fetch(format!("cannot create {}: {err}", dir.display())))?;

        let metadata = PackageEntry {
            links: Vec::new(),
            ..entry.clone()
        };
        let metadata = serde_json::to_vec_pretty(&metadata)
            .map_err(|err| LoadError::fetch(err.to_string()))?;

        // Phrases first: a directory is only considered installed once
        // metadata.json exists.
        tokio::fs::write(dir.join(PHRASES_FILE), phrases)
            .await
            .map_err(|err| LoadError::fetch(err.to_string()))?;
        tokio::fs::write(dir.join(METADATA_FILE), metadata)
            .await
            .map_err(|err| LoadError::fetch(err.to_string()))?;

        Ok(dir)
    }

    async fn download(&self, entry: &PackageEntry) -> Result<String, LoadError> {
        let mut last_error = format!("package {} has no download links", entry.pair());

        for link in &entry.links {
            let response = self
                .client
                .get(link)
                .timeout(FETCH_TIMEOUT)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status);

            match response {
                Ok(response) => match response.text().await {
                    Ok(body) => return Ok(body),
                    Err(err) => last_error = err.to_string(),
                },
                Err(err) => {
                    tracing::warn!(link, error = %err, "argos package download failed");
                    last_error = err.to_string();
                }
            }
        }

        Err(LoadError::fetch(last_error))
    }
}

fn read_metadata(dir: &Path) -> Result<PackageEntry, LoadError> {
    let path = dir.join(METADATA_FILE);
    let bytes = std::fs::read(&path)
        .map_err(|err| LoadError::model(format!("cannot read {}: {err}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| LoadError::model(format!("invalid {}: {err}", path.display())))
}

async fn read_package(dir: &Path) -> Result<PhraseTable, LoadError> {
    let path = dir.join(PHRASES_FILE);
    let tsv = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| LoadError::model(format!("cannot read {}: {err}", path.display())))?;
    Ok(PhraseTable::parse(&tsv))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install_fixture(data_dir: &Path, from: &str, to: &str, phrases: &str) {
        let dir = data_dir.join("argos/packages").join(format!("{from}-{to}"));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(METADATA_FILE),
            format!(r#"{{"from_code":"{from}","to_code":"{to}"}}"#),
        )
        .unwrap();
        std::fs::write(dir.join(PHRASES_FILE), phrases).unwrap();
    }

    #[test]
    fn installed_pairs_are_listed_sorted() {
        let data = tempfile::tempdir().unwrap();
        install_fixture(data.path(), "en", "es", "hello\thola\n");
        install_fixture(data.path(), "de", "en", "hallo\thello\n");
        std::fs::create_dir_all(data.path().join("argos/packages/broken")).unwrap();

        let store = ArgosStore::new(data.path(), None);
        assert_eq!(store.installed_pairs(), vec!["de-en", "en-es"]);
    }

    #[test]
    fn mismatched_directories_are_not_listed() {
        let data = tempfile::tempdir().unwrap();
        install_fixture(data.path(), "en", "es", "hello\thola\n");
        let packages = data.path().join("argos/packages");
        std::fs::rename(packages.join("en-es"), packages.join("renamed")).unwrap();
        install_fixture(data.path(), "de", "en", "hallo\thello\n");
        std::fs::rename(packages.join("de-en"), packages.join("fr-en")).unwrap();

        let store = ArgosStore::new(data.path(), None);
        assert!(store.installed_pairs().is_empty());
    }

    #[test]
    fn language_codes_must_be_alphanumeric() {
        assert_eq!(package_dir_name("en", "zh").as_deref(), Some("en-zh"));
        assert_eq!(package_dir_name("en", "pt2").as_deref(), Some("en-pt2"));
        for (from, to) in [("..", "en"), ("en", "../de"), ("", "de"), ("en", "d e"), ("é", "en")] {
            assert_eq!(package_dir_name(from, to), None, "{from}-{to}");
        }
    }

    #[tokio::test]
    async fn codes_cannot_reach_outside_the_package_dir() {
        let data = tempfile::tempdir().unwrap();
        install_fixture(data.path(), "en", "de", "hello\thallo\n");
        let escape = "de/../../../outside";
        let outside = data.path().join("outside");
        std::fs::create_dir_all(&outside).unwrap();
        std::fs::write(
            outside.join(METADATA_FILE),
            format!(r#"{{"from_code":"en","to_code":"{escape}"}}"#),
        )
        .unwrap();
        std::fs::write(outside.join(PHRASES_FILE), "hello\tsecret\n").unwrap();

        let store = ArgosStore::new(data.path(), None);
        let err = store.load("en", escape).await.unwrap_err();
        assert!(matches!(err, LoadError::Unavailable(_)));
        assert_eq!(store.installed_pairs(), vec!["en-de"]);
    }

    #[test]
    fn missing_directory_is_available_and_empty() {
        let data = tempfile::tempdir().unwrap();
        let store = ArgosStore::new(&data.path().join("nowhere"), None);

        assert!(store.capability().is_available());
        assert!(store.installed_pairs().is_empty());
    }

    #[tokio::test]
    async fn installed_package_loads_without_index() {
        let data = tempfile::tempdir().unwrap();
        install_fixture(data.path(), "en", "es", "hello\thola\nworld\tmundo\n");

        let store = ArgosStore::new(data.path(), None);
        let table = store.load("en", "es").await.unwrap();
        assert_eq!(table.apply("Hello world"), "Hola mundo");
    }

    #[tokio::test]
    async fn unknown_pair_is_unavailable() {
        let data = tempfile::tempdir().unwrap();
        let store = ArgosStore::new(data.path(), None);

        let err = store.load("en", "xx").await.unwrap_err();
        assert!(matches!(err, LoadError::Unavailable(_)));
    }

    #[tokio::test]
    async fn unreachable_index_is_swallowed() {
        let data = tempfile::tempdir().unwrap();
        install_fixture(data.path(), "en", "de", "hello\thallo\n");

        let store = ArgosStore::new(data.path(), Some("http://127.0.0.1:9/index.json".to_string()));
        let table = store.load("en", "de").await.unwrap();
        assert_eq!(table.apply("hello"), "hallo");
    }

    #[test]
    fn ids_name_the_pair() {
        assert_eq!(argos_id("en", "de"), "argos-en-de");
    }
}
