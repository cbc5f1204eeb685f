//! Where model files come from.

use std::path::{Path, PathBuf};
use versio_engines::LoadError;
use versio_engines::metric::MetricKind;

/// Files of an encoder-decoder translator (NLLB, OPUS-MT).
pub const SEQ2SEQ_FILES: [&str; 4] = [
    "onnx/encoder_model.onnx",
    "onnx/decoder_model.onnx",
    "tokenizer.json",
    "config.json",
];

/// Files of a single-graph metric: the BERTScore encoder or the BLEURT
/// regressor.
pub const SINGLE_GRAPH_FILES: [&str; 2] = ["onnx/model.onnx", "tokenizer.json"];

/// Files of a COMET-family metric: sentence encoder plus regression head.
pub const ESTIMATOR_FILES: [&str; 3] = ["onnx/encoder.onnx", "onnx/estimator.onnx", "tokenizer.json"];

/// Returns the files a source for metric `kind` must provide.
#[must_use]
pub fn metric_files(kind: MetricKind) -> &'static [&'static str] {
    match kind {
        MetricKind::BertScore | MetricKind::Bleurt => &SINGLE_GRAPH_FILES,
        MetricKind::Comet | MetricKind::CometQe => &ESTIMATOR_FILES,
    }
}

/// A model location: a Hugging Face repository or a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A Hugging Face repository id, fetched into the cache directory.
    Hub(String),
    /// A directory already holding the model files.
    Local(PathBuf),
}

impl ModelSource {
    /// Interprets `value` as a directory if one exists at that path,
    /// otherwise as a repository id.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let path = Path::new(value);
        if path.is_dir() {
            Self::Local(path.to_path_buf())
        } else {
            Self::Hub(value.to_string())
        }
    }

    /// Returns local paths for `files`, downloading them if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] if a local file is missing or a download
    /// fails, and [`LoadError::Unavailable`] for repository sources in builds
    /// without the `onnx` feature.
    pub fn resolve(&self, files: &[&str], cache_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        match self {
            Self::Local(dir) => files
                .iter()
                .map(|file| {
                    let path = dir.join(file);
                    if path.is_file() {
                        Ok(path)
                    } else {
                        Err(LoadError::fetch(format!("{} is missing", path.display())))
                    }
                })
                .collect(),
            Self::Hub(repo) => fetch_from_hub(repo, files, cache_dir),
        }
    }
}

impl core::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Hub(repo) => f.write_str(repo),
            Self::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[cfg(feature = "onnx")]
fn fetch_from_hub(repo: &str, files: &[&str], cache_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    crate::onnx::hub::fetch(repo, files, cache_dir)
}

#[cfg(not(feature = "onnx"))]
fn fetch_from_hub(repo: &str, _files: &[&str], _cache_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    Err(LoadError::unavailable(format!(
        "cannot fetch {repo}: built without the onnx feature"
    )))
}

/// Model sources for every local engine.
///
/// Each entry is either a Hugging Face repository id or a local directory
/// holding an ONNX export of the model, laid out as [`SEQ2SEQ_FILES`] or
/// [`metric_files`] describe.
///
/// The default NLLB, OPUS-MT and BERTScore repositories publish ONNX exports
/// in that layout. The default COMET, COMET-QE and BLEURT repositories name
/// the upstream checkpoints, which are published as PyTorch weights only. Those
/// metrics load once the entry points at a directory holding an export.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCatalog {
    /// Directory downloaded model files are cached in.
    pub cache_dir: PathBuf,
    /// NLLB-200 distilled 600M.
    pub nllb_600m: String,
    /// NLLB-200 distilled 1.3B.
    pub nllb_1_3b: String,
    /// NLLB-200 3.3B.
    pub nllb_3_3b: String,
    /// OPUS-MT repository template; `{src}` and `{tgt}` are replaced by the
    /// language codes.
    pub opus_template: String,
    /// BERTScore encoder.
    pub bertscore: String,
    /// Baseline subtracted when rescaling BERTScore values.
    pub bertscore_baseline: f32,
    /// COMET estimator.
    pub comet: String,
    /// COMET-QE checkpoints, tried in order.
    pub comet_qe: Vec<String>,
    /// BLEURT regressor.
    pub bleurt: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("hf_cache"),
            nllb_600m: "Xenova/nllb-200-distilled-600M".to_string(),
            nllb_1_3b: "Xenova/nllb-200-distilled-1.3B".to_string(),
            nllb_3_3b: "Xenova/nllb-200-3.3B".to_string(),
            opus_template: "Xenova/opus-mt-{src}-{tgt}".to_string(),
            bertscore: "Xenova/roberta-large".to_string(),
            bertscore_baseline: 0.83,
            comet: "Unbabel/wmt22-comet-da".to_string(),
            comet_qe: vec![
                "Unbabel/wmt22-cometkiwi-da".to_string(),
                "Unbabel/wmt20-comet-qe-da".to_string(),
            ],
            bleurt: "lucadiliello/BLEURT-20".to_string(),
        }
    }
}

impl ModelCatalog {
    /// Returns the OPUS-MT source for a language pair.
    #[must_use]
    pub fn opus_source(&self, src: &str, tgt: &str) -> ModelSource {
        ModelSource::parse(
            &self
                .opus_template
                .replace("{src}", src)
                .replace("{tgt}", tgt),
        )
    }
}
