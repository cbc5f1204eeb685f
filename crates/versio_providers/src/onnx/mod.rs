//! ONNX Runtime, `tokenizers` and hf-hub glue behind the local engines.

pub(crate) mod hub;
mod metrics;
mod seq2seq;
mod session;
mod tokenizer;

pub(crate) use session::detect_device;

use self::metrics::{OnnxEncoder, OnnxEstimator, OnnxPairRegressor};
use self::seq2seq::OnnxSeq2Seq;
use self::session::OnnxSession;
use self::tokenizer::HfTokenizer;
use crate::catalog::{
    ESTIMATOR_FILES, ModelCatalog, ModelSource, SEQ2SEQ_FILES, SINGLE_GRAPH_FILES,
};
use crate::local::{GenerationConfig, MAX_LENGTH, PromptStyle, Seq2SeqTranslator};
use crate::metrics::{BertScorer, BleurtScorer, CometQeScorer, CometScorer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use versio_engines::LoadError;
use versio_engines::metric::{MetricKind, Scorer};

/// Loads an encoder-decoder translator.
pub(crate) fn load_seq2seq(
    source: &ModelSource,
    cache_dir: &Path,
    style: PromptStyle,
) -> Result<Seq2SeqTranslator, LoadError> {
    let device = detect_device();
    let [encoder, decoder, tokenizer, config] = resolve(source, &SEQ2SEQ_FILES, cache_dir)?;

    let config: GenerationConfig = std::fs::read(&config)
        .map_err(|err| LoadError::model(format!("cannot read config.json: {err}")))
        .and_then(|bytes| {
            serde_json::from_slice(&bytes)
                .map_err(|err| LoadError::model(format!("invalid config.json: {err}")))
        })?;

    let backend = OnnxSeq2Seq {
        encoder: OnnxSession::load(&encoder, device)?,
        decoder: OnnxSession::load(&decoder, device)?,
    };
    let codec = HfTokenizer::load(&tokenizer, MAX_LENGTH)?;

    tracing::info!(%source, %device, ?style, "seq2seq model loaded");
    Ok(Seq2SeqTranslator::new(
        Box::new(backend),
        Box::new(codec),
        config,
        style,
    ))
}

/// Loads one metric checkpoint.
pub(crate) fn load_scorer(
    kind: MetricKind,
    checkpoint: &str,
    catalog: &ModelCatalog,
) -> Result<Arc<dyn Scorer>, LoadError> {
    let device = detect_device();
    let source = ModelSource::parse(checkpoint);
    let cache_dir = catalog.cache_dir.as_path();

    let scorer: Arc<dyn Scorer> = match kind {
        MetricKind::BertScore => {
            let [model, tokenizer] = resolve(&source, &SINGLE_GRAPH_FILES, cache_dir)?;
            let encoder = OnnxEncoder {
                session: OnnxSession::load(&model, device)?,
                tokenizer: HfTokenizer::load(&tokenizer, MAX_LENGTH)?,
                output: "last_hidden_state",
                max_len: MAX_LENGTH,
            };
            Arc::new(BertScorer::new(Box::new(encoder), catalog.bertscore_baseline))
        }
        MetricKind::Comet => {
            let (encoder, estimator) = load_estimator_pair(&source, cache_dir, device)?;
            Arc::new(CometScorer::new(Box::new(encoder), Box::new(estimator)))
        }
        MetricKind::CometQe => {
            let (encoder, estimator) = load_estimator_pair(&source, cache_dir, device)?;
            if is_joint_checkpoint(checkpoint) {
                Arc::new(CometQeScorer::Joint {
                    encoder: Box::new(encoder),
                    estimator: Box::new(estimator),
                })
            } else {
                Arc::new(CometQeScorer::Split {
                    encoder: Box::new(encoder),
                    estimator: Box::new(estimator),
                })
            }
        }
        MetricKind::Bleurt => {
            let [model, tokenizer] = resolve(&source, &SINGLE_GRAPH_FILES, cache_dir)?;
            let regressor = OnnxPairRegressor {
                session: OnnxSession::load(&model, device)?,
                tokenizer: HfTokenizer::load(&tokenizer, MAX_LENGTH)?,
                seq_len: MAX_LENGTH,
            };
            Arc::new(BleurtScorer::new(Box::new(regressor)))
        }
    };

    tracing::info!(metric = kind.display_name(), %source, %device, "metric loaded");
    Ok(scorer)
}

/// Unified-metric checkpoints (`CometKiwi`) encode candidate and source as one
/// sequence; the older estimators encode them separately.
fn is_joint_checkpoint(checkpoint: &str) -> bool {
    checkpoint.to_ascii_lowercase().contains("kiwi")
}

fn load_estimator_pair(
    source: &ModelSource,
    cache_dir: &Path,
    device: versio_engines::Device,
) -> Result<(OnnxEncoder, OnnxEstimator), LoadError> {
    let [encoder, estimator, tokenizer] = resolve(source, &ESTIMATOR_FILES, cache_dir)?;
    Ok((
        OnnxEncoder {
            session: OnnxSession::load(&encoder, device)?,
            tokenizer: HfTokenizer::load(&tokenizer, MAX_LENGTH)?,
            output: "embeddings",
            max_len: MAX_LENGTH,
        },
        OnnxEstimator {
            session: OnnxSession::load(&estimator, device)?,
        },
    ))
}

fn resolve<const N: usize>(
    source: &ModelSource,
    files: &[&str; N],
    cache_dir: &Path,
) -> Result<[PathBuf; N], LoadError> {
    source
        .resolve(files, cache_dir)?
        .try_into()
        .map_err(|_| LoadError::fetch(format!("{source}: incomplete file set")))
}
