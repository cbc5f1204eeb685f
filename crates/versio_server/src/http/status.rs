//! Status and health reports.

use crate::context::Engines;
use serde::Serialize;
use std::collections::BTreeMap;
use versio_engines::metric::MetricKind;
use versio_engines::{Capability, Device};

const OPUS_PREFIX: &str = "opus-mt-";

/// Availability of one local translation family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyStatus {
    /// Whether the family can be used at all.
    pub installed: bool,
    /// Probe result; serialized flat as `state` plus `reason` or `message`.
    #[serde(flatten)]
    pub capability: Capability,
    /// Installed Argos pairs, `{from}-{to}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<String>>,
    /// OPUS-MT pairs loaded in this process, `{src}-{tgt}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_pairs: Option<Vec<String>>,
    /// NLLB variants loaded in this process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_variants: Option<Vec<String>>,
}

impl FamilyStatus {
    fn new(capability: Capability) -> Self {
        Self {
            installed: capability.is_available(),
            capability,
            pairs: None,
            loaded_pairs: None,
            loaded_variants: None,
        }
    }
}

/// Response of `GET /local/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalStatus {
    /// Argos phrase packages.
    pub argos: FamilyStatus,
    /// NLLB-200.
    pub nllb: FamilyStatus,
    /// OPUS-MT.
    pub opus: FamilyStatus,
}

impl LocalStatus {
    /// Probes every local family.
    #[must_use]
    pub fn probe(engines: &Engines) -> Self {
        let mut argos = FamilyStatus::new(engines.argos().capability());
        if argos.installed {
            argos.pairs = Some(engines.argos().installed_pairs());
        }

        let neural = engines.neural_capability();
        let mut nllb = FamilyStatus::new(neural.clone());
        let mut opus = FamilyStatus::new(neural);
        if nllb.installed {
            nllb.loaded_variants = Some(engines.loaded_translators("nllb-"));
            opus.loaded_pairs = Some(
                engines
                    .loaded_translators(OPUS_PREFIX)
                    .iter()
                    .filter_map(|id| id.strip_prefix(OPUS_PREFIX))
                    .map(str::to_string)
                    .collect(),
            );
        }

        Self { argos, nllb, opus }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    /// Always `ok` when the server answers.
    pub status: &'static str,
    /// Device neural engines run on.
    pub device: Device,
    /// Whether each metric scorer has been loaded, keyed by metric id.
    pub models_loaded: BTreeMap<&'static str, bool>,
}

impl Health {
    /// Reports device and metric load state.
    #[must_use]
    pub fn probe(engines: &Engines) -> Self {
        Self {
            status: "ok",
            device: engines.device(),
            models_loaded: MetricKind::ALL
                .into_iter()
                .map(|kind| (kind.id(), engines.is_metric_loaded(kind)))
                .collect(),
        }
    }
}
