//! Compute device and capability probes.

use versio_engines::{Capability, Device};

/// Detects the best device available to ONNX Runtime.
///
/// Called on every model load and every health check, never cached.
#[must_use]
pub fn detect_device() -> Device {
    #[cfg(feature = "onnx")]
    {
        crate::onnx::detect_device()
    }

    #[cfg(not(feature = "onnx"))]
    {
        Device::Cpu
    }
}

/// Reports whether the neural families (NLLB, OPUS-MT, metrics) can run.
#[must_use]
pub fn neural_capability() -> Capability {
    if cfg!(feature = "onnx") {
        Capability::Available
    } else {
        Capability::unavailable("built without the onnx feature")
    }
}
