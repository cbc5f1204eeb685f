//! Compute device selection.

use serde::{Deserialize, Serialize};

/// Compute device a model runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Host CPU.
    #[default]
    Cpu,
    /// NVIDIA GPU through CUDA.
    Cuda,
    /// Apple GPU. Reported as `mps` to match what frontends expect.
    #[serde(rename = "mps")]
    Metal,
}

impl Device {
    /// Returns the wire name of the device.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
            Self::Metal => "mps",
        }
    }

    /// Returns `true` for any device other than the CPU.
    #[must_use]
    pub fn is_accelerator(self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl core::fmt::Display for Device {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_display() {
        for device in [Device::Cpu, Device::Cuda, Device::Metal] {
            let json = serde_json::to_value(device).unwrap();
            assert_eq!(json, serde_json::Value::String(device.to_string()));
        }
    }

    #[test]
    fn default_is_cpu() {
        assert_eq!(Device::default(), Device::Cpu);
        assert!(!Device::Cpu.is_accelerator());
        assert!(Device::Metal.is_accelerator());
    }
}
