//! Capability probe results.

use serde::{Deserialize, Serialize};

/// Whether an engine family can be used in this process.
///
/// Serialized as `{"state": "available"}`, `{"state": "unavailable", "reason": ...}`
/// or `{"state": "error", "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Capability {
    /// The backing library is present and usable.
    Available,
    /// The backing library is not part of this build.
    Unavailable {
        /// Why the family cannot be used.
        reason: String,
    },
    /// The backing library is present but probing it failed.
    Error {
        /// The probe failure.
        message: String,
    },
}

impl Capability {
    /// Creates an [`Unavailable`](Self::Unavailable) capability.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error`](Self::Error) capability.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Returns `true` for [`Available`](Self::Available).
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}
