//! Checkpoint error types.

use crate::core::TransitionId;
use thiserror::Error;

/// Why a decoded checkpoint cannot back a controller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckpointViolation {
    #[error("{found} default states in a non-empty graph")]
    DefaultCount { found: usize },

    #[error("state name '{0}' appears twice")]
    DuplicateState(String),

    #[error("parameter name '{0}' appears twice")]
    DuplicateParameter(String),

    #[error("transition {0} points at a missing state")]
    DanglingTransition(TransitionId),

    #[error("float '{parameter}' holds {value} outside [{min}, {max}]")]
    FloatOutOfRange {
        parameter: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("active state '{0}' is neither a state nor a clip")]
    UnknownActive(String),
}

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint: {0}")]
    SerializationFailed(String),

    #[error("Could not decode checkpoint: {0}")]
    DeserializationFailed(String),

    #[error("Checkpoint format {found} is not readable (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Checkpoint rejected: {0}")]
    ValidationFailed(#[from] CheckpointViolation),
}
