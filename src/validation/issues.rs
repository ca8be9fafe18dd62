//! Graph issues reported by the validator.

use crate::core::{ConditionOperator, ParameterKind, TransitionId};
use thiserror::Error;

/// A structural problem in a graph.
///
/// None of these break evaluation: the affected condition or transition
/// simply never holds.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphIssue {
    #[error("Transition {transition} reads unknown parameter '{parameter}'")]
    UnknownParameter {
        transition: TransitionId,
        parameter: String,
    },

    #[error("Transition {transition} applies '{operator}' to {kind:?} parameter '{parameter}'")]
    OperatorMismatch {
        transition: TransitionId,
        parameter: String,
        operator: ConditionOperator,
        kind: ParameterKind,
    },

    #[error("Transition {transition} loops on state '{state}' and can never fire")]
    SelfLoop { transition: TransitionId, state: String },

    #[error("Expected exactly one default state, found {found}")]
    DefaultCount { found: usize },

    #[error("State '{state}' has no animation clip")]
    MissingClip { state: String },
}
