//! Build errors for controller and transition builders.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source not specified. Call .from_state(name), .from_any_state() or .from_entry()")]
    MissingFromState,

    #[error("Transition target not specified. Call .to(name)")]
    MissingToState,

    #[error("Unknown state '{0}'. Declare it with .state(name) first")]
    UnknownState(String),

    #[error("State '{0}' declared twice")]
    DuplicateState(String),

    #[error("Parameter '{0}' declared twice")]
    DuplicateParameter(String),

    #[error("Condition reads undeclared parameter '{0}'")]
    UnknownParameter(String),

    #[error("Default state '{0}' was never declared")]
    UnknownDefault(String),

    #[error("Transition from '{0}' to itself can never fire")]
    SelfConnection(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
