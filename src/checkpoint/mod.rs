//! Checkpoint and restore for animator controllers.
//!
//! A checkpoint captures everything needed to rebuild a controller: the
//! graph, the parameters, the clip library, the active state name and the
//! fired-transition history. Sinks and the transient fired marker are not
//! captured. Checkpoints encode as JSON for inspection and bincode for size.

use crate::config::ControllerConfig;
use crate::controller::AnimatorController;
use crate::core::{ClipLibrary, ParameterStore, ParameterValue, StateGraph, TransitionHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, CheckpointViolation};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of controller state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub graph: StateGraph,

    pub parameters: ParameterStore,

    pub clips: ClipLibrary,

    /// Name of the active state (`None`: nothing playing)
    pub active_state: Option<String>,

    /// Fired transitions, oldest first
    pub history: TransitionHistory,
}

impl ControllerCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse a JSON checkpoint and validate it.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode a binary checkpoint and validate it.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Check the version and the structural invariants a controller relies on.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let found = self.graph.default_count();
        if !self.graph.is_empty() && found != 1 {
            return Err(CheckpointViolation::DefaultCount { found }.into());
        }

        let mut names = HashSet::new();
        if let Some(duplicate) = self.graph.states().find(|s| !names.insert(s.name.as_str())) {
            return Err(CheckpointViolation::DuplicateState(duplicate.name.clone()).into());
        }

        let mut names = HashSet::new();
        for parameter in self.parameters.iter() {
            if !names.insert(parameter.name.as_str()) {
                return Err(CheckpointViolation::DuplicateParameter(parameter.name.clone()).into());
            }
            if let ParameterValue::Float { value, min, max } = parameter.value {
                if !parameter.value.in_range() {
                    return Err(CheckpointViolation::FloatOutOfRange {
                        parameter: parameter.name.clone(),
                        value,
                        min,
                        max,
                    }
                    .into());
                }
            }
        }

        for transition in self.graph.transitions() {
            let source_known = transition
                .from
                .state_id()
                .map_or(true, |id| self.graph.contains(id));
            if !source_known || !self.graph.contains(transition.to) {
                return Err(CheckpointViolation::DanglingTransition(transition.id).into());
            }
        }

        if let Some(active) = &self.active_state {
            let known =
                self.graph.state_by_name(active).is_some() || self.clips.get(active).is_some();
            if !known {
                return Err(CheckpointViolation::UnknownActive(active.clone()).into());
            }
        }

        Ok(())
    }
}

impl AnimatorController {
    /// Capture the controller's current state.
    pub fn checkpoint(&self) -> ControllerCheckpoint {
        ControllerCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            graph: self.graph.clone(),
            parameters: self.parameters.clone(),
            clips: self.clips.clone(),
            active_state: self.state.active_name().map(str::to_string),
            history: self.history.clone(),
        }
    }

    /// Rebuild a controller from a checkpoint.
    ///
    /// The active state is re-entered now, so exit-time clocks restart.
    pub fn restore(
        checkpoint: ControllerCheckpoint,
        config: ControllerConfig,
    ) -> Result<Self, CheckpointError> {
        if let Err(error) = checkpoint.validate() {
            warn!(checkpoint = %checkpoint.id, %error, "rejecting checkpoint");
            return Err(error);
        }

        let mut controller = Self::new(config);
        controller.graph = checkpoint.graph;
        controller.parameters = checkpoint.parameters;
        controller.clips = checkpoint.clips;
        controller.history = checkpoint.history.with_limit(controller.config.history_limit);

        let blend = controller.config.default_blend_secs;
        controller.set_active_at(checkpoint.active_state.as_deref(), blend, Utc::now());

        info!(
            checkpoint = %checkpoint.id,
            states = controller.graph.state_count(),
            "controller restored from checkpoint"
        );
        Ok(controller)
    }
}
