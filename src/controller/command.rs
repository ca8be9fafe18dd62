//! Message-passing mutation API.
//!
//! Every edit a collaborator can make is a [`Command`]. Applying one is a
//! single total operation on the controller, so commands can be queued from
//! any number of producers and drained between ticks.

use crate::controller::animator::AnimatorController;
use crate::core::{
    AnimationClip, ConditionId, ConditionOperator, DeleteOutcome, Endpoint, ParameterId,
    ParameterKind, RangeBound, StateId, TransitionId,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    LoadClips {
        clips: Vec<AnimationClip>,
    },
    AddState {
        name: String,
    },
    DeleteState {
        id: StateId,
    },
    SetDefault {
        id: StateId,
    },
    Connect {
        from: Endpoint,
        to: StateId,
    },
    RemoveTransition {
        id: TransitionId,
    },
    SetTransitionDuration {
        id: TransitionId,
        seconds: f64,
    },
    SetExitTime {
        id: TransitionId,
        enabled: bool,
    },
    AddCondition {
        transition: TransitionId,
    },
    SetConditionParameter {
        transition: TransitionId,
        condition: ConditionId,
        parameter: String,
    },
    SetConditionOperator {
        transition: TransitionId,
        condition: ConditionId,
        operator: ConditionOperator,
    },
    SetConditionValue {
        transition: TransitionId,
        condition: ConditionId,
        value: f64,
    },
    RemoveCondition {
        transition: TransitionId,
        condition: ConditionId,
    },
    AddParameter {
        kind: ParameterKind,
    },
    RenameParameter {
        id: ParameterId,
        name: String,
    },
    RemoveParameter {
        id: ParameterId,
    },
    SetFloat {
        id: ParameterId,
        value: f64,
    },
    SetBool {
        id: ParameterId,
        value: bool,
    },
    FireTrigger {
        id: ParameterId,
    },
    SetRange {
        id: ParameterId,
        bound: RangeBound,
        value: f64,
    },
    SetActive {
        name: Option<String>,
        blend_secs: f64,
    },
    SetPreview {
        clip: Option<String>,
    },
}

/// What applying a [`Command`] did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Applied,
    /// The command referred to something absent or was otherwise a no-op.
    Ignored,
    StateAdded(StateId),
    StateDeleted(DeleteOutcome),
    TransitionAdded(TransitionId),
    ConditionAdded(ConditionId),
    ParameterAdded(ParameterId),
}

impl CommandOutcome {
    fn from_applied(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            Self::Ignored | Self::StateDeleted(DeleteOutcome::NotFound(_))
        )
    }
}

impl AnimatorController {
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        trace!(?command, "applying command");
        match command {
            Command::LoadClips { clips } => match self.load_clips(clips) {
                Some(id) => CommandOutcome::StateAdded(id),
                None => CommandOutcome::Applied,
            },
            Command::AddState { name } => self
                .add_state(name)
                .map_or(CommandOutcome::Ignored, CommandOutcome::StateAdded),
            Command::DeleteState { id } => CommandOutcome::StateDeleted(self.delete_state(id)),
            Command::SetDefault { id } => CommandOutcome::from_applied(self.set_default(id)),
            Command::Connect { from, to } => self
                .connect(from, to)
                .map_or(CommandOutcome::Ignored, CommandOutcome::TransitionAdded),
            Command::RemoveTransition { id } => {
                CommandOutcome::from_applied(self.remove_transition(id))
            }
            Command::SetTransitionDuration { id, seconds } => {
                CommandOutcome::from_applied(self.set_transition_duration(id, seconds))
            }
            Command::SetExitTime { id, enabled } => {
                CommandOutcome::from_applied(self.set_exit_time(id, enabled))
            }
            Command::AddCondition { transition } => self
                .add_condition(transition)
                .map_or(CommandOutcome::Ignored, CommandOutcome::ConditionAdded),
            Command::SetConditionParameter {
                transition,
                condition,
                parameter,
            } => CommandOutcome::from_applied(self.set_condition_parameter(
                transition, condition, &parameter,
            )),
            Command::SetConditionOperator {
                transition,
                condition,
                operator,
            } => CommandOutcome::from_applied(
                self.set_condition_operator(transition, condition, operator),
            ),
            Command::SetConditionValue {
                transition,
                condition,
                value,
            } => CommandOutcome::from_applied(self.set_condition_value(transition, condition, value)),
            Command::RemoveCondition {
                transition,
                condition,
            } => CommandOutcome::from_applied(self.remove_condition(transition, condition)),
            Command::AddParameter { kind } => CommandOutcome::ParameterAdded(self.add_parameter(kind)),
            Command::RenameParameter { id, name } => {
                CommandOutcome::from_applied(self.rename_parameter(id, &name))
            }
            Command::RemoveParameter { id } => CommandOutcome::from_applied(self.remove_parameter(id)),
            Command::SetFloat { id, value } => CommandOutcome::from_applied(self.set_float(id, value)),
            Command::SetBool { id, value } => CommandOutcome::from_applied(self.set_bool(id, value)),
            Command::FireTrigger { id } => CommandOutcome::from_applied(self.fire_trigger(id)),
            Command::SetRange { id, bound, value } => {
                CommandOutcome::from_applied(self.set_range(id, bound, value))
            }
            Command::SetActive { name, blend_secs } => {
                self.set_active(name.as_deref(), blend_secs);
                CommandOutcome::Applied
            }
            Command::SetPreview { clip } => {
                self.set_preview(clip.as_deref());
                CommandOutcome::Applied
            }
        }
    }
}
