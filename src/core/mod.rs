//! Core animation state machine model and logic.
//!
//! This module contains the pure parts of the state machine:
//! - Typed parameters and the store that owns them
//! - Conditions and their fail-closed evaluation
//! - The graph of states and transitions, and its invariant-preserving edits
//! - Per-tick transition selection
//! - Immutable history of fired transitions
//!
//! Nothing here performs I/O or reads the clock; time enters as arguments.

mod clip;
mod condition;
mod graph;
mod history;
mod mutator;
mod parameter;
mod selector;
mod store;

pub use clip::{AnimationClip, ClipLibrary};
pub use condition::{all_satisfied, evaluate, Condition, ConditionId, ConditionOperator};
pub use graph::{AnimState, Endpoint, StateGraph, StateId, Transition, TransitionId};
pub use history::{FiredTransition, TransitionHistory};
pub use mutator::{ActiveChange, DeleteOutcome, DeleteReport};
pub use parameter::{Parameter, ParameterId, ParameterKind, ParameterValue};
pub use selector::{select_transition, Selection, TickContext};
pub use store::{ParameterSnapshot, ParameterStore, RangeBound};
