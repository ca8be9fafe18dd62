//! Graph model: states, transitions and the two pseudo-states.
//!
//! States live in an insertion-ordered map keyed by id. Transitions live in
//! a sequence whose order is significant: it is the order in which the
//! selector considers them, so the first registered transition wins ties.

use super::condition::Condition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(Uuid);

impl StateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Stable identifier of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(Uuid);

impl TransitionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Source of a transition: a real state or one of the pseudo-states.
///
/// `Entry` and `AnyState` are constants, never stored in the state map.
/// Only `AnyState` and real states are considered when evaluating; `Entry`
/// exists for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Entry,
    AnyState,
    State(StateId),
}

impl Endpoint {
    pub fn state_id(&self) -> Option<StateId> {
        match self {
            Self::State(id) => Some(*id),
            Self::Entry | Self::AnyState => None,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        !matches!(self, Self::State(_))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => f.write_str("Entry"),
            Self::AnyState => f.write_str("Any State"),
            Self::State(id) => write!(f, "{id}"),
        }
    }
}

/// A node of the graph, named after the clip it plays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimState {
    pub id: StateId,
    pub name: String,
    pub is_default: bool,
}

/// A directed, conditioned edge.
///
/// The target is always a real state; a pseudo-state target cannot be
/// expressed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: TransitionId,
    pub from: Endpoint,
    pub to: StateId,
    pub conditions: Vec<Condition>,
    /// Blend duration in seconds, never negative.
    pub duration: f64,
    pub has_exit_time: bool,
}

impl Transition {
    pub fn new(from: Endpoint, to: StateId, duration: f64) -> Self {
        Self {
            id: TransitionId::new(),
            from,
            to,
            conditions: Vec::new(),
            duration: sanitize_duration(duration),
            has_exit_time: false,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == Endpoint::State(self.to)
    }

    /// Whether `state` is either end of this transition.
    pub fn touches(&self, state: StateId) -> bool {
        self.to == state || self.from == Endpoint::State(state)
    }
}

/// NaN and negative durations collapse to zero.
pub(crate) fn sanitize_duration(seconds: f64) -> f64 {
    if seconds.is_nan() || seconds < 0.0 {
        0.0
    } else {
        seconds
    }
}

/// The state machine graph.
///
/// Read access lives here; structural edits live in
/// [`mutator`](super::mutator) and keep the "exactly one default" invariant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateGraph {
    pub(crate) states: IndexMap<StateId, AnimState>,
    pub(crate) transitions: Vec<Transition>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: StateId) -> Option<&AnimState> {
        self.states.get(&id)
    }

    pub fn state_by_name(&self, name: &str) -> Option<&AnimState> {
        self.states.values().find(|s| s.name == name)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// States in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &AnimState> {
        self.states.values()
    }

    pub fn default_state(&self) -> Option<&AnimState> {
        self.states.values().find(|s| s.is_default)
    }

    pub fn default_count(&self) -> usize {
        self.states.values().filter(|s| s.is_default).count()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn transition(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.id == id)
    }

    /// Transitions in storage order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Outgoing transitions of `source`, in storage order.
    pub fn outgoing(&self, source: Endpoint) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.from == source)
    }

    pub(crate) fn transition_mut(&mut self, id: TransitionId) -> Option<&mut Transition> {
        self.transitions.iter_mut().find(|t| t.id == id)
    }
}
