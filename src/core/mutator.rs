//! Structural edits on the graph.
//!
//! Every edit is total: it either applies completely or leaves the graph
//! untouched. After any sequence of edits a non-empty graph has exactly one
//! default state.

use super::condition::{Condition, ConditionId};
use super::graph::{sanitize_duration, AnimState, Endpoint, StateGraph, StateId, Transition, TransitionId};
use serde::{Deserialize, Serialize};

/// What a deletion requires of the active state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActiveChange {
    /// The active state survives the deletion.
    Unchanged,
    /// The active state must become this name (`None`: nothing plays).
    Activate(Option<String>),
}

/// Details of an applied deletion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteReport {
    pub state: AnimState,
    pub removed_transitions: usize,
    /// State promoted to default by this deletion, if any.
    pub promoted_default: Option<StateId>,
    pub active: ActiveChange,
}

/// Result of [`StateGraph::delete_state`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DeleteOutcome {
    Deleted(DeleteReport),
    /// The id was not in the graph; nothing changed.
    NotFound(StateId),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

impl StateGraph {
    /// Add a state named `name`, placed after the existing ones.
    ///
    /// Returns `None` if a state with that name already exists. The first
    /// state of an empty graph becomes the default.
    pub fn add_state(&mut self, name: impl Into<String>) -> Option<StateId> {
        let name = name.into();
        if self.state_by_name(&name).is_some() {
            return None;
        }
        let id = StateId::new();
        let is_default = self.states.is_empty();
        self.states.insert(
            id,
            AnimState {
                id,
                name,
                is_default,
            },
        );
        Some(id)
    }

    /// Delete a state and every transition touching it, restoring the
    /// default invariant and deciding what becomes active.
    ///
    /// `active` is the id of the currently active state, if any.
    pub fn delete_state(&mut self, id: StateId, active: Option<StateId>) -> DeleteOutcome {
        let Some(state) = self.states.shift_remove(&id) else {
            return DeleteOutcome::NotFound(id);
        };

        let before = self.transitions.len();
        self.transitions.retain(|t| !t.touches(id));
        let removed_transitions = before - self.transitions.len();

        let was_active = active == Some(id);
        let mut promoted_default = None;

        let active_change = if was_active && state.is_default {
            promoted_default = self.promote_first();
            ActiveChange::Activate(promoted_default.and_then(|p| self.name_of(p)))
        } else if was_active {
            ActiveChange::Activate(self.default_state().map(|s| s.name.clone()))
        } else {
            if state.is_default && self.default_state().is_none() {
                promoted_default = self.promote_first();
            }
            ActiveChange::Unchanged
        };

        DeleteOutcome::Deleted(DeleteReport {
            state,
            removed_transitions,
            promoted_default,
            active: active_change,
        })
    }

    fn promote_first(&mut self) -> Option<StateId> {
        let (id, state) = self.states.first_mut()?;
        state.is_default = true;
        Some(*id)
    }

    fn name_of(&self, id: StateId) -> Option<String> {
        self.state(id).map(|s| s.name.clone())
    }

    /// Make `id` the only default state. Returns `false` for unknown ids.
    pub fn set_default(&mut self, id: StateId) -> bool {
        if !self.states.contains_key(&id) {
            return false;
        }
        for state in self.states.values_mut() {
            state.is_default = state.id == id;
        }
        true
    }

    /// Append a transition from `from` to `to`.
    ///
    /// Refused for self connections, unknown targets and unknown source
    /// states.
    pub fn connect(&mut self, from: Endpoint, to: StateId, duration: f64) -> Option<TransitionId> {
        if from == Endpoint::State(to) || !self.contains(to) {
            return None;
        }
        if let Some(source) = from.state_id() {
            if !self.contains(source) {
                return None;
            }
        }
        let transition = Transition::new(from, to, duration);
        let id = transition.id;
        self.transitions.push(transition);
        Some(id)
    }

    /// Append an already built transition, checking its endpoints exist.
    pub fn push_transition(&mut self, transition: Transition) -> Option<TransitionId> {
        if !self.contains(transition.to) {
            return None;
        }
        if let Some(source) = transition.from.state_id() {
            if !self.contains(source) {
                return None;
            }
        }
        let id = transition.id;
        self.transitions.push(transition);
        Some(id)
    }

    pub fn remove_transition(&mut self, id: TransitionId) -> bool {
        let before = self.transitions.len();
        self.transitions.retain(|t| t.id != id);
        before != self.transitions.len()
    }

    pub fn set_transition_duration(&mut self, id: TransitionId, seconds: f64) -> bool {
        match self.transition_mut(id) {
            Some(t) => {
                t.duration = sanitize_duration(seconds);
                true
            }
            None => false,
        }
    }

    pub fn set_exit_time(&mut self, id: TransitionId, enabled: bool) -> bool {
        match self.transition_mut(id) {
            Some(t) => {
                t.has_exit_time = enabled;
                true
            }
            None => false,
        }
    }

    pub fn push_condition(&mut self, id: TransitionId, condition: Condition) -> Option<ConditionId> {
        let transition = self.transition_mut(id)?;
        let condition_id = condition.id;
        transition.conditions.push(condition);
        Some(condition_id)
    }

    /// Apply `edit` to one condition of a transition.
    pub fn update_condition<F>(&mut self, id: TransitionId, condition: ConditionId, edit: F) -> bool
    where
        F: FnOnce(&mut Condition),
    {
        let Some(target) = self
            .transition_mut(id)
            .and_then(|t| t.conditions.iter_mut().find(|c| c.id == condition))
        else {
            return false;
        };
        edit(target);
        true
    }

    pub fn remove_condition(&mut self, id: TransitionId, condition: ConditionId) -> bool {
        let Some(transition) = self.transition_mut(id) else {
            return false;
        };
        let before = transition.conditions.len();
        transition.conditions.retain(|c| c.id != condition);
        before != transition.conditions.len()
    }

    /// Point every condition reading `old` at `new`. Returns how many changed.
    pub fn rename_parameter_references(&mut self, old: &str, new: &str) -> usize {
        let mut renamed = 0;
        for condition in self
            .transitions
            .iter_mut()
            .flat_map(|t| t.conditions.iter_mut())
            .filter(|c| c.parameter == old)
        {
            condition.parameter = new.to_string();
            renamed += 1;
        }
        renamed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::condition::ConditionOperator;

    fn graph_with(names: &[&str]) -> (StateGraph, Vec<StateId>) {
        let mut graph = StateGraph::new();
        let ids = names
            .iter()
            .map(|name| graph.add_state(*name).unwrap())
            .collect();
        (graph, ids)
    }

    #[test]
    fn first_state_becomes_default() {
        let (graph, ids) = graph_with(&["Idle", "Run"]);
        assert!(graph.state(ids[0]).unwrap().is_default);
        assert!(!graph.state(ids[1]).unwrap().is_default);
        assert_eq!(graph.default_count(), 1);
    }

    #[test]
    fn add_state_ignores_duplicate_names() {
        let (mut graph, _) = graph_with(&["Idle"]);
        assert!(graph.add_state("Idle").is_none());
        assert_eq!(graph.state_count(), 1);
    }

    #[test]
    fn delete_removes_touching_transitions() {
        let (mut graph, ids) = graph_with(&["Idle", "Run", "Walk"]);
        graph.connect(Endpoint::State(ids[0]), ids[1], 0.5).unwrap();
        graph.connect(Endpoint::State(ids[1]), ids[2], 0.5).unwrap();
        graph.connect(Endpoint::AnyState, ids[1], 0.5).unwrap();
        let kept = graph.connect(Endpoint::State(ids[0]), ids[2], 0.5).unwrap();

        let DeleteOutcome::Deleted(report) = graph.delete_state(ids[1], Some(ids[0])) else {
            panic!("Expected deletion");
        };
        assert_eq!(report.removed_transitions, 3);
        assert_eq!(report.active, ActiveChange::Unchanged);
        assert_eq!(graph.transitions().len(), 1);
        assert_eq!(graph.transitions()[0].id, kept);
    }

    #[test]
    fn delete_active_default_promotes_first_remaining() {
        let (mut graph, ids) = graph_with(&["Idle", "Run", "Walk"]);

        let DeleteOutcome::Deleted(report) = graph.delete_state(ids[0], Some(ids[0])) else {
            panic!("Expected deletion");
        };
        assert_eq!(report.promoted_default, Some(ids[1]));
        assert_eq!(report.active, ActiveChange::Activate(Some("Run".to_string())));
        assert_eq!(graph.default_count(), 1);
        assert!(graph.state(ids[1]).unwrap().is_default);
    }

    #[test]
    fn delete_last_active_state_clears_active() {
        let (mut graph, ids) = graph_with(&["Idle"]);
        let DeleteOutcome::Deleted(report) = graph.delete_state(ids[0], Some(ids[0])) else {
            panic!("Expected deletion");
        };
        assert_eq!(report.active, ActiveChange::Activate(None));
        assert!(graph.is_empty());
    }

    #[test]
    fn delete_active_non_default_falls_back_to_default() {
        let (mut graph, ids) = graph_with(&["Idle", "Run"]);
        let DeleteOutcome::Deleted(report) = graph.delete_state(ids[1], Some(ids[1])) else {
            panic!("Expected deletion");
        };
        assert_eq!(report.active, ActiveChange::Activate(Some("Idle".to_string())));
        assert_eq!(report.promoted_default, None);
    }

    #[test]
    fn delete_default_non_active_promotes_without_touching_active() {
        let (mut graph, ids) = graph_with(&["Idle", "Run", "Walk"]);
        let DeleteOutcome::Deleted(report) = graph.delete_state(ids[0], Some(ids[2])) else {
            panic!("Expected deletion");
        };
        assert_eq!(report.active, ActiveChange::Unchanged);
        assert_eq!(report.promoted_default, Some(ids[1]));
        assert_eq!(graph.default_count(), 1);
    }

    #[test]
    fn delete_plain_state_changes_nothing_else() {
        let (mut graph, ids) = graph_with(&["Idle", "Run"]);
        let DeleteOutcome::Deleted(report) = graph.delete_state(ids[1], Some(ids[0])) else {
            panic!("Expected deletion");
        };
        assert_eq!(report.active, ActiveChange::Unchanged);
        assert_eq!(report.promoted_default, None);
        assert!(graph.state(ids[0]).unwrap().is_default);
    }

    #[test]
    fn delete_unknown_state_is_reported() {
        let (mut graph, _) = graph_with(&["Idle"]);
        let missing = StateId::new();
        assert_eq!(graph.delete_state(missing, None), DeleteOutcome::NotFound(missing));
        assert_eq!(graph.state_count(), 1);
    }

    #[test]
    fn set_default_is_exclusive() {
        let (mut graph, ids) = graph_with(&["Idle", "Run", "Walk"]);
        assert!(graph.set_default(ids[2]));
        assert_eq!(graph.default_state().unwrap().id, ids[2]);
        assert_eq!(graph.default_count(), 1);
        assert!(!graph.set_default(StateId::new()));
        assert_eq!(graph.default_state().unwrap().id, ids[2]);
    }

    #[test]
    fn connect_rejects_invalid_endpoints() {
        let (mut graph, ids) = graph_with(&["Idle", "Run"]);
        assert!(graph.connect(Endpoint::State(ids[0]), ids[0], 0.5).is_none());
        assert!(graph.connect(Endpoint::State(ids[0]), StateId::new(), 0.5).is_none());
        assert!(graph.connect(Endpoint::State(StateId::new()), ids[1], 0.5).is_none());
        assert!(graph.connect(Endpoint::Entry, ids[0], 0.5).is_some());
        assert!(graph.connect(Endpoint::AnyState, ids[1], 0.5).is_some());
    }

    #[test]
    fn transition_edits_apply_to_existing_ids_only() {
        let (mut graph, ids) = graph_with(&["Idle", "Run"]);
        let t = graph.connect(Endpoint::State(ids[0]), ids[1], 0.5).unwrap();

        assert!(graph.set_transition_duration(t, -3.0));
        assert_eq!(graph.transition(t).unwrap().duration, 0.0);
        assert!(graph.set_exit_time(t, true));
        assert!(graph.transition(t).unwrap().has_exit_time);

        let missing = TransitionId::new();
        assert!(!graph.set_exit_time(missing, true));
        assert!(!graph.remove_transition(missing));
        assert!(graph.remove_transition(t));
        assert!(graph.transitions().is_empty());
    }

    #[test]
    fn condition_edits_and_rename_propagation() {
        let (mut graph, ids) = graph_with(&["Idle", "Run"]);
        let t = graph.connect(Endpoint::State(ids[0]), ids[1], 0.5).unwrap();
        let c = graph
            .push_condition(t, Condition::new("speed", ConditionOperator::Greater, 0.1))
            .unwrap();

        assert!(graph.update_condition(t, c, |cond| cond.value = 0.5));
        assert_eq!(graph.transition(t).unwrap().conditions[0].value, 0.5);

        assert_eq!(graph.rename_parameter_references("speed", "velocity"), 1);
        assert_eq!(graph.transition(t).unwrap().conditions[0].parameter, "velocity");

        assert!(graph.remove_condition(t, c));
        assert!(!graph.remove_condition(t, c));
    }
}
