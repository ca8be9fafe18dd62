//! The authoritative controller model.

use crate::config::ControllerConfig;
use crate::controller::sink::{ClipSink, NullSink};
use crate::controller::state::StateController;
use crate::core::{
    select_transition, ActiveChange, AnimState, AnimationClip, ClipLibrary, Condition,
    ConditionId, ConditionOperator, DeleteOutcome, Endpoint, FiredTransition, ParameterId,
    ParameterKind, ParameterStore, ParameterValue, RangeBound, StateGraph, StateId, TickContext,
    TransitionHistory, TransitionId,
};
use crate::validation::{validate_graph, GraphIssue};
use chrono::{DateTime, Utc};
use stillwater::validation::Validation;
use tracing::{debug, info, warn};

/// Short-lived note of the transition that fired last.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionMarker {
    pub transition: TransitionId,
    /// `None` when the expiry lies past the representable time range.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TransitionMarker {
    fn live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Single owner of the graph, the parameters and the active state.
///
/// Every mutation is a discrete, total operation: it applies completely or
/// not at all, so a tick never observes a half-applied edit. Edits and
/// ticks are expected on one logical thread; see [`crate::runtime`] for a
/// loop that serialises them.
pub struct AnimatorController {
    pub(crate) config: ControllerConfig,
    pub(crate) graph: StateGraph,
    pub(crate) parameters: ParameterStore,
    pub(crate) clips: ClipLibrary,
    pub(crate) state: StateController,
    pub(crate) history: TransitionHistory,
    marker: Option<TransitionMarker>,
    sink: Box<dyn ClipSink>,
    /// Last effective clip handed to the sink.
    rendered: Option<String>,
}

impl std::fmt::Debug for AnimatorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatorController")
            .field("graph", &self.graph)
            .field("parameters", &self.parameters)
            .field("active", &self.state.active())
            .field("preview", &self.state.preview())
            .finish_non_exhaustive()
    }
}

impl Default for AnimatorController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl AnimatorController {
    pub fn new(config: ControllerConfig) -> Self {
        let history = TransitionHistory::new(config.history_limit);
        Self {
            config,
            graph: StateGraph::new(),
            parameters: ParameterStore::new(),
            clips: ClipLibrary::default(),
            state: StateController::new(Utc::now()),
            history,
            marker: None,
            sink: Box::new(NullSink),
            rendered: None,
        }
    }

    /// Assemble a controller from prepared parts and activate the default state.
    pub(crate) fn from_parts(
        config: ControllerConfig,
        graph: StateGraph,
        parameters: ParameterStore,
        clips: ClipLibrary,
    ) -> Self {
        let mut controller = Self::new(config);
        controller.graph = graph;
        controller.parameters = parameters;
        controller.clips = clips;
        if let Some(name) = controller.graph.default_state().map(|s| s.name.clone()) {
            let blend = controller.config.default_blend_secs;
            controller.activate(Some(name), blend, Utc::now());
        }
        controller
    }

    /// Attach the renderer. The current effective clip is sent right away.
    pub fn with_sink(mut self, sink: impl ClipSink + 'static) -> Self {
        self.set_sink(Box::new(sink));
        self
    }

    pub fn set_sink(&mut self, sink: Box<dyn ClipSink>) {
        self.sink = sink;
        self.rendered = None;
        self.sync_sink();
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    pub fn active_state_name(&self) -> Option<&str> {
        self.state.active_name()
    }

    /// The state whose name is active, if the name resolves.
    pub fn active_state(&self) -> Option<&AnimState> {
        self.state
            .active_name()
            .and_then(|name| self.graph.state_by_name(name))
    }

    pub fn entered_at(&self) -> DateTime<Utc> {
        self.state.entered_at()
    }

    pub fn preview(&self) -> Option<&str> {
        self.state.preview()
    }

    /// The clip the renderer should be playing.
    pub fn effective_clip(&self) -> Option<&str> {
        self.state.effective()
    }

    /// The transition that fired within the marker lifetime, if any.
    pub fn recent_transition(&self, now: DateTime<Utc>) -> Option<TransitionId> {
        self.marker
            .filter(|m| m.live_at(now))
            .map(|m| m.transition)
    }

    // --- active state -------------------------------------------------

    pub fn set_active(&mut self, name: Option<&str>, blend_secs: f64) {
        self.set_active_at(name, blend_secs, Utc::now());
    }

    /// Overwrite the active state, restarting its clock even if unchanged.
    pub fn set_active_at(&mut self, name: Option<&str>, blend_secs: f64, now: DateTime<Utc>) {
        self.activate(name.map(str::to_string), blend_secs, now);
    }

    pub fn set_preview(&mut self, clip: Option<&str>) {
        self.state.set_preview(clip.map(str::to_string));
        self.sync_sink();
    }

    fn activate(&mut self, name: Option<String>, blend_secs: f64, now: DateTime<Utc>) {
        debug!(state = ?name, blend_secs, "activating state");
        self.state.set_active(name, blend_secs, now);
        self.sync_sink();
    }

    fn sync_sink(&mut self) {
        let effective = self.state.effective();
        if effective == self.rendered.as_deref() {
            return;
        }
        let blend_secs = self.state.active().blend_secs;
        self.sink.request_active_clip(effective, blend_secs);
        self.rendered = effective.map(str::to_string);
    }

    // --- clips and states ---------------------------------------------

    /// Replace the clip library. An empty graph is seeded with the
    /// preferred clip, which becomes default and active.
    pub fn load_clips(&mut self, clips: Vec<AnimationClip>) -> Option<StateId> {
        self.clips = ClipLibrary::new(clips);
        info!(count = self.clips.len(), "animation clips loaded");
        if !self.graph.is_empty() {
            return None;
        }
        let name = self.clips.preferred(&self.config.preferred_clip)?.name.clone();
        self.add_state(name)
    }

    /// Add a state. The first state becomes default and is activated.
    pub fn add_state(&mut self, name: impl Into<String>) -> Option<StateId> {
        let id = self.graph.add_state(name)?;
        let state = self.graph.state(id)?;
        debug!(state = %state.name, id = %id, "state added");
        if state.is_default {
            let name = state.name.clone();
            let blend = self.config.default_blend_secs;
            self.activate(Some(name), blend, Utc::now());
        }
        Some(id)
    }

    /// Delete a state, its transitions, and repair default/active.
    pub fn delete_state(&mut self, id: StateId) -> DeleteOutcome {
        let active = self.active_state().map(|s| s.id);
        let outcome = self.graph.delete_state(id, active);

        match &outcome {
            DeleteOutcome::NotFound(id) => {
                warn!(id = %id, "delete requested for unknown state");
            }
            DeleteOutcome::Deleted(report) => {
                debug!(
                    state = %report.state.name,
                    removed_transitions = report.removed_transitions,
                    promoted_default = ?report.promoted_default,
                    "state deleted"
                );
                if let ActiveChange::Activate(next) = &report.active {
                    if next.as_deref() != self.state.active_name() {
                        let blend = self.config.default_blend_secs;
                        self.activate(next.clone(), blend, Utc::now());
                    }
                }
            }
        }

        outcome
    }

    /// Make `id` the default. Activates it when nothing is active.
    pub fn set_default(&mut self, id: StateId) -> bool {
        if !self.graph.set_default(id) {
            return false;
        }
        if self.state.active_name().is_none() {
            if let Some(name) = self.graph.state(id).map(|s| s.name.clone()) {
                let blend = self.config.default_blend_secs;
                self.activate(Some(name), blend, Utc::now());
            }
        }
        true
    }

    // --- transitions --------------------------------------------------

    pub fn connect(&mut self, from: Endpoint, to: StateId) -> Option<TransitionId> {
        let id = self
            .graph
            .connect(from, to, self.config.transition_duration_secs)?;
        debug!(transition = %id, from = %from, to = %to, "transition added");
        Some(id)
    }

    pub fn remove_transition(&mut self, id: TransitionId) -> bool {
        self.graph.remove_transition(id)
    }

    pub fn set_transition_duration(&mut self, id: TransitionId, seconds: f64) -> bool {
        self.graph.set_transition_duration(id, seconds)
    }

    pub fn set_exit_time(&mut self, id: TransitionId, enabled: bool) -> bool {
        self.graph.set_exit_time(id, enabled)
    }

    /// Add a condition reading the first parameter, with that kind's
    /// default operator. No-op without parameters.
    pub fn add_condition(&mut self, transition: TransitionId) -> Option<ConditionId> {
        let parameter = self.parameters.first()?;
        let condition = Condition::new(
            parameter.name.clone(),
            ConditionOperator::default_for(parameter.kind()),
            self.config.condition_threshold,
        );
        self.graph.push_condition(transition, condition)
    }

    /// Point a condition at another parameter; its operator resets to the
    /// default for that parameter's kind.
    pub fn set_condition_parameter(
        &mut self,
        transition: TransitionId,
        condition: ConditionId,
        parameter: &str,
    ) -> bool {
        let Some(kind) = self.parameters.by_name(parameter).map(|p| p.kind()) else {
            return false;
        };
        self.graph.update_condition(transition, condition, |c| {
            c.parameter = parameter.to_string();
            c.operator = ConditionOperator::default_for(kind);
        })
    }

    pub fn set_condition_operator(
        &mut self,
        transition: TransitionId,
        condition: ConditionId,
        operator: ConditionOperator,
    ) -> bool {
        self.graph
            .update_condition(transition, condition, |c| c.operator = operator)
    }

    pub fn set_condition_value(
        &mut self,
        transition: TransitionId,
        condition: ConditionId,
        value: f64,
    ) -> bool {
        if value.is_nan() {
            return false;
        }
        self.graph
            .update_condition(transition, condition, |c| c.value = value)
    }

    pub fn remove_condition(&mut self, transition: TransitionId, condition: ConditionId) -> bool {
        self.graph.remove_condition(transition, condition)
    }

    // --- parameters ---------------------------------------------------

    pub fn add_parameter(&mut self, kind: ParameterKind) -> ParameterId {
        self.parameters
            .add(kind, self.config.float_min, self.config.float_max)
    }

    pub fn insert_parameter(
        &mut self,
        name: impl Into<String>,
        value: ParameterValue,
    ) -> Option<ParameterId> {
        self.parameters.insert(name, value)
    }

    /// Rename a parameter and every condition that reads it.
    pub fn rename_parameter(&mut self, id: ParameterId, name: &str) -> bool {
        let Some(old) = self.parameters.rename(id, name) else {
            return false;
        };
        let conditions = self.graph.rename_parameter_references(&old, name);
        debug!(from = %old, to = %name, conditions, "parameter renamed");
        true
    }

    /// Remove a parameter. Conditions reading it stay and never hold.
    pub fn remove_parameter(&mut self, id: ParameterId) -> bool {
        match self.parameters.remove(id) {
            Some(parameter) => {
                debug!(parameter = %parameter.name, "parameter removed");
                true
            }
            None => false,
        }
    }

    pub fn set_float(&mut self, id: ParameterId, value: f64) -> bool {
        self.parameters.set_float(id, value)
    }

    pub fn set_bool(&mut self, id: ParameterId, value: bool) -> bool {
        self.parameters.set_bool(id, value)
    }

    pub fn fire_trigger(&mut self, id: ParameterId) -> bool {
        self.parameters.fire_trigger(id)
    }

    pub fn set_range(&mut self, id: ParameterId, bound: RangeBound, value: f64) -> bool {
        self.parameters.set_range(id, bound, value)
    }

    // --- evaluation ---------------------------------------------------

    pub fn tick(&mut self) -> Option<FiredTransition> {
        self.tick_at(Utc::now())
    }

    /// Run one evaluation step at `now`.
    ///
    /// Fires at most one transition: consumes the armed triggers its
    /// conditions read, activates its target with the transition's
    /// duration as blend, and records it.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Option<FiredTransition> {
        if self.marker.is_some_and(|m| !m.live_at(now)) {
            self.marker = None;
        }

        let snapshot = self.parameters.snapshot();
        let (transition, source, target, blend_secs, reads) = {
            let ctx = TickContext {
                graph: &self.graph,
                active: self.active_state(),
                snapshot: &snapshot,
                clips: &self.clips,
                elapsed_secs: self.state.elapsed_secs(now),
            };
            let selection = select_transition(&ctx)?;
            let reads: Vec<String> = selection
                .transition
                .conditions
                .iter()
                .map(|c| c.parameter.clone())
                .collect();
            (
                selection.transition.id,
                selection.source,
                selection.target.name.clone(),
                selection.transition.duration,
                reads,
            )
        };

        let consumed = self
            .parameters
            .consume_triggers(reads.iter().map(String::as_str));
        let from = self.state.active_name().map(str::to_string);
        self.activate(Some(target.clone()), blend_secs, now);

        let fired = FiredTransition {
            transition,
            source,
            from,
            to: target,
            blend_secs,
            timestamp: now,
        };
        debug!(
            transition = %fired.transition,
            from = ?fired.from,
            to = %fired.to,
            consumed = ?consumed,
            "transition fired"
        );
        self.history = self.history.record(fired.clone());
        self.marker = Some(TransitionMarker {
            transition,
            expires_at: self
                .config
                .marker_ttl()
                .and_then(|ttl| now.checked_add_signed(ttl)),
        });
        Some(fired)
    }

    /// Every structural issue in the graph. Empty when the graph is clean.
    pub fn diagnostics(&self) -> Vec<GraphIssue> {
        match validate_graph(&self.graph, &self.parameters, &self.clips) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(issues) => issues.iter().cloned().collect(),
        }
    }

    /// Drop transient state before the controller is discarded or parked.
    pub fn teardown(&mut self) {
        self.marker = None;
        info!("animator controller torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::{Arc, Mutex};

    type Requests = Arc<Mutex<Vec<(Option<String>, f64)>>>;

    fn recording() -> (AnimatorController, Requests) {
        let requests: Requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let controller = AnimatorController::default().with_sink(
            move |clip: Option<&str>, blend: f64| {
                log.lock().unwrap().push((clip.map(str::to_string), blend));
            },
        );
        (controller, requests)
    }

    #[test]
    fn first_state_is_default_and_active() {
        let (mut controller, requests) = recording();
        let idle = controller.add_state("Idle").unwrap();
        controller.add_state("Run").unwrap();

        assert!(controller.graph().state(idle).unwrap().is_default);
        assert_eq!(controller.active_state_name(), Some("Idle"));
        assert_eq!(
            *requests.lock().unwrap(),
            vec![(Some("Idle".to_string()), 0.5)]
        );
    }

    #[test]
    fn load_clips_seeds_preferred_clip() {
        let mut controller = AnimatorController::default();
        let seeded = controller.load_clips(vec![
            AnimationClip::new("Walk", 1.0),
            AnimationClip::new("Idle", 2.0),
        ]);

        assert!(seeded.is_some());
        assert_eq!(controller.active_state_name(), Some("Idle"));
        assert_eq!(controller.graph().state_count(), 1);

        assert!(controller
            .load_clips(vec![AnimationClip::new("Run", 0.8)])
            .is_none());
        assert_eq!(controller.graph().state_count(), 1);
    }

    #[test]
    fn load_clips_without_idle_uses_first() {
        let mut controller = AnimatorController::default();
        controller.load_clips(vec![
            AnimationClip::new("Walk", 1.0),
            AnimationClip::new("Run", 0.8),
        ]);
        assert_eq!(controller.active_state_name(), Some("Walk"));
    }

    #[test]
    fn deleting_active_default_promotes_and_activates() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        controller.add_state("Walk").unwrap();

        assert!(controller.delete_state(idle).is_deleted());
        assert_eq!(controller.active_state_name(), Some("Run"));
        assert_eq!(controller.graph().default_state().unwrap().id, run);
    }

    #[test]
    fn deleting_active_state_falls_back_to_default() {
        let mut controller = AnimatorController::default();
        controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        controller.set_active(Some("Run"), 0.2);

        controller.delete_state(run);
        assert_eq!(controller.active_state_name(), Some("Idle"));
    }

    #[test]
    fn deleting_last_state_stops_playback() {
        let (mut controller, requests) = recording();
        let idle = controller.add_state("Idle").unwrap();
        controller.delete_state(idle);

        assert_eq!(controller.active_state_name(), None);
        assert_eq!(requests.lock().unwrap().last().unwrap().0, None);
    }

    #[test]
    fn deleting_unknown_state_reports_not_found() {
        let mut controller = AnimatorController::default();
        controller.add_state("Idle").unwrap();
        let missing = StateId::new();
        assert_eq!(
            controller.delete_state(missing),
            DeleteOutcome::NotFound(missing)
        );
        assert_eq!(controller.active_state_name(), Some("Idle"));
    }

    #[test]
    fn set_default_activates_when_nothing_active() {
        let mut controller = AnimatorController::default();
        controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        controller.set_active(None, 0.0);

        assert!(controller.set_default(run));
        assert_eq!(controller.active_state_name(), Some("Run"));
    }

    #[test]
    fn set_default_keeps_existing_active_state() {
        let mut controller = AnimatorController::default();
        controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();

        assert!(controller.set_default(run));
        assert_eq!(controller.active_state_name(), Some("Idle"));
        assert!(!controller.set_default(StateId::new()));
    }

    #[test]
    fn rename_parameter_propagates_to_conditions() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let speed = controller
            .insert_parameter("speed", ParameterValue::float(0.0, 0.0, 10.0))
            .unwrap();
        let t = controller.connect(Endpoint::State(idle), run).unwrap();
        controller.add_condition(t).unwrap();

        assert!(controller.rename_parameter(speed, "velocity"));
        assert_eq!(
            controller.graph().transition(t).unwrap().conditions[0].parameter,
            "velocity"
        );

        controller.set_float(speed, 1.0);
        assert!(controller.tick().is_some());
        assert_eq!(controller.active_state_name(), Some("Run"));
    }

    #[test]
    fn removed_parameter_leaves_condition_unsatisfiable() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let flag = controller
            .insert_parameter("flag", ParameterValue::Boolean(false))
            .unwrap();
        let t = controller.connect(Endpoint::State(idle), run).unwrap();
        let c = controller.add_condition(t).unwrap();
        controller.set_condition_operator(t, c, ConditionOperator::IsFalse);

        assert!(controller.remove_parameter(flag));
        assert_eq!(controller.graph().transition(t).unwrap().conditions.len(), 1);
        assert!(controller.tick().is_none());
        assert_eq!(controller.active_state_name(), Some("Idle"));
    }

    #[test]
    fn add_condition_needs_a_parameter() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let t = controller.connect(Endpoint::State(idle), run).unwrap();

        assert!(controller.add_condition(t).is_none());

        controller.add_parameter(ParameterKind::Trigger);
        let c = controller.add_condition(t).unwrap();
        let condition = &controller.graph().transition(t).unwrap().conditions[0];
        assert_eq!(condition.id, c);
        assert_eq!(condition.parameter, "newTrigger");
        assert_eq!(condition.operator, ConditionOperator::IsTrue);
        assert_eq!(condition.value, 0.1);
    }

    #[test]
    fn set_condition_parameter_resets_operator() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        controller.insert_parameter("speed", ParameterValue::float(0.0, 0.0, 10.0));
        controller.insert_parameter("grounded", ParameterValue::Boolean(true));
        let t = controller.connect(Endpoint::State(idle), run).unwrap();
        let c = controller.add_condition(t).unwrap();

        assert!(controller.set_condition_parameter(t, c, "grounded"));
        let condition = &controller.graph().transition(t).unwrap().conditions[0];
        assert_eq!(condition.parameter, "grounded");
        assert_eq!(condition.operator, ConditionOperator::IsTrue);

        assert!(!controller.set_condition_parameter(t, c, "missing"));
    }

    #[test]
    fn connect_uses_configured_duration() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let t = controller.connect(Endpoint::AnyState, run).unwrap();
        let transition = controller.graph().transition(t).unwrap();
        assert_eq!(transition.duration, 0.5);
        assert!(!transition.has_exit_time);
        assert!(transition.conditions.is_empty());
        assert!(controller.connect(Endpoint::State(idle), idle).is_none());
    }

    #[test]
    fn tick_uses_transition_duration_as_blend() {
        let (mut controller, requests) = recording();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let t = controller.connect(Endpoint::State(idle), run).unwrap();
        controller.set_transition_duration(t, 0.25);

        let fired = controller.tick().unwrap();
        assert_eq!(fired.transition, t);
        assert_eq!(fired.from.as_deref(), Some("Idle"));
        assert_eq!(fired.to, "Run");
        assert_eq!(
            requests.lock().unwrap().last().cloned(),
            Some((Some("Run".to_string()), 0.25))
        );
    }

    #[test]
    fn recent_transition_marker_expires() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let t = controller.connect(Endpoint::State(idle), run).unwrap();

        let now = Utc::now();
        controller.tick_at(now).unwrap();
        assert_eq!(controller.recent_transition(now), Some(t));
        assert_eq!(
            controller.recent_transition(now + Duration::milliseconds(999)),
            Some(t)
        );
        assert_eq!(controller.recent_transition(now + Duration::seconds(1)), None);

        controller.teardown();
        assert_eq!(controller.recent_transition(now), None);
    }

    #[test]
    fn unbounded_marker_ttl_never_expires() {
        let mut controller = AnimatorController::new(ControllerConfig {
            marker_ttl_ms: 9_000_000_000_000_000,
            ..ControllerConfig::default()
        });
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let t = controller.connect(Endpoint::State(idle), run).unwrap();

        let now = Utc::now();
        controller.tick_at(now).unwrap();
        assert_eq!(
            controller.recent_transition(now + Duration::days(365)),
            Some(t)
        );
        assert!(controller.tick_at(now + Duration::seconds(1)).is_none());
        assert_eq!(controller.recent_transition(now), Some(t));
    }

    #[test]
    fn preview_overrides_sink_without_touching_active() {
        let (mut controller, requests) = recording();
        controller.add_state("Idle").unwrap();
        let entered = controller.entered_at();

        controller.set_preview(Some("Wave"));
        assert_eq!(controller.effective_clip(), Some("Wave"));
        assert_eq!(controller.active_state_name(), Some("Idle"));
        assert_eq!(controller.entered_at(), entered);

        controller.set_preview(None);
        let requests = requests.lock().unwrap();
        let clips: Vec<_> = requests.iter().map(|(c, _)| c.clone()).collect();
        assert_eq!(
            clips,
            vec![
                Some("Idle".to_string()),
                Some("Wave".to_string()),
                Some("Idle".to_string())
            ]
        );
    }

    #[test]
    fn sink_not_called_when_effective_clip_unchanged() {
        let (mut controller, requests) = recording();
        controller.add_state("Idle").unwrap();
        controller.set_active(Some("Idle"), 0.5);
        controller.set_active(Some("Idle"), 0.5);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn diagnostics_surface_dangling_references() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        let speed = controller.add_parameter(ParameterKind::Float);
        let t = controller.connect(Endpoint::State(idle), run).unwrap();
        controller.add_condition(t).unwrap();
        assert!(controller.diagnostics().is_empty());

        controller.remove_parameter(speed);
        assert_eq!(
            controller.diagnostics(),
            vec![GraphIssue::UnknownParameter {
                transition: t,
                parameter: "newFloat".to_string(),
            }]
        );
    }

    #[test]
    fn history_records_fired_transitions() {
        let mut controller = AnimatorController::default();
        let idle = controller.add_state("Idle").unwrap();
        let run = controller.add_state("Run").unwrap();
        controller.connect(Endpoint::State(idle), run).unwrap();
        controller.connect(Endpoint::State(run), idle).unwrap();

        controller.tick();
        controller.tick();
        assert_eq!(controller.history().path(), vec!["Idle", "Run", "Idle"]);
    }
}
