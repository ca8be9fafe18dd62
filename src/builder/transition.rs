//! Builder for transitions described by state name.

use crate::builder::error::BuildError;
use crate::core::{Condition, ConditionOperator, Endpoint, ParameterStore, StateGraph, Transition};

#[derive(Clone, Debug, PartialEq)]
enum Source {
    Entry,
    AnyState,
    State(String),
}

/// Builder for constructing transitions with a fluent API.
///
/// States are named, not referenced by id; names are resolved when the
/// owning [`ControllerBuilder`](crate::builder::ControllerBuilder) builds.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    from: Option<Source>,
    to: Option<String>,
    conditions: Vec<Condition>,
    duration: Option<f64>,
    has_exit_time: bool,
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave from the named state (one of `from_*` is required).
    pub fn from_state(mut self, name: impl Into<String>) -> Self {
        self.from = Some(Source::State(name.into()));
        self
    }

    /// Leave from whatever state is active.
    pub fn from_any_state(mut self) -> Self {
        self.from = Some(Source::AnyState);
        self
    }

    /// Leave from the entry node. Such transitions are never evaluated.
    pub fn from_entry(mut self) -> Self {
        self.from = Some(Source::Entry);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, name: impl Into<String>) -> Self {
        self.to = Some(name.into());
        self
    }

    /// Require `parameter <operator> value`.
    pub fn when(mut self, parameter: impl Into<String>, operator: ConditionOperator, value: f64) -> Self {
        self.conditions.push(Condition::new(parameter, operator, value));
        self
    }

    /// Require a boolean or trigger parameter to be set.
    pub fn when_true(self, parameter: impl Into<String>) -> Self {
        self.when(parameter, ConditionOperator::IsTrue, 0.0)
    }

    pub fn when_false(self, parameter: impl Into<String>) -> Self {
        self.when(parameter, ConditionOperator::IsFalse, 0.0)
    }

    /// Blend duration in seconds. Defaults to the configured duration.
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Wait for the source clip to finish before leaving.
    pub fn exit_time(mut self, enabled: bool) -> Self {
        self.has_exit_time = enabled;
        self
    }

    /// Resolve names against `graph` and `parameters`.
    pub(crate) fn build(
        self,
        graph: &StateGraph,
        parameters: &ParameterStore,
        default_duration: f64,
    ) -> Result<Transition, BuildError> {
        let resolve = |name: String| {
            graph
                .state_by_name(&name)
                .map(|s| s.id)
                .ok_or(BuildError::UnknownState(name))
        };

        let from = match self.from.ok_or(BuildError::MissingFromState)? {
            Source::Entry => Endpoint::Entry,
            Source::AnyState => Endpoint::AnyState,
            Source::State(name) => Endpoint::State(resolve(name)?),
        };
        let to_name = self.to.ok_or(BuildError::MissingToState)?;
        let to = resolve(to_name.clone())?;
        if from == Endpoint::State(to) {
            return Err(BuildError::SelfConnection(to_name));
        }

        if let Some(unknown) = self
            .conditions
            .iter()
            .find(|c| parameters.by_name(&c.parameter).is_none())
        {
            return Err(BuildError::UnknownParameter(unknown.parameter.clone()));
        }

        let mut transition = Transition::new(from, to, self.duration.unwrap_or(default_duration));
        transition.conditions = self.conditions;
        transition.has_exit_time = self.has_exit_time;
        Ok(transition)
    }
}
