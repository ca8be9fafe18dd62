//! Builder for constructing controllers.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::config::ControllerConfig;
use crate::controller::{AnimatorController, ClipSink};
use crate::core::{AnimationClip, ClipLibrary, ParameterStore, ParameterValue, StateGraph};
use tracing::debug;

/// Builder for constructing an [`AnimatorController`] with a fluent API.
///
/// The first declared state is the default unless `.default_state(name)`
/// picks another. The default is active once built.
#[derive(Default)]
pub struct ControllerBuilder {
    config: ControllerConfig,
    states: Vec<String>,
    default: Option<String>,
    parameters: Vec<(String, ParameterValue)>,
    transitions: Vec<TransitionBuilder>,
    clips: Vec<AnimationClip>,
    sink: Option<Box<dyn ClipSink>>,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.push(name.into());
        self
    }

    pub fn states<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn default_state(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: ParameterValue) -> Self {
        self.parameters.push((name.into(), value));
        self
    }

    pub fn transition(mut self, transition: TransitionBuilder) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Clip durations drive exit-time gating.
    pub fn clips(mut self, clips: Vec<AnimationClip>) -> Self {
        self.clips = clips;
        self
    }

    pub fn sink(mut self, sink: impl ClipSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the controller.
    /// Returns an error if a name is duplicated or cannot be resolved.
    pub fn build(self) -> Result<AnimatorController, BuildError> {
        self.config.validate()?;

        let mut graph = StateGraph::new();
        for name in self.states {
            if graph.add_state(name.as_str()).is_none() {
                return Err(BuildError::DuplicateState(name));
            }
        }
        if let Some(name) = self.default {
            let Some(id) = graph.state_by_name(&name).map(|s| s.id) else {
                return Err(BuildError::UnknownDefault(name));
            };
            graph.set_default(id);
        }

        let mut parameters = ParameterStore::new();
        for (name, value) in self.parameters {
            if parameters.insert(name.as_str(), value).is_none() {
                return Err(BuildError::DuplicateParameter(name));
            }
        }

        for builder in self.transitions {
            let transition =
                builder.build(&graph, &parameters, self.config.transition_duration_secs)?;
            graph.push_transition(transition);
        }

        debug!(
            states = graph.state_count(),
            transitions = graph.transitions().len(),
            parameters = parameters.len(),
            "controller built"
        );

        let mut controller = AnimatorController::from_parts(
            self.config,
            graph,
            parameters,
            ClipLibrary::new(self.clips),
        );
        if let Some(sink) = self.sink {
            controller.set_sink(sink);
        }
        Ok(controller)
    }
}

impl AnimatorController {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }
}
