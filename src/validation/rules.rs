//! Graph checks, each contributing a `Validation`.

use crate::core::{ClipLibrary, Endpoint, ParameterStore, StateGraph, Transition};
use crate::validation::issues::GraphIssue;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub type GraphValidation = Validation<(), NonEmptyVec<GraphIssue>>;

/// Run every check, accumulating ALL issues.
///
/// Entry transitions are skipped: the selector never follows them.
pub fn validate_graph(
    graph: &StateGraph,
    parameters: &ParameterStore,
    clips: &ClipLibrary,
) -> GraphValidation {
    let mut checks: Vec<GraphValidation> = vec![check_default_count(graph)];

    for transition in graph.transitions().iter().filter(|t| t.from != Endpoint::Entry) {
        checks.push(check_self_loop(graph, transition));
        checks.extend(check_conditions(transition, parameters));
    }

    // An empty library means the renderer has not reported yet.
    if !clips.is_empty() {
        checks.extend(graph.states().map(|state| {
            if clips.get(&state.name).is_some() {
                Validation::success(())
            } else {
                Validation::fail(GraphIssue::MissingClip {
                    state: state.name.clone(),
                })
            }
        }));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_default_count(graph: &StateGraph) -> GraphValidation {
    let found = graph.default_count();
    if graph.is_empty() || found == 1 {
        Validation::success(())
    } else {
        Validation::fail(GraphIssue::DefaultCount { found })
    }
}

fn check_self_loop(graph: &StateGraph, transition: &Transition) -> GraphValidation {
    if !transition.is_self_loop() {
        return Validation::success(());
    }
    let state = graph
        .state(transition.to)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| transition.to.to_string());
    Validation::fail(GraphIssue::SelfLoop {
        transition: transition.id,
        state,
    })
}

fn check_conditions<'a>(
    transition: &'a Transition,
    parameters: &'a ParameterStore,
) -> impl Iterator<Item = GraphValidation> + 'a {
    transition.conditions.iter().map(move |condition| {
        match parameters.by_name(&condition.parameter) {
            None => Validation::fail(GraphIssue::UnknownParameter {
                transition: transition.id,
                parameter: condition.parameter.clone(),
            }),
            Some(parameter) if !condition.operator.applies_to(parameter.kind()) => {
                Validation::fail(GraphIssue::OperatorMismatch {
                    transition: transition.id,
                    parameter: condition.parameter.clone(),
                    operator: condition.operator,
                    kind: parameter.kind(),
                })
            }
            Some(_) => Validation::success(()),
        }
    })
}
