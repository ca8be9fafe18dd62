//! Per-tick transition selection.
//!
//! Given the active state, the graph and a parameter snapshot, picks at most
//! one transition to fire. `AnyState` transitions are scanned before the
//! active state's own, each in storage order, and the first transition that
//! passes every gate wins.

use super::clip::ClipLibrary;
use super::condition::all_satisfied;
use super::graph::{AnimState, Endpoint, StateGraph, Transition};
use super::store::ParameterSnapshot;

/// Everything the selector reads during one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub graph: &'a StateGraph,
    /// The active state, when the active name resolves to a state.
    pub active: Option<&'a AnimState>,
    pub snapshot: &'a ParameterSnapshot,
    pub clips: &'a ClipLibrary,
    /// Wall-clock seconds since the active state was entered.
    pub elapsed_secs: f64,
}

/// The transition chosen for this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection<'a> {
    pub transition: &'a Transition,
    /// The source class it was found under.
    pub source: Endpoint,
    pub target: &'a AnimState,
}

/// Pick the transition that fires this tick, if any.
///
/// Gates, in order, for each candidate:
/// 1. a transition targeting the active state is skipped, whatever its source;
/// 2. with exit time set, a transition out of the active state waits until
///    the active clip has played its full duration (no clip, no wait);
/// 3. every condition must hold;
/// 4. the target must still exist.
///
/// The result is deterministic for a given input.
pub fn select_transition<'a>(ctx: &TickContext<'a>) -> Option<Selection<'a>> {
    let graph: &'a StateGraph = ctx.graph;
    let active_id = ctx.active.map(|s| s.id);
    let sources = std::iter::once(Endpoint::AnyState).chain(active_id.map(Endpoint::State));

    for source in sources {
        for transition in graph.outgoing(source) {
            if Some(transition.to) == active_id || transition.is_self_loop() {
                continue;
            }
            if transition.has_exit_time && source != Endpoint::AnyState && exit_time_pending(ctx) {
                continue;
            }
            if !all_satisfied(&transition.conditions, ctx.snapshot) {
                continue;
            }
            let Some(target) = graph.state(transition.to) else {
                continue;
            };
            return Some(Selection {
                transition,
                source,
                target,
            });
        }
    }

    None
}

/// The active clip is known and has not finished a full play-through.
fn exit_time_pending(ctx: &TickContext<'_>) -> bool {
    ctx.active
        .and_then(|state| ctx.clips.duration_of(&state.name))
        .is_some_and(|duration| ctx.elapsed_secs < duration)
}
