//! The imperative shell around the pure core.
//!
//! [`AnimatorController`] owns every piece of mutable state: the graph, the
//! parameters, the clip library and the active state. Collaborators edit it
//! through its methods or by applying [`Command`]s, and learn what to render
//! through a [`ClipSink`].

pub mod animator;
pub mod command;
pub mod sink;
pub mod state;

pub use animator::{AnimatorController, TransitionMarker};
pub use command::{Command, CommandOutcome};
pub use sink::{ClipSink, NullSink};
pub use state::{ActiveRecord, StateController};
