//! Animator: an animation state machine core
//!
//! A directed graph of named states (animation clips) joined by transitions
//! guarded by conditions over typed parameters. Every tick the controller
//! decides whether the active state should change, and every edit to the
//! graph keeps it consistent even while a state is playing.
//!
//! The evaluation logic in [`core`] is pure: no I/O and no clock reads, with
//! time passed in explicitly. [`controller`] owns the mutable state and talks
//! to a renderer through a [`ClipSink`]; [`runtime`] hosts it on a tokio tick
//! loop.
//!
//! # Core Concepts
//!
//! - **Parameters**: Float, Boolean and Trigger values read by conditions
//! - **States**: Named clips; exactly one is the default
//! - **Transitions**: From a state, `AnyState` or `Entry` to a state, fired
//!   when every condition holds and the exit time has passed
//! - **Triggers**: Consumed when a transition reading them fires
//!
//! # Example
//!
//! ```rust
//! use animator::{AnimatorController, ControllerConfig};
//! use animator::core::{AnimationClip, ConditionOperator, Endpoint, ParameterKind};
//!
//! let mut controller = AnimatorController::new(ControllerConfig::default());
//! controller.load_clips(vec![AnimationClip::new("Idle", 2.0), AnimationClip::new("Run", 0.8)]);
//! let idle = controller.graph().state_by_name("Idle").unwrap().id;
//! let run = controller.add_state("Run").unwrap();
//!
//! let speed = controller.add_parameter(ParameterKind::Float);
//! let t = controller.connect(Endpoint::State(idle), run).unwrap();
//! let c = controller.add_condition(t).unwrap();
//! controller.set_condition_operator(t, c, ConditionOperator::Greater);
//!
//! assert!(controller.tick().is_none());
//! controller.set_float(speed, 1.0);
//! assert_eq!(controller.tick().unwrap().to, "Run");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod controller;
pub mod core;
pub mod runtime;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, ControllerBuilder, TransitionBuilder};
pub use checkpoint::{CheckpointError, ControllerCheckpoint};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{AnimatorController, ClipSink, Command, CommandOutcome};
pub use runtime::{AnimatorHandle, RuntimeError};
pub use validation::GraphIssue;
