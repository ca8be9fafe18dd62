//! Builder API for ergonomic controller construction.
//!
//! Graphs are described by state name; names are resolved to ids when the
//! controller is built, so a typo surfaces as a [`BuildError`] instead of a
//! transition that silently never fires.
//!
//! # Example
//!
//! ```
//! use animator::builder::{ControllerBuilder, TransitionBuilder};
//! use animator::core::{AnimationClip, ParameterValue};
//!
//! let mut controller = ControllerBuilder::new()
//!     .clips(vec![AnimationClip::new("Idle", 2.0), AnimationClip::new("Jump", 0.6)])
//!     .states(["Idle", "Jump"])
//!     .parameter("jump", ParameterValue::Trigger(false))
//!     .transition(TransitionBuilder::new().from_any_state().to("Jump").when_true("jump"))
//!     .transition(TransitionBuilder::new().from_state("Jump").to("Idle").exit_time(true))
//!     .build()
//!     .unwrap();
//!
//! let jump = controller.parameters().id_of("jump").unwrap();
//! controller.fire_trigger(jump);
//! assert_eq!(controller.tick().unwrap().to, "Jump");
//! assert_eq!(controller.active_state_name(), Some("Jump"));
//! ```

pub mod controller;
pub mod error;
pub mod transition;

pub use controller::ControllerBuilder;
pub use error::BuildError;
pub use transition::TransitionBuilder;
