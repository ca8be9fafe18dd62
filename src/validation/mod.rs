//! Opt-in graph diagnostics.
//!
//! Evaluation fails closed and silently: a condition that reads a missing
//! parameter just never holds. This module surfaces such problems instead,
//! using Stillwater's `Validation` to collect every issue in one pass rather
//! than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use animator::core::{ClipLibrary, Condition, ConditionOperator, Endpoint, ParameterStore, StateGraph};
//! use animator::validation::validate_graph;
//!
//! let mut graph = StateGraph::new();
//! let idle = graph.add_state("Idle").unwrap();
//! let run = graph.add_state("Run").unwrap();
//! let t = graph.connect(Endpoint::State(idle), run, 0.5).unwrap();
//! graph.push_condition(t, Condition::new("speed", ConditionOperator::Greater, 0.1));
//!
//! let result = validate_graph(&graph, &ParameterStore::new(), &ClipLibrary::default());
//! assert!(result.is_failure());
//! ```

pub mod issues;
pub mod rules;

pub use issues::GraphIssue;
pub use rules::{validate_graph, GraphValidation};
