//! Transition conditions and their evaluation.
//!
//! Conditions reference parameters by name. Evaluation fails closed: an
//! unresolved name or an operator that does not match the parameter's kind
//! makes the condition false instead of raising an error.

use super::parameter::{ParameterKind, ParameterValue};
use super::store::ParameterSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a condition within its transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(Uuid);

impl ConditionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConditionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Comparison applied by a condition.
///
/// Numeric operators apply to `Float` parameters; `IsTrue`/`IsFalse` apply
/// to `Boolean` and `Trigger` parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionOperator {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "is true")]
    IsTrue,
    #[serde(rename = "is false")]
    IsFalse,
}

impl ConditionOperator {
    /// Operator selected when a condition is pointed at a parameter of `kind`.
    pub fn default_for(kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::Float => Self::Greater,
            ParameterKind::Boolean | ParameterKind::Trigger => Self::IsTrue,
        }
    }

    /// Whether this operator belongs to the domain of `kind`.
    pub fn applies_to(&self, kind: ParameterKind) -> bool {
        match self {
            Self::Greater | Self::Less | Self::Equals | Self::NotEquals => {
                kind == ParameterKind::Float
            }
            Self::IsTrue | Self::IsFalse => kind != ParameterKind::Float,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::Less => "<",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::IsTrue => "is true",
            Self::IsFalse => "is false",
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single guard on a transition.
///
/// `value` is only read by numeric operators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: ConditionId,
    pub parameter: String,
    pub operator: ConditionOperator,
    pub value: f64,
}

impl Condition {
    pub fn new(parameter: impl Into<String>, operator: ConditionOperator, value: f64) -> Self {
        Self {
            id: ConditionId::new(),
            parameter: parameter.into(),
            operator,
            value,
        }
    }

    /// Evaluate against a snapshot. See [`evaluate`].
    pub fn evaluate(&self, snapshot: &ParameterSnapshot) -> bool {
        evaluate(self, snapshot)
    }
}

/// Evaluate one condition against a parameter snapshot.
///
/// Float comparisons use exact equality for `==` and `!=`.
///
/// # Example
///
/// ```rust
/// use animator::core::{evaluate, Condition, ConditionOperator, ParameterStore, ParameterValue};
///
/// let mut store = ParameterStore::new();
/// store.insert("speed", ParameterValue::float(0.6, 0.0, 10.0));
/// let snapshot = store.snapshot();
///
/// assert!(evaluate(&Condition::new("speed", ConditionOperator::Greater, 0.5), &snapshot));
/// assert!(!evaluate(&Condition::new("speed", ConditionOperator::IsTrue, 0.0), &snapshot));
/// assert!(!evaluate(&Condition::new("missing", ConditionOperator::Less, 1.0), &snapshot));
/// ```
pub fn evaluate(condition: &Condition, snapshot: &ParameterSnapshot) -> bool {
    let Some(value) = snapshot.get(&condition.parameter) else {
        return false;
    };

    match (value, condition.operator) {
        (ParameterValue::Float { value, .. }, op) => match op {
            ConditionOperator::Greater => *value > condition.value,
            ConditionOperator::Less => *value < condition.value,
            ConditionOperator::Equals => *value == condition.value,
            ConditionOperator::NotEquals => *value != condition.value,
            ConditionOperator::IsTrue | ConditionOperator::IsFalse => false,
        },
        (ParameterValue::Boolean(flag) | ParameterValue::Trigger(flag), op) => match op {
            ConditionOperator::IsTrue => *flag,
            ConditionOperator::IsFalse => !*flag,
            _ => false,
        },
    }
}

/// A condition set holds when it is empty or every condition holds.
pub fn all_satisfied(conditions: &[Condition], snapshot: &ParameterSnapshot) -> bool {
    conditions.iter().all(|c| evaluate(c, snapshot))
}
