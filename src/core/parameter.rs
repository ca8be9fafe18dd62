//! Typed parameters that conditions read and external logic writes.
//!
//! A parameter is a named value of one of three kinds. `Boolean` and
//! `Trigger` share a boolean value domain but differ in consumption: a
//! trigger is reset to `false` when a transition that reads it fires.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterId(Uuid);

impl ParameterId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParameterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "param-{}", self.0)
    }
}

/// The kind of a parameter, without its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Float,
    Boolean,
    Trigger,
}

impl ParameterKind {
    /// Prefix used when generating a default name (`newFloat`, `newTrigger1`, ...).
    pub fn name_prefix(&self) -> &'static str {
        match self {
            Self::Float => "newFloat",
            Self::Boolean => "newBoolean",
            Self::Trigger => "newTrigger",
        }
    }
}

/// Current value of a parameter, tagged with its kind.
///
/// Float values always satisfy `min <= value <= max`; the constructors and
/// every mutation on [`ParameterStore`](crate::core::ParameterStore) keep it so.
///
/// # Example
///
/// ```rust
/// use animator::core::{ParameterKind, ParameterValue};
///
/// let speed = ParameterValue::float(12.0, 0.0, 10.0);
/// assert_eq!(speed.as_float(), Some(10.0));
/// assert_eq!(speed.kind(), ParameterKind::Float);
///
/// let jump = ParameterValue::Trigger(false);
/// assert_eq!(jump.as_bool(), Some(false));
/// assert_eq!(jump.as_float(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Float { value: f64, min: f64, max: f64 },
    Boolean(bool),
    Trigger(bool),
}

impl ParameterValue {
    /// Build a float value, normalising the range and clamping the value.
    ///
    /// A NaN bound takes the other bound (both NaN: `0.0`); a NaN value
    /// starts at `min`.
    pub fn float(value: f64, min: f64, max: f64) -> Self {
        let (min, max) = match (min.is_nan(), max.is_nan()) {
            (true, true) => (0.0, 0.0),
            (true, false) => (max, max),
            (false, true) => (min, min),
            (false, false) if min > max => (max, min),
            (false, false) => (min, max),
        };
        let value = if value.is_nan() { min } else { value };
        Self::Float {
            value: clamp(value, min, max),
            min,
            max,
        }
    }

    /// Whether a float lies within its range. Always true for other kinds.
    pub fn in_range(&self) -> bool {
        match *self {
            Self::Float { value, min, max } => min <= value && value <= max,
            Self::Boolean(_) | Self::Trigger(_) => true,
        }
    }

    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::Float { .. } => ParameterKind::Float,
            Self::Boolean(_) => ParameterKind::Boolean,
            Self::Trigger(_) => ParameterKind::Trigger,
        }
    }

    /// Numeric value, if this is a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean or a trigger.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) | Self::Trigger(v) => Some(*v),
            Self::Float { .. } => None,
        }
    }

    /// A trigger currently holding `true`.
    pub fn is_armed_trigger(&self) -> bool {
        matches!(self, Self::Trigger(true))
    }
}

/// Clamp that leaves NaN bounds out of the picture.
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// A named, typed parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    pub value: ParameterValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            id: ParameterId::new(),
            name: name.into(),
            value,
        }
    }

    pub fn kind(&self) -> ParameterKind {
        self.value.kind()
    }
}
