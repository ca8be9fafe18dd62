//! Parameter store and the read-only snapshots conditions evaluate against.

use super::parameter::{clamp, Parameter, ParameterId, ParameterKind, ParameterValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which end of a float range an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBound {
    Min,
    Max,
}

/// Ordered collection of uniquely named parameters.
///
/// Every mutation is total: an unknown id, a duplicate name or a
/// wrong-kind edit leaves the store untouched and reports it through the
/// return value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterStore {
    parameters: Vec<Parameter>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter of `kind` with a generated, deduplicated name.
    ///
    /// Floats start at `min` with the range `[min, max]`; booleans and
    /// triggers start at `false`.
    pub fn add(&mut self, kind: ParameterKind, min: f64, max: f64) -> ParameterId {
        let name = self.unique_name(kind.name_prefix());
        let value = match kind {
            ParameterKind::Float => ParameterValue::float(min, min, max),
            ParameterKind::Boolean => ParameterValue::Boolean(false),
            ParameterKind::Trigger => ParameterValue::Trigger(false),
        };
        let parameter = Parameter::new(name, value);
        let id = parameter.id;
        self.parameters.push(parameter);
        id
    }

    /// Insert a named parameter. Returns `None` if the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) -> Option<ParameterId> {
        let name = name.into();
        if self.by_name(&name).is_some() {
            return None;
        }
        let value = match value {
            ParameterValue::Float { value, min, max } => ParameterValue::float(value, min, max),
            other => other,
        };
        let parameter = Parameter::new(name, value);
        let id = parameter.id;
        self.parameters.push(parameter);
        Some(id)
    }

    fn unique_name(&self, prefix: &str) -> String {
        let mut name = prefix.to_string();
        let mut counter = 0;
        while self.by_name(&name).is_some() {
            counter += 1;
            name = format!("{prefix}{counter}");
        }
        name
    }

    pub fn get(&self, id: ParameterId) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn id_of(&self, name: &str) -> Option<ParameterId> {
        self.by_name(name).map(|p| p.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    pub fn first(&self) -> Option<&Parameter> {
        self.parameters.first()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    fn get_mut(&mut self, id: ParameterId) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.id == id)
    }

    /// Rename a parameter, returning its previous name.
    ///
    /// Refused when another parameter already uses `name`, or when the name
    /// is unchanged.
    pub fn rename(&mut self, id: ParameterId, name: impl Into<String>) -> Option<String> {
        let name = name.into();
        if self.parameters.iter().any(|p| p.id != id && p.name == name) {
            return None;
        }
        let parameter = self.get_mut(id)?;
        if parameter.name == name {
            return None;
        }
        Some(std::mem::replace(&mut parameter.name, name))
    }

    /// Set a float value, clamped into its range.
    pub fn set_float(&mut self, id: ParameterId, new_value: f64) -> bool {
        if new_value.is_nan() {
            return false;
        }
        match self.get_mut(id).map(|p| &mut p.value) {
            Some(ParameterValue::Float { value, min, max }) => {
                *value = clamp(new_value, *min, *max);
                true
            }
            _ => false,
        }
    }

    /// Set a boolean or trigger value.
    pub fn set_bool(&mut self, id: ParameterId, new_value: bool) -> bool {
        match self.get_mut(id).map(|p| &mut p.value) {
            Some(ParameterValue::Boolean(value)) | Some(ParameterValue::Trigger(value)) => {
                *value = new_value;
                true
            }
            _ => false,
        }
    }

    /// Arm a trigger.
    pub fn fire_trigger(&mut self, id: ParameterId) -> bool {
        match self.get_mut(id).map(|p| &mut p.value) {
            Some(ParameterValue::Trigger(value)) => {
                *value = true;
                true
            }
            _ => false,
        }
    }

    /// Edit one bound of a float range.
    ///
    /// NaN is ignored. If the edit would put `min` above `max`, the edited
    /// bound snaps to the other one. The current value is re-clamped.
    pub fn set_range(&mut self, id: ParameterId, bound: RangeBound, bound_value: f64) -> bool {
        match self.get_mut(id).map(|p| &mut p.value) {
            Some(ParameterValue::Float { value, min, max }) => {
                if !bound_value.is_nan() {
                    match bound {
                        RangeBound::Min => *min = bound_value.min(*max),
                        RangeBound::Max => *max = bound_value.max(*min),
                    }
                }
                *value = clamp(*value, *min, *max);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: ParameterId) -> Option<Parameter> {
        let index = self.parameters.iter().position(|p| p.id == id)?;
        Some(self.parameters.remove(index))
    }

    /// Reset every named trigger that currently holds `true`.
    ///
    /// Returns the names that were reset. Non-trigger names are ignored.
    pub fn consume_triggers<'a, I>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut consumed = Vec::new();
        for name in names {
            if let Some(parameter) = self.parameters.iter_mut().find(|p| p.name == name) {
                if parameter.value.is_armed_trigger() {
                    parameter.value = ParameterValue::Trigger(false);
                    consumed.push(parameter.name.clone());
                }
            }
        }
        consumed
    }

    /// Capture the current values by name.
    pub fn snapshot(&self) -> ParameterSnapshot {
        self.parameters
            .iter()
            .map(|p| (p.name.clone(), p.value))
            .collect()
    }
}

/// Immutable view of parameter values keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSnapshot {
    values: HashMap<String, ParameterValue>,
}

impl ParameterSnapshot {
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, ParameterValue)> for ParameterSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, ParameterValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
