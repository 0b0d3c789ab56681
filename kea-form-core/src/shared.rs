//! The per-parameter reconciliation unit.
//!
//! A [`SharedParameter`] holds one value slot per daemon in scope. When all
//! slots are equal the unit is locked and edits apply to every daemon;
//! otherwise each daemon keeps its own value.

use serde::{Deserialize, Serialize};

use crate::registry::ParameterSpec;
use crate::value::ParameterValue;

/// Editable state of one parameter across the daemons in scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedParameter {
    pub spec: ParameterSpec,
    /// All daemons share `values[0]`.
    pub locked: bool,
    pub values: Vec<ParameterValue>,
}

impl SharedParameter {
    /// Build a unit from raw per-daemon values.
    ///
    /// Missing values take the spec default. The unit is locked when every
    /// slot equals the first one, which holds trivially for zero or one slot.
    pub fn from_per_daemon_values<I>(spec: ParameterSpec, values: I) -> Self
    where
        I: IntoIterator<Item = Option<ParameterValue>>,
    {
        let values: Vec<ParameterValue> = values
            .into_iter()
            .map(|value| spec.normalize(value))
            .collect();
        let locked = values.windows(2).all(|pair| pair[0] == pair[1]);
        Self {
            spec,
            locked,
            values,
        }
    }

    /// Unit for a form that has not been populated from daemon data yet.
    ///
    /// It always starts unlocked with exactly one default slot; slots for the
    /// individual daemons appear once real data is loaded.
    pub fn create_default(spec: ParameterSpec, _daemon_count: usize) -> Self {
        let values = vec![spec.default_value()];
        Self {
            spec,
            locked: false,
            values,
        }
    }

    /// Same slots and lock state checked against another spec.
    pub fn with_spec(&self, spec: ParameterSpec) -> Self {
        Self {
            spec,
            locked: self.locked,
            values: self.values.clone(),
        }
    }

    /// Per-daemon values of the unit, one per existing slot.
    pub fn to_per_daemon_values(&self) -> Vec<ParameterValue> {
        self.expand_to(self.values.len())
    }

    /// Per-daemon values for `count` daemons.
    ///
    /// A locked unit hands its first value to every daemon, including daemons
    /// that had no slot when the form was built. An unlocked unit pads the
    /// missing slots with the default.
    pub fn expand_to(&self, count: usize) -> Vec<ParameterValue> {
        (0..count).map(|index| self.value_for(index)).collect()
    }

    /// Value destined for the daemon at `index` of the unit's scope.
    pub fn value_for(&self, index: usize) -> ParameterValue {
        let slot = if self.locked { 0 } else { index };
        self.values
            .get(slot)
            .cloned()
            .unwrap_or_else(|| self.spec.default_value())
    }

    /// Indices of the slots that fail the spec checks.
    pub fn invalid_slots(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, value)| !self.spec.accepts(value))
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether every slot passes the spec checks.
    pub fn is_valid(&self) -> bool {
        self.values.iter().all(|value| self.spec.accepts(value))
    }

    /// Slot value rounded to the spec's display precision.
    pub fn display_value(&self, index: usize) -> Option<ParameterValue> {
        self.values.get(index).map(|value| match value {
            ParameterValue::Number(number) => {
                ParameterValue::Number(self.spec.round_for_display(*number))
            }
            other => other.clone(),
        })
    }

    /// Message shown for an invalid slot.
    pub fn invalid_message(&self, index: usize) -> String {
        if let Some(text) = &self.spec.invalid_text {
            return text.clone();
        }
        match (self.values.get(index), self.spec.min, self.spec.max) {
            (Some(ParameterValue::Number(_)), Some(min), Some(max)) => {
                format!("Value must be between {min} and {max}.")
            }
            (Some(ParameterValue::Number(_)), _, _) => {
                "Value must be a non-negative integer.".to_string()
            }
            (Some(ParameterValue::Text(_)), _, _) if !self.spec.allowed_values.is_empty() => {
                format!(
                    "Value must be one of: {}.",
                    self.spec.allowed_values.join(", ")
                )
            }
            (Some(ParameterValue::List(_)), _, _) => "List entries must not be empty.".to_string(),
            _ => format!("Value has the wrong type for {:?}.", self.spec.kind),
        }
    }
}
