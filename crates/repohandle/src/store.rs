//! # Option Store
//!
//! One handle's current bindings, one slot per catalog entry, in catalog
//! order. Slots are created with the defaults when the store is built and
//! never added or removed afterwards; only their values change.
//!
//! A `set` coerces first and writes only on success, so a rejected input
//! leaves the previous value untouched.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::codes::OptionCode;
use crate::error::{HandleError, Result};
use crate::options::{self, coerce, Coerced, Input, OptValue, OptionSpec, OPTIONS};

#[derive(Debug, Clone)]
pub struct OptionStore {
    values: Vec<OptValue>,
}

impl Default for OptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionStore {
    pub fn new() -> Self {
        Self {
            values: OPTIONS.iter().map(OptionSpec::default_value).collect(),
        }
    }

    fn slot(name: &str) -> Result<(usize, &'static OptionSpec)> {
        options::position(name)
            .map(|i| (i, &OPTIONS[i]))
            .ok_or_else(|| HandleError::UnknownOption(name.to_string()))
    }

    /// Coerce `input` for `name` and store it.
    pub fn set(&mut self, name: &str, input: Input) -> Result<()> {
        let (slot, spec) = Self::slot(name)?;
        let coerced = coerce(spec, input).inspect_err(|err| {
            tracing::debug!(option = spec.name, error = %err, "Rejected option value");
        })?;
        let cleared = matches!(coerced, Coerced::Clear);
        self.values[slot] = coerced.into_value(spec);
        tracing::debug!(option = spec.name, cleared, "Option set");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&OptValue> {
        let (slot, _) = Self::slot(name)?;
        Ok(&self.values[slot])
    }

    /// Same as setting an absent input.
    pub fn clear(&mut self, name: &str) -> Result<()> {
        self.set(name, Input::Absent)
    }

    /// Every option with its current value, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static OptionSpec, &OptValue)> {
        OPTIONS.iter().zip(self.values.iter())
    }

    // Option codes are numbered in catalog order, so a code is its slot.
    pub(crate) fn by_code(&self, code: OptionCode) -> &OptValue {
        &self.values[code as usize]
    }
}

impl Serialize for OptionStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (spec, value) in self.iter() {
            map.serialize_entry(spec.name, value)?;
        }
        map.end()
    }
}
