//! Per-context parameter value storage.
//!
//! A [`ParameterTable`] is one shadow copy of every parameter value, paired
//! with the shared descriptor list. The audio context and the control context
//! each own one table; the two are never the same memory and only converge
//! through queued events (see [`crate::parameter_shadow`]).
//!
//! All index-taking methods expect an index in `[0, count)` and panic
//! otherwise. Hosts are required to stay within the advertised count.

use std::sync::Arc;

use crate::parameter_info::ParameterDescriptor;
use crate::types::{ParameterIndex, ParameterValue};

/// One shadow copy of the parameter values.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    descriptors: Arc<[ParameterDescriptor]>,
    values: Box<[f32]>,
}

impl ParameterTable {
    /// Create a table with every value at its descriptor's default.
    pub fn new(descriptors: Arc<[ParameterDescriptor]>) -> Self {
        let values = descriptors
            .iter()
            .map(|d| d.default_value as f32)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            descriptors,
            values,
        }
    }

    /// Number of parameters.
    #[inline]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Descriptor for `index`, or `None` if out of range.
    #[inline]
    pub fn descriptor(&self, index: ParameterIndex) -> Option<&ParameterDescriptor> {
        self.descriptors.get(index as usize)
    }

    /// The shared descriptor list.
    #[inline]
    pub fn descriptors(&self) -> &Arc<[ParameterDescriptor]> {
        &self.descriptors
    }

    #[inline]
    fn info(&self, index: ParameterIndex) -> &ParameterDescriptor {
        &self.descriptors[index as usize]
    }

    /// Current value, rounded to the nearest integer for integer parameters.
    #[inline]
    pub fn value(&self, index: ParameterIndex) -> ParameterValue {
        let value = ParameterValue::from(self.values[index as usize]);
        if self.info(index).flags.integer {
            value.round()
        } else {
            value
        }
    }

    /// Default value of a parameter.
    #[inline]
    pub fn default_value(&self, index: ParameterIndex) -> ParameterValue {
        self.info(index).default_value
    }

    /// Clamp `value` into range, store it and return what was stored.
    #[inline]
    pub fn set_value(&mut self, index: ParameterIndex, value: ParameterValue) -> ParameterValue {
        let stored = self.info(index).clamp(value) as f32;
        self.values[index as usize] = stored;
        ParameterValue::from(stored)
    }

    /// Raw stored values in index order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Overwrite every value from `values`.
    ///
    /// Values are clamped. Returns `false` and changes nothing if the length
    /// does not match [`count`](Self::count).
    pub fn apply_values(&mut self, values: &[f32]) -> bool {
        if values.len() != self.values.len() {
            return false;
        }
        for (index, value) in values.iter().enumerate() {
            self.set_value(index as ParameterIndex, ParameterValue::from(*value));
        }
        true
    }

    /// See [`ParameterDescriptor::normalise`].
    #[inline]
    pub fn normalise(&self, index: ParameterIndex, plain: ParameterValue) -> ParameterValue {
        self.info(index).normalise(plain)
    }

    /// See [`ParameterDescriptor::denormalise`].
    #[inline]
    pub fn denormalise(&self, index: ParameterIndex, normalised: ParameterValue) -> ParameterValue {
        self.info(index).denormalise(normalised)
    }

    /// See [`ParameterDescriptor::value_to_string`].
    pub fn value_to_string(&self, index: ParameterIndex, value: ParameterValue) -> String {
        self.info(index).value_to_string(value)
    }

    /// See [`ParameterDescriptor::string_to_value`].
    pub fn string_to_value(&self, index: ParameterIndex, text: &str) -> Option<ParameterValue> {
        self.info(index).string_to_value(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_info::ParameterFlags;
    use approx::assert_abs_diff_eq;

    fn table() -> ParameterTable {
        ParameterTable::new(Arc::from(vec![
            ParameterDescriptor::new("Level", 0.0, 100.0).with_default(50.0),
            ParameterDescriptor::new("Steps", 2.0, 5.0)
                .with_default(2.0)
                .with_flags(ParameterFlags::AUTOMATABLE.integer()),
            ParameterDescriptor::toggle("Enabled"),
        ]))
    }

    #[test]
    fn test_starts_at_defaults() {
        let table = table();
        assert_eq!(table.count(), 3);
        assert_eq!(table.value(0), 50.0);
        assert_eq!(table.value(1), 2.0);
        assert_eq!(table.value(2), 0.0);
        assert_eq!(table.default_value(0), 50.0);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut table = table();
        assert_eq!(table.set_value(0, 150.0), 100.0);
        assert_eq!(table.value(0), 100.0);
        assert_eq!(table.set_value(1, -3.0), 2.0);
        assert_abs_diff_eq!(table.set_value(0, 12.5), 12.5);
    }

    #[test]
    fn test_integer_value_is_rounded_and_idempotent() {
        let mut table = table();
        for raw in [2.0, 2.49, 2.5, 3.7, 4.2, 5.0] {
            table.set_value(1, raw);
            let value = table.value(1);
            assert_eq!(value, value.round());
        }
        table.set_value(1, 3.7);
        assert_eq!(table.value(1), 4.0);
    }

    #[test]
    fn test_apply_values_rejects_wrong_length() {
        let mut table = table();
        assert!(!table.apply_values(&[1.0, 3.0]));
        assert_eq!(table.values(), &[50.0, 2.0, 0.0]);

        assert!(table.apply_values(&[10.0, 4.0, 1.0]));
        assert_eq!(table.values(), &[10.0, 4.0, 1.0]);
    }

    #[test]
    fn test_passthroughs() {
        let table = table();
        assert_abs_diff_eq!(table.normalise(0, 25.0), 0.25);
        assert_abs_diff_eq!(table.denormalise(1, 1.0), 5.0);
        assert_eq!(table.value_to_string(1, 3.0), "3");
        assert_eq!(table.string_to_value(0, "33.3"), Some(33.3));
        assert!(table.descriptor(3).is_none());
    }
}
