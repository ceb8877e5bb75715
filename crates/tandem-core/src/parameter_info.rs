//! Parameter metadata types.
//!
//! This module provides types for describing parameter metadata:
//! - [`ParameterDescriptor`] - Static description of one parameter (name, range, default, flags)
//! - [`ParameterFlags`] - Behavioral flags (automation, integer, boolean)
//!
//! Descriptors are immutable after plugin creation and are shared between
//! the audio and control contexts. Values live in the per-context shadows
//! (see [`crate::parameter_table`]).

use crate::error::{PluginError, PluginResult};
use crate::parameter_format::Formatter;
use crate::types::ParameterValue;

/// Host flag bit: parameter can be automated.
pub const FLAG_AUTOMATABLE: u32 = 1 << 0;
/// Host flag bit: parameter takes integer values only.
pub const FLAG_INTEGER: u32 = 1 << 1;
/// Host flag bit: parameter is an on/off switch.
pub const FLAG_BOOLEAN: u32 = 1 << 2;

/// Flags controlling parameter behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParameterFlags {
    /// Parameter can be automated by the host.
    pub automatable: bool,
    /// Parameter values are whole numbers. Reads are rounded.
    pub integer: bool,
    /// Parameter is a toggle (0 or 1).
    pub boolean: bool,
}

impl ParameterFlags {
    /// No flags set.
    pub const NONE: Self = Self {
        automatable: false,
        integer: false,
        boolean: false,
    };

    /// Only the automatable flag set.
    pub const AUTOMATABLE: Self = Self {
        automatable: true,
        integer: false,
        boolean: false,
    };

    /// Set the automatable flag.
    pub const fn automatable(mut self) -> Self {
        self.automatable = true;
        self
    }

    /// Set the integer flag.
    pub const fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Set the boolean flag.
    pub const fn boolean(mut self) -> Self {
        self.boolean = true;
        self
    }

    /// Encode as the host bitset.
    pub const fn bits(&self) -> u32 {
        let mut bits = 0;
        if self.automatable {
            bits |= FLAG_AUTOMATABLE;
        }
        if self.integer {
            bits |= FLAG_INTEGER;
        }
        if self.boolean {
            bits |= FLAG_BOOLEAN;
        }
        bits
    }

    /// Decode from the host bitset. Unknown bits are ignored.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            automatable: bits & FLAG_AUTOMATABLE != 0,
            integer: bits & FLAG_INTEGER != 0,
            boolean: bits & FLAG_BOOLEAN != 0,
        }
    }
}

/// Metadata describing a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDescriptor {
    /// Display name (e.g., "Cutoff").
    pub name: &'static str,
    /// Smallest plain value.
    pub minimum: ParameterValue,
    /// Largest plain value.
    pub maximum: ParameterValue,
    /// Plain value on creation and reset.
    pub default_value: ParameterValue,
    /// Behavioral flags.
    pub flags: ParameterFlags,
    /// Unit suffix appended to the display string. Empty for none.
    pub units: &'static str,
}

impl ParameterDescriptor {
    /// Create a continuous, automatable parameter over `[minimum, maximum]`.
    ///
    /// The default is the minimum until overridden with [`with_default`](Self::with_default).
    pub const fn new(name: &'static str, minimum: ParameterValue, maximum: ParameterValue) -> Self {
        Self {
            name,
            minimum,
            maximum,
            default_value: minimum,
            flags: ParameterFlags::AUTOMATABLE,
            units: "",
        }
    }

    /// Create an on/off switch over `[0, 1]`, defaulting to off.
    pub const fn toggle(name: &'static str) -> Self {
        Self {
            name,
            minimum: 0.0,
            maximum: 1.0,
            default_value: 0.0,
            flags: ParameterFlags::NONE.boolean(),
            units: "",
        }
    }

    /// Set the default plain value.
    pub const fn with_default(mut self, default_value: ParameterValue) -> Self {
        self.default_value = default_value;
        self
    }

    /// Replace the flags.
    pub const fn with_flags(mut self, flags: ParameterFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the unit suffix.
    pub const fn with_units(mut self, units: &'static str) -> Self {
        self.units = units;
        self
    }

    /// Check the descriptor invariants.
    ///
    /// A descriptor is valid when `minimum < maximum` (so normalisation never
    /// divides by zero) and the default lies inside the range.
    pub fn validate(&self) -> PluginResult<()> {
        if !(self.minimum < self.maximum) {
            return Err(PluginError::Configuration(format!(
                "parameter '{}' has an empty range [{}, {}]",
                self.name, self.minimum, self.maximum
            )));
        }
        if !(self.minimum..=self.maximum).contains(&self.default_value) {
            return Err(PluginError::Configuration(format!(
                "parameter '{}' default {} lies outside [{}, {}]",
                self.name, self.default_value, self.minimum, self.maximum
            )));
        }
        Ok(())
    }

    /// Clamp a plain value into `[minimum, maximum]`.
    ///
    /// NaN maps to the default value.
    #[inline]
    pub fn clamp(&self, value: ParameterValue) -> ParameterValue {
        if value.is_nan() {
            self.default_value
        } else if value < self.minimum {
            self.minimum
        } else if value > self.maximum {
            self.maximum
        } else {
            value
        }
    }

    /// Map a plain value to `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `minimum >= maximum`. Such a descriptor is misconfigured and
    /// would otherwise produce NaN or infinity.
    #[inline]
    pub fn normalise(&self, plain: ParameterValue) -> ParameterValue {
        let span = self.maximum - self.minimum;
        assert!(
            span > 0.0 && span.is_finite(),
            "parameter '{}' cannot be normalised: range [{}, {}] is degenerate",
            self.name,
            self.minimum,
            self.maximum
        );
        ((self.clamp(plain) - self.minimum) / span).clamp(0.0, 1.0)
    }

    /// Map a normalised value back to a plain value in `[minimum, maximum]`.
    #[inline]
    pub fn denormalise(&self, normalised: ParameterValue) -> ParameterValue {
        self.clamp(normalised * (self.maximum - self.minimum) + self.minimum)
    }

    /// Formatter used for display strings, derived from the flags.
    pub fn formatter(&self) -> Formatter {
        if self.flags.boolean {
            Formatter::Boolean
        } else if self.flags.integer {
            Formatter::Integer
        } else {
            Formatter::Float { precision: 2 }
        }
    }

    /// Format a plain value for display, including the unit suffix.
    pub fn value_to_string(&self, value: ParameterValue) -> String {
        let text = self.formatter().text(value);
        if self.units.is_empty() {
            text
        } else {
            format!("{} {}", text, self.units)
        }
    }

    /// Parse a display string to a plain value.
    ///
    /// Returns `None` if the string has no numeric prefix. The result is not
    /// clamped; callers apply it through `set_value`, which clamps.
    pub fn string_to_value(&self, text: &str) -> Option<ParameterValue> {
        self.formatter().parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const LEVEL: ParameterDescriptor = ParameterDescriptor::new("Level", 0.0, 100.0).with_default(50.0);
    const STEPS: ParameterDescriptor = ParameterDescriptor::new("Steps", 2.0, 5.0)
        .with_default(2.0)
        .with_flags(ParameterFlags::AUTOMATABLE.integer());

    #[test]
    fn test_flag_bits_round_trip() {
        let flags = ParameterFlags::NONE.automatable().integer();
        assert_eq!(flags.bits(), FLAG_AUTOMATABLE | FLAG_INTEGER);
        assert_eq!(ParameterFlags::from_bits(flags.bits()), flags);
        assert_eq!(ParameterFlags::from_bits(FLAG_BOOLEAN | 0x80).bits(), FLAG_BOOLEAN);
    }

    #[test]
    fn test_normalise_denormalise_inverse() {
        for descriptor in [LEVEL, STEPS, ParameterDescriptor::toggle("On")] {
            let steps = 64;
            for i in 0..=steps {
                let x = descriptor.minimum
                    + (descriptor.maximum - descriptor.minimum) * f64::from(i) / f64::from(steps);
                let back = descriptor.denormalise(descriptor.normalise(x));
                assert_abs_diff_eq!(back, x, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_normalise_clamps() {
        assert_eq!(LEVEL.normalise(-10.0), 0.0);
        assert_eq!(LEVEL.normalise(250.0), 1.0);
        assert_abs_diff_eq!(LEVEL.normalise(25.0), 0.25);
    }

    #[test]
    fn test_clamp_nan_to_default() {
        assert_eq!(LEVEL.clamp(f64::NAN), 50.0);
    }

    #[test]
    fn test_denormalise_clamps() {
        assert_eq!(STEPS.denormalise(-0.5), 2.0);
        assert_eq!(STEPS.denormalise(1.5), 5.0);
        assert_abs_diff_eq!(STEPS.denormalise(0.5), 3.5);
    }

    #[test]
    #[should_panic(expected = "degenerate")]
    fn test_normalise_degenerate_range_panics() {
        let broken = ParameterDescriptor::new("Broken", 1.0, 1.0);
        let _ = broken.normalise(1.0);
    }

    #[test]
    fn test_validate() {
        assert!(LEVEL.validate().is_ok());
        assert!(ParameterDescriptor::new("Empty", 3.0, 3.0).validate().is_err());
        assert!(ParameterDescriptor::new("Inverted", 1.0, 0.0).validate().is_err());
        assert!(LEVEL.with_default(101.0).validate().is_err());
    }

    #[test]
    fn test_value_to_string_with_units() {
        let utf8 = ParameterDescriptor::new("UTF8", 0.0, 1.0).with_units("UTF8");
        assert_eq!(utf8.value_to_string(0.5), "0.50 UTF8");
        assert_eq!(LEVEL.value_to_string(12.346), "12.35");
        assert_eq!(STEPS.value_to_string(3.9), "3");
        assert_eq!(ParameterDescriptor::toggle("On").value_to_string(0.7), "1");
    }
}
