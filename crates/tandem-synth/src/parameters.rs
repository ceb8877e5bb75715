//! Parameter set of the synth.

use std::sync::Arc;

use tandem_core::{ParameterDescriptor, ParameterFlags, ParameterIndex};

/// Parameter indices, in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SynthParameter {
    Float = 0,
    Int = 1,
    Bool = 2,
    Utf8 = 3,
}

impl SynthParameter {
    /// All parameters in index order.
    pub const ALL: [SynthParameter; 4] = [
        SynthParameter::Float,
        SynthParameter::Int,
        SynthParameter::Bool,
        SynthParameter::Utf8,
    ];

    /// Host parameter index.
    #[inline]
    pub const fn index(self) -> ParameterIndex {
        self as ParameterIndex
    }

    /// Parameter for a host index.
    pub const fn from_index(index: ParameterIndex) -> Option<Self> {
        match index {
            0 => Some(SynthParameter::Float),
            1 => Some(SynthParameter::Int),
            2 => Some(SynthParameter::Bool),
            3 => Some(SynthParameter::Utf8),
            _ => None,
        }
    }

    /// Static descriptor.
    #[inline]
    pub fn descriptor(self) -> &'static ParameterDescriptor {
        &PARAMETERS[self as usize]
    }
}

/// Number of parameters.
pub const PARAMETER_COUNT: usize = 4;

/// Descriptors in index order.
pub static PARAMETERS: [ParameterDescriptor; PARAMETER_COUNT] = [
    ParameterDescriptor::new("Parameter Float", 0.0, 100.0).with_default(50.0),
    ParameterDescriptor::new("Parameter Int", 2.0, 5.0)
        .with_default(2.0)
        .with_flags(ParameterFlags::AUTOMATABLE.integer()),
    ParameterDescriptor::toggle("Parameter Bool"),
    ParameterDescriptor::new("Parameter UTF8", 0.0, 1.0).with_units("UTF8"),
];

/// Descriptor list shared by both parameter shadows.
pub fn descriptors() -> Arc<[ParameterDescriptor]> {
    Arc::from(&PARAMETERS[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_are_valid() {
        for descriptor in &PARAMETERS {
            descriptor.validate().unwrap();
        }
    }

    #[test]
    fn test_indices_round_trip() {
        for parameter in SynthParameter::ALL {
            assert_eq!(SynthParameter::from_index(parameter.index()), Some(parameter));
        }
        assert_eq!(SynthParameter::from_index(4), None);
    }

    #[test]
    fn test_flags() {
        assert_eq!(SynthParameter::Float.descriptor().flags.bits(), 1);
        assert_eq!(SynthParameter::Int.descriptor().flags.bits(), 1 | 2);
        assert_eq!(SynthParameter::Bool.descriptor().flags.bits(), 4);
        assert_eq!(SynthParameter::Utf8.descriptor().flags.bits(), 1);
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(SynthParameter::Float.descriptor().value_to_string(50.0), "50.00");
        assert_eq!(SynthParameter::Int.descriptor().value_to_string(3.0), "3");
        assert_eq!(SynthParameter::Bool.descriptor().value_to_string(0.6), "1");
        assert_eq!(SynthParameter::Utf8.descriptor().value_to_string(0.25), "0.25 UTF8");
    }
}
