//! The plugin lifecycle contract.
//!
//! Host format adapters talk to plugins exclusively through [`Plugin`]. The
//! trait bundles the parameter surface, the bus surface, preparation, the
//! render call and state persistence. Most parameter methods have default
//! implementations in terms of [`Plugin::parameters`], so a plugin only has
//! to expose its audio-side table and implement the mutating calls.

use std::io::{Read, Write};

use crate::bus_config::{BusDirection, BusLayout};
use crate::config::PluginConfig;
use crate::error::PluginResult;
use crate::parameter_info::ParameterDescriptor;
use crate::parameter_table::ParameterTable;
use crate::process_context::ProcessContext;
use crate::types::{ParameterIndex, ParameterValue};

/// A real-time audio plugin.
///
/// # Threading
///
/// `process` runs on the audio context. Everything else may be called from
/// the control context, but never concurrently with `process` on the same
/// instance: hosts serialise calls into one object, and plugins that need
/// true two-thread operation split themselves into an audio half and a
/// control half connected by event queues.
pub trait Plugin: Send {
    /// Static configuration.
    fn config(&self) -> &'static PluginConfig;

    /// Parameter values as seen by the host.
    fn parameters(&self) -> &ParameterTable;

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Number of parameters.
    fn parameter_count(&self) -> usize {
        self.parameters().count()
    }

    /// Descriptor for `index`.
    fn parameter_descriptor(&self, index: ParameterIndex) -> Option<&ParameterDescriptor> {
        self.parameters().descriptor(index)
    }

    /// Display name, or an empty string for an unknown index.
    fn parameter_name(&self, index: ParameterIndex) -> &'static str {
        self.parameter_descriptor(index).map(|d| d.name).unwrap_or("")
    }

    /// `(minimum, maximum)` of a parameter.
    fn parameter_range(&self, index: ParameterIndex) -> Option<(ParameterValue, ParameterValue)> {
        self.parameter_descriptor(index).map(|d| (d.minimum, d.maximum))
    }

    /// Host flag bits of a parameter.
    fn parameter_flags(&self, index: ParameterIndex) -> u32 {
        self.parameter_descriptor(index)
            .map(|d| d.flags.bits())
            .unwrap_or(0)
    }

    /// Current value (rounded for integer parameters).
    fn parameter_value(&self, index: ParameterIndex) -> ParameterValue {
        self.parameters().value(index)
    }

    /// Default value.
    fn parameter_default(&self, index: ParameterIndex) -> ParameterValue {
        self.parameters().default_value(index)
    }

    /// Set a value from the host. Returns the clamped, stored value.
    fn set_parameter_value(&mut self, index: ParameterIndex, value: ParameterValue) -> ParameterValue;

    /// Plain value to `[0, 1]`.
    fn normalise(&self, index: ParameterIndex, plain: ParameterValue) -> ParameterValue {
        self.parameters().normalise(index, plain)
    }

    /// `[0, 1]` to plain value.
    fn denormalise(&self, index: ParameterIndex, normalised: ParameterValue) -> ParameterValue {
        self.parameters().denormalise(index, normalised)
    }

    /// Display string for a plain value.
    fn value_to_string(&self, index: ParameterIndex, value: ParameterValue) -> String {
        self.parameters().value_to_string(index, value)
    }

    /// Plain value for a display string.
    fn string_to_value(&self, index: ParameterIndex, text: &str) -> Option<ParameterValue> {
        self.parameters().string_to_value(index, text)
    }

    // =========================================================================
    // Buses and timing
    // =========================================================================

    /// Audio buses.
    fn bus_layout(&self) -> BusLayout {
        BusLayout::stereo()
    }

    /// Number of buses in `direction`.
    fn bus_count(&self, direction: BusDirection) -> usize {
        self.bus_layout().bus_count(direction)
    }

    /// Channel count of a bus; zero for unknown buses.
    fn bus_channel_count(&self, direction: BusDirection, index: usize) -> u32 {
        self.bus_layout().channel_count(direction, index)
    }

    /// Name of a bus; empty for unknown buses.
    fn bus_name(&self, direction: BusDirection, index: usize) -> &'static str {
        self.bus_layout().bus_name(direction, index)
    }

    /// Processing latency in samples.
    fn latency_samples(&self) -> u32 {
        0
    }

    /// Tail length in samples.
    fn tail_samples(&self) -> u32 {
        0
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Configure for a sample rate and maximum block size.
    ///
    /// Called before the first `process` and whenever the host changes
    /// either value. May allocate.
    fn prepare(&mut self, sample_rate: f64, max_block_size: usize);

    /// Render one block.
    fn process(&mut self, ctx: &mut dyn ProcessContext);

    /// Write the parameter state.
    fn save_state(&self, writer: &mut dyn Write) -> PluginResult<()>;

    /// Restore the parameter state.
    ///
    /// Returns `Ok(false)` and keeps the current values if the blob does not
    /// match this plugin's parameter set.
    fn load_state(&mut self, reader: &mut dyn Read) -> PluginResult<bool>;
}
