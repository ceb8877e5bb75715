//! Lifecycle shell: the synth as a [`Plugin`].

use std::io::{Read, Write};

use tandem_core::{
    parameter_shadows, ControlParameters, ParameterIndex, ParameterTable, ParameterValue, Plugin,
    PluginConfig, PluginResult, ProcessContext, RawStateCodec, StateCodec,
};

use crate::parameters::descriptors;
use crate::processor::SynthProcessor;
use crate::CONFIG;

/// The synth with both parameter shadows in one object.
///
/// Format adapters that call every entry point from one thread at a time can
/// use this directly. Adapters with a dedicated audio thread call
/// [`Synth::split`] and move the processor there.
pub struct Synth {
    processor: SynthProcessor,
    control: ControlParameters,
    codec: Box<dyn StateCodec>,
}

impl Synth {
    pub fn new() -> Self {
        let (audio, control) = parameter_shadows(descriptors(), CONFIG.queue_capacity);
        Self {
            processor: SynthProcessor::new(audio),
            control,
            codec: Box::new(RawStateCodec),
        }
    }

    /// Use a different state format.
    pub fn with_codec(mut self, codec: impl StateCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn processor(&self) -> &SynthProcessor {
        &self.processor
    }

    /// Control-context shadow, as seen by an editor.
    pub fn control(&self) -> &ControlParameters {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut ControlParameters {
        &mut self.control
    }

    /// Separate the audio half from the control half.
    pub fn split(self) -> (SynthProcessor, ControlParameters) {
        (self.processor, self.control)
    }
}

impl Default for Synth {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for Synth {
    fn config(&self) -> &'static PluginConfig {
        &CONFIG
    }

    fn parameters(&self) -> &ParameterTable {
        self.processor.parameters().table()
    }

    fn set_parameter_value(&mut self, index: ParameterIndex, value: ParameterValue) -> ParameterValue {
        self.processor.set_parameter_value(index, value)
    }

    fn prepare(&mut self, sample_rate: f64, max_block_size: usize) {
        self.processor.prepare(sample_rate, max_block_size);
    }

    fn process(&mut self, ctx: &mut dyn ProcessContext) {
        self.processor.process(ctx);
        self.control.sync();
    }

    fn save_state(&self, writer: &mut dyn Write) -> PluginResult<()> {
        self.codec.encode(self.processor.parameters().values(), writer)
    }

    fn load_state(&mut self, reader: &mut dyn Read) -> PluginResult<bool> {
        if !self.control.load_state(self.codec.as_ref(), reader)? {
            return Ok(false);
        }
        // Both halves live here, so the audio shadow can be updated now
        // rather than at the next block.
        self.processor
            .parameters_mut()
            .apply_values(self.control.values());
        Ok(true)
    }
}
