//! Audio-context half of the synth.

use no_denormals::no_denormals;
use tandem_core::{AudioParameters, Event, FrameOffset, ParameterIndex, ParameterValue, ProcessContext};

use crate::voice::Voice;

/// Main output bus index.
const MAIN_BUS: usize = 0;

/// Renders the synth inside the host's audio callback.
///
/// Owns the audio-side parameter shadow and the voice. Nothing here locks,
/// allocates or blocks.
#[derive(Debug)]
pub struct SynthProcessor {
    parameters: AudioParameters,
    voice: Voice,
    sample_rate: f32,
}

impl SynthProcessor {
    pub fn new(parameters: AudioParameters) -> Self {
        Self {
            parameters,
            voice: Voice::new(),
            sample_rate: 44_100.0,
        }
    }

    pub fn parameters(&self) -> &AudioParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut AudioParameters {
        &mut self.parameters
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Set the sample rate. The block size needs no preparation.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) {
        assert!(sample_rate > 0.0, "sample rate must be positive, got {sample_rate}");
        self.sample_rate = sample_rate as f32;
        log::debug!("synth prepared: {sample_rate} Hz, up to {max_block_size} frames per block");
    }

    /// Host automation. Published to the control side at the end of the block.
    pub fn set_parameter_value(&mut self, index: ParameterIndex, value: ParameterValue) -> ParameterValue {
        self.parameters.set_value(index, value)
    }

    /// Render one block.
    pub fn process(&mut self, ctx: &mut dyn ProcessContext) {
        no_denormals(|| {
            self.process_block(ctx);
            self.parameters.publish_changes();
        });
    }

    fn process_block(&mut self, ctx: &mut dyn ProcessContext) {
        // Editor edits land first and are reported to the host at frame 0.
        self.parameters.drain_control_events(ctx);

        let channel_count = ctx.output_channel_count(MAIN_BUS);
        if channel_count == 0 {
            host_contract_violation("no output channels on the main bus");
            return;
        }

        let mut frame: FrameOffset = 0;
        while let Some(event) = ctx.dequeue_event(frame) {
            match event {
                Event::ParameterChange { index, value } => {
                    if (index as usize) < self.parameters.table().count() {
                        self.parameters.set_value(index, value);
                    }
                }
                Event::Midi(message) => self.voice.handle_midi(message),
                Event::ProcessAudio {
                    start_frame,
                    end_frame,
                } => {
                    if end_frame <= frame || start_frame != frame {
                        host_contract_violation("audio span does not continue the block");
                        return;
                    }
                    if !self.render(ctx, channel_count, start_frame, end_frame) {
                        return;
                    }
                    frame = end_frame;
                }
            }
        }
    }

    /// Fill `[start, end)` of every main output channel.
    ///
    /// Every channel is rendered from the same starting phase so they carry
    /// identical samples. Returns `false` if a buffer is missing.
    fn render(
        &mut self,
        ctx: &mut dyn ProcessContext,
        channel_count: usize,
        start: FrameOffset,
        end: FrameOffset,
    ) -> bool {
        let start_phase = self.voice.state().phase;
        let mut end_phase = start_phase;

        for channel in 0..channel_count {
            let Some(samples) = ctx.output_channel(MAIN_BUS, channel) else {
                host_contract_violation("missing output channel buffer");
                return false;
            };
            let end = (end as usize).min(samples.len());
            let start = (start as usize).min(end);
            end_phase = self
                .voice
                .render(start_phase, &mut samples[start..end], self.sample_rate);
        }

        self.voice.set_phase(end_phase);
        true
    }
}

#[cold]
fn host_contract_violation(what: &str) {
    log::error!("host contract violation, block aborted: {what}");
    debug_assert!(false, "host contract violation: {what}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{descriptors, SynthParameter};
    use tandem_core::{parameter_shadows, BlockContext, ControlParameters, MidiMessage, TimedEvent};

    fn new_processor() -> (SynthProcessor, ControlParameters) {
        let (audio, control) = parameter_shadows(descriptors(), 16);
        let mut processor = SynthProcessor::new(audio);
        processor.prepare(48_000.0, 64);
        (processor, control)
    }

    fn run(processor: &mut SynthProcessor, frames: usize, events: &[TimedEvent]) -> [Vec<f32>; 2] {
        let mut left = vec![1.0; frames];
        let mut right = vec![1.0; frames];
        let mut host_events = Vec::with_capacity(16);
        {
            let mut outputs = [left.as_mut_slice(), right.as_mut_slice()];
            let mut ctx = BlockContext::new(frames, events, &mut host_events, &mut outputs);
            processor.process(&mut ctx);
        }
        [left, right]
    }

    #[test]
    fn test_silence_overwrites_buffer() {
        let (mut processor, _control) = new_processor();
        let [left, right] = run(&mut processor, 32, &[]);
        assert!(left.iter().chain(&right).all(|&s| s == 0.0));
    }

    #[test]
    fn test_channels_are_identical() {
        let (mut processor, _control) = new_processor();
        let events = [TimedEvent::new(5, Event::Midi(MidiMessage::note_on(0, 72, 90)))];
        let [left, right] = run(&mut processor, 64, &events);
        assert_eq!(left, right);
        assert!(left[5..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_phase_continues_across_blocks() {
        let (mut processor, _control) = new_processor();
        let events = [TimedEvent::new(0, Event::Midi(MidiMessage::note_on(0, 69, 127)))];
        let [first, _] = run(&mut processor, 32, &events);
        let [second, _] = run(&mut processor, 32, &[]);

        let (mut reference, _control) = new_processor();
        let [whole, _] = run(&mut reference, 64, &events);

        assert_eq!(&whole[..32], &first[..]);
        assert_eq!(&whole[32..], &second[..]);
    }

    #[test]
    fn test_host_parameter_change_applies_in_order() {
        let (mut processor, _control) = new_processor();
        let index = SynthParameter::Float.index();
        let events = [
            TimedEvent::new(3, Event::parameter(index, 10.0)),
            TimedEvent::new(8, Event::parameter(index, 500.0)),
            TimedEvent::new(9, Event::parameter(99, 1.0)),
        ];
        run(&mut processor, 16, &events);
        assert_eq!(processor.parameters().value(index), 100.0);
    }

    #[test]
    fn test_editor_edit_is_forwarded_to_host() {
        let (mut processor, mut control) = new_processor();
        control.set_value(SynthParameter::Utf8.index(), 0.75);

        let mut left = vec![0.0; 8];
        let mut right = vec![0.0; 8];
        let mut host_events = Vec::with_capacity(4);
        {
            let mut outputs = [left.as_mut_slice(), right.as_mut_slice()];
            let mut ctx = BlockContext::new(8, &[], &mut host_events, &mut outputs);
            processor.process(&mut ctx);
        }

        assert_eq!(
            host_events,
            vec![TimedEvent::new(0, Event::parameter(SynthParameter::Utf8.index(), 0.75))]
        );
        assert_eq!(processor.parameters().value(SynthParameter::Utf8.index()), 0.75);
    }

    #[test]
    fn test_host_automation_reaches_control_side() {
        let (mut processor, mut control) = new_processor();
        let index = SynthParameter::Float.index();
        run(&mut processor, 16, &[TimedEvent::new(4, Event::parameter(index, 64.0))]);

        assert_eq!(control.sync(), 1);
        assert_eq!(control.value(index), 64.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "host contract violation")]
    fn test_missing_outputs_abort_block() {
        let (mut processor, _control) = new_processor();
        let mut outputs: [&mut [f32]; 0] = [];
        let mut host_events = Vec::new();
        let mut ctx = BlockContext::new(8, &[], &mut host_events, &mut outputs);
        processor.process(&mut ctx);
    }
}
