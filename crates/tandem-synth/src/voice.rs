//! Monophonic sine voice.
//!
//! The voice follows the most recent note-on. A note-off only silences it if
//! it names the currently sounding note. Loudness follows velocity on a dB
//! curve that is linear from -60 dB (velocity 0) to -6 dB (velocity 127).

use std::f32::consts::TAU;

use tandem_core::{MidiKind, MidiMessage};

/// MIDI note of the tuning reference (A4).
pub const REFERENCE_NOTE: u8 = 69;
/// Frequency of the tuning reference in Hz.
pub const REFERENCE_HZ: f32 = 440.0;

/// Level at zero velocity.
pub const MIN_GAIN_DB: f32 = -60.0;
/// Level at full velocity.
pub const MAX_GAIN_DB: f32 = -6.0;

/// Equal-tempered frequency of a MIDI note.
#[inline]
pub fn note_to_hz(note: u8) -> f32 {
    REFERENCE_HZ * ((f32::from(note) - f32::from(REFERENCE_NOTE)) / 12.0).exp2()
}

/// Linear gain for a velocity in `[0, 1]`.
#[inline]
pub fn velocity_to_gain(velocity: f32) -> f32 {
    let db = MIN_GAIN_DB + velocity * (MAX_GAIN_DB - MIN_GAIN_DB);
    10.0f32.powf(db / 20.0)
}

/// Audio-context state of the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstrumentState {
    /// Oscillator phase in `[0, 1)`.
    pub phase: f32,
    /// Sounding note, if any.
    pub active_note: Option<u8>,
    /// Velocity of the last note message in `[0, 1]`.
    pub velocity: f32,
}

/// The single voice.
#[derive(Debug, Clone, Default)]
pub struct Voice {
    state: InstrumentState,
}

impl Voice {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &InstrumentState {
        &self.state
    }

    /// Apply a MIDI message.
    ///
    /// Note-off updates the velocity even when it does not match the
    /// sounding note. Pitch wheel is decoded but does not bend yet.
    pub fn handle_midi(&mut self, message: MidiMessage) {
        match message.kind() {
            MidiKind::NoteOn { note, velocity } => {
                self.state.active_note = Some(note);
                self.state.velocity = velocity_from_midi(velocity);
            }
            MidiKind::NoteOff { note, velocity } => {
                if self.state.active_note == Some(note) {
                    self.state.active_note = None;
                }
                self.state.velocity = velocity_from_midi(velocity);
            }
            MidiKind::PitchWheel { value: _ } => {}
            MidiKind::Other => {}
        }
    }

    /// Synthesize into `out`, starting at `phase`.
    ///
    /// Frequency and gain are taken from the current state once for the whole
    /// span. Writes silence when no note is sounding. Returns the phase after
    /// the last frame; the voice itself is not advanced (see [`Self::set_phase`]),
    /// so several channels can be rendered from the same starting phase.
    pub fn render(&self, phase: f32, out: &mut [f32], sample_rate: f32) -> f32 {
        let Some(note) = self.state.active_note else {
            out.fill(0.0);
            return phase;
        };

        let increment = note_to_hz(note) / sample_rate;
        let gain = velocity_to_gain(self.state.velocity);

        let mut phase = phase;
        for sample in out.iter_mut() {
            *sample = gain * (TAU * phase).sin();
            phase += increment;
            phase -= phase.trunc();
        }
        phase
    }

    /// Commit the oscillator phase after rendering.
    #[inline]
    pub fn set_phase(&mut self, phase: f32) {
        self.state.phase = phase;
    }
}

#[inline]
fn velocity_from_midi(velocity: u8) -> f32 {
    f32::from(velocity) / 127.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_note_to_hz() {
        assert_abs_diff_eq!(note_to_hz(69), 440.0, epsilon = 1e-3);
        assert_abs_diff_eq!(note_to_hz(81), 880.0, epsilon = 1e-3);
        assert_abs_diff_eq!(note_to_hz(60), 261.6256, epsilon = 1e-3);
    }

    #[test]
    fn test_velocity_curve() {
        assert_abs_diff_eq!(velocity_to_gain(0.0), 0.001, epsilon = 1e-6);
        assert_abs_diff_eq!(velocity_to_gain(1.0), 0.501_187, epsilon = 1e-5);
        assert_abs_diff_eq!(
            20.0 * velocity_to_gain(0.5).log10(),
            -33.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_note_on_and_matching_note_off() {
        let mut voice = Voice::new();
        voice.handle_midi(MidiMessage::note_on(0, 60, 127));
        assert_eq!(voice.state().active_note, Some(60));
        assert_eq!(voice.state().velocity, 1.0);

        voice.handle_midi(MidiMessage::note_off(0, 60, 0));
        assert_eq!(voice.state().active_note, None);
    }

    #[test]
    fn test_mismatched_note_off_keeps_note() {
        let mut voice = Voice::new();
        voice.handle_midi(MidiMessage::note_on(0, 60, 127));
        voice.handle_midi(MidiMessage::note_off(0, 62, 64));

        assert_eq!(voice.state().active_note, Some(60));
        assert_abs_diff_eq!(voice.state().velocity, 64.0 / 127.0);
    }

    #[test]
    fn test_pitch_wheel_is_ignored() {
        let mut voice = Voice::new();
        voice.handle_midi(MidiMessage::note_on(0, 69, 100));
        let before = *voice.state();
        voice.handle_midi(MidiMessage::pitch_wheel(0, 0x3FFF));
        assert_eq!(*voice.state(), before);
    }

    #[test]
    fn test_render_silence_without_note() {
        let voice = Voice::new();
        let mut out = [1.0; 16];
        assert_eq!(voice.render(0.25, &mut out, 48_000.0), 0.25);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_phase_stays_wrapped() {
        let mut voice = Voice::new();
        voice.handle_midi(MidiMessage::note_on(0, 127, 127));

        let mut out = vec![0.0; 48_000];
        let mut phase = 0.0;
        for _ in 0..20 {
            phase = voice.render(phase, &mut out, 48_000.0);
            assert!((0.0..1.0).contains(&phase));
        }
        assert!(out.iter().all(|s| s.abs() <= 0.51));
    }
}
