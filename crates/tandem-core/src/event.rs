//! Events exchanged between the control context, the audio context and the host.
//!
//! All event types are `Copy` and fit in a few machine words, so they can be
//! moved through the lock-free queues by value without heap allocation.
//! Nothing is ever shared by pointer across the context boundary.

use crate::types::{FrameOffset, ParameterIndex, ParameterValue};

// =============================================================================
// MIDI
// =============================================================================

/// Status nibble of a MIDI 1.0 note-off message.
pub const MIDI_NOTE_OFF: u8 = 0x80;
/// Status nibble of a MIDI 1.0 note-on message.
pub const MIDI_NOTE_ON: u8 = 0x90;
/// Status nibble of a MIDI 1.0 pitch wheel message.
pub const MIDI_PITCH_WHEEL: u8 = 0xE0;

/// Center position of the 14-bit pitch wheel.
pub const PITCH_WHEEL_CENTER: u16 = 0x2000;

/// Raw three-byte MIDI 1.0 channel message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MidiMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

/// Decoded view of a [`MidiMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiKind {
    /// Note on. Velocity is the raw 7-bit value.
    NoteOn { note: u8, velocity: u8 },
    /// Note off. Velocity is the raw 7-bit release velocity.
    NoteOff { note: u8, velocity: u8 },
    /// Pitch wheel position, 14 bits with [`PITCH_WHEEL_CENTER`] at rest.
    PitchWheel { value: u16 },
    /// Any other message; ignored by the instrument.
    Other,
}

impl MidiMessage {
    /// Create a message from its three raw bytes.
    pub const fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self {
            status,
            data1,
            data2,
        }
    }

    /// Note-on on the given channel (0-15).
    pub const fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(MIDI_NOTE_ON | (channel & 0x0F), note & 0x7F, velocity & 0x7F)
    }

    /// Note-off on the given channel (0-15).
    pub const fn note_off(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(MIDI_NOTE_OFF | (channel & 0x0F), note & 0x7F, velocity & 0x7F)
    }

    /// Pitch wheel on the given channel with a 14-bit value.
    pub const fn pitch_wheel(channel: u8, value: u16) -> Self {
        Self::new(
            MIDI_PITCH_WHEEL | (channel & 0x0F),
            (value & 0x7F) as u8,
            ((value >> 7) & 0x7F) as u8,
        )
    }

    /// MIDI channel (low nibble of the status byte).
    #[inline]
    pub const fn channel(&self) -> u8 {
        self.status & 0x0F
    }

    /// Decode the message by its status nibble.
    #[inline]
    pub const fn kind(&self) -> MidiKind {
        match self.status & 0xF0 {
            MIDI_NOTE_ON => MidiKind::NoteOn {
                note: self.data1,
                velocity: self.data2,
            },
            MIDI_NOTE_OFF => MidiKind::NoteOff {
                note: self.data1,
                velocity: self.data2,
            },
            MIDI_PITCH_WHEEL => MidiKind::PitchWheel {
                value: (self.data1 as u16) | ((self.data2 as u16) << 7),
            },
            _ => MidiKind::Other,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// A single event in the sample-accurate event stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A parameter moved to a new plain value.
    ParameterChange {
        index: ParameterIndex,
        value: ParameterValue,
    },
    /// A MIDI channel message.
    Midi(MidiMessage),
    /// Render audio for frames `[start_frame, end_frame)` of the current block.
    ProcessAudio {
        start_frame: FrameOffset,
        end_frame: FrameOffset,
    },
}

impl Event {
    /// Shorthand for [`Event::ParameterChange`].
    pub const fn parameter(index: ParameterIndex, value: ParameterValue) -> Self {
        Self::ParameterChange { index, value }
    }

    /// Returns the parameter index if this is a parameter change.
    pub const fn parameter_index(&self) -> Option<ParameterIndex> {
        match self {
            Self::ParameterChange { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// An event paired with the block-relative frame it occurs at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub frame: FrameOffset,
    pub event: Event,
}

impl TimedEvent {
    /// Create a new timed event.
    pub const fn new(frame: FrameOffset, event: Event) -> Self {
        Self { frame, event }
    }
}
