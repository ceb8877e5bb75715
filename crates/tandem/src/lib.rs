//! # Tandem
//!
//! Real-time audio plugin core with a monophonic MIDI synth.
//!
//! ## Architecture
//!
//! ```text
//! Host format adapter
//!        ↓
//! Plugin trait (tandem-core)
//!        ↓
//! Synth ──split()──> SynthProcessor (audio context) + ControlParameters (control context)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tandem::prelude::*;
//!
//! let mut host = OfflineHost::new(Synth::new(), 48_000.0, 512);
//! let note = TimedEvent::new(0, Event::Midi(MidiMessage::note_on(0, 69, 127)));
//! let block = host.render(512, &[note]);
//! assert_eq!(block.channel(0), block.channel(1));
//! ```

// Re-export sub-crates
pub use tandem_core as core;
pub use tandem_synth as synth;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tandem::prelude::*;
/// ```
pub mod prelude {
    pub use tandem_core::{
        // Events and queues
        event_queue, Event, EventConsumer, EventProducer, MidiKind, MidiMessage, TimedEvent,
        // Parameters
        parameter_shadows, AudioParameters, ControlParameters, Formatter, ParameterDescriptor,
        ParameterFlags, ParameterTable,
        // State
        JsonStateCodec, RawStateCodec, StateCodec,
        // Host contract
        BlockContext, OfflineHost, Plugin, ProcessContext, RenderedBlock,
        // Buses, configuration, editor
        BusDirection, BusLayout, Category, EditorConstraints, EditorInstanceGuard, PluginConfig,
        // Errors and common types
        ParameterIndex, ParameterValue, PluginError, PluginResult, Size,
    };

    pub use tandem_synth::{Synth, SynthEditor, SynthParameter, SynthProcessor};
}
