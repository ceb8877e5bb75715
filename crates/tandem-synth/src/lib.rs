//! # tandem-synth
//!
//! Monophonic MIDI sine synth built on [`tandem_core`].
//!
//! The synth plays the most recent MIDI note as a sine wave on both output
//! channels, with loudness following note velocity. Its four parameters are
//! placeholders that exercise every parameter kind the core supports.
//!
//! ```rust,ignore
//! use tandem_core::{OfflineHost, Event, MidiMessage, TimedEvent};
//! use tandem_synth::Synth;
//!
//! let mut host = OfflineHost::new(Synth::new(), 48_000.0, 512);
//! let note = TimedEvent::new(0, Event::Midi(MidiMessage::note_on(0, 69, 127)));
//! let block = host.render(512, &[note]);
//! ```

use tandem_core::{Category, PluginConfig, Size};

pub mod editor;
pub mod parameters;
pub mod plugin;
pub mod processor;
pub mod voice;

pub use editor::SynthEditor;
pub use parameters::{SynthParameter, PARAMETERS, PARAMETER_COUNT};
pub use plugin::Synth;
pub use processor::SynthProcessor;
pub use voice::{InstrumentState, Voice};

/// Plugin configuration.
pub static CONFIG: PluginConfig = PluginConfig::new("Tandem Synth", Category::Instrument)
    .with_vendor("Tandem Audio")
    .with_url("https://github.com/tandem-audio/tandem")
    .with_version(env!("CARGO_PKG_VERSION"))
    .with_editor(Size::new(1280, 720));
