//! # tandem-core
//!
//! Real-time safe core of the Tandem audio plugin.
//!
//! The plugin runs in two contexts: an audio context invoked by the host once
//! per block under a hard deadline, and a control context (editor, host
//! requests) without one. This crate provides everything that sits on the
//! boundary between them:
//!
//! - [`event_queue`]: lock-free single-producer/single-consumer event queues
//! - [`parameter_shadow`]: per-context parameter shadows kept in sync through
//!   those queues
//! - [`parameter_info`], [`parameter_format`], [`parameter_table`]: the
//!   parameter metadata and value contract
//! - [`state`]: parameter state codecs
//! - [`process_context`]: the sample-accurate host event/buffer contract
//! - [`plugin`]: the lifecycle trait format adapters delegate to
//!
//! ## Architecture
//!
//! ```text
//! control context                          audio context
//! ───────────────                          ─────────────
//! ControlParameters ──── EventQueue ────>  AudioParameters ──> Plugin::process
//!        ^                                        │
//!        └─────────────── EventQueue ─────────────┘
//! ```
//!
//! No other memory is shared between the contexts apart from one flag
//! telling the audio side whether an editor is attached.

pub mod bus_config;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod host;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_shadow;
pub mod parameter_table;
pub mod plugin;
pub mod process_context;
pub mod state;
pub mod types;

// Re-exports for convenience
pub use bus_config::{BusDirection, BusInfo, BusLayout};
pub use config::{Category, PluginConfig};
pub use editor::{EditorConstraints, EditorInstanceGuard, ResizeHints};
pub use error::{PluginError, PluginResult};
pub use event::{Event, MidiKind, MidiMessage, TimedEvent};
pub use event_queue::{event_queue, EventConsumer, EventProducer};
pub use host::{OfflineHost, RenderedBlock};
pub use parameter_format::Formatter;
pub use parameter_info::{ParameterDescriptor, ParameterFlags};
pub use parameter_shadow::{parameter_shadows, AudioParameters, ControlParameters};
pub use parameter_table::ParameterTable;
pub use plugin::Plugin;
pub use process_context::{BlockContext, ProcessContext};
pub use state::{JsonStateCodec, RawStateCodec, StateCodec};
pub use types::{FrameOffset, ParameterIndex, ParameterValue, Size, DEFAULT_QUEUE_CAPACITY};
