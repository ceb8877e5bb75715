//! Plugin configuration.
//!
//! Static metadata the host reads before the plugin is instantiated, plus the
//! few sizing knobs the core needs at construction time.
//!
//! # Example
//!
//! ```ignore
//! use tandem_core::config::{Category, PluginConfig};
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("My Synth", Category::Instrument)
//!     .with_vendor("My Company")
//!     .with_version("1.0.0");
//! ```

use crate::types::{Size, DEFAULT_QUEUE_CAPACITY};

// =========================================================================
// Category
// =========================================================================

/// Plugin category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Audio effect (processes audio input).
    Effect,
    /// Instrument (generates audio from MIDI).
    Instrument,
    /// MIDI effect (processes MIDI only).
    MidiEffect,
    /// Generator (produces audio without input).
    Generator,
}

// =========================================================================
// PluginConfig
// =========================================================================

/// Default environment variable used to enforce a single open editor.
pub const DEFAULT_EDITOR_INSTANCE_VAR: &str = "TANDEM_EDITOR_WINDOW";

/// Default editor size in pixels.
pub const DEFAULT_EDITOR_SIZE: Size = Size::new(1280, 720);

/// Static plugin configuration.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Plugin name displayed in the host.
    pub name: &'static str,

    /// Plugin category.
    pub category: Category,

    /// Vendor name.
    pub vendor: &'static str,

    /// Vendor URL.
    pub url: &'static str,

    /// Version string.
    pub version: &'static str,

    /// Whether the plugin provides an editor.
    pub has_editor: bool,

    /// Initial editor size.
    pub editor_size: Size,

    /// Slot count of each event queue. Must be a non-zero power of two.
    pub queue_capacity: usize,

    /// Process environment variable holding the open editor's window handle.
    pub editor_instance_var: &'static str,
}

impl PluginConfig {
    /// Create a configuration with defaults for everything but name and category.
    pub const fn new(name: &'static str, category: Category) -> Self {
        Self {
            name,
            category,
            vendor: "Unknown Vendor",
            url: "",
            version: "1.0.0",
            has_editor: false,
            editor_size: DEFAULT_EDITOR_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            editor_instance_var: DEFAULT_EDITOR_INSTANCE_VAR,
        }
    }

    /// Set the vendor name.
    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the vendor URL.
    pub const fn with_url(mut self, url: &'static str) -> Self {
        self.url = url;
        self
    }

    /// Set the version string.
    pub const fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Enable the editor with the given initial size.
    pub const fn with_editor(mut self, size: Size) -> Self {
        self.has_editor = true;
        self.editor_size = size;
        self
    }

    /// Set the event queue capacity.
    ///
    /// # Panics
    /// Panics at compile time (in a `static`) if `capacity` is not a non-zero
    /// power of two.
    pub const fn with_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "queue capacity must be a non-zero power of two"
        );
        self.queue_capacity = capacity;
        self
    }

    /// Set the environment variable used for the single-editor rule.
    pub const fn with_editor_instance_var(mut self, var: &'static str) -> Self {
        self.editor_instance_var = var;
        self
    }
}
