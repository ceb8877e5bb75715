//! Common types used throughout the Tandem core.

// =============================================================================
// Queue and Channel Limits
// =============================================================================
//
// The event queues are fixed-capacity ring buffers sized once at plugin
// creation. 256 slots comfortably covers one block's worth of parameter
// automation plus a full state restore for small parameter sets.
//
// Stereo is the only supported bus width; the render loop writes every
// channel of the main output bus.
// =============================================================================

/// Default capacity of each event queue (must be a power of two).
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Channel count of the main input and output buses.
pub const STEREO_CHANNELS: u32 = 2;

/// Index of a parameter in `[0, parameter_count)`.
pub type ParameterIndex = u32;

/// Plain (denormalised) parameter value as exchanged with hosts.
pub type ParameterValue = f64;

/// Frame position relative to the start of the current block.
pub type FrameOffset = u32;

/// Size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
