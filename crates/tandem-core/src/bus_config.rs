//! Audio bus layout reported to hosts.

use crate::types::STEREO_CHANNELS;

/// Bus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusDirection {
    Input,
    Output,
}

/// Information about one audio bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusInfo {
    /// Bus name shown by the host.
    pub name: &'static str,
    /// Number of channels.
    pub channel_count: u32,
}

impl BusInfo {
    /// Create a new bus description.
    pub const fn new(name: &'static str, channel_count: u32) -> Self {
        Self {
            name,
            channel_count,
        }
    }
}

/// Input and output buses of a plugin.
///
/// Queries for an index past the declared buses report zero channels and an
/// empty name rather than failing, which is what hosts probing layouts expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLayout {
    input: Option<BusInfo>,
    output: Option<BusInfo>,
}

impl BusLayout {
    /// One stereo input and one stereo output.
    pub const fn stereo() -> Self {
        Self {
            input: Some(BusInfo::new("Stereo Input", STEREO_CHANNELS)),
            output: Some(BusInfo::new("Stereo Output", STEREO_CHANNELS)),
        }
    }

    /// Number of buses in `direction`.
    pub const fn bus_count(&self, direction: BusDirection) -> usize {
        match direction {
            BusDirection::Input => self.input.is_some() as usize,
            BusDirection::Output => self.output.is_some() as usize,
        }
    }

    /// Bus at `index`, if declared.
    pub const fn bus_info(&self, direction: BusDirection, index: usize) -> Option<BusInfo> {
        if index != 0 {
            return None;
        }
        match direction {
            BusDirection::Input => self.input,
            BusDirection::Output => self.output,
        }
    }

    /// Channel count of a bus; zero for undeclared buses.
    pub fn channel_count(&self, direction: BusDirection, index: usize) -> u32 {
        self.bus_info(direction, index)
            .map(|bus| bus.channel_count)
            .unwrap_or(0)
    }

    /// Name of a bus; empty for undeclared buses.
    pub fn bus_name(&self, direction: BusDirection, index: usize) -> &'static str {
        self.bus_info(direction, index).map(|bus| bus.name).unwrap_or("")
    }
}

impl Default for BusLayout {
    fn default() -> Self {
        Self::stereo()
    }
}
