//! Offline host.
//!
//! Drives a [`Plugin`] without a real audio device: blocks are rendered into
//! owned buffers with scheduled input events, and events the plugin reports
//! back are collected per block. Used for rendering to files and by tests.

use std::io::Cursor;

use crate::bus_config::BusDirection;
use crate::error::PluginResult;
use crate::event::TimedEvent;
use crate::plugin::Plugin;
use crate::process_context::BlockContext;

/// Default number of output events reserved per block.
const OUTPUT_EVENT_CAPACITY: usize = 1024;

/// Output of one rendered block.
#[derive(Debug, Clone, Default)]
pub struct RenderedBlock {
    /// One sample vector per output channel.
    pub channels: Vec<Vec<f32>>,
    /// Events the plugin reported to the host.
    pub events: Vec<TimedEvent>,
}

impl RenderedBlock {
    /// Samples of one channel.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }
}

/// Host that renders a plugin block by block in the calling thread.
pub struct OfflineHost<P: Plugin> {
    plugin: P,
    sample_rate: f64,
    max_block_size: usize,
}

impl<P: Plugin> OfflineHost<P> {
    /// Wrap `plugin` and prepare it.
    pub fn new(mut plugin: P, sample_rate: f64, max_block_size: usize) -> Self {
        plugin.prepare(sample_rate, max_block_size);
        Self {
            plugin,
            sample_rate,
            max_block_size,
        }
    }

    /// The hosted plugin.
    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    /// The hosted plugin, mutably.
    pub fn plugin_mut(&mut self) -> &mut P {
        &mut self.plugin
    }

    /// Sample rate the plugin was prepared with.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Render one block of `num_frames` with the given input events.
    ///
    /// # Panics
    ///
    /// Panics if `num_frames` exceeds the prepared maximum block size.
    pub fn render(&mut self, num_frames: usize, events: &[TimedEvent]) -> RenderedBlock {
        assert!(
            num_frames <= self.max_block_size,
            "block of {num_frames} frames exceeds the prepared maximum of {}",
            self.max_block_size
        );

        let mut sorted = events.to_vec();
        sorted.sort_by_key(|timed| timed.frame);

        let channel_count = self.plugin.bus_channel_count(BusDirection::Output, 0) as usize;
        let mut channels = vec![vec![0.0f32; num_frames]; channel_count];
        let mut output_events = Vec::with_capacity(OUTPUT_EVENT_CAPACITY);

        {
            let mut outputs: Vec<&mut [f32]> = channels.iter_mut().map(Vec::as_mut_slice).collect();
            let mut ctx = BlockContext::new(num_frames, &sorted, &mut output_events, &mut outputs);
            self.plugin.process(&mut ctx);
        }

        RenderedBlock {
            channels,
            events: output_events,
        }
    }

    /// Render `total_frames` in blocks of at most the maximum block size.
    ///
    /// `events` carry absolute frame positions. Returns the concatenated
    /// channels and all reported events with absolute frames.
    pub fn render_frames(&mut self, total_frames: usize, events: &[TimedEvent]) -> RenderedBlock {
        let mut result = RenderedBlock::default();
        let mut offset = 0usize;

        while offset < total_frames {
            let len = (total_frames - offset).min(self.max_block_size.max(1));
            let block_events: Vec<TimedEvent> = events
                .iter()
                .filter(|timed| {
                    let frame = timed.frame as usize;
                    frame >= offset && frame < offset + len
                })
                .map(|timed| TimedEvent::new(timed.frame - offset as u32, timed.event))
                .collect();

            let block = self.render(len, &block_events);
            if result.channels.is_empty() {
                result.channels = vec![Vec::with_capacity(total_frames); block.channels.len()];
            }
            for (out, channel) in result.channels.iter_mut().zip(&block.channels) {
                out.extend_from_slice(channel);
            }
            result.events.extend(
                block
                    .events
                    .into_iter()
                    .map(|timed| TimedEvent::new(timed.frame + offset as u32, timed.event)),
            );
            offset += len;
        }

        result
    }

    /// Save the plugin state to a byte vector.
    pub fn save_state(&self) -> PluginResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.plugin.save_state(&mut bytes)?;
        Ok(bytes)
    }

    /// Load the plugin state from bytes.
    pub fn load_state(&mut self, bytes: &[u8]) -> PluginResult<bool> {
        self.plugin.load_state(&mut Cursor::new(bytes))
    }
}
