//! Host-facing view of one render call.
//!
//! The host hands the plugin a [`ProcessContext`] for every block. It is the
//! plugin's only source of input events and output buffers, and the sink for
//! events the host should observe (such as parameter changes coming from the
//! control context).
//!
//! [`BlockContext`] is the reference implementation. It is what the offline
//! host and the tests drive plugins with, and documents the event ordering a
//! format adapter must reproduce.

use crate::event::{Event, TimedEvent};
use crate::types::FrameOffset;

/// Per-block contract between host and plugin.
///
/// Implementations must not allocate, lock or block in any method.
pub trait ProcessContext {
    /// Number of frames in this block.
    fn num_frames(&self) -> usize;

    /// Report an event to the host at `frame`.
    ///
    /// Returns `false` if the host could not accept it.
    fn enqueue_event(&mut self, event: Event, frame: FrameOffset) -> bool;

    /// Next event at or after `current_frame`.
    ///
    /// Input events whose frame is `<= current_frame` come first, in order.
    /// Otherwise an [`Event::ProcessAudio`] covering `current_frame` up to the
    /// next input event (or the end of the block) is returned. `None` means
    /// the block is complete.
    fn dequeue_event(&mut self, current_frame: FrameOffset) -> Option<Event>;

    /// Channel count of output bus `bus`; zero if the bus does not exist.
    fn output_channel_count(&self, bus: usize) -> usize;

    /// Samples of one output channel, `num_frames()` long.
    ///
    /// `None` means the host did not supply the buffer.
    fn output_channel(&mut self, bus: usize, channel: usize) -> Option<&mut [f32]>;
}

/// Reference [`ProcessContext`] over caller-owned buffers and events.
pub struct BlockContext<'a, 'b> {
    num_frames: usize,
    input_events: &'a [TimedEvent],
    next_input: usize,
    output_events: &'a mut Vec<TimedEvent>,
    outputs: &'a mut [&'b mut [f32]],
}

impl<'a, 'b> BlockContext<'a, 'b> {
    /// Create a context for one block.
    ///
    /// `input_events` must be sorted by frame. Events past the end of the
    /// block are delivered at the last frame. `output_events` receives events
    /// enqueued by the plugin; it is never grown, so reserve capacity before
    /// rendering.
    ///
    /// # Panics
    ///
    /// Panics if an output channel is shorter than `num_frames`.
    pub fn new(
        num_frames: usize,
        input_events: &'a [TimedEvent],
        output_events: &'a mut Vec<TimedEvent>,
        outputs: &'a mut [&'b mut [f32]],
    ) -> Self {
        debug_assert!(
            input_events.windows(2).all(|w| w[0].frame <= w[1].frame),
            "input events must be sorted by frame"
        );
        assert!(
            outputs.iter().all(|channel| channel.len() >= num_frames),
            "output channels must hold at least {num_frames} frames"
        );

        Self {
            num_frames,
            input_events,
            next_input: 0,
            output_events,
            outputs,
        }
    }

    #[inline]
    fn end_frame(&self) -> FrameOffset {
        self.num_frames as FrameOffset
    }
}

impl ProcessContext for BlockContext<'_, '_> {
    #[inline]
    fn num_frames(&self) -> usize {
        self.num_frames
    }

    fn enqueue_event(&mut self, event: Event, frame: FrameOffset) -> bool {
        if self.output_events.len() == self.output_events.capacity() {
            return false;
        }
        self.output_events.push(TimedEvent::new(frame, event));
        true
    }

    fn dequeue_event(&mut self, current_frame: FrameOffset) -> Option<Event> {
        let end = self.end_frame();
        let next = self
            .input_events
            .get(self.next_input)
            .map(|timed| (timed.frame.min(end), timed.event));

        match next {
            Some((frame, event)) if frame <= current_frame => {
                self.next_input += 1;
                Some(event)
            }
            _ if current_frame >= end => None,
            Some((frame, _)) => Some(Event::ProcessAudio {
                start_frame: current_frame,
                end_frame: frame,
            }),
            None => Some(Event::ProcessAudio {
                start_frame: current_frame,
                end_frame: end,
            }),
        }
    }

    #[inline]
    fn output_channel_count(&self, bus: usize) -> usize {
        if bus == 0 {
            self.outputs.len()
        } else {
            0
        }
    }

    #[inline]
    fn output_channel(&mut self, bus: usize, channel: usize) -> Option<&mut [f32]> {
        if bus != 0 {
            return None;
        }
        let num_frames = self.num_frames;
        self.outputs
            .get_mut(channel)
            .map(|samples| &mut samples[..num_frames])
    }
}
