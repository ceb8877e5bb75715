//! Audio and control parameter shadows.
//!
//! Each context owns a private [`ParameterTable`]. Changes cross the boundary
//! only as events on two [`event_queue`]s:
//!
//! ```text
//!   ControlParameters ── control→audio ──> AudioParameters
//!          ^                                     │
//!          └──────────── audio→control ──────────┘
//! ```
//!
//! The audio shadow is authoritative. Every value it stores, whether from
//! host automation or from a drained control edit, is marked pending and
//! published back once per block, one event per changed parameter. A
//! publish that finds the queue full stays pending for the next block, so
//! the control shadow never loses the last value of a parameter.
//!
//! Apart from the queues, the only shared state is one `AtomicBool` telling
//! the audio side whether an editor is listening. The shadows may disagree
//! briefly; they converge once the audio side has processed a block and the
//! control side has called [`ControlParameters::sync`].

use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::PluginResult;
use crate::event::Event;
use crate::event_queue::{event_queue, EventConsumer, EventProducer};
use crate::parameter_info::ParameterDescriptor;
use crate::parameter_table::ParameterTable;
use crate::process_context::ProcessContext;
use crate::state::StateCodec;
use crate::types::{ParameterIndex, ParameterValue};

/// Build both shadows and the queues connecting them.
///
/// # Panics
///
/// Panics if `queue_capacity` is not a non-zero power of two.
pub fn parameter_shadows(
    descriptors: Arc<[ParameterDescriptor]>,
    queue_capacity: usize,
) -> (AudioParameters, ControlParameters) {
    for descriptor in descriptors.iter() {
        if let Err(err) = descriptor.validate() {
            log::warn!("{err}");
        }
    }

    let (to_audio, from_control) = event_queue(queue_capacity);
    let (to_control, from_audio) = event_queue(queue_capacity);
    let editor_attached = Arc::new(AtomicBool::new(false));

    let audio = AudioParameters {
        table: ParameterTable::new(Arc::clone(&descriptors)),
        pending: vec![false; descriptors.len()].into_boxed_slice(),
        pending_count: 0,
        from_control,
        to_control,
        editor_attached: Arc::clone(&editor_attached),
        editor_was_attached: false,
        backlog_reported: false,
    };
    let control = ControlParameters {
        table: ParameterTable::new(descriptors),
        to_audio,
        from_audio,
        editor_attached,
    };
    (audio, control)
}

// =============================================================================
// Audio side
// =============================================================================

/// Parameter shadow owned by the audio context.
///
/// Every method is real-time safe.
#[derive(Debug)]
pub struct AudioParameters {
    table: ParameterTable,
    /// Parameters whose stored value has not reached the control side yet.
    pending: Box<[bool]>,
    pending_count: usize,
    from_control: EventConsumer,
    to_control: EventProducer,
    editor_attached: Arc<AtomicBool>,
    editor_was_attached: bool,
    backlog_reported: bool,
}

impl AudioParameters {
    /// The audio-side table.
    #[inline]
    pub fn table(&self) -> &ParameterTable {
        &self.table
    }

    /// Current value (rounded for integer parameters).
    #[inline]
    pub fn value(&self, index: ParameterIndex) -> ParameterValue {
        self.table.value(index)
    }

    /// Raw stored values in index order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        self.table.values()
    }

    /// Apply everything the control context sent since the last block.
    ///
    /// Parameter changes update the audio shadow. Every drained event is
    /// forwarded to the host at frame 0 so automation lanes see edits made in
    /// the editor. Pending values are then published back to the control
    /// side. Returns the number of events drained.
    pub fn drain_control_events(&mut self, ctx: &mut dyn ProcessContext) -> usize {
        self.mark_all_if_editor_attached();

        let mut drained = 0;
        while let Some(event) = self.from_control.pop() {
            if let Event::ParameterChange { index, value } = event {
                if (index as usize) < self.table.count() {
                    self.set_value(index, value);
                }
            }
            if !ctx.enqueue_event(event, 0) {
                log::warn!("host rejected forwarded event {event:?}");
            }
            drained += 1;
        }

        self.publish_changes();
        drained
    }

    /// Set a value from the audio context (host automation).
    ///
    /// The value is clamped and stored, and reaches the control context at
    /// the next [`publish_changes`](Self::publish_changes).
    pub fn set_value(&mut self, index: ParameterIndex, value: ParameterValue) -> ParameterValue {
        let stored = self.table.set_value(index, value);
        self.mark_pending(index as usize);
        stored
    }

    /// Overwrite all values, e.g. after a state restore.
    ///
    /// Returns `false` if the length does not match.
    pub fn apply_values(&mut self, values: &[f32]) -> bool {
        if !self.table.apply_values(values) {
            return false;
        }
        self.mark_all_pending();
        true
    }

    /// Send every pending value to the control side, in index order.
    ///
    /// Stops at the first rejected push; the rest stay pending for the next
    /// call. Returns the number of values sent. Call once at the end of each
    /// block.
    pub fn publish_changes(&mut self) -> usize {
        let mut sent = 0;
        if self.pending_count > 0 {
            for index in 0..self.pending.len() {
                if !self.pending[index] {
                    continue;
                }
                let value = self.table.value(index as ParameterIndex);
                if !self.to_control.try_push(Event::parameter(index as ParameterIndex, value)) {
                    break;
                }
                self.pending[index] = false;
                self.pending_count -= 1;
                sent += 1;
            }
        }
        self.report_backlog();
        sent
    }

    /// Number of values waiting for room in the audio→control queue.
    #[inline]
    pub fn pending_changes(&self) -> usize {
        self.pending_count
    }

    /// Number of publishes the audio→control queue has rejected so far.
    #[inline]
    pub fn rejected_publishes(&self) -> usize {
        self.to_control.dropped()
    }

    #[inline]
    fn mark_pending(&mut self, index: usize) {
        if let Some(flag) = self.pending.get_mut(index) {
            if !*flag {
                *flag = true;
                self.pending_count += 1;
            }
        }
    }

    fn mark_all_pending(&mut self) {
        self.pending.fill(true);
        self.pending_count = self.pending.len();
    }

    /// Resend the whole shadow when an editor has just been attached, so it
    /// starts from the audio context's view.
    fn mark_all_if_editor_attached(&mut self) {
        let attached = self.editor_attached.load(Ordering::Acquire);
        if attached && !self.editor_was_attached {
            self.mark_all_pending();
        }
        self.editor_was_attached = attached;
    }

    /// Warn once when publishing starts falling behind, again only after it
    /// has caught up.
    fn report_backlog(&mut self) {
        if self.pending_count == 0 {
            self.backlog_reported = false;
        } else if !self.backlog_reported {
            log::warn!(
                "audio→control queue full ({} slots): {} parameter updates deferred",
                self.to_control.capacity(),
                self.pending_count
            );
            self.backlog_reported = true;
        }
    }
}

// =============================================================================
// Control side
// =============================================================================

/// Parameter shadow owned by the control context.
#[derive(Debug)]
pub struct ControlParameters {
    table: ParameterTable,
    to_audio: EventProducer,
    from_audio: EventConsumer,
    editor_attached: Arc<AtomicBool>,
}

impl ControlParameters {
    /// The control-side table.
    #[inline]
    pub fn table(&self) -> &ParameterTable {
        &self.table
    }

    /// Current value (rounded for integer parameters).
    #[inline]
    pub fn value(&self, index: ParameterIndex) -> ParameterValue {
        self.table.value(index)
    }

    /// Raw stored values in index order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        self.table.values()
    }

    /// Edit a value from the control surface.
    ///
    /// The value is clamped, stored locally and sent to the audio context.
    /// Returns the stored value.
    pub fn set_value(&mut self, index: ParameterIndex, value: ParameterValue) -> ParameterValue {
        let stored = self.table.set_value(index, value);
        self.send_event(Event::parameter(index, stored));
        stored
    }

    /// Send an arbitrary event to the audio context.
    ///
    /// Returns `false` if the queue is full.
    pub fn send_event(&mut self, event: Event) -> bool {
        let sent = self.to_audio.try_push(event);
        if !sent {
            log::warn!(
                "control→audio queue full ({} slots), dropped {:?}",
                self.to_audio.capacity(),
                event
            );
        }
        sent
    }

    /// Apply changes mirrored from the audio context.
    ///
    /// Returns the number of parameter changes applied.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.from_audio.pop() {
            if let Event::ParameterChange { index, value } = event {
                if (index as usize) < self.table.count() {
                    self.table.set_value(index, value);
                    applied += 1;
                }
            }
        }
        applied
    }

    /// Mark an editor as attached.
    ///
    /// Changes already published by the audio side are applied first. The
    /// audio side then resends its full shadow at the start of its next block.
    pub fn attach_editor(&mut self) {
        self.sync();
        self.editor_attached.store(true, Ordering::Release);
    }

    /// Mark the editor as gone.
    pub fn detach_editor(&mut self) {
        self.editor_attached.store(false, Ordering::Release);
    }

    /// Whether an editor is attached.
    pub fn is_editor_attached(&self) -> bool {
        self.editor_attached.load(Ordering::Acquire)
    }

    /// Encode the audio-side values published so far.
    ///
    /// Pending published changes are applied first, so automation that
    /// reached the audio shadow before its last block is included.
    pub fn save_state(&mut self, codec: &dyn StateCodec, writer: &mut dyn Write) -> PluginResult<()> {
        self.sync();
        codec.encode(self.table.values(), writer)
    }

    /// Decode a state blob into the control shadow and forward every value
    /// to the audio context.
    ///
    /// Returns `Ok(false)` and changes nothing if the blob does not match
    /// the parameter set, or if the control→audio queue cannot take one
    /// event per parameter right now.
    pub fn load_state(&mut self, codec: &dyn StateCodec, reader: &mut dyn Read) -> PluginResult<bool> {
        let Some(values) = codec.decode(self.table.count(), reader)? else {
            log::debug!("ignoring incompatible {} state", codec.format_name());
            return Ok(false);
        };

        let needed = self.table.count();
        let free = self.to_audio.free_slots();
        if free < needed {
            log::warn!(
                "control→audio queue has {free} free slots, state needs {needed}; load skipped"
            );
            return Ok(false);
        }

        self.table.apply_values(&values);
        for index in 0..needed as ParameterIndex {
            let value = ParameterValue::from(self.table.values()[index as usize]);
            self.send_event(Event::parameter(index, value));
        }
        Ok(true)
    }
}
