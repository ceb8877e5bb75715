//! Lock-free single-producer/single-consumer event queue.
//!
//! Two of these connect the control context and the audio context, one per
//! direction. Each is a fixed-capacity [`rtrb`] ring of [`Event`]s.
//!
//! # Real-Time Safety
//!
//! - `try_push()` and `pop()` never block, lock or allocate
//! - Slot contents are published with release/acquire ordering inside the
//!   ring, so a consumer never reads a half-written event
//! - A full queue rejects the push instead of overwriting unread events
//!
//! # Capacity Bound
//!
//! At most `capacity` events may be in flight between two drains. The audio
//! side drains once per block, so the control side may enqueue up to
//! `capacity` changes per block period before pushes start failing.
//!
//! # Single Producer, Single Consumer
//!
//! [`event_queue()`] returns one [`EventProducer`] and one [`EventConsumer`].
//! Neither endpoint is `Clone` and both operate through `&mut self`.

use std::fmt;

use rtrb::{Consumer, Producer, RingBuffer};

use crate::event::Event;

/// Create a queue with the given capacity and return its two endpoints.
///
/// # Panics
///
/// Panics if `capacity` is not a non-zero power of two. Queues are created
/// during plugin construction, never on the audio thread.
pub fn event_queue(capacity: usize) -> (EventProducer, EventConsumer) {
    assert!(
        capacity.is_power_of_two(),
        "event queue capacity must be a non-zero power of two, got {capacity}"
    );

    let (producer, consumer) = RingBuffer::new(capacity);
    (
        EventProducer {
            inner: producer,
            dropped: 0,
        },
        EventConsumer { inner: consumer },
    )
}

// =============================================================================
// Producer
// =============================================================================

/// Write endpoint of an event queue.
pub struct EventProducer {
    inner: Producer<Event>,
    dropped: usize,
}

impl EventProducer {
    /// Try to enqueue an event.
    ///
    /// Returns `false` and leaves the queue untouched if it is full.
    #[inline]
    pub fn try_push(&mut self, event: Event) -> bool {
        match self.inner.push(event) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.wrapping_add(1);
                false
            }
        }
    }

    /// Number of pushes rejected because the queue was full.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of events that can be pushed before the queue is full.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.inner.slots()
    }

    /// Number of events waiting to be consumed.
    #[inline]
    pub fn len(&self) -> usize {
        self.capacity() - self.free_slots()
    }

    /// Whether the queue currently holds no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a push would currently be rejected.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Fixed slot count of the queue.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.buffer().capacity()
    }
}

impl fmt::Debug for EventProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventProducer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("dropped", &self.dropped)
            .finish()
    }
}

// =============================================================================
// Consumer
// =============================================================================

/// Read endpoint of an event queue.
pub struct EventConsumer {
    inner: Consumer<Event>,
}

impl EventConsumer {
    /// Dequeue the oldest event, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<Event> {
        self.inner.pop().ok()
    }

    /// Iterate over and consume every event currently available.
    ///
    /// Events pushed while the iterator is alive may also be yielded.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { consumer: self }
    }

    /// Number of events waiting to be consumed.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.slots()
    }

    /// Whether the queue currently holds no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Fixed slot count of the queue.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.buffer().capacity()
    }
}

impl fmt::Debug for EventConsumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventConsumer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Draining iterator returned by [`EventConsumer::drain`].
pub struct Drain<'a> {
    consumer: &'a mut EventConsumer,
}

impl Iterator for Drain<'_> {
    type Item = Event;

    #[inline]
    fn next(&mut self) -> Option<Event> {
        self.consumer.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MidiMessage;
    use std::thread;

    #[test]
    fn test_push_pop_in_order() {
        let (mut tx, mut rx) = event_queue(8);
        for i in 0..5 {
            assert!(tx.try_push(Event::parameter(i, i as f64)));
        }
        assert_eq!(rx.len(), 5);

        let drained: Vec<Event> = rx.drain().collect();
        assert_eq!(drained.len(), 5);
        for (i, event) in drained.iter().enumerate() {
            assert_eq!(*event, Event::parameter(i as u32, i as f64));
        }
        assert!(rx.is_empty());
        assert_eq!(rx.pop(), None);
    }

    #[test]
    fn test_full_queue_rejects_without_overwriting() {
        let (mut tx, mut rx) = event_queue(4);
        for i in 0..4 {
            assert!(tx.try_push(Event::parameter(i, 0.0)));
        }
        assert!(tx.is_full());
        assert_eq!(tx.free_slots(), 0);
        assert!(!tx.try_push(Event::parameter(99, 0.0)));
        assert_eq!(tx.dropped(), 1);

        // Oldest event is still intact.
        assert_eq!(rx.pop(), Some(Event::parameter(0, 0.0)));
        assert_eq!(tx.free_slots(), 1);
        assert!(tx.try_push(Event::parameter(4, 0.0)));

        let indices: Vec<u32> = rx.drain().filter_map(|e| e.parameter_index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_wraps_many_times() {
        let (mut tx, mut rx) = event_queue(4);
        for round in 0..1000u32 {
            assert!(tx.try_push(Event::Midi(MidiMessage::note_on(0, (round % 128) as u8, 1))));
            assert!(tx.try_push(Event::parameter(round, 1.0)));
            assert_eq!(
                rx.pop(),
                Some(Event::Midi(MidiMessage::note_on(0, (round % 128) as u8, 1)))
            );
            assert_eq!(rx.pop(), Some(Event::parameter(round, 1.0)));
        }
        assert_eq!(tx.dropped(), 0);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_non_power_of_two_capacity_panics() {
        let _ = event_queue(6);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_zero_capacity_panics() {
        let _ = event_queue(0);
    }

    #[test]
    fn test_cross_thread_ordering() {
        const COUNT: u32 = 20_000;
        let (mut tx, mut rx) = event_queue(64);

        let producer = thread::spawn(move || {
            let mut next = 0;
            while next < COUNT {
                if tx.try_push(Event::parameter(next, f64::from(next))) {
                    next += 1;
                } else {
                    thread::yield_now();
                }
            }
        });

        let mut expected = 0;
        while expected < COUNT {
            match rx.pop() {
                Some(event) => {
                    assert_eq!(event, Event::parameter(expected, f64::from(expected)));
                    expected += 1;
                }
                None => thread::yield_now(),
            }
        }

        producer.join().unwrap();
        assert!(rx.is_empty());
    }
}
