//! Edge-handler → main-loop handoff for the encoder.
//!
//! When the encoder is driven from GPIO edge events, the handler decodes
//! the new sample and parks the result in a single pending slot. The main
//! loop drains that slot once per iteration. The decoder state and the
//! slot are the only data shared between the two contexts, and both are
//! touched inside one critical section so a drain can never observe a
//! half-finished update.
//!
//! One slot, last writer wins: if two detents complete before the main
//! loop runs, only the newer direction is delivered.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

use super::{Decoder, QuadratureDecoder, RotationEvent};

/// Single-producer / single-consumer slot for one pending event.
pub struct EventSlot {
    pending: Mutex<Cell<RotationEvent>>,
}

impl EventSlot {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(RotationEvent::None)),
        }
    }

    /// Store `event` unless it is `None`. Overwrites an undrained event.
    pub fn post(&self, event: RotationEvent) {
        if event.is_none() {
            return;
        }
        critical_section::with(|cs| self.pending.borrow(cs).set(event));
    }

    /// Take the pending event, leaving the slot empty.
    pub fn take(&self) -> RotationEvent {
        critical_section::with(|cs| self.pending.borrow(cs).replace(RotationEvent::None))
    }

    /// True when an event is waiting ("dirty").
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| !self.pending.borrow(cs).get().is_none())
    }
}

impl Default for EventSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoder plus its output slot, usable from a `static`.
///
/// ```
/// use vfd_clock::encoder::handoff::SharedDecoder;
///
/// static ENCODER: SharedDecoder = SharedDecoder::new();
///
/// // edge handler
/// ENCODER.on_edge(true, false);
/// // main loop
/// let _event = ENCODER.take();
/// ```
pub struct SharedDecoder<D = QuadratureDecoder> {
    decoder: Mutex<RefCell<D>>,
    slot: EventSlot,
}

impl SharedDecoder<QuadratureDecoder> {
    pub const fn new() -> Self {
        Self::with_decoder(QuadratureDecoder::new())
    }
}

impl Default for SharedDecoder<QuadratureDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Decoder> SharedDecoder<D> {
    pub const fn with_decoder(decoder: D) -> Self {
        Self {
            decoder: Mutex::new(RefCell::new(decoder)),
            slot: EventSlot::new(),
        }
    }

    /// Edge context: advance the decoder with a fresh sample and publish any
    /// completed step. Returns the event produced by this sample.
    pub fn on_edge(&self, clk_level: bool, dt_level: bool) -> RotationEvent {
        critical_section::with(|cs| {
            let event = self.decoder.borrow_ref_mut(cs).decode(clk_level, dt_level);
            if !event.is_none() {
                self.slot.pending.borrow(cs).set(event);
            }
            event
        })
    }

    /// Main-loop context: drain the pending event.
    pub fn take(&self) -> RotationEvent {
        self.slot.take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EdgeDecoder;

    static SHARED: SharedDecoder = SharedDecoder::new();

    #[test]
    fn slot_drains_once() {
        let slot = EventSlot::new();
        assert!(!slot.is_pending());
        slot.post(RotationEvent::Clockwise);
        assert!(slot.is_pending());
        assert_eq!(slot.take(), RotationEvent::Clockwise);
        assert_eq!(slot.take(), RotationEvent::None);
    }

    #[test]
    fn posting_none_keeps_pending_event() {
        let slot = EventSlot::new();
        slot.post(RotationEvent::CounterClockwise);
        slot.post(RotationEvent::None);
        assert_eq!(slot.take(), RotationEvent::CounterClockwise);
    }

    #[test]
    fn newer_event_overwrites_undrained() {
        let slot = EventSlot::new();
        slot.post(RotationEvent::Clockwise);
        slot.post(RotationEvent::CounterClockwise);
        assert_eq!(slot.take(), RotationEvent::CounterClockwise);
    }

    #[test]
    fn static_decoder_publishes_completed_detent() {
        let samples = [(true, false), (false, false), (false, true), (true, true)];
        for &(clk, dt) in &samples[..3] {
            assert_eq!(SHARED.on_edge(clk, dt), RotationEvent::None);
            assert!(!SHARED.is_pending());
        }
        assert_eq!(SHARED.on_edge(true, true), RotationEvent::Clockwise);
        assert_eq!(SHARED.take(), RotationEvent::Clockwise);
        assert_eq!(SHARED.take(), RotationEvent::None);
    }

    #[test]
    fn shared_edge_decoder() {
        let shared = SharedDecoder::with_decoder(EdgeDecoder::new());
        shared.on_edge(false, false);
        shared.on_edge(true, false);
        assert_eq!(shared.take(), RotationEvent::CounterClockwise);
    }
}
