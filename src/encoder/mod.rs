//! Quadrature rotary-encoder decoding.
//!
//! Two strategies share the [`Decoder`] trait:
//!
//! - [`QuadratureDecoder`] - full-step Gray-code state machine. A step is
//!   only reported after the lines walk BEGIN → NEXT → FINAL → rest in one
//!   rotational sense, so contact bounce yields no event at all instead
//!   of a stray step in the opposite direction.
//! - [`EdgeDecoder`] - compares DT against a CLK rising edge. Cheaper, but
//!   every bounce on CLK produces an event.
//!
//! Pin sample layout (both lines idle high through the pull-ups):
//! ```text
//! bit 1: DT level
//! bit 0: CLK level
//! ```
//!
//! A clean clockwise detent, as `(clk, dt)` samples from rest `(1, 1)`:
//! `(1, 0) → (0, 0) → (0, 1) → (1, 1)`. Counter-clockwise is the mirror:
//! `(0, 1) → (0, 0) → (1, 0) → (1, 1)`.

pub mod handoff;

/// Discrete rotation reported by a decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationEvent {
    /// No complete step yet.
    #[default]
    None,
    Clockwise,
    CounterClockwise,
}

impl RotationEvent {
    pub fn is_none(self) -> bool {
        matches!(self, RotationEvent::None)
    }

    /// Extract the event from the emit bits of a transition cell.
    const fn from_emit(cell: u8) -> Self {
        match cell & EMIT_MASK {
            EMIT_CW => RotationEvent::Clockwise,
            EMIT_CCW => RotationEvent::CounterClockwise,
            _ => RotationEvent::None,
        }
    }
}

/// Anything that turns successive `(clk, dt)` samples into rotation events.
pub trait Decoder {
    fn decode(&mut self, clk_level: bool, dt_level: bool) -> RotationEvent;
}

// ═══════════════════════════════════════════════════════════════════════════
// Table-driven decoder
// ═══════════════════════════════════════════════════════════════════════════

/// Emit flag: clockwise step completed.
const EMIT_CW: u8 = 0x10;
/// Emit flag: counter-clockwise step completed.
const EMIT_CCW: u8 = 0x20;
const EMIT_MASK: u8 = EMIT_CW | EMIT_CCW;
const STATE_MASK: u8 = 0x0f;

/// Position inside one full-step Gray-code cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
enum EncoderState {
    Start = 0,
    CwFinal = 1,
    CwBegin = 2,
    CwNext = 3,
    CcwBegin = 4,
    CcwFinal = 5,
    CcwNext = 6,
}

impl EncoderState {
    /// Decode the state bits of a table cell. Every cell in [`TRANSITIONS`]
    /// holds a valid state, anything else folds back to `Start`.
    const fn from_bits(bits: u8) -> Self {
        match bits & STATE_MASK {
            1 => EncoderState::CwFinal,
            2 => EncoderState::CwBegin,
            3 => EncoderState::CwNext,
            4 => EncoderState::CcwBegin,
            5 => EncoderState::CcwFinal,
            6 => EncoderState::CcwNext,
            _ => EncoderState::Start,
        }
    }
}

const START: u8 = EncoderState::Start as u8;
const CW_FINAL: u8 = EncoderState::CwFinal as u8;
const CW_BEGIN: u8 = EncoderState::CwBegin as u8;
const CW_NEXT: u8 = EncoderState::CwNext as u8;
const CCW_BEGIN: u8 = EncoderState::CcwBegin as u8;
const CCW_FINAL: u8 = EncoderState::CcwFinal as u8;
const CCW_NEXT: u8 = EncoderState::CcwNext as u8;

/// Next state for (current state, pin sample). Rows follow the
/// `EncoderState` discriminants, columns the sample `(dt << 1) | clk`.
const TRANSITIONS: [[u8; 4]; 7] = [
    // Start
    [START, CW_BEGIN, CCW_BEGIN, START],
    // CwFinal
    [CW_NEXT, START, CW_FINAL, START | EMIT_CW],
    // CwBegin
    [CW_NEXT, CW_BEGIN, START, START],
    // CwNext
    [CW_NEXT, CW_BEGIN, CW_FINAL, START],
    // CcwBegin
    [CCW_NEXT, START, CCW_BEGIN, START],
    // CcwFinal
    [CCW_NEXT, CCW_FINAL, START, START | EMIT_CCW],
    // CcwNext
    [CCW_NEXT, CCW_FINAL, CCW_BEGIN, START],
];

/// Pack the two line levels into a table column.
const fn pin_sample(clk_level: bool, dt_level: bool) -> usize {
    ((dt_level as usize) << 1) | clk_level as usize
}

/// Full-step quadrature state machine.
///
/// Call [`decode`](Decoder::decode) once per sampling tick (polled) or once
/// per edge on either line (event-driven); both produce the same events.
#[derive(Debug)]
pub struct QuadratureDecoder {
    state: EncoderState,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            state: EncoderState::Start,
        }
    }

    /// True while no partial step is in progress.
    pub fn at_rest(&self) -> bool {
        self.state == EncoderState::Start
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for QuadratureDecoder {
    fn decode(&mut self, clk_level: bool, dt_level: bool) -> RotationEvent {
        let cell = TRANSITIONS[self.state as usize][pin_sample(clk_level, dt_level)];
        self.state = EncoderState::from_bits(cell);
        RotationEvent::from_emit(cell)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Edge-triggered decoder
// ═══════════════════════════════════════════════════════════════════════════

/// Direction from the DT level at each CLK rising edge.
///
/// DT high on the edge means clockwise, matching the sense reported by
/// [`QuadratureDecoder`] for a clean detent.
#[derive(Debug)]
pub struct EdgeDecoder {
    last_clk: bool,
}

impl EdgeDecoder {
    /// Both lines rest high, so start from a high CLK to avoid a phantom
    /// edge on the first sample.
    pub const fn new() -> Self {
        Self { last_clk: true }
    }
}

impl Default for EdgeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for EdgeDecoder {
    fn decode(&mut self, clk_level: bool, dt_level: bool) -> RotationEvent {
        let rising = clk_level && !self.last_clk;
        self.last_clk = clk_level;

        if !rising {
            RotationEvent::None
        } else if dt_level {
            RotationEvent::Clockwise
        } else {
            RotationEvent::CounterClockwise
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CW_DETENT: [(bool, bool); 4] =
        [(true, false), (false, false), (false, true), (true, true)];
    const CCW_DETENT: [(bool, bool); 4] =
        [(false, true), (false, false), (true, false), (true, true)];

    fn feed<D: Decoder>(
        decoder: &mut D,
        samples: &[(bool, bool)],
    ) -> heapless::Vec<RotationEvent, 32> {
        let mut events = heapless::Vec::new();
        for &(clk, dt) in samples {
            let ev = decoder.decode(clk, dt);
            if !ev.is_none() {
                events.push(ev).unwrap();
            }
        }
        events
    }

    #[test]
    fn clean_cw_detent_emits_once() {
        let mut dec = QuadratureDecoder::new();
        let mut out = [RotationEvent::None; 4];
        for (slot, &(clk, dt)) in out.iter_mut().zip(CW_DETENT.iter()) {
            *slot = dec.decode(clk, dt);
        }
        assert_eq!(
            out,
            [
                RotationEvent::None,
                RotationEvent::None,
                RotationEvent::None,
                RotationEvent::Clockwise
            ]
        );
        assert!(dec.at_rest());
    }

    #[test]
    fn clean_ccw_detent_emits_once() {
        let mut dec = QuadratureDecoder::new();
        let events = feed(&mut dec, &CCW_DETENT);
        assert_eq!(events.as_slice(), &[RotationEvent::CounterClockwise]);
        assert!(dec.at_rest());
    }

    #[test]
    fn state_walks_begin_next_final() {
        let mut dec = QuadratureDecoder::new();
        dec.decode(true, false);
        assert_eq!(dec.state, EncoderState::CwBegin);
        dec.decode(false, false);
        assert_eq!(dec.state, EncoderState::CwNext);
        dec.decode(false, true);
        assert_eq!(dec.state, EncoderState::CwFinal);
        dec.decode(true, true);
        assert_eq!(dec.state, EncoderState::Start);
    }

    #[test]
    fn bounce_back_at_begin_emits_nothing() {
        let mut dec = QuadratureDecoder::new();
        let events = feed(&mut dec, &[(true, false), (true, true), (true, false), (true, true)]);
        assert!(events.is_empty());
        assert!(dec.at_rest());
    }

    #[test]
    fn chatter_inside_detent_still_counts_once() {
        // NEXT ↔ BEGIN chatter while turning must not double count.
        let mut dec = QuadratureDecoder::new();
        let samples = [
            (true, false),
            (false, false),
            (true, false),
            (false, false),
            (false, true),
            (false, false),
            (false, true),
            (true, true),
        ];
        let events = feed(&mut dec, &samples);
        assert_eq!(events.as_slice(), &[RotationEvent::Clockwise]);
    }

    #[test]
    fn reversal_mid_detent_never_emits_opposite() {
        // Start CW, reverse before FINAL, return to rest.
        let mut dec = QuadratureDecoder::new();
        let events = feed(&mut dec, &[(true, false), (false, false), (true, false), (true, true)]);
        assert!(events.is_empty());
    }

    #[test]
    fn repeated_detents_count_each() {
        let mut dec = QuadratureDecoder::new();
        let mut samples: heapless::Vec<(bool, bool), 16> = heapless::Vec::new();
        for _ in 0..3 {
            samples.extend_from_slice(&CW_DETENT).unwrap();
        }
        let events = feed(&mut dec, &samples);
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| *e == RotationEvent::Clockwise));
    }

    #[test]
    fn table_is_total_and_only_two_cells_emit() {
        let mut emitting = 0;
        for row in TRANSITIONS.iter() {
            for &cell in row.iter() {
                assert!((cell & STATE_MASK) < 7);
                if cell & EMIT_MASK != 0 {
                    assert_eq!(cell & STATE_MASK, START);
                    emitting += 1;
                }
            }
        }
        assert_eq!(emitting, 2);
    }

    #[test]
    fn idle_sample_keeps_start() {
        let mut dec = QuadratureDecoder::new();
        for _ in 0..10 {
            assert_eq!(dec.decode(true, true), RotationEvent::None);
        }
        assert!(dec.at_rest());
    }

    #[test]
    fn edge_decoder_agrees_on_clean_detents() {
        let mut dec = EdgeDecoder::new();
        assert_eq!(feed(&mut dec, &CW_DETENT).as_slice(), &[RotationEvent::Clockwise]);
        assert_eq!(
            feed(&mut dec, &CCW_DETENT).as_slice(),
            &[RotationEvent::CounterClockwise]
        );
    }

    #[test]
    fn edge_decoder_ignores_falling_and_steady_clk() {
        let mut dec = EdgeDecoder::new();
        assert_eq!(dec.decode(true, true), RotationEvent::None);
        assert_eq!(dec.decode(false, true), RotationEvent::None);
        assert_eq!(dec.decode(false, false), RotationEvent::None);
    }
}
