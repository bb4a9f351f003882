//! GPIO input for the rotary encoder and its push button.
//!
//! Encoder wiring (active-low with internal pull-ups):
//!   - CLK (A) - quadrature line, leads DT by 90° on a clockwise turn
//!   - DT  (B) - quadrature line
//!   - SW      - integrated push button, sampled by the main loop
//!
//! By default an async task waits for an edge on either quadrature line,
//! runs the shared decoder, and leaves the result in [`ENCODER`]'s slot
//! for the main loop. The task is spawned on the interrupt executor, so it
//! can run in the middle of a main-loop iteration; [`SharedDecoder`]
//! guards the decoder and the slot with a critical section for that.
//!
//! With the `polled-encoder` feature the main loop samples both lines
//! itself and this task is not spawned.

#[cfg(not(feature = "polled-encoder"))]
use defmt::debug;
#[cfg(not(feature = "polled-encoder"))]
use embassy_futures::select::select;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
#[cfg(not(feature = "polled-encoder"))]
use vfd_clock::encoder::handoff::SharedDecoder;

/// Decoder state + pending event shared by the edge task and the main loop.
#[cfg(not(feature = "polled-encoder"))]
pub static ENCODER: SharedDecoder = SharedDecoder::new();

/// Configure one encoder line (pull-up, idle high).
pub fn encoder_line(pin: AnyPin) -> Input<'static> {
    Input::new(pin, Pull::Up)
}

/// Run the edge-driven encoder loop.
///
/// Every edge on CLK or DT feeds one sample into [`ENCODER`]; completed
/// detents stay in its slot until the main loop drains them.
#[cfg(not(feature = "polled-encoder"))]
#[embassy_executor::task]
pub async fn encoder_task(mut clk: Input<'static>, mut dt: Input<'static>) -> ! {
    loop {
        select(clk.wait_for_any_edge(), dt.wait_for_any_edge()).await;

        let event = ENCODER.on_edge(clk.is_high(), dt.is_high());
        if !event.is_none() {
            debug!("Encoder edge: {}", event);
        }
    }
}
