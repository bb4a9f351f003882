//! User interface subsystem - OLED display + rotary encoder.
//!
//! The main loop owns the [`App`](vfd_clock::App); this module holds the
//! hardware-facing pieces around it.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Input**: quadrature encoder with push button (CLK, DT, SW)

pub mod display;
pub mod input;

use defmt::{debug, info};
use vfd_clock::Update;

/// Log what one main-loop iteration did.
pub fn log_update(update: &Update) {
    if !update.rotation.is_none() {
        debug!("Rotation: {} in {}", update.rotation, update.from);
    }
    if update.pressed {
        debug!("Selector pressed in {}", update.from);
    }
    if update.timed_out {
        info!("Idle timeout, back to {}", update.to);
    }
    if update.mode_changed() {
        info!("Mode: {} -> {}", update.from, update.to);
    }
}
