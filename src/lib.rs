//! Input-decoding and navigation core for the vfd-clock.
//!
//! Everything here is pure logic that runs on the host (no embedded
//! hardware required): the quadrature decoder, the button debouncer, the
//! paginated menu model and the mode controller that ties them together.
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and pulls these modules in through the `vfd_clock` crate. GPIO, display
//! and RTC access stay in the binary.

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Input services
// ═══════════════════════════════════════════════════════════════════════════

pub mod button;
pub mod encoder;

// ═══════════════════════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════════════════════

pub mod app;
pub mod menu;
pub mod mode;

// ═══════════════════════════════════════════════════════════════════════════
// Support
// ═══════════════════════════════════════════════════════════════════════════

pub mod clock;
pub mod config;
pub mod error;
pub mod idle;

pub use app::{App, Update};
pub use encoder::RotationEvent;
pub use error::Error;
pub use mode::{Command, Controller, Mode, ModeKind, View};
