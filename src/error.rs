//! Unified error type for vfd-clock.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.
//!
//! The input core itself has no recoverable errors: bad encoder samples
//! fold back to the idle state and rejected button presses are ordinary
//! filtering. Errors only come from construction (menus, configuration)
//! and from the collaborators the binary drives.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Menu construction
    /// A menu was built from zero items.
    EmptyMenu,

    /// More items than `config::MAX_MENU_ITEMS`.
    TooManyItems,

    /// The layout yields zero rows per page.
    InvalidLayout,

    // Configuration
    /// Two of the encoder / switch lines share a pin.
    DuplicatePin(u8),

    /// Debounce interval of zero would accept every bounce.
    ZeroDebounce,

    /// `items_per_page` must be at least one.
    ZeroItemsPerPage,

    // Collaborators
    /// I²C transaction to the display failed.
    Display,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyMenu => f.write_str("menu has no items"),
            Error::TooManyItems => f.write_str("menu exceeds item capacity"),
            Error::InvalidLayout => f.write_str("layout leaves no room for a menu row"),
            Error::DuplicatePin(pin) => write!(f, "pin {} assigned twice", pin),
            Error::ZeroDebounce => f.write_str("debounce interval must be non-zero"),
            Error::ZeroItemsPerPage => f.write_str("items per page must be non-zero"),
            Error::Display => f.write_str("display write failed"),
        }
    }
}
