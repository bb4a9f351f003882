//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and layout
//! constants live here so they can be tuned in one place.

use crate::error::Error;

// Input timing

/// Button debounce window (ms). A press is accepted at most once per window.
pub const BUTTON_DEBOUNCE_MS: u64 = 500;

/// Inactivity window before a menu falls back to the clock face (ms).
pub const MENU_IDLE_TIMEOUT_MS: u64 = 8_000;

/// Main loop period (ms). Polled encoder sampling happens once per tick.
pub const TICK_MS: u64 = 1;

/// Forced redraw period even when nothing changed (ms). The clock face
/// shows seconds, so once per second.
pub const RENDER_INTERVAL_MS: u64 = 1_000;

// Display geometry (SSD1306 128×64)

pub const DISPLAY_WIDTH: u16 = 128;
pub const DISPLAY_HEIGHT: u16 = 64;

/// Title bar drawn above every menu (px).
pub const MENU_HEADER_HEIGHT: u16 = 12;

/// Height of one menu row (px).
pub const MENU_ROW_HEIGHT: u16 = 10;

/// Rows that fit under the header: (64 - 12) / 10 = 5.
pub const DEFAULT_ITEMS_PER_PAGE: usize =
    ((DISPLAY_HEIGHT - MENU_HEADER_HEIGHT) / MENU_ROW_HEIGHT) as usize;

/// Fields shown side by side in the clock-setting editor.
pub const SET_CLOCK_PAGE_SIZE: usize = 3;

/// Capacity of every menu (no allocation after init).
pub const MAX_MENU_ITEMS: usize = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical numbers used for validation and boot logs; the actual
// `embassy_nrf::peripherals::*` pins are selected in `main.rs`.  Adjust for
// your custom PCB.
//
//   Encoder CLK    → P0.11
//   Encoder DT     → P0.12
//   Encoder SW     → P0.24
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

pub const ENCODER_CLK_PIN: u8 = 11;
pub const ENCODER_DT_PIN: u8 = 12;
pub const ENCODER_SW_PIN: u8 = 24;

/// Construction parameters recognised by the input core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Encoder CLK (A) line.
    pub clock_pin: u8,
    /// Encoder DT (B) line, 90° behind CLK.
    pub data_pin: u8,
    /// Push-button line (active-low).
    pub switch_pin: u8,
    pub debounce_interval_ms: u64,
    /// Rows per page of the main menu.
    pub items_per_page: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            clock_pin: ENCODER_CLK_PIN,
            data_pin: ENCODER_DT_PIN,
            switch_pin: ENCODER_SW_PIN,
            debounce_interval_ms: BUTTON_DEBOUNCE_MS,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl DeviceConfig {
    /// Reject configurations the input core cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.clock_pin == self.data_pin || self.clock_pin == self.switch_pin {
            return Err(Error::DuplicatePin(self.clock_pin));
        }
        if self.data_pin == self.switch_pin {
            return Err(Error::DuplicatePin(self.data_pin));
        }
        if self.debounce_interval_ms == 0 {
            return Err(Error::ZeroDebounce);
        }
        if self.items_per_page == 0 {
            return Err(Error::ZeroItemsPerPage);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DeviceConfig::default().validate(), Ok(()));
        assert_eq!(DEFAULT_ITEMS_PER_PAGE, 5);
    }

    #[test]
    fn shared_pins_are_rejected() {
        let cfg = DeviceConfig {
            data_pin: ENCODER_CLK_PIN,
            ..DeviceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(Error::DuplicatePin(ENCODER_CLK_PIN)));

        let cfg = DeviceConfig {
            switch_pin: ENCODER_DT_PIN,
            ..DeviceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(Error::DuplicatePin(ENCODER_DT_PIN)));
    }

    #[test]
    fn zero_timing_and_paging_are_rejected() {
        let cfg = DeviceConfig {
            debounce_interval_ms: 0,
            ..DeviceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(Error::ZeroDebounce));

        let cfg = DeviceConfig {
            items_per_page: 0,
            ..DeviceConfig::default()
        };
        assert_eq!(cfg.validate(), Err(Error::ZeroItemsPerPage));
    }
}
