//! Encoder push-button debouncing.
//!
//! The switch is active-low with an internal pull-up: a low sample means
//! the button is closed. A press is accepted at most once per debounce
//! window, measured from the last accepted press. Boot counts as an
//! accepted press at 0 ms, so the line is ignored for the first window.
//!
//! Re-arming is purely time based; the line does not have to go high
//! between presses. Holding the button therefore repeats once per window.

use crate::config::BUTTON_DEBOUNCE_MS;

/// Time-windowed press detector.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval_ms: u64,
    last_accepted_ms: u64,
    last_level: bool,
}

impl Debouncer {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accepted_ms: 0,
            last_level: true,
        }
    }

    /// Feed one raw sample taken at `now_ms` (monotonic, ms since boot).
    ///
    /// Returns `true` when this sample is an accepted press.
    pub fn pressed(&mut self, raw_level: bool, now_ms: u64) -> bool {
        self.last_level = raw_level;
        if raw_level {
            return false;
        }

        let rearmed = now_ms.saturating_sub(self.last_accepted_ms) > self.interval_ms;
        if rearmed {
            self.last_accepted_ms = now_ms;
        }
        rearmed
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_accepted_ms(&self) -> u64 {
        self.last_accepted_ms
    }

    /// Most recent raw sample (`false` = closed).
    pub fn last_level(&self) -> bool {
        self.last_level
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(BUTTON_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_line_never_presses() {
        let mut btn = Debouncer::default();
        for t in 0..2_000 {
            assert!(!btn.pressed(true, t));
        }
        assert_eq!(btn.last_accepted_ms(), 0);
    }

    #[test]
    fn press_in_first_window_after_boot_is_ignored() {
        let mut btn = Debouncer::default();
        assert!(!btn.pressed(false, 100));
        assert!(!btn.pressed(false, 500));
        assert_eq!(btn.last_accepted_ms(), 0);
        assert!(btn.pressed(false, 501));
        assert_eq!(btn.last_accepted_ms(), 501);
    }

    #[test]
    fn bounces_within_window_count_once() {
        let mut btn = Debouncer::new(500);
        let accepted = (1_000..1_500u64)
            .step_by(7)
            .enumerate()
            .filter(|&(i, t)| btn.pressed(i % 2 == 1, t))
            .count();
        assert_eq!(accepted, 1);
    }

    #[test]
    fn spaced_presses_all_count() {
        let mut btn = Debouncer::new(500);
        let accepted = (1..=10u64).filter(|n| btn.pressed(false, n * 501)).count();
        assert_eq!(accepted, 10);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let mut btn = Debouncer::new(500);
        assert!(btn.pressed(false, 1_000));
        assert!(!btn.pressed(false, 1_500));
        assert!(btn.pressed(false, 1_501));
    }

    #[test]
    fn held_button_repeats_once_per_window() {
        let mut btn = Debouncer::new(500);
        let accepted = (0..=2_100u64).filter(|&t| btn.pressed(false, t)).count();
        // 501, 1002, 1503, 2004
        assert_eq!(accepted, 4);
    }

    #[test]
    fn rejected_sample_does_not_move_timestamp() {
        let mut btn = Debouncer::new(500);
        btn.pressed(false, 1_000);
        btn.pressed(false, 1_300);
        assert_eq!(btn.last_accepted_ms(), 1_000);
        assert!(!btn.last_level());
    }
}
