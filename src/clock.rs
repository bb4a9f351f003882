//! Wall-clock value type shared by the clock face and the clock editor.
//!
//! The RTC itself is driven elsewhere; this module only holds the
//! calendar arithmetic the input core needs: formatting, month lengths for
//! the day field, and a software clock that advances from the monotonic
//! tick between RTC reads.

use core::fmt::{self, Write};

use heapless::String;

/// Longest formatted value: `YYYY-MM-DD HH:MM:SS` plus a five-digit year.
pub const DATE_TIME_STR_LEN: usize = 20;

/// Calendar date and time of day (24 h).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=days_in_month
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Length of `month` (1-based) in `year`. Out-of-range months yield 0.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl DateTime {
    /// Fallback time before the first RTC read.
    pub const DEFAULT: DateTime = DateTime {
        year: 2024,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Build from editor fields with seconds reset to zero. The day is
    /// clamped to the month length, so 31 February becomes 28 or 29.
    pub fn with_fields(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        let month = month.clamp(1, 12);
        Self {
            year,
            month,
            day: day.clamp(1, days_in_month(year, month)),
            hour: hour.min(23),
            minute: minute.min(59),
            second: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// `YYYY-MM-DD H:MM:SS` (hour not zero-padded).
    pub fn format(&self) -> String<DATE_TIME_STR_LEN> {
        let mut out = String::new();
        let _ = write!(out, "{}", self);
        out
    }

    /// `H:MM` for the large clock face.
    pub fn format_time(&self) -> String<5> {
        let mut out = String::new();
        let _ = write!(out, "{}:{:02}", self.hour, self.minute);
        out
    }

    /// Advance by `secs`, rolling over minutes, hours, days, months and years.
    pub fn add_seconds(&self, secs: u64) -> Self {
        let mut out = *self;

        let of_day = u64::from(self.hour) * 3_600
            + u64::from(self.minute) * 60
            + u64::from(self.second);
        let total = of_day + secs;
        let mut days = total / 86_400;
        let rem = total % 86_400;
        out.hour = (rem / 3_600) as u8;
        out.minute = (rem % 3_600 / 60) as u8;
        out.second = (rem % 60) as u8;

        while days > 0 {
            let month_len = days_in_month(out.year, out.month);
            let left_in_month = u64::from(month_len.saturating_sub(out.day));
            if days <= left_in_month {
                out.day += days as u8;
                days = 0;
            } else {
                days -= left_in_month + 1;
                out.day = 1;
                if out.month == 12 {
                    out.month = 1;
                    out.year = out.year.saturating_add(1);
                } else {
                    out.month += 1;
                }
            }
        }
        out
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Wall clock kept from a base value plus elapsed monotonic time.
#[derive(Clone, Copy, Debug)]
pub struct SoftClock {
    base: DateTime,
    base_ms: u64,
}

impl SoftClock {
    pub const fn new(base: DateTime, now_ms: u64) -> Self {
        Self { base, base_ms: now_ms }
    }

    /// Current time at monotonic reading `now_ms`.
    pub fn now(&self, now_ms: u64) -> DateTime {
        self.base.add_seconds(now_ms.saturating_sub(self.base_ms) / 1_000)
    }

    /// Re-anchor (after an RTC read or a committed edit).
    pub fn set(&mut self, time: DateTime, now_ms: u64) {
        self.base = time;
        self.base_ms = now_ms;
    }
}
