//! Upcoming-birthday window predicate.
//!
//! Birthdays are compared by month and day only. Every month/day is mapped to
//! an ordinal on a fixed non-leap calendar (Feb 29 shares Feb 28's ordinal) and
//! a birthday matches when its ordinal lies in the circular inclusive range
//! between the reference date and `reference + days`.

use chrono::{Datelike, Days, NaiveDate};

/// Length of the fixed calendar used for ordinals.
pub const DAYS_IN_YEAR: u32 = 365;

/// Default look-ahead of the upcoming-birthdays query.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

const MONTH_STARTS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Zero-based day of year for `month`/`day` on a non-leap calendar.
///
/// Out-of-range days are clamped to the month's length, so Feb 29 maps to
/// the ordinal of Feb 28.
pub fn ordinal(month: u32, day: u32) -> u32 {
    let idx = (month.clamp(1, 12) - 1) as usize;
    MONTH_STARTS[idx] + day.clamp(1, MONTH_LENGTHS[idx]) - 1
}

/// An inclusive look-ahead window of month/day values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayWindow {
    reference: NaiveDate,
    end: NaiveDate,
    days: u32,
    start_ordinal: u32,
    end_ordinal: u32,
}

impl BirthdayWindow {
    /// Build the window `[reference, reference + days]`.
    pub fn new(reference: NaiveDate, days: u32) -> Self {
        let end = reference
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self {
            reference,
            end,
            days,
            start_ordinal: ordinal(reference.month(), reference.day()),
            end_ordinal: ordinal(end.month(), end.day()),
        }
    }

    /// First day of the window.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Last day of the window (calendar arithmetic, may be in the next year).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the window covers every day of the year.
    pub fn is_full_year(&self) -> bool {
        self.days >= DAYS_IN_YEAR
    }

    /// Whether the window crosses the Dec 31 / Jan 1 boundary.
    pub fn wraps(&self) -> bool {
        self.start_ordinal > self.end_ordinal
    }

    /// Whether a birthday with the given month and day falls in the window.
    pub fn matches(&self, month: u32, day: u32) -> bool {
        if self.is_full_year() {
            return true;
        }
        let o = ordinal(month, day);
        if self.wraps() {
            o >= self.start_ordinal || o <= self.end_ordinal
        } else {
            (self.start_ordinal..=self.end_ordinal).contains(&o)
        }
    }

    /// Whether `birthday` (year ignored) falls in the window.
    pub fn contains(&self, birthday: NaiveDate) -> bool {
        self.matches(birthday.month(), birthday.day())
    }

    /// Months (1-12) the window touches, in calendar order from the reference month.
    pub fn months(&self) -> Vec<u32> {
        let first = self.reference.month();
        let last = self.end.month();
        if self.is_full_year() || (self.wraps() && first == last) {
            return (0..12).map(|i| (first - 1 + i) % 12 + 1).collect();
        }

        let mut months = vec![first];
        let mut month = first;
        while month != last {
            month = month % 12 + 1;
            months.push(month);
        }
        months
    }
}
