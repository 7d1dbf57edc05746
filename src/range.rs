use jiff::civil::Date;
use serde::Serialize;

use crate::consts::{DATE_FORMAT, RANGE_SEPARATOR};
use crate::types::{add_days, days_between};
use crate::{CalendarError, prelude::*};

/// An inclusive range of civil dates, such as one calendar year or quarter.
/// The start date is never after the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{} - {}", "start.strftime(DATE_FORMAT)", "end.strftime(DATE_FORMAT)")]
pub struct DateRange {
    start: Date,
    end:   Date,
    days:  i32,
}

impl DateRange {
    /// Creates a new inclusive range with validation.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidRange` if start > end.
    pub fn new(start: Date, end: Date) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        let days = days_between(start, end)? + 1;
        Ok(Self { start, end, days })
    }

    /// Range from `start` up to the day before `next_start`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidRange` if `next_start` is not after `start`.
    pub fn until_next(start: Date, next_start: Date) -> Result<Self, CalendarError> {
        Self::new(start, add_days(next_start, -1)?)
    }

    /// Returns the first date of the range
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last date of the range (inclusive)
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of days covered, counting both ends
    pub const fn num_days(&self) -> i32 {
        self.days
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Checks if this range lies completely within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Checks if `next` begins on the day after this range ends
    pub fn is_followed_by(&self, next: &Self) -> bool {
        add_days(self.end, 1).is_ok_and(|day_after| day_after == next.start)
    }

    /// Civil years of both ends, e.g. `2015 - 2016`
    pub fn years_label(&self) -> String {
        format!("{}{RANGE_SEPARATOR}{}", self.start.year(), self.end.year())
    }
}
