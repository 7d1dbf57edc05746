use crate::CalendarError;
use crate::consts::{
    ANCHOR_SEPARATOR, COMMON_YEAR, DEFAULT_ANCHOR_DAY, DEFAULT_ANCHOR_MONTH,
    MONTHS_PER_QUARTER, MONTHS_PER_YEAR, QUARTERS_PER_YEAR,
};
use crate::prelude::*;
use jiff::Span;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;
use std::str::FromStr;

/// A month/day pair marking where a fiscal or retail year begins.
///
/// The pair must exist in every year, so February 29th is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{month:02}-{day:02}")]
pub struct AnchorDate {
    month: i8,
    day: i8,
}

impl AnchorDate {
    /// Creates a new anchor, validating it against a common year
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidAnchor` if the month/day does not exist in a common year.
    pub fn new(month: i8, day: i8) -> Result<Self, CalendarError> {
        Date::new(COMMON_YEAR, month, day).map_err(|_| CalendarError::InvalidAnchor { month, day })?;
        Ok(Self { month, day })
    }

    #[inline]
    pub const fn month(self) -> i8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> i8 {
        self.day
    }

    /// The civil date of this anchor in `year`
    ///
    /// # Errors
    /// Returns `CalendarError::Civil` if `year` is outside the supported civil range.
    pub fn on(self, year: i16) -> Result<Date, CalendarError> {
        Ok(Date::new(year, self.month, self.day)?)
    }

    /// Steps the anchor forward by whole months, clamping the day to the target month's length.
    pub(crate) fn plus_months(self, months: i8) -> Self {
        let month = (self.month - 1 + months).rem_euclid(MONTHS_PER_YEAR) + 1;
        let last_day = jiff::civil::date(COMMON_YEAR, month, 1).days_in_month();
        Self {
            month,
            day: self.day.min(last_day),
        }
    }

    /// Ordering key of this month/day inside a year that starts at `start`.
    ///
    /// Entries on or after `start` sort before entries that wrapped into the next civil year.
    pub(crate) fn cycle_key(self, start: Self) -> (bool, Self) {
        (self < start, self)
    }
}

impl Default for AnchorDate {
    fn default() -> Self {
        Self {
            month: DEFAULT_ANCHOR_MONTH,
            day: DEFAULT_ANCHOR_DAY,
        }
    }
}

impl FromStr for AnchorDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (month, day) = trimmed
            .split_once(ANCHOR_SEPARATOR)
            .ok_or_else(|| CalendarError::InvalidAnchorFormat(trimmed.to_owned()))?;
        let month = month
            .trim()
            .parse::<i8>()
            .map_err(|_| CalendarError::InvalidAnchorFormat(trimmed.to_owned()))?;
        let day = day
            .trim()
            .parse::<i8>()
            .map_err(|_| CalendarError::InvalidAnchorFormat(trimmed.to_owned()))?;
        Self::new(month, day)
    }
}

impl Serialize for AnchorDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AnchorDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A quarter number guaranteed to be in the range `1..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "Q{_0}")]
pub struct Quarter(NonZeroU8);

impl Quarter {
    /// Creates a new Quarter, validating that it's in `1..=4`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidQuarter` if the value is 0 or > 4.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidQuarter(value))?;
        if value > QUARTERS_PER_YEAR {
            return Err(CalendarError::InvalidQuarter(value));
        }
        Ok(Self(non_zero))
    }

    /// Quarter holding the given 1-based month of a twelve-month year
    pub(crate) fn of_month(month: u8) -> Result<Self, CalendarError> {
        Self::new(month.saturating_sub(1) / MONTHS_PER_QUARTER + 1)
    }

    /// Returns the quarter number as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// First month (1-based) of this quarter in a twelve-month year
    #[inline]
    pub const fn first_month(self) -> u8 {
        (self.get() - 1) * MONTHS_PER_QUARTER + 1
    }

    /// The following quarter of the same year, `None` after Q4
    pub fn next(self) -> Option<Self> {
        Self::new(self.get() + 1).ok()
    }
}

impl TryFrom<u8> for Quarter {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> Self {
        quarter.get()
    }
}

/// Weeks given to the three months of every quarter in a week-grid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum WeekPattern {
    #[serde(rename = "4-4-5")]
    #[display(fmt = "4-4-5")]
    FourFourFive,
    #[serde(rename = "4-5-4")]
    #[display(fmt = "4-5-4")]
    FourFiveFour,
    #[default]
    #[serde(rename = "5-4-4")]
    #[display(fmt = "5-4-4")]
    FiveFourFour,
}

impl WeekPattern {
    /// Weeks per month within one quarter
    pub const fn weeks(self) -> [u8; 3] {
        match self {
            Self::FourFourFive => [4, 4, 5],
            Self::FourFiveFour => [4, 5, 4],
            Self::FiveFourFour => [5, 4, 4],
        }
    }
}

// Helper functions over the civil calendar

/// The current civil date in the system time zone
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

pub(crate) fn add_days(date: Date, days: i32) -> Result<Date, CalendarError> {
    Ok(date.checked_add(Span::new().try_days(days)?)?)
}

/// Signed number of days from `start` to `end`
pub(crate) fn days_between(start: Date, end: Date) -> Result<i32, CalendarError> {
    Ok(start.until(end)?.get_days())
}
