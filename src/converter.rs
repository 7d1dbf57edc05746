//! Conversion between civil dates and the Chinese lunisolar calendar.
//!
//! The astronomy lives in `calendrical_calculations`; this module only maps
//! its fixed-day numbers and ordinal months onto [`LunisolarDate`].

use std::fmt;
use std::num::NonZeroU8;

use calendrical_calculations::chinese_based::{
    Chinese, YearBounds, chinese_based_date_from_fixed, days_until_month, fixed_mid_year_from_year,
    get_leap_month_from_new_year,
};
use calendrical_calculations::gregorian::{fixed_from_gregorian, gregorian_from_fixed};
use calendrical_calculations::rata_die::RataDie;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::CalendarError;
use crate::consts::{LUNISOLAR_CYCLE_YEARS, LUNISOLAR_EPOCH_OFFSET, MONTHS_PER_YEAR};

const MAX_LUNAR_DAY: u8 = 30;

/// A date in a sexagenary lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunisolarDate {
    cycle: i32,
    year: u8,
    month: u8,
    leap_month: bool,
    day: u8,
}

impl LunisolarDate {
    /// Creates a lunisolar date, checking each field's range.
    ///
    /// Whether the month is really a leap month of that year is only known to
    /// a [`LunisolarConverter`].
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidLunisolarDate` if the year is outside
    /// `1..=60`, the month outside `1..=12` or the day outside `1..=30`.
    pub fn new(
        cycle: i32,
        year: u8,
        month: u8,
        leap_month: bool,
        day: u8,
    ) -> Result<Self, CalendarError> {
        let date = Self {
            cycle,
            year,
            month,
            leap_month,
            day,
        };
        let valid = (1..=LUNISOLAR_CYCLE_YEARS).contains(&i32::from(year))
            && (1..=MONTHS_PER_YEAR.unsigned_abs()).contains(&month)
            && (1..=MAX_LUNAR_DAY).contains(&day);
        if !valid {
            return Err(CalendarError::InvalidLunisolarDate(date));
        }
        Ok(date)
    }

    /// Builds a date from the count of years elapsed since the calendar epoch.
    fn from_elapsed(
        elapsed: i32,
        month: u8,
        leap_month: bool,
        day: u8,
    ) -> Result<Self, CalendarError> {
        let cycle = (elapsed - 1).div_euclid(LUNISOLAR_CYCLE_YEARS) + 1;
        let year = u8::try_from((elapsed - 1).rem_euclid(LUNISOLAR_CYCLE_YEARS) + 1)
            .map_err(|_| CalendarError::OutOfRange)?;
        Self::new(cycle, year, month, leap_month, day)
    }

    pub const fn cycle(&self) -> i32 {
        self.cycle
    }

    /// Year within the cycle, `1..=60`
    pub const fn year(&self) -> u8 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn is_leap_month(&self) -> bool {
        self.leap_month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Years elapsed since the calendar epoch, counting the current one.
    pub fn elapsed_year(&self) -> i32 {
        (self.cycle - 1) * LUNISOLAR_CYCLE_YEARS + i32::from(self.year)
    }

    /// Year number close to the Gregorian year in which this lunisolar year starts.
    pub fn normalized_year(&self) -> i32 {
        self.cycle * LUNISOLAR_CYCLE_YEARS + i32::from(self.year) - LUNISOLAR_EPOCH_OFFSET
    }

    /// First day of `month` (never the leap month) in the same year
    pub fn first_of_month(&self, month: u8) -> Result<Self, CalendarError> {
        Self::new(self.cycle, self.year, month, false, 1)
    }

    /// First day of the same year
    pub fn new_year(&self) -> Self {
        Self {
            month: 1,
            leap_month: false,
            day: 1,
            ..*self
        }
    }

    /// First day of the following year, rolling into the next cycle after year 60.
    pub fn next_new_year(&self) -> Result<Self, CalendarError> {
        Self::from_elapsed(self.elapsed_year() + 1, 1, false, 1)
    }
}

impl fmt::Display for LunisolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.leap_month { "L" } else { "" };
        write!(
            f,
            "{}-{:02}-{leap}{:02}-{:02}",
            self.cycle, self.year, self.month, self.day
        )
    }
}

/// Converts between civil and lunisolar dates.
pub trait LunisolarConverter {
    /// # Errors
    /// Returns an error if `date` is outside the range the converter supports.
    fn to_lunisolar(&self, date: Date) -> Result<LunisolarDate, CalendarError>;

    /// # Errors
    /// Returns `CalendarError::InvalidLunisolarDate` if `date` does not exist,
    /// such as a leap flag on a month that is not that year's leap month.
    fn to_civil(&self, date: LunisolarDate) -> Result<Date, CalendarError>;
}

/// The traditional Chinese calendar, observed at UTC+8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChineseConverter;

impl LunisolarConverter for ChineseConverter {
    fn to_lunisolar(&self, date: Date) -> Result<LunisolarDate, CalendarError> {
        let fixed = fixed_from_civil(date);
        let result = chinese_based_date_from_fixed::<Chinese>(fixed);

        // months are reported by position; the leap month takes the position after its namesake
        let (month, leap_month) = match result.leap_month.map(NonZeroU8::get) {
            Some(leap) if result.month == leap => (leap - 1, true),
            Some(leap) if result.month > leap => (result.month - 1, false),
            _ => (result.month, false),
        };

        let lunisolar = LunisolarDate::from_elapsed(result.year, month, leap_month, result.day)?;
        tracing::trace!(%date, %lunisolar, "civil to lunisolar");
        Ok(lunisolar)
    }

    fn to_civil(&self, date: LunisolarDate) -> Result<Date, CalendarError> {
        let bounds =
            YearBounds::compute::<Chinese>(fixed_mid_year_from_year::<Chinese>(date.elapsed_year()));
        let leap = bounds
            .is_leap()
            .then(|| get_leap_month_from_new_year::<Chinese>(bounds.new_year));

        let position = match (leap, date.is_leap_month()) {
            (Some(leap), true) if date.month() + 1 == leap => leap,
            (_, true) => return Err(CalendarError::InvalidLunisolarDate(date)),
            (Some(leap), false) if date.month() >= leap => date.month() + 1,
            _ => date.month(),
        };

        let fixed = bounds.new_year
            + i64::from(days_until_month::<Chinese>(bounds.new_year, position))
            + i64::from(date.day() - 1);
        let civil = civil_from_fixed(fixed)?;

        // a day past the end of a short month spills into the next one
        if self.to_lunisolar(civil)? != date {
            return Err(CalendarError::InvalidLunisolarDate(date));
        }
        tracing::trace!(%date, %civil, "lunisolar to civil");
        Ok(civil)
    }
}

fn fixed_from_civil(date: Date) -> RataDie {
    fixed_from_gregorian(
        i32::from(date.year()),
        date.month().unsigned_abs(),
        date.day().unsigned_abs(),
    )
}

fn civil_from_fixed(fixed: RataDie) -> Result<Date, CalendarError> {
    let (year, month, day) = gregorian_from_fixed(fixed)?;
    let year = i16::try_from(year).map_err(|_| CalendarError::OutOfRange)?;
    Ok(Date::new(year, month.cast_signed(), day.cast_signed())?)
}
