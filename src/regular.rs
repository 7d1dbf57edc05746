use jiff::civil::Date;

use crate::consts::{DECEMBER, JANUARY, MONTHS_PER_QUARTER};
use crate::range::DateRange;
use crate::types::{Quarter, today};
use crate::{CalendarError, CalendarKind, CalendarVariant};

/// The civil calendar: January 1st to December 31st, quarters of three calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegularDate {
    date: Date,
    reference: Date,
    year_range: DateRange,
    quarter: Quarter,
    quarter_range: DateRange,
}

impl RegularDate {
    /// Classifies `date`, using the current date as "today".
    ///
    /// # Errors
    /// Returns an error if the quarter bounds fall outside the supported civil range.
    pub fn new(date: Date) -> Result<Self, CalendarError> {
        Self::with_reference(date, today())
    }

    /// Classifies `date` with an explicit "today".
    ///
    /// # Errors
    /// Returns an error if the quarter bounds fall outside the supported civil range.
    pub fn with_reference(date: Date, reference: Date) -> Result<Self, CalendarError> {
        let year_range = Self::year_bounds(date)?;
        let quarter = Quarter::of_month(date.month().unsigned_abs())?;

        let first_month = quarter.first_month().cast_signed();
        let start = Date::new(date.year(), first_month, 1)?;
        let last_month = first_month + MONTHS_PER_QUARTER.cast_signed() - 1;
        let end = Date::new(date.year(), last_month, 1)?.last_of_month();
        let quarter_range = DateRange::new(start, end)?;

        tracing::debug!(
            calendar = %CalendarKind::Regular,
            %date,
            year = date.year(),
            start = %year_range.start(),
            end = %year_range.end(),
            %quarter,
            "resolved calendar year"
        );
        Ok(Self {
            date,
            reference,
            year_range,
            quarter,
            quarter_range,
        })
    }

    fn year_bounds(date: Date) -> Result<DateRange, CalendarError> {
        DateRange::new(
            Date::new(date.year(), JANUARY, 1)?,
            Date::new(date.year(), DECEMBER, 31)?,
        )
    }
}

impl CalendarVariant for RegularDate {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Regular
    }

    fn subject_date(&self) -> Date {
        self.date
    }

    fn reference_date(&self) -> Date {
        self.reference
    }

    fn year(&self) -> i32 {
        i32::from(self.year_range.start().year())
    }

    fn reference_year(&self) -> i32 {
        i32::from(self.reference.year())
    }

    fn year_range(&self) -> DateRange {
        self.year_range
    }

    fn quarter(&self) -> Quarter {
        self.quarter
    }

    fn quarter_range(&self) -> DateRange {
        self.quarter_range
    }
}
