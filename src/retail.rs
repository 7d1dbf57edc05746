use jiff::civil::{Date, Weekday};

use crate::config::RetailConfig;
use crate::consts::{DAYS_PER_WEEK, JANUARY};
use crate::range::DateRange;
use crate::types::{Quarter, add_days, today};
use crate::week::{WeekGrid, WeekLayout, week_of_year};
use crate::{CalendarError, CalendarKind, CalendarVariant};

/// A 52/53-week retail year.
///
/// Each year starts on the Sunday on or before the configured anchor (August
/// 1st by default) and ends on the Saturday before the next one. Quarters
/// follow the configured [`crate::WeekPattern`]; a 53-week year adds the extra
/// week to its last month.
///
/// The year is named after the civil year it ends in. Anchors in the first
/// week of January can close a year on either side of New Year, so those
/// years are named after the civil year of the anchor that opened them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetailDate {
    date: Date,
    reference: Date,
    config: RetailConfig,
    year: i32,
    year_range: DateRange,
    reference_year: i32,
    layout: WeekLayout,
    week: u8,
    quarter: Quarter,
    quarter_range: DateRange,
}

impl RetailDate {
    /// Classifies `date`, using the current date as "today".
    ///
    /// # Errors
    /// Returns an error if a boundary falls outside the supported civil range.
    pub fn new(date: Date, config: RetailConfig) -> Result<Self, CalendarError> {
        Self::with_reference(date, today(), config)
    }

    /// Classifies `date` with an explicit "today".
    ///
    /// # Errors
    /// Returns an error if a boundary falls outside the supported civil range.
    pub fn with_reference(
        date: Date,
        reference: Date,
        config: RetailConfig,
    ) -> Result<Self, CalendarError> {
        let (anchor_year, year_range) = Self::locate_year(date, &config)?;
        let year = Self::year_number(anchor_year, &config);
        let reference_year = Self::year_number(Self::locate_year(reference, &config)?.0, &config);
        let layout = WeekLayout::for_year(config.pattern(), &year_range);
        let week = week_of_year(&year_range, date)?;
        let (quarter, quarter_range) = layout.quarter_of(&year_range, date)?;

        tracing::debug!(
            calendar = %CalendarKind::Retail,
            %date,
            year,
            start = %year_range.start(),
            end = %year_range.end(),
            weeks = layout.total_weeks(),
            "resolved calendar year"
        );
        Ok(Self {
            date,
            reference,
            config,
            year,
            year_range,
            reference_year,
            layout,
            week,
            quarter,
            quarter_range,
        })
    }

    /// First day of the retail year that starts around the anchor of civil `year`:
    /// the anchor itself if it is a Sunday, otherwise the Sunday before it.
    ///
    /// # Errors
    /// Returns an error if the date falls outside the supported civil range.
    pub fn retail_start(year: i16, config: &RetailConfig) -> Result<Date, CalendarError> {
        let anchor = config.anchor().on(year)?;
        if anchor.weekday() == Weekday::Sunday {
            return Ok(anchor);
        }
        add_days(anchor, -(i32::from(anchor.weekday().to_monday_zero_offset()) + 1))
    }

    /// The retail year containing `date`.
    ///
    /// # Errors
    /// Returns an error if a boundary falls outside the supported civil range.
    pub fn retail_start_end(date: Date, config: &RetailConfig) -> Result<DateRange, CalendarError> {
        Ok(Self::locate_year(date, config)?.1)
    }

    /// The retail year containing `date`, with the civil year of the anchor that opened it.
    fn locate_year(date: Date, config: &RetailConfig) -> Result<(i16, DateRange), CalendarError> {
        let year = date.year();
        let start = Self::retail_start(year, config)?;
        if date < start {
            let range = DateRange::until_next(Self::retail_start(year - 1, config)?, start)?;
            return Ok((year - 1, range));
        }

        // anchors early in January can start the next retail year in December
        let next = Self::retail_start(year + 1, config)?;
        if date >= next {
            let range = DateRange::until_next(next, Self::retail_start(year + 2, config)?)?;
            return Ok((year + 1, range));
        }
        Ok((year, DateRange::until_next(start, next)?))
    }

    /// Number of the retail year opened by the anchor of civil `anchor_year`.
    fn year_number(anchor_year: i16, config: &RetailConfig) -> i32 {
        let anchor = config.anchor();
        let first_week_of_january =
            anchor.month() == JANUARY && i32::from(anchor.day()) <= DAYS_PER_WEEK;
        if first_week_of_january {
            i32::from(anchor_year)
        } else {
            i32::from(anchor_year) + 1
        }
    }

    /// The configuration this date was classified with.
    pub fn config(&self) -> &RetailConfig {
        &self.config
    }
}

impl CalendarVariant for RetailDate {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Retail
    }

    fn subject_date(&self) -> Date {
        self.date
    }

    fn reference_date(&self) -> Date {
        self.reference
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn reference_year(&self) -> i32 {
        self.reference_year
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

    /// Both civil years the retail year touches, e.g. `2015 - 2016`.
    fn year_string(&self) -> String {
        self.year_range.years_label()
    }
}

impl WeekGrid for RetailDate {
    fn layout(&self) -> &WeekLayout {
        &self.layout
    }

    fn week(&self) -> u8 {
        self.week
    }
}
