use jiff::civil::Date;

use crate::config::FiscalConfig;
use crate::range::DateRange;
use crate::types::{Quarter, today};
use crate::{CalendarError, CalendarKind, CalendarVariant};

/// A fiscal year starting on a configurable month/day.
///
/// The year is named after the civil year in which it ends, so with the
/// default August 1st anchor, FY2016 runs from 2015-08-01 to 2016-07-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiscalDate {
    date: Date,
    reference: Date,
    config: FiscalConfig,
    year_range: DateRange,
    reference_year: i32,
    quarter: Quarter,
    quarter_range: DateRange,
}

impl FiscalDate {
    /// Classifies `date`, using the current date as "today".
    ///
    /// # Errors
    /// Returns an error if `config` is inconsistent or a boundary falls outside
    /// the supported civil range.
    pub fn new(date: Date, config: FiscalConfig) -> Result<Self, CalendarError> {
        Self::with_reference(date, today(), config)
    }

    /// Classifies `date` with an explicit "today".
    ///
    /// # Errors
    /// Returns an error if `config` is inconsistent or a boundary falls outside
    /// the supported civil range.
    pub fn with_reference(
        date: Date,
        reference: Date,
        config: FiscalConfig,
    ) -> Result<Self, CalendarError> {
        config.validate()?;

        let year_range = Self::fiscal_start_end(date, &config)?;
        let reference_year = i32::from(Self::fiscal_start_end(reference, &config)?.end().year());
        let (quarter, quarter_range) = Self::quarter_bounds(date, &year_range, &config)?;

        tracing::debug!(
            calendar = %CalendarKind::Fiscal,
            %date,
            year = year_range.end().year(),
            start = %year_range.start(),
            end = %year_range.end(),
            "resolved calendar year"
        );
        Ok(Self {
            date,
            reference,
            config,
            year_range,
            reference_year,
            quarter,
            quarter_range,
        })
    }

    /// The fiscal year containing `date`.
    ///
    /// Dates before this civil year's anchor belong to the fiscal year that
    /// started on last year's anchor.
    ///
    /// # Errors
    /// Returns an error if a boundary falls outside the supported civil range.
    pub fn fiscal_start_end(date: Date, config: &FiscalConfig) -> Result<DateRange, CalendarError> {
        let anchor = config.anchor();
        let this_year = anchor.on(date.year())?;
        if date < this_year {
            DateRange::until_next(anchor.on(date.year() - 1)?, this_year)
        } else {
            DateRange::until_next(this_year, anchor.on(date.year() + 1)?)
        }
    }

    /// The configuration this date was classified with.
    pub fn config(&self) -> &FiscalConfig {
        &self.config
    }

    fn quarter_bounds(
        date: Date,
        year_range: &DateRange,
        config: &FiscalConfig,
    ) -> Result<(Quarter, DateRange), CalendarError> {
        let anchor = config.anchor();
        let start_year = year_range.start().year();

        let mut starts = [year_range.start(); 4];
        for (start, entry) in starts.iter_mut().zip(config.quarter_starts()) {
            let (wrapped, _) = entry.cycle_key(anchor);
            *start = entry.on(if wrapped { start_year + 1 } else { start_year })?;
        }

        let index = starts.iter().rposition(|start| *start <= date).unwrap_or_default();
        let quarter = Quarter::new(u8::try_from(index + 1).map_err(|_| CalendarError::OutOfRange)?)?;
        let range = match starts.get(index + 1) {
            Some(next) => DateRange::until_next(starts[index], *next)?,
            None => DateRange::new(starts[index], year_range.end())?,
        };

        tracing::trace!(%date, %quarter, %range, "resolved fiscal quarter");
        Ok((quarter, range))
    }
}

impl CalendarVariant for FiscalDate {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Fiscal
    }

    fn subject_date(&self) -> Date {
        self.date
    }

    fn reference_date(&self) -> Date {
        self.reference
    }

    fn year(&self) -> i32 {
        i32::from(self.year_range.end().year())
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

    /// Both civil years the fiscal year touches, e.g. `2015 - 2016`.
    fn year_string(&self) -> String {
        self.year_range.years_label()
    }
}
