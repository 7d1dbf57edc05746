//! Year and quarter boundaries of a civil date under several calendar systems.
//!
//! Every calendar is a small immutable value built from a subject date and a
//! reference ("today") date:
//!
//! - [`RegularDate`]: January to December, calendar-month quarters.
//! - [`FiscalDate`]: years starting on a configurable anchor (August 1st by default).
//! - [`RetailDate`]: 52/53-week retail years in a 5-4-4 (or 4-4-5, 4-5-4) layout.
//! - [`IsoDate`]: ISO week-date years using the same week-grid quarters.
//! - [`LunarDate`]: Chinese lunisolar years and quarters.
//!
//! All of them implement [`CalendarVariant`]; [`CalendarDate`] picks one at
//! runtime from a [`CalendarKind`].
//!
//! # Example
//!
//! ```
//! use calendars::{CalendarVariant, FiscalConfig, FiscalDate};
//! use jiff::civil::date;
//!
//! let fiscal = FiscalDate::with_reference(
//!     date(2015, 9, 2),
//!     date(2016, 1, 1),
//!     FiscalConfig::default(),
//! )?;
//! assert_eq!(fiscal.year(), 2016);
//! assert_eq!(fiscal.quarter().get(), 1);
//! assert_eq!(fiscal.year_dates_string(), "2016 (01-Aug-2015 - 31-Jul-2016)");
//! assert!(fiscal.is_current_year());
//! # Ok::<(), calendars::CalendarError>(())
//! ```

mod config;
mod consts;
mod converter;
mod fiscal;
mod iso;
mod lunar;
mod prelude;
mod range;
mod regular;
mod retail;
mod system;
mod types;
mod week;

#[cfg(test)]
mod test_utils;

pub use config::{CalendarConfig, FiscalConfig, RetailConfig};
pub use consts::*;
pub use converter::{ChineseConverter, LunisolarConverter, LunisolarDate};
pub use fiscal::FiscalDate;
pub use iso::IsoDate;
pub use lunar::LunarDate;
pub use range::DateRange;
pub use regular::RegularDate;
pub use retail::RetailDate;
pub use system::{CalendarDate, CalendarKind, CalendarSummary};
pub use types::{AnchorDate, Quarter, WeekPattern, today};
pub use week::{WeekGrid, WeekLayout};

use calendrical_calculations::helpers::I32CastError;
use jiff::civil::Date;

/// Errors raised while building a calendar or its configuration.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// Anchor month/day that does not exist in every year.
    #[error("Invalid anchor: month {month}, day {day}")]
    InvalidAnchor { month: i8, day: i8 },

    /// Anchor string not in `MM-DD` form.
    #[error("Invalid anchor format: {0}")]
    InvalidAnchorFormat(String),

    /// Fiscal quarter table whose first entry is not the fiscal anchor.
    #[error("quarter table starts on {first} but the fiscal year is anchored on {anchor}")]
    QuarterTableMismatch { anchor: AnchorDate, first: AnchorDate },

    /// Fiscal quarter table not in calendar order from the anchor.
    #[error("quarter table {0:?} is not in calendar order")]
    QuarterTableOrder([AnchorDate; 4]),

    #[error("Invalid quarter: {0} (must be 1-4)")]
    InvalidQuarter(u8),

    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: Date, end: Date },

    /// Lunisolar date that does not exist, such as a leap flag on a regular month.
    #[error("Invalid lunisolar date: {0}")]
    InvalidLunisolarDate(LunisolarDate),

    /// Date arithmetic left the range the calendars support.
    #[error("date out of supported range")]
    OutOfRange,

    #[error(transparent)]
    Civil(#[from] jiff::Error),

    #[error("lunisolar conversion overflow: {0}")]
    Conversion(#[from] I32CastError),
}

/// Operations shared by every calendar system.
///
/// Implementors resolve their year and quarter once, at construction; the
/// provided methods derive everything else from those ranges.
pub trait CalendarVariant {
    fn kind(&self) -> CalendarKind;

    /// The date being classified.
    fn subject_date(&self) -> Date;

    /// The date used as "today" by [`CalendarVariant::is_current_year`].
    fn reference_date(&self) -> Date;

    /// Year number as this calendar names it.
    fn year(&self) -> i32;

    /// Year number of the reference date, resolved by the same rules.
    fn reference_year(&self) -> i32;

    /// The year containing the subject date.
    fn year_range(&self) -> DateRange;

    fn quarter(&self) -> Quarter;

    /// The quarter containing the subject date.
    fn quarter_range(&self) -> DateRange;

    fn year_start_date(&self) -> Date {
        self.year_range().start()
    }

    fn year_end_date(&self) -> Date {
        self.year_range().end()
    }

    fn year_num_days(&self) -> i32 {
        self.year_range().num_days()
    }

    fn quarter_start_date(&self) -> Date {
        self.quarter_range().start()
    }

    fn quarter_end_date(&self) -> Date {
        self.quarter_range().end()
    }

    fn quarter_num_days(&self) -> i32 {
        self.quarter_range().num_days()
    }

    fn is_current_year(&self) -> bool {
        self.year() == self.reference_year()
    }

    fn is_previous_year(&self) -> bool {
        self.year() + 1 == self.reference_year()
    }

    /// Year label, e.g. `2016`.
    fn year_string(&self) -> String {
        self.year().to_string()
    }

    /// Year label with its bounds, e.g. `2016 (01-Aug-2015 - 31-Jul-2016)`.
    fn year_dates_string(&self) -> String {
        format!("{} ({})", self.year(), self.year_range())
    }

    /// Quarter label, e.g. `Q2`.
    fn quarter_string(&self) -> String {
        self.quarter().to_string()
    }

    /// Quarter label with its bounds, e.g. `Q2 (04-Apr-2016 - 03-Jul-2016)`.
    fn quarter_dates_string(&self) -> String {
        format!("{} ({})", self.quarter(), self.quarter_range())
    }

    /// Snapshot of every derived field.
    fn summary(&self) -> CalendarSummary {
        CalendarSummary::new(self)
    }
}
