//! Runtime selection of a calendar system.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::config::CalendarConfig;
use crate::prelude::*;
use crate::range::DateRange;
use crate::types::Quarter;
use crate::{
    CalendarError, CalendarVariant, FiscalDate, IsoDate, LunarDate, RegularDate, RetailDate,
};

/// The supported calendar systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    #[display(fmt = "regular")]
    Regular,
    #[display(fmt = "fiscal")]
    Fiscal,
    #[display(fmt = "retail")]
    Retail,
    #[display(fmt = "iso")]
    Iso,
    #[display(fmt = "lunar")]
    Lunar,
}

/// A date classified by one of the calendar systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarDate {
    Regular(RegularDate),
    Fiscal(FiscalDate),
    Retail(RetailDate),
    Iso(IsoDate),
    Lunar(LunarDate),
}

impl CalendarDate {
    /// Classifies `date` under `kind`, taking anchors and week patterns from `config`.
    ///
    /// # Errors
    /// Returns an error if `config` is inconsistent or a boundary falls outside
    /// the supported range.
    pub fn new(
        kind: CalendarKind,
        date: Date,
        reference: Date,
        config: &CalendarConfig,
    ) -> Result<Self, CalendarError> {
        Ok(match kind {
            CalendarKind::Regular => Self::Regular(RegularDate::with_reference(date, reference)?),
            CalendarKind::Fiscal => {
                Self::Fiscal(FiscalDate::with_reference(date, reference, *config.fiscal())?)
            }
            CalendarKind::Retail => {
                Self::Retail(RetailDate::with_reference(date, reference, *config.retail())?)
            }
            CalendarKind::Iso => {
                Self::Iso(IsoDate::with_reference(date, reference, config.iso_pattern())?)
            }
            CalendarKind::Lunar => Self::Lunar(LunarDate::with_reference(date, reference)?),
        })
    }

    fn as_variant(&self) -> &dyn CalendarVariant {
        match self {
            Self::Regular(date) => date,
            Self::Fiscal(date) => date,
            Self::Retail(date) => date,
            Self::Iso(date) => date,
            Self::Lunar(date) => date,
        }
    }
}

impl From<RegularDate> for CalendarDate {
    fn from(date: RegularDate) -> Self {
        Self::Regular(date)
    }
}

impl From<FiscalDate> for CalendarDate {
    fn from(date: FiscalDate) -> Self {
        Self::Fiscal(date)
    }
}

impl From<RetailDate> for CalendarDate {
    fn from(date: RetailDate) -> Self {
        Self::Retail(date)
    }
}

impl From<IsoDate> for CalendarDate {
    fn from(date: IsoDate) -> Self {
        Self::Iso(date)
    }
}

impl From<LunarDate> for CalendarDate {
    fn from(date: LunarDate) -> Self {
        Self::Lunar(date)
    }
}

impl CalendarVariant for CalendarDate {
    fn kind(&self) -> CalendarKind {
        self.as_variant().kind()
    }

    fn subject_date(&self) -> Date {
        self.as_variant().subject_date()
    }

    fn reference_date(&self) -> Date {
        self.as_variant().reference_date()
    }

    fn year(&self) -> i32 {
        self.as_variant().year()
    }

    fn reference_year(&self) -> i32 {
        self.as_variant().reference_year()
    }

    fn year_range(&self) -> DateRange {
        self.as_variant().year_range()
    }

    fn quarter(&self) -> Quarter {
        self.as_variant().quarter()
    }

    fn quarter_range(&self) -> DateRange {
        self.as_variant().quarter_range()
    }

    fn year_string(&self) -> String {
        self.as_variant().year_string()
    }

    fn year_dates_string(&self) -> String {
        self.as_variant().year_dates_string()
    }

    fn quarter_string(&self) -> String {
        self.as_variant().quarter_string()
    }

    fn quarter_dates_string(&self) -> String {
        self.as_variant().quarter_dates_string()
    }
}

/// Every derived field of a classified date, ready for display or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarSummary {
    pub kind: CalendarKind,
    pub date: Date,
    pub reference_date: Date,
    pub year: i32,
    pub year_start: Date,
    pub year_end: Date,
    pub year_num_days: i32,
    pub quarter: Quarter,
    pub quarter_start: Date,
    pub quarter_end: Date,
    pub quarter_num_days: i32,
    pub is_current_year: bool,
    pub is_previous_year: bool,
    pub year_string: String,
    pub year_dates_string: String,
    pub quarter_string: String,
    pub quarter_dates_string: String,
}

impl CalendarSummary {
    pub fn new<V: CalendarVariant + ?Sized>(calendar: &V) -> Self {
        Self {
            kind: calendar.kind(),
            date: calendar.subject_date(),
            reference_date: calendar.reference_date(),
            year: calendar.year(),
            year_start: calendar.year_start_date(),
            year_end: calendar.year_end_date(),
            year_num_days: calendar.year_num_days(),
            quarter: calendar.quarter(),
            quarter_start: calendar.quarter_start_date(),
            quarter_end: calendar.quarter_end_date(),
            quarter_num_days: calendar.quarter_num_days(),
            is_current_year: calendar.is_current_year(),
            is_previous_year: calendar.is_previous_year(),
            year_string: calendar.year_string(),
            year_dates_string: calendar.year_dates_string(),
            quarter_string: calendar.quarter_string(),
            quarter_dates_string: calendar.quarter_dates_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{anchor, date};
    use crate::{FiscalConfig, RetailConfig};

    #[test]
    fn test_builds_each_kind() {
        struct TestCase {
            kind: CalendarKind,
            year: i32,
            year_string: &'static str,
        }

        let cases = [
            TestCase { kind: CalendarKind::Regular, year: 2015, year_string: "2015" },
            TestCase { kind: CalendarKind::Fiscal, year: 2016, year_string: "2015 - 2016" },
            TestCase { kind: CalendarKind::Retail, year: 2016, year_string: "2015 - 2016" },
            TestCase { kind: CalendarKind::Iso, year: 2015, year_string: "2015" },
            TestCase { kind: CalendarKind::Lunar, year: 2015, year_string: "2015 - 2016" },
        ];

        let config = CalendarConfig::default();
        for case in &cases {
            let calendar = CalendarDate::new(case.kind, date(2015, 12, 31), date(2016, 1, 1), &config).unwrap();
            assert_eq!(calendar.kind(), case.kind);
            assert_eq!(calendar.year(), case.year, "{}", case.kind);
            assert_eq!(calendar.year_string(), case.year_string, "{}", case.kind);
            assert_eq!(calendar.subject_date(), date(2015, 12, 31));
            assert_eq!(calendar.reference_date(), date(2016, 1, 1));
        }
    }

    #[test]
    fn test_uses_configured_anchors() {
        let config = CalendarConfig::new()
            .with_fiscal(FiscalConfig::new(anchor(9, 1)))
            .with_retail(RetailConfig::new(anchor(2, 1)));

        let fiscal = CalendarDate::new(CalendarKind::Fiscal, date(2016, 8, 15), date(2016, 8, 15), &config).unwrap();
        assert_eq!(fiscal.year_start_date(), date(2015, 9, 1));

        // 2016-02-01 is a Monday
        let retail = CalendarDate::new(CalendarKind::Retail, date(2016, 8, 15), date(2016, 8, 15), &config).unwrap();
        assert_eq!(retail.year_start_date(), date(2016, 1, 31));
    }

    #[test]
    fn test_rejects_inconsistent_fiscal_config() {
        let fiscal = FiscalConfig::default().with_quarter_starts([
            anchor(9, 1),
            anchor(11, 1),
            anchor(2, 1),
            anchor(5, 1),
        ]);
        let config = CalendarConfig::new().with_fiscal(fiscal);

        let result = CalendarDate::new(CalendarKind::Fiscal, date(2016, 1, 1), date(2016, 1, 1), &config);
        assert!(matches!(result, Err(CalendarError::QuarterTableMismatch { .. })));

        // other kinds never read the fiscal table
        assert!(CalendarDate::new(CalendarKind::Regular, date(2016, 1, 1), date(2016, 1, 1), &config).is_ok());
    }

    #[test]
    fn test_from_variant() {
        let regular = RegularDate::with_reference(date(2016, 4, 8), date(2016, 4, 8)).unwrap();
        let calendar = CalendarDate::from(regular);
        assert_eq!(calendar, CalendarDate::Regular(regular));
        assert_eq!(calendar.summary(), regular.summary());
    }

    #[test]
    fn test_kind_display_and_serde() {
        assert_eq!(CalendarKind::Iso.to_string(), "iso");
        assert_eq!(CalendarKind::Lunar.to_string(), "lunar");
        assert_eq!(serde_json::to_string(&CalendarKind::Retail).unwrap(), r#""retail""#);
        let parsed: CalendarKind = serde_json::from_str(r#""fiscal""#).unwrap();
        assert_eq!(parsed, CalendarKind::Fiscal);
    }

    #[test]
    fn test_summary_json() {
        let calendar = CalendarDate::new(
            CalendarKind::Fiscal,
            date(2015, 12, 31),
            date(2016, 1, 1),
            &CalendarConfig::default(),
        )
        .unwrap();
        let json = serde_json::to_value(calendar.summary()).unwrap();

        assert_eq!(json["kind"], "fiscal");
        assert_eq!(json["date"], "2015-12-31");
        assert_eq!(json["year"], 2016);
        assert_eq!(json["year_start"], "2015-08-01");
        assert_eq!(json["year_end"], "2016-07-31");
        assert_eq!(json["year_num_days"], 366);
        assert_eq!(json["quarter"], 2);
        assert_eq!(json["quarter_start"], "2015-11-01");
        assert_eq!(json["quarter_end"], "2016-01-31");
        assert_eq!(json["is_current_year"], true);
        assert_eq!(json["is_previous_year"], false);
        assert_eq!(json["year_dates_string"], "2016 (01-Aug-2015 - 31-Jul-2016)");
        assert_eq!(json["quarter_dates_string"], "Q2 (01-Nov-2015 - 31-Jan-2016)");
    }
}
