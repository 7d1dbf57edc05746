use jiff::civil::Date;

use crate::converter::{ChineseConverter, LunisolarConverter, LunisolarDate};
use crate::range::DateRange;
use crate::types::{Quarter, today};
use crate::{CalendarError, CalendarKind, CalendarVariant};

/// A lunisolar year, Chinese by default.
///
/// The year runs from the first day of lunar month 1 to the day before the
/// next year's first day, leap month included. Quarters group lunar months
/// 1-3, 4-6, 7-9 and 10-12; a leap month belongs to the quarter of the month
/// it repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate<C = ChineseConverter> {
    date: Date,
    reference: Date,
    converter: C,
    lunisolar: LunisolarDate,
    year_range: DateRange,
    reference_year: i32,
    quarter: Quarter,
    quarter_range: DateRange,
}

impl LunarDate {
    /// Classifies `date` in the Chinese calendar, using the current date as "today".
    ///
    /// # Errors
    /// Returns an error if `date` is outside the range the converter supports.
    pub fn new(date: Date) -> Result<Self, CalendarError> {
        Self::with_reference(date, today())
    }

    /// Classifies `date` in the Chinese calendar with an explicit "today".
    ///
    /// # Errors
    /// Returns an error if either date is outside the range the converter supports.
    pub fn with_reference(date: Date, reference: Date) -> Result<Self, CalendarError> {
        Self::with_converter(date, reference, ChineseConverter)
    }
}

impl<C: LunisolarConverter> LunarDate<C> {
    /// Classifies `date` with an explicit "today" and lunisolar converter.
    ///
    /// # Errors
    /// Returns an error if either date is outside the range the converter supports.
    pub fn with_converter(date: Date, reference: Date, converter: C) -> Result<Self, CalendarError> {
        let lunisolar = converter.to_lunisolar(date)?;
        let year_range = DateRange::until_next(
            converter.to_civil(lunisolar.new_year())?,
            converter.to_civil(lunisolar.next_new_year()?)?,
        )?;
        let reference_year = converter.to_lunisolar(reference)?.normalized_year();

        let quarter = Quarter::of_month(lunisolar.month())?;
        let start = converter.to_civil(lunisolar.first_of_month(quarter.first_month())?)?;
        let quarter_range = match quarter.next() {
            Some(next) => DateRange::until_next(
                start,
                converter.to_civil(lunisolar.first_of_month(next.first_month())?)?,
            )?,
            None => DateRange::new(start, year_range.end())?,
        };

        tracing::debug!(
            calendar = %CalendarKind::Lunar,
            %date,
            %lunisolar,
            year = lunisolar.normalized_year(),
            start = %year_range.start(),
            end = %year_range.end(),
            "resolved calendar year"
        );
        Ok(Self {
            date,
            reference,
            converter,
            lunisolar,
            year_range,
            reference_year,
            quarter,
            quarter_range,
        })
    }

    /// The subject date in the lunisolar calendar.
    pub fn lunisolar_date(&self) -> LunisolarDate {
        self.lunisolar
    }

    /// True when the subject date falls in a leap month.
    pub fn is_leap_month(&self) -> bool {
        self.lunisolar.is_leap_month()
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

impl<C: LunisolarConverter> CalendarVariant for LunarDate<C> {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Lunar
    }

    fn subject_date(&self) -> Date {
        self.date
    }

    fn reference_date(&self) -> Date {
        self.reference
    }

    fn year(&self) -> i32 {
        self.lunisolar.normalized_year()
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

    /// Both civil years the lunisolar year touches, e.g. `2016 - 2017`.
    fn year_string(&self) -> String {
        self.year_range.years_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn lunar(day: Date) -> LunarDate {
        LunarDate::with_reference(day, date(2018, 6, 15)).unwrap()
    }

    #[test]
    fn test_year_2016() {
        let calendar = lunar(date(2016, 4, 8));
        assert_eq!(calendar.year(), 2016);
        assert_eq!(calendar.year_start_date(), date(2016, 2, 8));
        assert_eq!(calendar.year_end_date(), date(2017, 1, 27));
        assert_eq!(calendar.year_num_days(), 355);
        assert_eq!(calendar.year_string(), "2016 - 2017");
        assert_eq!(calendar.year_dates_string(), "2016 (08-Feb-2016 - 27-Jan-2017)");
    }

    #[test]
    fn test_quarter_uses_lunar_month() {
        // third lunar month, so still the first quarter
        let calendar = lunar(date(2016, 4, 8));
        assert_eq!(calendar.lunisolar_date().month(), 3);
        assert_eq!(calendar.quarter().get(), 1);
        assert_eq!(calendar.quarter_start_date(), date(2016, 2, 8));
        assert_eq!(calendar.quarter_end_date(), date(2016, 5, 6));
        assert_eq!(calendar.quarter_dates_string(), "Q1 (08-Feb-2016 - 06-May-2016)");

        let calendar = lunar(date(2016, 5, 7));
        assert_eq!(calendar.quarter().get(), 2);
        assert_eq!(calendar.quarter_start_date(), date(2016, 5, 7));
    }

    #[test]
    fn test_leap_month_stays_in_quarter_of_its_namesake() {
        let calendar = lunar(date(2017, 8, 1));
        assert!(calendar.is_leap_month());
        assert_eq!(calendar.lunisolar_date().month(), 6);
        assert_eq!(calendar.quarter().get(), 2);
        assert_eq!(calendar.quarter_start_date(), date(2017, 4, 26));
        assert_eq!(calendar.quarter_end_date(), date(2017, 8, 21));
        assert_eq!(calendar.quarter_num_days(), 118);

        let after = lunar(date(2017, 8, 22));
        assert!(!after.is_leap_month());
        assert_eq!(after.quarter().get(), 3);
    }

    #[test]
    fn test_leap_year_spans_thirteen_months() {
        let calendar = lunar(date(2017, 8, 1));
        assert_eq!(calendar.year(), 2017);
        assert_eq!(calendar.year_start_date(), date(2017, 1, 28));
        assert_eq!(calendar.year_end_date(), date(2018, 2, 15));
        assert_eq!(calendar.year_num_days(), 384);
    }

    #[test]
    fn test_new_year_boundaries() {
        let eve = lunar(date(2018, 2, 15));
        let new_year = lunar(date(2018, 2, 16));
        assert_eq!(eve.year(), 2017);
        assert_eq!(eve.quarter().get(), 4);
        assert_eq!(eve.quarter_end_date(), date(2018, 2, 15));
        assert_eq!(new_year.year(), 2018);
        assert_eq!(new_year.quarter().get(), 1);
        assert_eq!(new_year.year_start_date(), date(2018, 2, 16));
    }

    #[test]
    fn test_current_and_previous_year_2018() {
        let cases = [
            (date(2018, 6, 15), true, false),
            (date(2018, 12, 31), true, false),
            (date(2019, 2, 4), true, false),
            (date(2018, 1, 1), false, true),
            (date(2017, 12, 31), false, true),
            (date(2017, 6, 15), false, true),
            (date(2017, 1, 1), false, false),
            (date(2019, 2, 5), false, false),
            (date(2016, 12, 31), false, false),
        ];

        for today in [date(2018, 6, 15), date(2018, 2, 16), date(2019, 2, 4)] {
            for (day, current, previous) in cases {
                let calendar = LunarDate::with_reference(day, today).unwrap();
                assert_eq!(calendar.is_current_year(), current, "{day} with today {today}");
                assert_eq!(calendar.is_previous_year(), previous, "{day} with today {today}");
            }
        }
    }

    #[test]
    fn test_custom_converter() {
        #[derive(Debug, Clone, Copy)]
        struct Delegating;

        impl LunisolarConverter for Delegating {
            fn to_lunisolar(&self, date: Date) -> Result<LunisolarDate, CalendarError> {
                ChineseConverter.to_lunisolar(date)
            }

            fn to_civil(&self, date: LunisolarDate) -> Result<Date, CalendarError> {
                ChineseConverter.to_civil(date)
            }
        }

        let calendar = LunarDate::with_converter(date(2016, 4, 8), date(2016, 4, 8), Delegating).unwrap();
        assert_eq!(calendar.year(), 2016);
        assert!(calendar.is_current_year());
        assert_eq!(calendar.kind(), CalendarKind::Lunar);
    }
}
