use jiff::civil::{Date, ISOWeekDate, Weekday};

use crate::range::DateRange;
use crate::types::{Quarter, WeekPattern, today};
use crate::week::{WeekGrid, WeekLayout, week_of_year};
use crate::{CalendarError, CalendarKind, CalendarVariant};

/// An ISO 8601 week-date year, split into week-grid quarters.
///
/// The year starts on the Monday of the week containing January 4th and is
/// named by its ISO week-numbering year, which can differ from the civil year
/// for dates around New Year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoDate {
    date: Date,
    reference: Date,
    year: i16,
    reference_year: i16,
    year_range: DateRange,
    layout: WeekLayout,
    week: u8,
    quarter: Quarter,
    quarter_range: DateRange,
}

impl IsoDate {
    /// Classifies `date`, using the current date as "today".
    ///
    /// # Errors
    /// Returns an error if a boundary falls outside the supported civil range.
    pub fn new(date: Date, pattern: WeekPattern) -> Result<Self, CalendarError> {
        Self::with_reference(date, today(), pattern)
    }

    /// Classifies `date` with an explicit "today".
    ///
    /// # Errors
    /// Returns an error if a boundary falls outside the supported civil range.
    pub fn with_reference(
        date: Date,
        reference: Date,
        pattern: WeekPattern,
    ) -> Result<Self, CalendarError> {
        let year = date.iso_week_date().year();
        let reference_year = reference.iso_week_date().year();
        let year_range = Self::iso_start_end(year)?;
        let layout = WeekLayout::for_year(pattern, &year_range);
        let week = week_of_year(&year_range, date)?;
        let (quarter, quarter_range) = layout.quarter_of(&year_range, date)?;

        tracing::debug!(
            calendar = %CalendarKind::Iso,
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
            year,
            reference_year,
            year_range,
            layout,
            week,
            quarter,
            quarter_range,
        })
    }

    /// Bounds of ISO week-numbering `year`.
    ///
    /// # Errors
    /// Returns an error if `year` or the following year is outside the
    /// supported civil range.
    pub fn iso_start_end(year: i16) -> Result<DateRange, CalendarError> {
        let start = ISOWeekDate::new(year, 1, Weekday::Monday)?.date();
        let next = ISOWeekDate::new(year + 1, 1, Weekday::Monday)?.date();
        DateRange::until_next(start, next)
    }
}

impl CalendarVariant for IsoDate {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Iso
    }

    fn subject_date(&self) -> Date {
        self.date
    }

    fn reference_date(&self) -> Date {
        self.reference
    }

    fn year(&self) -> i32 {
        i32::from(self.year)
    }

    fn reference_year(&self) -> i32 {
        i32::from(self.reference_year)
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

impl WeekGrid for IsoDate {
    fn layout(&self) -> &WeekLayout {
        &self.layout
    }

    fn week(&self) -> u8 {
        self.week
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn iso(day: Date) -> IsoDate {
        IsoDate::with_reference(day, date(2016, 6, 1), WeekPattern::default()).unwrap()
    }

    #[test]
    fn test_quarter() {
        let calendar = iso(date(2016, 4, 8));
        assert_eq!(calendar.quarter().get(), 2);
        assert_eq!(calendar.quarter_start_date(), date(2016, 4, 4));
        assert_eq!(calendar.quarter_end_date(), date(2016, 7, 3));
        assert_eq!(calendar.quarter_num_days(), 91);
        assert_eq!(calendar.quarter_dates_string(), "Q2 (04-Apr-2016 - 03-Jul-2016)");
    }

    #[test]
    fn test_year_bounds() {
        struct TestCase {
            date: Date,
            year: i32,
            start: Date,
            end: Date,
        }

        let cases = [
            TestCase { date: date(2016, 4, 8), year: 2016, start: date(2016, 1, 4), end: date(2017, 1, 1) },
            TestCase { date: date(2016, 1, 1), year: 2015, start: date(2014, 12, 29), end: date(2016, 1, 3) },
            TestCase { date: date(2015, 12, 31), year: 2015, start: date(2014, 12, 29), end: date(2016, 1, 3) },
            TestCase { date: date(2018, 12, 31), year: 2019, start: date(2018, 12, 31), end: date(2019, 12, 29) },
            TestCase { date: date(2017, 1, 1), year: 2016, start: date(2016, 1, 4), end: date(2017, 1, 1) },
        ];

        for case in &cases {
            let calendar = iso(case.date);
            assert_eq!(calendar.year(), case.year, "{}", case.date);
            assert_eq!(calendar.year_start_date(), case.start, "{}", case.date);
            assert_eq!(calendar.year_end_date(), case.end, "{}", case.date);
            assert_eq!(calendar.year_num_days() % 7, 0);
        }
    }

    #[test]
    fn test_leap_week_year() {
        let calendar = iso(date(2015, 12, 31));
        assert!(calendar.is_leap_week_year());
        assert_eq!(calendar.year_num_days(), 371);
        assert_eq!(calendar.weeks_per_quarter(), &[13, 13, 13, 14]);
        assert_eq!(calendar.week(), 53);
        assert_eq!(calendar.quarter().get(), 4);
        assert_eq!(calendar.quarter_start_date(), date(2015, 9, 28));
        assert_eq!(calendar.quarter_end_date(), date(2016, 1, 3));

        assert!(!iso(date(2016, 4, 8)).is_leap_week_year());
    }

    #[test]
    fn test_week_matches_iso_week_number() {
        for day in [date(2015, 1, 1), date(2016, 4, 8), date(2017, 1, 1), date(2020, 12, 31)] {
            let calendar = iso(day);
            let expected = day.iso_week_date().week();
            assert_eq!(i32::from(calendar.week()), i32::from(expected), "{day}");
        }
    }

    #[test]
    fn test_string_output() {
        let calendar = iso(date(2015, 12, 31));
        assert_eq!(calendar.year_string(), "2015");
        assert_eq!(calendar.year_dates_string(), "2015 (29-Dec-2014 - 03-Jan-2016)");
        assert_eq!(calendar.quarter_string(), "Q4");
    }

    #[test]
    fn test_current_and_previous_year_2018() {
        struct TestCase {
            date: Date,
            current: bool,
            previous: bool,
        }

        let cases = [
            TestCase { date: date(2018, 1, 1), current: true, previous: false },
            TestCase { date: date(2018, 6, 15), current: true, previous: false },
            // Monday of ISO 2019 week 1
            TestCase { date: date(2018, 12, 31), current: false, previous: false },
            // Sunday closing ISO 2016
            TestCase { date: date(2017, 1, 1), current: false, previous: false },
            TestCase { date: date(2017, 6, 15), current: false, previous: true },
            TestCase { date: date(2017, 12, 31), current: false, previous: true },
            TestCase { date: date(2019, 1, 1), current: false, previous: false },
            TestCase { date: date(2019, 12, 31), current: false, previous: false },
            TestCase { date: date(2016, 1, 1), current: false, previous: false },
            TestCase { date: date(2016, 12, 31), current: false, previous: false },
        ];

        for today in [date(2018, 6, 15), date(2018, 1, 1), date(2018, 12, 30)] {
            for case in &cases {
                let calendar = IsoDate::with_reference(case.date, today, WeekPattern::default()).unwrap();
                assert_eq!(calendar.is_current_year(), case.current, "{} with today {today}", case.date);
                assert_eq!(calendar.is_previous_year(), case.previous, "{} with today {today}", case.date);
            }
        }
    }

    #[test]
    fn test_reference_in_next_iso_year() {
        let calendar = IsoDate::with_reference(date(2018, 6, 15), date(2018, 12, 31), WeekPattern::default()).unwrap();
        assert!(!calendar.is_current_year());
        assert!(calendar.is_previous_year());
    }
}
