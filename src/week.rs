//! Week-grid layout shared by the retail and ISO week calendars.
//!
//! A week-grid year is 52 or 53 whole weeks. Its twelve "months" take their
//! week counts from a [`WeekPattern`] repeated once per quarter; in a 53-week
//! year the extra week goes to the last month.

use jiff::civil::Date;

use crate::consts::{DAYS_PER_WEEK, LEAP_WEEK_MONTH, LEAP_WEEK_YEAR_DAYS, MONTHS_PER_QUARTER};
use crate::range::DateRange;
use crate::types::{Quarter, WeekPattern, add_days, days_between};
use crate::{CalendarError, CalendarVariant};

/// Weeks per month and per quarter of one week-grid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekLayout {
    months: [u8; 12],
    quarters: [u8; 4],
}

impl WeekLayout {
    pub fn new(pattern: WeekPattern, leap_week: bool) -> Self {
        let weeks = pattern.weeks();
        let mut months = [0u8; 12];
        for (i, month) in months.iter_mut().enumerate() {
            *month = weeks[i % weeks.len()];
        }
        if leap_week {
            months[LEAP_WEEK_MONTH - 1] += 1;
        }

        let mut quarters = [0u8; 4];
        for (quarter, chunk) in quarters
            .iter_mut()
            .zip(months.chunks(usize::from(MONTHS_PER_QUARTER)))
        {
            *quarter = chunk.iter().sum();
        }

        Self { months, quarters }
    }

    /// Layout for a year spanning `year`; 371 days means a leap week.
    pub fn for_year(pattern: WeekPattern, year: &DateRange) -> Self {
        Self::new(pattern, year.num_days() == LEAP_WEEK_YEAR_DAYS)
    }

    pub const fn weeks_per_month(&self) -> &[u8; 12] {
        &self.months
    }

    pub const fn weeks_per_quarter(&self) -> &[u8; 4] {
        &self.quarters
    }

    pub fn total_weeks(&self) -> u8 {
        self.quarters.iter().sum()
    }

    /// Running totals of quarter weeks, starting at 0: `[0, q1, q1+q2, q1+q2+q3, total]`
    fn quarter_offsets(&self) -> [i32; 5] {
        let mut offsets = [0; 5];
        for (i, weeks) in self.quarters.iter().enumerate() {
            offsets[i + 1] = offsets[i] + i32::from(*weeks);
        }
        offsets
    }

    /// Finds the quarter holding the zero-based `week`.
    ///
    /// Returns the quarter together with its first week and the first week of
    /// the following quarter, or `None` if `week` is outside the year.
    pub fn locate(&self, week: i32) -> Option<(Quarter, i32, i32)> {
        let offsets = self.quarter_offsets();
        offsets
            .windows(2)
            .position(|pair| pair[0] <= week && week < pair[1])
            .and_then(|i| {
                let quarter = Quarter::new(u8::try_from(i + 1).ok()?).ok()?;
                Some((quarter, offsets[i], offsets[i + 1]))
            })
    }

    /// Month (1-based) of the year holding the zero-based `week`
    pub fn month_of_week(&self, week: i32) -> Option<u8> {
        let mut first = 0;
        for (i, weeks) in self.months.iter().enumerate() {
            let next = first + i32::from(*weeks);
            if first <= week && week < next {
                return u8::try_from(i + 1).ok();
            }
            first = next;
        }
        None
    }

    /// Resolves the quarter containing `date` in the week-grid `year`.
    pub(crate) fn quarter_of(
        &self,
        year: &DateRange,
        date: Date,
    ) -> Result<(Quarter, DateRange), CalendarError> {
        let week = days_between(year.start(), date)? / DAYS_PER_WEEK;
        let (quarter, first, next) = self.locate(week).ok_or(CalendarError::OutOfRange)?;
        let start = add_days(year.start(), first * DAYS_PER_WEEK)?;
        let end = add_days(year.start(), next * DAYS_PER_WEEK - 1)?;
        tracing::trace!(%date, week, %quarter, %start, %end, "located week-grid quarter");
        Ok((quarter, DateRange::new(start, end)?))
    }
}

/// Extra queries offered by calendars built on whole weeks.
pub trait WeekGrid: CalendarVariant {
    /// The week layout of the year containing the subject date.
    fn layout(&self) -> &WeekLayout;

    /// Week of the year (1-based) containing the subject date.
    fn week(&self) -> u8;

    /// Month of the week-grid year (1-based) containing the subject date.
    fn period(&self) -> u8 {
        self.layout()
            .month_of_week(i32::from(self.week()) - 1)
            .unwrap_or_default()
    }

    fn weeks_per_month(&self) -> &[u8; 12] {
        self.layout().weeks_per_month()
    }

    fn weeks_per_quarter(&self) -> &[u8; 4] {
        self.layout().weeks_per_quarter()
    }

    /// True when the year spans 53 weeks (371 days) instead of 52.
    fn is_leap_week_year(&self) -> bool {
        self.year_num_days() == LEAP_WEEK_YEAR_DAYS
    }
}

/// Week of the year (1-based) holding `date`.
pub(crate) fn week_of_year(year: &DateRange, date: Date) -> Result<u8, CalendarError> {
    let week = days_between(year.start(), date)? / DAYS_PER_WEEK + 1;
    u8::try_from(week).map_err(|_| CalendarError::OutOfRange)
}
