/// Default fiscal and retail anchor month (August)
pub const DEFAULT_ANCHOR_MONTH: i8 = 8;
/// Default fiscal and retail anchor day of month
pub const DEFAULT_ANCHOR_DAY: i8 = 1;

/// Month number for January
pub const JANUARY: i8 = 1;
/// Month number for December
pub const DECEMBER: i8 = 12;
/// Months in a civil year
pub const MONTHS_PER_YEAR: i8 = 12;

/// Number of quarters in every calendar variant
pub const QUARTERS_PER_YEAR: u8 = 4;
/// Months grouped into one quarter
pub const MONTHS_PER_QUARTER: u8 = 3;

/// Days in one week
pub const DAYS_PER_WEEK: i32 = 7;
/// Length of a 52-week year in days
pub const COMMON_WEEK_YEAR_DAYS: i32 = 364;
/// Length of a 53-week (leap week) year in days
pub const LEAP_WEEK_YEAR_DAYS: i32 = 371;
/// Month (1-based) of a week-grid year that absorbs the 53rd week
pub const LEAP_WEEK_MONTH: usize = 12;

/// Years in one sexagenary cycle
pub const LUNISOLAR_CYCLE_YEARS: i32 = 60;
/// Offset turning `cycle * 60 + year` into a number close to the Gregorian year
pub const LUNISOLAR_EPOCH_OFFSET: i32 = 2697;

/// Any common (non-leap) year, used to check that an anchor month/day exists every year
pub(crate) const COMMON_YEAR: i16 = 2001;

/// strftime format for rendered dates, e.g. `01-Aug-2015`
pub const DATE_FORMAT: &str = "%d-%b-%Y";
/// Separator between the two halves of a rendered range
pub const RANGE_SEPARATOR: &str = " - ";
/// Separator between month and day in an anchor string (`MM-DD`)
pub const ANCHOR_SEPARATOR: char = '-';
