use crate::AnchorDate;
use jiff::civil::Date;

pub fn date(year: i16, month: i8, day: i8) -> Date {
    Date::new(year, month, day).unwrap()
}

pub fn anchor(month: i8, day: i8) -> AnchorDate {
    AnchorDate::new(month, day).unwrap()
}
