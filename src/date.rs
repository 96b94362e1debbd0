//! Dutch long dates as printed on the magazine website, e.g. `12 januari 2020`.

use chrono::{Datelike, NaiveDate};

use crate::{Result, SearchError};

const MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
];

/// Parses `<day> <month name> <year>` with a Dutch month name.
///
/// Month names are matched case-insensitively; surrounding whitespace is ignored.
pub fn parse_long_date(text: &str) -> Result<NaiveDate> {
    let invalid = || SearchError::Parse(format!("invalid date '{}'", text));

    let mut parts = text.split_whitespace();
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let day = day.parse::<u32>().map_err(|_| invalid())?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month_number(month).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Formats a date as `dd MMMM yyyy` with a Dutch month name.
pub fn format_long_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|index| index as u32 + 1)
}
