//! Thai exchange date strings: `"5 ม.ค. 2568"` → 2025-01-05.
//!
//! Day, abbreviated Thai month, Buddhist-era year (Gregorian + 543).
//! Commas anywhere in the string are ignored.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Offset between the Buddhist and Gregorian calendars.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Abbreviated month names in calendar order.
pub const THAI_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThaiDateError {
    #[error("expected '<day> <month> <year>', got '{0}'")]
    Shape(String),
    #[error("unknown Thai month '{0}'")]
    UnknownMonth(String),
    #[error("invalid number '{0}'")]
    Number(String),
    #[error("no such date: day {day}, month {month}, year {year}")]
    OutOfRange { day: u32, month: u32, year: i32 },
}

/// Month number (1-12) for an abbreviated Thai month name.
pub fn thai_month_number(token: &str) -> Option<u32> {
    THAI_MONTHS
        .iter()
        .position(|m| *m == token)
        .map(|i| i as u32 + 1)
}

pub fn parse_thai_date(text: &str) -> Result<NaiveDate, ThaiDateError> {
    let cleaned = text.replace(',', "");
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(ThaiDateError::Shape(text.trim().to_string()));
    };

    let day: u32 = day
        .parse()
        .map_err(|_| ThaiDateError::Number(day.to_string()))?;
    let month = thai_month_number(month).ok_or_else(|| ThaiDateError::UnknownMonth(month.to_string()))?;
    let buddhist_year: i32 = year
        .parse()
        .map_err(|_| ThaiDateError::Number(year.to_string()))?;
    let year = buddhist_year - BUDDHIST_ERA_OFFSET;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(ThaiDateError::OutOfRange { day, month, year })
}

/// Inverse of [`parse_thai_date`], zero-padded day.
pub fn format_thai_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        THAI_MONTHS[date.month0() as usize],
        date.year() + BUDDHIST_ERA_OFFSET
    )
}
