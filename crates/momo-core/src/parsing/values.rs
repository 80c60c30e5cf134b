use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Date layouts used by the supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `DD-MM-YYYY` (MTN transaction rows)
    DayMonthYear,
    /// `DD-MM-YY` (Airtel transaction rows)
    DayMonthShortYear,
    /// `DD-Mon-YY` (Airtel statement header)
    DayMonthNameShortYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn from_str_loose(s: &str) -> Option<Meridiem> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Some(Meridiem::Am),
            "PM" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

/// Parse a money amount from a statement.
///
/// Handles formats like:
/// - "30,880.00" -> 30880.00
/// - "UGX 1,500" -> 1500
/// - "0" -> 0
///
/// Anything unparsable yields 0 so a single garbled cell never costs the
/// whole transaction.
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    let without_currency = trimmed.strip_prefix("UGX").unwrap_or(trimmed);
    let cleaned: String = without_currency
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match Decimal::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            debug!(raw, error = %e, "unparsable amount, using 0");
            Decimal::ZERO
        }
    }
}

/// Parse a provider date into a calendar date.
///
/// Separators `-`, `/`, `.` and spaces are all accepted. Two-digit years are
/// always read as 20YY.
pub fn normalize_date(raw: &str, format: DateFormat) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw
        .split(|c: char| matches!(c, '-' | '/' | '.') || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day: u32 = day.parse().ok()?;
    let month: u32 = match format {
        DateFormat::DayMonthNameShortYear => month_from_name(month)?,
        _ => month.parse().ok()?,
    };
    let year: i32 = match format {
        DateFormat::DayMonthYear if year.len() == 4 => year.parse().ok()?,
        DateFormat::DayMonthYear => return None,
        _ => expand_year(year)?,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert a 12-hour (or already 24-hour) clock reading to a time of day.
/// Seconds are always zero.
pub fn normalize_time(hour: u32, minute: u32, meridiem: Option<Meridiem>) -> Option<NaiveTime> {
    let hour = match meridiem {
        None => hour,
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(Meridiem::Am) => hour % 12,
        Some(Meridiem::Pm) => hour % 12 + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Render a date as `DD/MM/YYYY`.
pub fn canonical_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Render a time as `HH:MM:SS`.
pub fn canonical_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn expand_year(raw: &str) -> Option<i32> {
    let value: i32 = raw.parse().ok()?;
    match raw.len() {
        2 => Some(2000 + value),
        4 => Some(value),
        _ => None,
    }
}

fn month_from_name(raw: &str) -> Option<u32> {
    let prefix: String = raw.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
