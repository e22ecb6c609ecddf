//! Strict field parsing helpers
//!
//! Any malformed value is a `RecordParse` error for the whole record; the
//! refresh controller skips that record and moves on.

use super::layout::FieldRole;
use crate::constants::{DEFAULT_VALID_TIME, VALID_DATE_FORMAT};
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

const HOUR: i32 = 3600;

/// Parse a required i32 field, allowing surrounding whitespace only
pub fn parse_i32(value: &str, role: FieldRole) -> Result<i32> {
    let trimmed = value.trim();

    trimmed.parse::<i32>().map_err(|e| {
        Error::record_parse(format!(
            "Invalid integer format for {}: '{}' ({})",
            role, trimmed, e
        ))
    })
}

/// Parse a yes/no flag
///
/// Accepts `y`, `yes`, `true`, `t`, `on`, `1` as true and `n`, `no`,
/// `false`, `f`, `off`, `0` or blank as false, ignoring case. Anything else
/// is rejected.
pub fn parse_flag(value: &str, role: FieldRole) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "t" | "on" | "1" => Ok(true),
        "" | "n" | "no" | "false" | "f" | "off" | "0" => Ok(false),
        other => Err(Error::record_parse(format!(
            "Invalid flag format for {}: '{}'",
            role, other
        ))),
    }
}

/// Parse a decimal coordinate
pub fn parse_coordinate(value: &str, role: FieldRole) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|e| {
        Error::record_parse(format!(
            "Invalid coordinate format for {}: '{}' ({})",
            role, value, e
        ))
    })
}

/// Parse the valid date of a report from its three source fields
///
/// The date (`MM/DD/YY`), time (`H:MM`, `00:00` when blank) and time zone
/// abbreviation are joined with single spaces and parsed as one string.
/// Trailing garbage after a valid prefix is an error.
///
/// # Examples
/// ```
/// use aqi_lookup::app::services::field_mapper::field_parsers::parse_valid_date;
///
/// let midnight = parse_valid_date("05/13/17", None, "GMT").unwrap();
/// assert_eq!(midnight.timestamp_millis(), 1494633600000);
///
/// assert!(parse_valid_date("05/13/17", Some("21:4x"), "PDT").is_err());
/// ```
pub fn parse_valid_date(
    date: &str,
    time: Option<&str>,
    time_zone: &str,
) -> Result<DateTime<Utc>> {
    let time = time
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_VALID_TIME);

    let assembled = format!("{} {} {}", date, time, time_zone);

    let (local, zone) = assembled
        .rsplit_once(' ')
        .ok_or_else(|| Error::record_parse(format!("Unable to parse valid date {}", assembled)))?;

    let naive = NaiveDateTime::parse_from_str(local, VALID_DATE_FORMAT).map_err(|e| {
        Error::record_parse(format!("Unable to parse valid date {}: {}", assembled, e))
    })?;

    let offset = zone_offset(zone).ok_or_else(|| {
        Error::record_parse(format!(
            "Unable to parse valid date {}: unknown time zone '{}'",
            assembled, zone
        ))
    })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::record_parse(format!("Unable to parse valid date {}", assembled)))
}

/// UTC offset of a time zone abbreviation used by AirNow
///
/// AirNow labels Alaska daylight time `ADT`, so it maps to UTC-8 rather
/// than Atlantic daylight time.
pub fn zone_offset(abbreviation: &str) -> Option<FixedOffset> {
    let hours = match abbreviation.to_ascii_uppercase().as_str() {
        "GMT" | "UTC" | "UT" | "Z" | "WET" => 0,
        "BST" | "CET" => 1,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        "AKST" => -9,
        "AKDT" | "ADT" => -8,
        "HST" => -10,
        "HDT" => -9,
        "AST" => -4,
        "SST" => -11,
        "CHST" => 10,
        "COT" => -5,
        _ => return None,
    };

    FixedOffset::east_opt(hours * HOUR)
}
