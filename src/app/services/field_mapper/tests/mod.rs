//! Shared test utilities and fixtures for field mapping tests

use super::{FieldLayout, FieldRole, Tokenizer};

pub mod tokenizer_tests;

/// A forecast row from an AirNow reporting-area file
pub const FORECAST_ROW: &str = "05/13/17|05/14/17||CDT|1|F|Y|Baton Rouge Area|LA|30.45|-91.14|OZONE|101|Unhealthy for Sensitive Groups|Yes|Ozone action day declared.|LDEQ";

/// An observation row from an AirNow reporting-area file
pub const OBSERVATION_ROW: &str = "05/14/17|05/14/17|10:00|MDT|0|O|Y|Albuquerque|NM|35.0844|-106.6504|OZONE|44|Good|No||NMED";

/// Tokenize a pipe-delimited row
pub fn pipe_fields(row: &str) -> Vec<String> {
    Tokenizer::new(r"\|", false).unwrap().split(row)
}

/// Layout of the pipe-delimited report rows above
pub fn report_layout() -> FieldLayout {
    FieldLayout::from_pairs([
        (FieldRole::ValidDate, 1),
        (FieldRole::ValidTime, 2),
        (FieldRole::TimeZone, 3),
        (FieldRole::DayOffset, 4),
        (FieldRole::DataType, 5),
        (FieldRole::Primary, 6),
        (FieldRole::Area, 7),
        (FieldRole::Aqi, 12),
        (FieldRole::ActionDay, 14),
        (FieldRole::Discussion, 15),
    ])
}
