//! Row filters evaluated before a record is mapped
//!
//! A record that fails a filter is dropped silently; it is not an error.
//! A record too short to evaluate a filter is a parse error.

use super::layout::{FieldRole, MappedRecord};
use crate::Result;
use regex::Regex;
use std::fmt;

/// A declarative predicate over one field of a record
#[derive(Debug, Clone)]
pub enum FieldFilter {
    /// Keep rows whose field equals one of the values, ignoring case
    OneOf {
        role: FieldRole,
        values: Vec<String>,
    },

    /// Keep rows whose flag field is true
    Flag { role: FieldRole },

    /// Keep rows whose field starts with an ASCII digit
    LeadingAsciiDigit { role: FieldRole },

    /// Keep rows whose trimmed field matches the pattern
    Matches { role: FieldRole, pattern: Regex },

    /// Keep rows whose field is not blank
    NotBlank { role: FieldRole },
}

impl FieldFilter {
    /// Keep rows whose field is one of `values`
    pub fn one_of(role: FieldRole, values: &[&str]) -> Self {
        Self::OneOf {
            role,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Role of the field this filter inspects
    pub fn role(&self) -> FieldRole {
        match self {
            Self::OneOf { role, .. }
            | Self::Flag { role }
            | Self::LeadingAsciiDigit { role }
            | Self::Matches { role, .. }
            | Self::NotBlank { role } => *role,
        }
    }

    /// Evaluate the filter against a record
    ///
    /// # Errors
    /// * Returns `Error::RecordParse` if the field is missing or a flag is malformed
    pub fn accepts(&self, record: &MappedRecord<'_>) -> Result<bool> {
        let value = record.get(self.role())?;

        let accepted = match self {
            Self::OneOf { values, .. } => {
                let value = value.trim();
                values.iter().any(|v| v.eq_ignore_ascii_case(value))
            }
            Self::Flag { role } => record.parse_flag(*role)?,
            Self::LeadingAsciiDigit { .. } => value
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit()),
            Self::Matches { pattern, .. } => pattern.is_match(value.trim()),
            Self::NotBlank { .. } => !value.trim().is_empty(),
        };

        Ok(accepted)
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneOf { role, values } => write!(f, "{} in {:?}", role, values),
            Self::Flag { role } => write!(f, "{} is set", role),
            Self::LeadingAsciiDigit { role } => write!(f, "{} starts with a digit", role),
            Self::Matches { role, pattern } => write!(f, "{} matches /{}/", role, pattern),
            Self::NotBlank { role } => write!(f, "{} is not blank", role),
        }
    }
}
