//! Field splitting for raw records

use crate::{Error, Result};
use regex::Regex;

/// Splits records into fields on a compiled separator pattern
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separator: Regex,
    unquote: bool,
}

impl Tokenizer {
    /// Compile a tokenizer for the given separator pattern
    ///
    /// With `unquote` set, one pair of surrounding double quotes is stripped
    /// from every field.
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the pattern is empty or invalid
    pub fn new(separator_pattern: &str, unquote: bool) -> Result<Self> {
        if separator_pattern.is_empty() {
            return Err(Error::configuration("Field delimiter pattern cannot be empty"));
        }

        let separator = Regex::new(separator_pattern).map_err(|e| {
            Error::configuration(format!(
                "Invalid field delimiter pattern '{}': {}",
                separator_pattern, e
            ))
        })?;

        Ok(Self { separator, unquote })
    }

    /// Split a record into its fields
    ///
    /// Empty fields are kept, including trailing ones, and nothing is trimmed
    /// beyond what the separator itself consumes.
    pub fn split(&self, record: &str) -> Vec<String> {
        self.separator
            .split(record)
            .map(|field| {
                if self.unquote {
                    unquote(field).to_string()
                } else {
                    field.to_string()
                }
            })
            .collect()
    }

    /// Separator pattern this tokenizer was compiled from
    pub fn pattern(&self) -> &str {
        self.separator.as_str()
    }
}

fn unquote(field: &str) -> &str {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}
