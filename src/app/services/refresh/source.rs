//! Per-dataset source description and its freshness state

use crate::app::services::field_mapper::FieldLayout;

/// Where a dataset comes from and how its records are laid out
///
/// The freshness token is the only mutable part: it is replaced after every
/// successful full fetch and lives only as long as the process.
#[derive(Debug, Clone)]
pub struct DataSource {
    url: String,
    record_delimiter: String,
    field_delimiter_pattern: String,
    layout: FieldLayout,
    last_known_freshness_token: Option<String>,
}

impl DataSource {
    /// Describe a source that has never been fetched
    pub fn new(
        url: impl Into<String>,
        record_delimiter: impl Into<String>,
        field_delimiter_pattern: impl Into<String>,
        layout: FieldLayout,
    ) -> Self {
        Self {
            url: url.into(),
            record_delimiter: record_delimiter.into(),
            field_delimiter_pattern: field_delimiter_pattern.into(),
            layout,
            last_known_freshness_token: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn record_delimiter(&self) -> &str {
        &self.record_delimiter
    }

    pub fn field_delimiter_pattern(&self) -> &str {
        &self.field_delimiter_pattern
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Token recorded by the last successful full fetch
    pub fn freshness_token(&self) -> Option<&str> {
        self.last_known_freshness_token.as_deref()
    }

    /// Whether `candidate` names the same content as the stored token
    ///
    /// Tokens compare case-insensitively; a blank candidate never matches.
    pub fn is_fresh(&self, candidate: Option<&str>) -> bool {
        match (self.freshness_token(), candidate.map(str::trim)) {
            (Some(stored), Some(candidate)) if !candidate.is_empty() => {
                stored.eq_ignore_ascii_case(candidate)
            }
            _ => false,
        }
    }

    pub(crate) fn set_freshness_token(&mut self, token: String) {
        self.last_known_freshness_token = Some(token);
    }
}
