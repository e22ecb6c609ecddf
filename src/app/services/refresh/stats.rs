//! Refresh statistics and outcomes

use crate::constants::MAX_RECORDED_ERRORS;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Lifecycle of one refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefreshState {
    /// No refresh is running
    Idle,
    /// Waiting for the HEAD response
    ProbingFreshness,
    /// The remote token matched; nothing was fetched
    UpToDate,
    /// Streaming the body into the lookup tables
    Fetching,
    /// The body was consumed and the token recorded
    Complete,
    /// The probe or fetch failed; the stored token is unchanged
    Failed,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ProbingFreshness => "probing freshness",
            Self::UpToDate => "up to date",
            Self::Fetching => "fetching",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a successful refresh
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The remote token matched the stored one; no fetch was made
    UpToDate,
    /// The dataset was fetched and fed through the mapper
    Complete(RefreshStats),
}

impl RefreshOutcome {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, Self::UpToDate)
    }

    /// Statistics of a completed fetch
    pub fn stats(&self) -> Option<&RefreshStats> {
        match self {
            Self::UpToDate => None,
            Self::Complete(stats) => Some(stats),
        }
    }
}

/// Counters collected while streaming one dataset
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshStats {
    /// Dataset the counters belong to
    pub dataset: String,

    /// Records emitted by the stream reader
    pub records_read: usize,

    /// Records written to the lookup tables
    pub records_mapped: usize,

    /// Records dropped by a filter, including empty lines
    pub records_filtered: usize,

    /// Records skipped because a field could not be parsed
    pub parse_errors: usize,

    /// First few parse error messages, for debugging
    pub errors: Vec<String>,

    /// Body bytes received
    pub bytes_read: usize,

    /// Bytes after the final delimiter, discarded at stream end
    pub trailing_bytes_dropped: usize,

    /// Token recorded by this fetch, if the endpoint sent one
    pub freshness_token: Option<String>,

    /// Wall time from the start of the refresh to the end of the body
    pub duration: Duration,
}

impl RefreshStats {
    /// Create new empty statistics for a dataset
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Self::default()
        }
    }

    /// Count a skipped record, keeping the message if there is room
    pub fn record_error(&mut self, message: String) {
        self.parse_errors += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// Share of read records that were mapped, as a percentage
    pub fn mapped_rate(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            (self.records_mapped as f64 / self.records_read as f64) * 100.0
        }
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "{}: {} records read, {} mapped ({:.1}%), {} filtered, {} skipped, {} bytes in {:.2}s",
            self.dataset,
            self.records_read,
            self.records_mapped,
            self.mapped_rate(),
            self.records_filtered,
            self.parse_errors,
            self.bytes_read,
            self.duration.as_secs_f64()
        )
    }
}
