//! Conditional dataset refresh
//!
//! Each dataset is kept fresh by one [`RecordRefreshController`]. A refresh
//! moves through these states:
//!
//! ```text
//! Idle -> ProbingFreshness -> UpToDate
//!                          \-> Fetching -> Complete | Failed
//! ```
//!
//! The probe is skipped when no token has been recorded yet, so the first
//! refresh always fetches. Lookup tables are written record by record while
//! the body streams in, so readers see old and new entries side by side
//! until the refresh ends.

pub mod controller;
pub mod source;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use controller::RecordRefreshController;
pub use source::DataSource;
pub use stats::{RefreshOutcome, RefreshState, RefreshStats};
