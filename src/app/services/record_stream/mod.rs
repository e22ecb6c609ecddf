//! Delimited record reader for chunked byte streams
//!
//! HTTP bodies arrive in arbitrarily sized chunks. This module splits them
//! into records on a fixed delimiter, carrying partial records over from one
//! chunk to the next so the full body never has to be buffered.
//!
//! ## Usage
//!
//! ```rust
//! use aqi_lookup::app::services::record_stream::RecordReader;
//!
//! # fn example() -> aqi_lookup::Result<()> {
//! let mut reader = RecordReader::new("\n")?;
//! let mut records = Vec::new();
//!
//! reader.feed(b"first\nsec", |record| records.push(record.to_string()));
//! reader.feed(b"ond\ntail", |record| records.push(record.to_string()));
//!
//! assert_eq!(records, vec!["first", "second"]);
//! assert_eq!(reader.finish(), 4); // "tail" is never emitted
//! # Ok(())
//! # }
//! ```

pub mod reader;

#[cfg(test)]
pub mod tests;

pub use reader::RecordReader;
