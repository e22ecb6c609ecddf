//! Chunk-fed record splitting
//!
//! A record is every span of bytes terminated by the delimiter. Bytes after
//! the last delimiter stay in the carry-over buffer until more data arrives;
//! when the stream ends they are dropped as a possibly truncated record.

use crate::{Error, Result};
use tracing::debug;

/// Splits a chunked byte stream into delimiter-terminated records
#[derive(Debug)]
pub struct RecordReader {
    /// Record delimiter, never empty
    delimiter: Vec<u8>,

    /// Bytes received after the last delimiter seen so far
    buffer: Vec<u8>,

    /// Number of records emitted since creation
    records_emitted: usize,

    /// Total bytes fed since creation
    bytes_fed: usize,
}

impl RecordReader {
    /// Create a reader with an empty carry-over buffer
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the delimiter is empty
    pub fn new(delimiter: &str) -> Result<Self> {
        if delimiter.is_empty() {
            return Err(Error::configuration("Record delimiter cannot be empty"));
        }

        Ok(Self {
            delimiter: delimiter.as_bytes().to_vec(),
            buffer: Vec::new(),
            records_emitted: 0,
            bytes_fed: 0,
        })
    }

    /// Append a chunk and emit every record it completes
    ///
    /// Records that started in an earlier chunk are reassembled before being
    /// emitted, including when the delimiter itself straddles two chunks.
    /// The delimiter is not part of the emitted record. Invalid UTF-8 is
    /// replaced rather than rejected so one bad byte cannot stall a refresh.
    pub fn feed<F>(&mut self, chunk: &[u8], mut on_record: F)
    where
        F: FnMut(&str),
    {
        if chunk.is_empty() {
            return;
        }

        // The carry-over holds no complete delimiter, but its tail may hold
        // the start of one.
        let mut search_from = self
            .buffer
            .len()
            .saturating_sub(self.delimiter.len() - 1);

        self.buffer.extend_from_slice(chunk);
        self.bytes_fed += chunk.len();

        let mut record_start = 0;

        while let Some(offset) = find(&self.buffer[search_from..], &self.delimiter) {
            let record_end = search_from + offset;
            let record = String::from_utf8_lossy(&self.buffer[record_start..record_end]);

            on_record(&record);
            self.records_emitted += 1;

            record_start = record_end + self.delimiter.len();
            search_from = record_start;
        }

        if record_start > 0 {
            self.buffer.drain(..record_start);
        }
    }

    /// End the stream, discarding any undelimited tail
    ///
    /// Returns the number of bytes dropped.
    pub fn finish(self) -> usize {
        let dropped = self.buffer.len();

        if dropped > 0 {
            debug!(
                "Dropping {} trailing bytes without a record delimiter after {} records",
                dropped, self.records_emitted
            );
        }

        dropped
    }

    /// Number of bytes waiting for a delimiter
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of records emitted so far
    pub fn records_emitted(&self) -> usize {
        self.records_emitted
    }

    /// Total number of bytes fed so far
    pub fn bytes_fed(&self) -> usize {
        self.bytes_fed
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
