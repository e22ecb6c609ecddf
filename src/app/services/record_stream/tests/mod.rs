//! Shared test utilities for the record reader tests

use super::RecordReader;


/// Feed every chunk in order and collect the emitted records
pub fn read_all(delimiter: &str, chunks: &[&[u8]]) -> (Vec<String>, usize) {
    let mut reader = RecordReader::new(delimiter).unwrap();
    let mut records = Vec::new();

    for chunk in chunks {
        reader.feed(chunk, |record| records.push(record.to_string()));
    }

    let dropped = reader.finish();
    (records, dropped)
}
