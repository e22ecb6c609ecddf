//! Test utilities and an in-memory HTTP source for refresh testing

use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::app::services::field_mapper::{
    FieldFilter, FieldLayout, FieldRole, MappedRecord, RecordMapper,
};
use crate::app::services::http_source::{FetchResponse, HttpSource, ProbeResponse};
use crate::app::services::lookup_table::LookupTable;
use crate::{Error, Result};

use super::{DataSource, RecordRefreshController};


/// Canned responses served by [`MockSource`]
#[derive(Debug, Clone)]
pub struct MockResponses {
    pub probe_status: u16,
    pub fetch_status: u16,
    pub freshness_token: Option<String>,
    pub chunks: Vec<Vec<u8>>,
    /// Fail with a transport error after this many chunks
    pub fail_after_chunks: Option<usize>,
    /// Fail every request before any response
    pub refuse_connections: bool,
}

/// In-memory [`HttpSource`] that counts probes and fetches
#[derive(Debug, Clone)]
pub struct MockSource {
    responses: Arc<Mutex<MockResponses>>,
    probes: Arc<AtomicUsize>,
    fetches: Arc<AtomicUsize>,
}

impl MockSource {
    /// Serve `body` in one chunk with the given token
    pub fn new(body: &str, freshness_token: Option<&str>) -> Self {
        Self::chunked(&[body], freshness_token)
    }

    /// Serve the body split into the given chunks
    pub fn chunked(chunks: &[&str], freshness_token: Option<&str>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(MockResponses {
                probe_status: 200,
                fetch_status: 200,
                freshness_token: freshness_token.map(str::to_string),
                chunks: chunks.iter().map(|c| c.as_bytes().to_vec()).collect(),
                fail_after_chunks: None,
                refuse_connections: false,
            })),
            probes: Arc::new(AtomicUsize::new(0)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Change the canned responses for subsequent requests
    pub fn update(&self, change: impl FnOnce(&mut MockResponses)) {
        let mut responses = self.responses.lock().unwrap();
        change(&mut *responses);
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn responses(&self) -> MockResponses {
        self.responses.lock().unwrap().clone()
    }
}

impl HttpSource for MockSource {
    async fn probe(&self, _url: &str) -> Result<ProbeResponse> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let responses = self.responses();

        if responses.refuse_connections {
            return Err(Error::transport("connection refused"));
        }

        Ok(ProbeResponse {
            status: responses.probe_status,
            freshness_token: responses.freshness_token,
        })
    }

    async fn fetch(&self, _url: &str) -> Result<FetchResponse> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let responses = self.responses();

        if responses.refuse_connections {
            return Err(Error::transport("connection refused"));
        }

        let mut items: Vec<Result<Bytes>> = responses
            .chunks
            .into_iter()
            .map(|chunk| Ok(Bytes::from(chunk)))
            .collect();

        if let Some(limit) = responses.fail_after_chunks {
            items.truncate(limit);
            items.push(Err(Error::transport("connection reset by peer")));
        }

        Ok(FetchResponse {
            status: responses.fetch_status,
            freshness_token: responses.freshness_token,
            body: Box::pin(futures::stream::iter(items)),
        })
    }
}

/// Maps `zip,area` lines into a single table
#[derive(Debug)]
pub struct PairMapper {
    pub table: Arc<LookupTable<String, String>>,
    filters: Vec<FieldFilter>,
}

impl PairMapper {
    pub fn new() -> Self {
        Self {
            table: Arc::new(LookupTable::new()),
            filters: vec![FieldFilter::LeadingAsciiDigit {
                role: FieldRole::ZipCode,
            }],
        }
    }
}

impl RecordMapper for PairMapper {
    fn dataset(&self) -> &str {
        "pairs"
    }

    fn required_roles(&self) -> &[FieldRole] {
        &[FieldRole::ZipCode, FieldRole::Area]
    }

    fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    fn map(&self, record: &MappedRecord<'_>) -> Result<()> {
        let zip_code = record.get(FieldRole::ZipCode)?;
        let area = record.get(FieldRole::Area)?;
        self.table.put(zip_code.to_string(), area.to_string());
        Ok(())
    }
}

/// Source description of the `zip,area` test dataset
pub fn pair_source() -> DataSource {
    DataSource::new(
        "http://localhost/pairs.txt",
        "\n",
        ",",
        FieldLayout::from_pairs([(FieldRole::ZipCode, 0), (FieldRole::Area, 1)]),
    )
}

/// A controller over [`PairMapper`] plus a handle to its table
pub fn pair_controller(
    source: &MockSource,
) -> (
    RecordRefreshController<PairMapper, MockSource>,
    Arc<LookupTable<String, String>>,
) {
    let mapper = PairMapper::new();
    let table = Arc::clone(&mapper.table);
    let controller = RecordRefreshController::new(pair_source(), mapper, source.clone()).unwrap();
    (controller, table)
}
