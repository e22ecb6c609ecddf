//! The conditional refresh protocol
//!
//! A refresh probes the remote freshness token, skips the transfer when it
//! matches the stored one, and otherwise streams the body through the record
//! reader, tokenizer, filters and mapper, one record at a time.

use super::source::DataSource;
use super::stats::{RefreshOutcome, RefreshState, RefreshStats};
use crate::app::services::field_mapper::{MappedRecord, RecordMapper, Tokenizer};
use crate::app::services::http_source::HttpSource;
use crate::app::services::record_stream::RecordReader;
use crate::{Error, Result};
use futures::StreamExt;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Keeps one dataset's lookup tables in step with its remote source
///
/// Refreshing needs `&mut self`, so two refreshes of the same dataset can
/// never overlap.
#[derive(Debug)]
pub struct RecordRefreshController<M, C> {
    source: DataSource,
    tokenizer: Tokenizer,
    mapper: M,
    client: C,
    state: RefreshState,
}

impl<M, C> RecordRefreshController<M, C>
where
    M: RecordMapper,
    C: HttpSource,
{
    /// Create a controller for one dataset
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the record delimiter is empty, the
    ///   field pattern does not compile or the layout lacks a required role
    pub fn new(source: DataSource, mapper: M, client: C) -> Result<Self> {
        RecordReader::new(source.record_delimiter())?;
        source
            .layout()
            .require(mapper.dataset(), mapper.required_roles())?;
        let tokenizer = Tokenizer::new(source.field_delimiter_pattern(), mapper.unquote_fields())?;

        Ok(Self {
            source,
            tokenizer,
            mapper,
            client,
            state: RefreshState::Idle,
        })
    }

    /// Dataset name of the mapper
    pub fn dataset(&self) -> &str {
        self.mapper.dataset()
    }

    /// State reached by the latest refresh
    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Run one conditional refresh
    ///
    /// Without a stored token the probe is skipped and the dataset fetched
    /// directly. Records that fail to parse are logged and counted; they
    /// never abort the refresh.
    ///
    /// # Errors
    /// * `Error::Downstream` if the probe or fetch answers with a non-2xx status
    /// * `Error::Transport` if the connection fails, including mid-body
    ///
    /// On error the stored token is left as it was. Entries already written
    /// by a partially streamed body stay in the tables.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome> {
        let started = Instant::now();

        match self.run(started).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.state = RefreshState::Failed;
                Err(e)
            }
        }
    }

    async fn run(&mut self, started: Instant) -> Result<RefreshOutcome> {
        let dataset = self.mapper.dataset().to_string();
        let url = self.source.url().to_string();

        if self.source.freshness_token().is_some() {
            self.state = RefreshState::ProbingFreshness;

            let probe = self.client.probe(&url).await?;
            if !probe.is_success() {
                return Err(Error::downstream(
                    probe.status,
                    format!("on HEAD {}", url),
                ));
            }

            if self.source.is_fresh(probe.freshness_token.as_deref()) {
                debug!("Dataset '{}' is up to date, skipping fetch", dataset);
                self.state = RefreshState::UpToDate;
                return Ok(RefreshOutcome::UpToDate);
            }
        }

        self.state = RefreshState::Fetching;
        info!("Refreshing dataset '{}' from {}", dataset, url);

        let response = self.client.fetch(&url).await?;
        if !response.is_success() {
            return Err(Error::downstream(response.status, format!("on GET {}", url)));
        }

        let freshness_token = response.freshness_token;
        let mut body = response.body;
        let mut reader = RecordReader::new(self.source.record_delimiter())?;
        let mut stats = RefreshStats::new(&dataset);

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            stats.bytes_read += chunk.len();
            reader.feed(&chunk, |record| {
                process_record(&self.tokenizer, &self.source, &self.mapper, record, &mut stats)
            });
        }

        stats.trailing_bytes_dropped = reader.finish();

        if let Some(token) = freshness_token.filter(|token| !token.trim().is_empty()) {
            self.source.set_freshness_token(token.clone());
            stats.freshness_token = Some(token);
        }

        stats.duration = started.elapsed();
        self.state = RefreshState::Complete;
        info!("Refreshed {}", stats.summary());

        Ok(RefreshOutcome::Complete(stats))
    }
}

/// Tokenize, filter and map one record, updating the counters
fn process_record<M: RecordMapper>(
    tokenizer: &Tokenizer,
    source: &DataSource,
    mapper: &M,
    record: &str,
    stats: &mut RefreshStats,
) {
    stats.records_read += 1;

    if record.trim().is_empty() {
        stats.records_filtered += 1;
        return;
    }

    let fields = tokenizer.split(record);
    let mapped = source.layout().record(&fields);

    match apply(mapper, &mapped) {
        Ok(true) => stats.records_mapped += 1,
        Ok(false) => {
            trace!("Ignoring {} record {:?}", mapper.dataset(), record);
            stats.records_filtered += 1;
        }
        Err(e) => {
            warn!("Skipping {} record {:?}: {}", mapper.dataset(), record, e);
            stats.record_error(e.to_string());
        }
    }
}

/// Run the filters, then the mapper; `Ok(false)` means filtered out
fn apply<M: RecordMapper>(mapper: &M, record: &MappedRecord<'_>) -> Result<bool> {
    for filter in mapper.filters() {
        if !filter.accepts(record)? {
            return Ok(false);
        }
    }

    mapper.map(record)?;
    Ok(true)
}
