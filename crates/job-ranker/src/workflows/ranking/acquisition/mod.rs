//! Acquisition boundary: where raw provider records enter the ranking workflow.
//!
//! A [`PostingSource`] only has to hand back untyped JSON records. Every record is
//! checked against the [`RawPosting`] schema here, so malformed provider data fails
//! the run with the index of the offending record instead of leaking into scoring.

mod dataset;

pub use dataset::{read_records, DatasetFormat, DatasetPostingSource};

use super::domain::{RawPosting, RequestError, SearchRequest};
use serde_json::Value;
use std::fmt::Debug;

/// Provider of raw posting records for a search request.
pub trait PostingSource: Debug + Send + Sync {
    fn fetch(&self, request: &SearchRequest) -> Result<Vec<Value>, SourceError>;
}

/// Failure raised by a source before it produced any records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read posting dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV posting dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON posting dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("posting source unavailable: {0}")]
    Unavailable(String),
}

/// Hard failure of the acquisition stage.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("invalid search request: {0}")]
    Request(#[from] RequestError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("posting source returned no records")]
    Empty,
    #[error("posting record {index} does not match the posting schema: {detail}")]
    Schema { index: usize, detail: String },
}

/// Check every raw record against the posting schema, failing on the first mismatch.
pub fn validate_records(records: Vec<Value>) -> Result<Vec<RawPosting>, AcquisitionError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<RawPosting>(record).map_err(|err| AcquisitionError::Schema {
                index,
                detail: err.to_string(),
            })
        })
        .collect()
}

/// Source backed by records already held in memory, e.g. an HTTP payload.
#[derive(Debug, Clone, Default)]
pub struct StaticPostingSource {
    records: Vec<Value>,
}

impl StaticPostingSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn from_postings(postings: &[RawPosting]) -> Result<Self, serde_json::Error> {
        let records = postings
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }
}

impl PostingSource for StaticPostingSource {
    fn fetch(&self, _request: &SearchRequest) -> Result<Vec<Value>, SourceError> {
        Ok(self.records.clone())
    }
}
