use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::ranking::acquisition::{PostingSource, SourceError, StaticPostingSource};
use crate::workflows::ranking::domain::{RawPosting, SearchRequest};
use crate::workflows::ranking::scoring::{ScoringEngine, ScoringRules};
use crate::workflows::ranking::{ranking_router, JobRankingWorkflow};

pub(super) fn posting(title: &str, company: &str, location: &str, work_type: &str) -> RawPosting {
    RawPosting {
        title: title.to_string(),
        company_name: company.to_string(),
        location: location.to_string(),
        work_type: work_type.to_string(),
        job_url: format!(
            "https://www.linkedin.com/jobs/view/{}",
            title.to_lowercase().replace(' ', "-")
        ),
        description: Some(format!("{title} at {company}")),
        salary: None,
    }
}

/// "Founding Engineer" at a European company, fully remote.
pub(super) fn scenario_a() -> RawPosting {
    posting("Founding Engineer", "Acme Europe", "Remote", "Remote")
}

/// "AI Engineer" at an Indian company, hybrid in Bangalore.
pub(super) fn scenario_b() -> RawPosting {
    posting("AI Engineer", "Acme India", "Bangalore", "Hybrid")
}

pub(super) fn missing_company() -> RawPosting {
    posting("Software Engineer", "", "Pune", "On-site")
}

pub(super) fn record(posting: &RawPosting) -> Value {
    serde_json::to_value(posting).expect("posting serializes")
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringRules::standard())
}

pub(super) fn workflow_over(
    postings: &[RawPosting],
) -> JobRankingWorkflow<StaticPostingSource> {
    let source = StaticPostingSource::from_postings(postings).expect("postings serialize");
    JobRankingWorkflow::new(Arc::new(source), engine())
}

pub(super) fn request() -> SearchRequest {
    SearchRequest::default()
}

/// Source that always fails, as an unreachable provider would.
#[derive(Debug, Default)]
pub(super) struct UnavailableSource;

impl PostingSource for UnavailableSource {
    fn fetch(&self, _request: &SearchRequest) -> Result<Vec<Value>, SourceError> {
        Err(SourceError::Unavailable("provider timed out".to_string()))
    }
}

/// Source counting how often it was asked for postings.
#[derive(Debug, Default)]
pub(super) struct CountingSource {
    calls: AtomicUsize,
    records: Vec<Value>,
}

impl CountingSource {
    pub(super) fn new(records: Vec<Value>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            records,
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PostingSource for CountingSource {
    fn fetch(&self, _request: &SearchRequest) -> Result<Vec<Value>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

pub(super) fn rank_payload(postings: Vec<Value>) -> Value {
    json!({ "postings": postings })
}

pub(super) fn router() -> axum::Router {
    ranking_router(Arc::new(engine()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
