//! Job posting ranking workflow.
//!
//! Postings flow through three stages: acquisition from a [`PostingSource`], scoring
//! against the preference rubric, and a stable descending sort into [`RankedOutput`].
//! A posting missing required fields is skipped with a warning; any other stage failure
//! aborts the run.

pub mod acquisition;
pub mod domain;
mod ranker;
pub mod router;
pub mod scoring;
mod workflow;

#[cfg(test)]
mod tests;

pub use acquisition::{
    AcquisitionError, DatasetFormat, DatasetPostingSource, PostingSource, SourceError,
    StaticPostingSource,
};
pub use domain::{
    ExperienceLevel, ProxyOptions, RankedOutput, RawPosting, RequestError, ScoredPosting,
    SearchRequest,
};
pub use ranker::rank;
pub use router::ranking_router;
pub use scoring::{
    Condition, Field, RuleGroup, RulesError, ScoringEngine, ScoringReport, ScoringRule,
    ScoringRules, SkippedPosting,
};
pub use workflow::{
    EmptyAcquisition, JobRankingWorkflow, PipelineError, PipelineOptions, RankingRun, Stage,
};
