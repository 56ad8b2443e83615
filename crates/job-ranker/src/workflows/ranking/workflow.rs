use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::acquisition::{validate_records, AcquisitionError, PostingSource};
use super::domain::{RankedOutput, SearchRequest};
use super::ranker::rank;
use super::scoring::{ScoringEngine, SkippedPosting};

/// Pipeline stage named in hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Acquisition,
    Scoring,
    Ranking,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Acquisition => "acquisition",
            Self::Scoring => "scoring",
            Self::Ranking => "ranking",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do when the source succeeds but hands back zero records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyAcquisition {
    #[default]
    Fail,
    Allow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    pub empty_acquisition: EmptyAcquisition,
}

/// Successful run: ranked postings plus the postings the scorer skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankingRun {
    pub results: Vec<RankedOutput>,
    pub skipped: Vec<SkippedPosting>,
}

/// Hard failure aborting a ranking run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),
    #[error("{stage} stage failed: {detail}")]
    StageFailure { stage: Stage, detail: String },
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Acquisition(_) => "AcquisitionFailure",
            PipelineError::StageFailure { .. } => "StageFailure",
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Acquisition(_) => Stage::Acquisition,
            PipelineError::StageFailure { stage, .. } => *stage,
        }
    }
}

/// Driver sequencing acquisition, scoring, and ranking for one search request.
pub struct JobRankingWorkflow<S: ?Sized> {
    source: Arc<S>,
    engine: ScoringEngine,
    options: PipelineOptions,
}

impl<S> JobRankingWorkflow<S>
where
    S: PostingSource + ?Sized,
{
    pub fn new(source: Arc<S>, engine: ScoringEngine) -> Self {
        Self::with_options(source, engine, PipelineOptions::default())
    }

    pub fn with_options(source: Arc<S>, engine: ScoringEngine, options: PipelineOptions) -> Self {
        Self {
            source,
            engine,
            options,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Run every stage to completion; no partial results accompany an error.
    pub fn run(&self, request: &SearchRequest) -> Result<RankingRun, PipelineError> {
        request.validate().map_err(AcquisitionError::from)?;

        let records = self
            .source
            .fetch(request)
            .map_err(AcquisitionError::from)?;

        if records.is_empty() {
            match self.options.empty_acquisition {
                EmptyAcquisition::Fail => return Err(AcquisitionError::Empty.into()),
                EmptyAcquisition::Allow => {
                    info!(title = %request.title, "posting source returned no records");
                    return Ok(RankingRun::default());
                }
            }
        }

        let postings = validate_records(records)?;
        info!(
            title = %request.title,
            acquired = postings.len(),
            "acquired postings"
        );

        let report = self.engine.score_all(postings);
        for scored in &report.scored {
            self.engine
                .validate_scored(scored)
                .map_err(|detail| PipelineError::StageFailure {
                    stage: Stage::Scoring,
                    detail,
                })?;
        }
        debug!(
            scored = report.scored.len(),
            skipped = report.skipped.len(),
            "scored postings"
        );

        let results = rank(report.scored);
        if let Some(pair) = results
            .windows(2)
            .find(|pair| pair[0].ranking < pair[1].ranking)
        {
            return Err(PipelineError::StageFailure {
                stage: Stage::Ranking,
                detail: format!(
                    "'{}' ({}) ranked above '{}' ({})",
                    pair[0].title, pair[0].ranking, pair[1].title, pair[1].ranking
                ),
            });
        }

        info!(
            ranked = results.len(),
            skipped = report.skipped.len(),
            "ranking run complete"
        );

        Ok(RankingRun {
            results,
            skipped: report.skipped,
        })
    }
}
