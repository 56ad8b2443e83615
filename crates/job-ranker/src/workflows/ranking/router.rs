use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::acquisition::StaticPostingSource;
use super::domain::SearchRequest;
use super::scoring::{ScoringEngine, ScoringRules};
use super::workflow::{JobRankingWorkflow, RankingRun};
use crate::error::AppError;

/// Ranking request carrying the provider records inline.
#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub postings: Vec<Value>,
    #[serde(default)]
    pub search: Option<SearchRequest>,
}

/// Router builder exposing the ranking workflow over HTTP.
pub fn ranking_router(engine: Arc<ScoringEngine>) -> Router {
    Router::new()
        .route("/api/v1/jobs/rank", post(rank_handler))
        .route("/api/v1/jobs/rules", get(rules_handler))
        .with_state(engine)
}

pub(crate) async fn rank_handler(
    State(engine): State<Arc<ScoringEngine>>,
    Json(payload): Json<RankRequest>,
) -> Result<Json<RankingRun>, AppError> {
    let RankRequest { postings, search } = payload;
    let request = search.unwrap_or_default();
    let source = Arc::new(StaticPostingSource::new(postings));
    let workflow = JobRankingWorkflow::new(source, engine.as_ref().clone());

    let run = workflow.run(&request)?;
    Ok(Json(run))
}

pub(crate) async fn rules_handler(State(engine): State<Arc<ScoringEngine>>) -> Json<ScoringRules> {
    Json(engine.rules().clone())
}
