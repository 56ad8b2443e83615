use job_ranker::error::AppError;
use job_ranker::workflows::ranking::{ScoringEngine, ScoringRules};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the scoring engine from a rubric file, or the standard rubric when none is set.
pub(crate) fn load_engine(rules_path: Option<&Path>) -> Result<ScoringEngine, AppError> {
    let rules = match rules_path {
        Some(path) => {
            let rules = ScoringRules::from_path(path)?;
            info!(path = %path.display(), groups = rules.groups.len(), "loaded scoring rubric");
            rules
        }
        None => ScoringRules::standard(),
    };

    Ok(ScoringEngine::new(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rubric_is_used_without_a_path() {
        let engine = load_engine(None).expect("standard rubric loads");
        assert_eq!(engine.rules(), &ScoringRules::standard());
    }

    #[test]
    fn missing_rubric_file_is_reported() {
        let err = load_engine(Some(Path::new("/nonexistent/rubric.json")))
            .expect_err("missing file fails");
        assert!(matches!(err, AppError::Rules(_)));
    }
}
