mod rules;

pub use rules::{Condition, Field, RuleGroup, RulesError, ScoringRule, ScoringRules};

use super::domain::{RawPosting, ScoredPosting};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fields a posting must carry, non-empty, before it can be scored.
pub const REQUIRED_FIELDS: [Field; 4] = [
    Field::Location,
    Field::WorkType,
    Field::Title,
    Field::CompanyName,
];

/// Required fields that are empty on the posting, in check order.
pub fn required_fields_missing(posting: &RawPosting) -> Vec<Field> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|field| field.value(posting).is_empty())
        .collect()
}

/// Posting the scorer refused, identified by its position in the acquired batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPosting {
    pub index: usize,
    pub title: String,
    pub missing: Vec<Field>,
}

/// Scoring stage output: scored postings in input order plus the soft failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringReport {
    pub scored: Vec<ScoredPosting>,
    pub skipped: Vec<SkippedPosting>,
}

/// Stateless evaluator applying a rubric to postings.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rules: ScoringRules,
}

impl ScoringEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn score(&self, posting: &RawPosting) -> ScoredPosting {
        let mut score: u32 = 0;
        let mut reasons = Vec::new();

        for group in &self.rules.groups {
            if let Some(rule) = group.first_match(posting) {
                score = score.saturating_add(rule.points);
                reasons.push(rule.reason.clone());
            }
        }

        ScoredPosting {
            posting: posting.clone(),
            score,
            reasons,
        }
    }

    /// Score every usable posting, skipping the ones missing required fields.
    pub fn score_all(&self, postings: Vec<RawPosting>) -> ScoringReport {
        let mut report = ScoringReport::default();

        for (index, posting) in postings.into_iter().enumerate() {
            let missing = required_fields_missing(&posting);
            if !missing.is_empty() {
                let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
                warn!(
                    index,
                    title = %posting.title,
                    job_url = %posting.job_url,
                    missing = ?labels,
                    "skipping posting due to missing required fields"
                );
                report.skipped.push(SkippedPosting {
                    index,
                    title: posting.title,
                    missing,
                });
                continue;
            }

            report.scored.push(self.score(&posting));
        }

        report
    }

    /// Check a scored posting against the rubric it claims to come from.
    pub fn validate_scored(&self, scored: &ScoredPosting) -> Result<(), String> {
        if let Some(field) = required_fields_missing(&scored.posting).first() {
            return Err(format!("scored posting lacks required field {field}"));
        }

        let expected = self.score(&scored.posting);
        if scored.reasons != expected.reasons {
            return Err(format!(
                "reasons {:?} do not match the rubric's awards {:?}",
                scored.reasons, expected.reasons
            ));
        }

        if scored.score != expected.score {
            return Err(format!(
                "score {} does not match awarded points {}",
                scored.score, expected.score
            ));
        }

        Ok(())
    }
}
