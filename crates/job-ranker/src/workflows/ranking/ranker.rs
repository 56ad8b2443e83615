use super::domain::{RankedOutput, ScoredPosting};
use std::cmp::Reverse;

/// Order postings by descending score and project them into the output shape.
///
/// The sort is stable, so postings with equal scores keep their acquisition order.
pub fn rank(mut scored: Vec<ScoredPosting>) -> Vec<RankedOutput> {
    scored.sort_by_key(|posting| Reverse(posting.score));
    scored.into_iter().map(RankedOutput::from).collect()
}
