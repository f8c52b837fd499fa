pub mod rule_based;

pub use rule_based::*;

use crate::model::{Points, ScorerResult};

/// Scores a validated value. Implementations are pure: no I/O, no failure.
pub trait Scorer<T>: Send + Sync {
    fn score(&self, item: &T) -> Vec<ScorerResult>;
}

/// Sum of all awards, saturating rather than wrapping.
pub fn total_score(results: &[ScorerResult]) -> Points {
    results
        .iter()
        .fold(0, |total: Points, result| total.saturating_add(result.score))
}
