use crate::{model::ScorerResult, scorers::Scorer};

type Rule<T> = Box<dyn Fn(&T) -> Option<ScorerResult> + Send + Sync>;

/// Evaluates every registered rule against the same value.
///
/// Rules are independent: each sees the original value and none can observe
/// another's outcome. A rule that returns `None` or a zero award is omitted
/// from the result list.
pub struct RuleBasedScorer<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleBasedScorer<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<F>(&mut self, rule: F)
    where
        F: Fn(&T) -> Option<ScorerResult> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl<T> Default for RuleBasedScorer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scorer<T> for RuleBasedScorer<T> {
    fn score(&self, item: &T) -> Vec<ScorerResult> {
        self.rules
            .iter()
            .filter_map(|rule| rule(item))
            .filter(|result| result.score > 0)
            .collect()
    }
}
