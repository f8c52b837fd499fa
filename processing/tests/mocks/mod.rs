#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use processing::{
    error::{StorageError, ValidationError},
    model::{Importable, Points, RecordId, ScorerResult, StoredRecord},
    scorers::RuleBasedScorer,
    storage::ScoreStorage,
};
use serde::Deserialize;

mock! {
    pub ScoreStorage {}

    #[async_trait]
    impl ScoreStorage for ScoreStorage {
        async fn insert(&self, record: StoredRecord) -> Result<(), StorageError>;
        async fn get_points(&self, id: &RecordId) -> Result<Option<Points>, StorageError>;
        async fn count(&self) -> Result<usize, StorageError>;
    }
}

/// Minimal payload: a word whose score is its length.
#[derive(Debug, Clone, Deserialize)]
pub struct WordPayload {
    pub word: Option<String>,
}

impl WordPayload {
    pub fn new(word: &str) -> Self {
        Self {
            word: Some(word.to_string()),
        }
    }

    pub fn missing() -> Self {
        Self { word: None }
    }
}

impl Importable for WordPayload {
    type Validated = String;

    fn validate(&self) -> Result<String, ValidationError> {
        let word = self
            .word
            .clone()
            .ok_or_else(|| ValidationError::MissingField("word".to_string()))?;
        if word.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("word", word, "a single word"));
        }
        Ok(word)
    }
}

pub fn length_scorer() -> RuleBasedScorer<String> {
    let mut scorer = RuleBasedScorer::new();
    scorer.add_rule(|word: &String| {
        Some(ScorerResult {
            name: "length".to_string(),
            score: word.chars().count() as Points,
        })
    });
    scorer
}
