use crate::{
    error::ProcessError,
    model::{Importable, Points, RecordId, StoredRecord},
    scorers::{Scorer, total_score},
    storage::ScoreStorage,
};
use metrics::{counter, histogram};
#[cfg(not(test))]
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {println as debug, println as info, println as trace, println as warn};
use std::{marker::PhantomData, sync::Arc};

/// Accepts payloads, scores them once and remembers the score under a fresh id.
pub struct Processor<I, S>
where
    I: Importable,
    S: Scorer<I::Validated>,
{
    scorer: S,
    storage: Arc<dyn ScoreStorage>,
    _payload: PhantomData<fn(&I)>,
}

impl<I, S> Processor<I, S>
where
    I: Importable,
    S: Scorer<I::Validated>,
{
    pub fn new(scorer: S, storage: Arc<dyn ScoreStorage>) -> Self {
        info!("Initializing new Processor");
        Self {
            scorer,
            storage,
            _payload: PhantomData,
        }
    }

    /// Validates and scores without storing anything.
    pub fn score(&self, payload: &I) -> Result<Points, ProcessError> {
        let validated = payload.validate()?;
        let results = self.scorer.score(&validated);
        for result in &results {
            trace!("Rule {} awarded {} points", result.name, result.score);
        }
        Ok(total_score(&results))
    }

    pub async fn submit(&self, payload: &I) -> Result<RecordId, ProcessError> {
        let points = match self.score(payload) {
            Ok(points) => points,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                counter!("receipts_rejected_total").increment(1);
                return Err(e);
            }
        };

        let id = RecordId::new();
        self.storage.insert(StoredRecord { id, points }).await?;

        counter!("receipts_processed_total").increment(1);
        histogram!("receipt_points").record(points as f64);
        info!("Stored {} points under id {}", points, id);
        Ok(id)
    }

    /// Returns `None` for unknown identifiers, including ones that do not parse.
    pub async fn lookup(&self, id: &str) -> Result<Option<Points>, ProcessError> {
        let Ok(record_id) = id.parse::<RecordId>() else {
            debug!("Lookup with malformed id {:?}", id);
            counter!("receipt_lookups_total", "result" => "not_found").increment(1);
            return Ok(None);
        };

        let points = self.storage.get_points(&record_id).await?;
        let outcome = if points.is_some() { "found" } else { "not_found" };
        counter!("receipt_lookups_total", "result" => outcome).increment(1);
        debug!("Lookup of {} -> {:?}", record_id, points);
        Ok(points)
    }
}
