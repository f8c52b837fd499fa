use std::error::Error;
use std::sync::Arc;

use processing::{
    executable_utils::{AppState, initialize_executable, install_metrics_recorder, run_backend},
    processor::Processor,
    storage::{InMemoryScoreStorage, ScoreStorage},
};
use receipts::{model::ReceiptPayload, rules::get_rule_based_scorer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;
    let metrics = install_metrics_recorder()?;

    let storage: Arc<dyn ScoreStorage> = Arc::new(InMemoryScoreStorage::new());
    let scorer = get_rule_based_scorer(config.scoring.description_rounding);
    tracing::info!(
        rounding = ?config.scoring.description_rounding,
        "Scoring receipts with {} rules",
        scorer.rule_count()
    );

    let processor = Arc::new(Processor::<ReceiptPayload, _>::new(scorer, storage));
    run_backend(config.backend, AppState::new(processor, Some(metrics))).await
}
