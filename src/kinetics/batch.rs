use std::sync::Arc;

use super::engine::DefaultKineticsEngine;
use super::types::{AnalysisResult, KineticsEngine, KineticsError, SubjectHistory};

/// Analyze many subjects on the blocking pool. Results keep input order.
pub async fn analyze_batch(
    engine: Arc<DefaultKineticsEngine>,
    jobs: Vec<SubjectHistory>,
) -> Result<Vec<(String, AnalysisResult)>, KineticsError> {
    let total = jobs.len();
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let engine = Arc::clone(&engine);
            tokio::task::spawn_blocking(move || {
                let result = engine.analyze_subject(&job.subject_id, &job.series)?;
                Ok::<_, KineticsError>((job.subject_id, result))
            })
        })
        .collect();

    let mut results = Vec::with_capacity(total);
    for handle in handles {
        let outcome = handle
            .await
            .map_err(|e| KineticsError::Task(e.to_string()))??;
        results.push(outcome);
    }

    tracing::info!(subjects = total, "Batch analysis complete");
    Ok(results)
}
