// Cascading catalog pipeline: regions -> selection -> species -> classification -> measures

pub mod catalog_loader;
pub mod classifier;
pub mod measures;
pub mod orchestrator;
pub mod region_selector;
pub mod species_loader;

#[cfg(test)]
pub(crate) mod fakes;

pub use classifier::{classify, Classification};
pub use measures::{MeasuresFanoutCoordinator, MeasuresIndex};
pub use orchestrator::{Orchestrator, PipelineState};
pub use region_selector::select_random;

use std::future::Future;
use std::time::Instant;
use tracing::warn;

use crate::error::Result;
use crate::observability::catalog as metrics;

/// Awaits one catalog request, recording count, duration and failure for its stage.
pub(crate) async fn observed<T, F>(stage: &'static str, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    metrics::request_issued(stage);
    let started = Instant::now();
    let outcome = request.await;
    metrics::request_duration(stage, started.elapsed().as_secs_f64());

    if let Err(e) = &outcome {
        metrics::request_failed(stage);
        let kind = if e.is_decode() {
            "decode"
        } else if e.is_transport() {
            "transport"
        } else {
            "other"
        };
        warn!(stage, kind, error = %e, "Catalog request failed");
    }
    outcome
}
