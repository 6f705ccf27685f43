//! Loader → Cleaner → Session → MetricsEngine, end to end.

use tracing::info;
use trip_clean::{Cleaner, Loader, NpyLoader};
use trip_core::{Result, Schema, Session};
use trip_metrics::{MetricsEngine, MetricsReport};

use crate::config::TrackerConfig;

/// Cleaned session plus the metrics computed from it
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub session: Session,
    pub report: MetricsReport,
}

/// Run the full pipeline for `source`, read through `loader`
pub fn run<L: Loader + ?Sized>(loader: &L, source: &str, schema: &Schema) -> Result<PipelineOutput> {
    info!(source, keypoints = schema.keypoint_count(), "loading tracking table");
    let table = loader.load(source)?;

    let session = Cleaner::from_schema(schema).clean(&table, schema)?;
    let report = MetricsEngine::new(&session).compute_all()?;

    Ok(PipelineOutput { session, report })
}

/// Run the pipeline described by a configuration, reading `.npy` tables from `data.root`
pub fn run_with_config(config: &TrackerConfig) -> Result<PipelineOutput> {
    let schema = config.schema()?;
    let loader = NpyLoader::new(&config.data.root);
    run(&loader, &config.data.source, &schema)
}
