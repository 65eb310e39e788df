use crate::registry::TransformRegistry;
use crate::transforms::{TransformContext, TransformSummary};
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Serialize;
use std::fs;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Outcome of one sub-transform within a run.
#[derive(Debug, Serialize)]
pub struct TransformOutcome {
    pub source_id: String,
    pub name: String,
    pub summary: Option<TransformSummary>,
    pub error: Option<String>,
}

/// Result of a complete pipeline run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<TransformOutcome>,
}

impl RunSummary {
    pub fn failed_sources(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_some())
            .map(|o| o.source_id.as_str())
            .collect()
    }

    pub fn records_written(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.summary.as_ref())
            .map(|s| s.records_written)
            .sum()
    }

    pub fn relationships_written(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.summary.as_ref())
            .map(|s| s.relationships_written)
            .sum()
    }
}

/// Run the selected transforms in registry order, each wrapped in the one
/// uniform fault-isolation boundary: a failing sub-transform is logged with
/// the standard's name and the run continues. The process still exits zero
/// afterwards, since skipping broken or absent sources is an expected
/// operating mode.
#[instrument(skip(registry, ctx))]
pub async fn run_transforms(
    registry: &TransformRegistry,
    selected: &[String],
    ctx: &TransformContext,
) -> RunSummary {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let mut outcomes = Vec::new();

    info!("Starting run {} for {} sources", run_id, selected.len());

    for source_id in selected {
        let transform = match registry.get(source_id) {
            Some(t) => t,
            None => {
                warn!("Unknown source specified: {}", source_id);
                println!("⚠️  Unknown source: {}", source_id);
                outcomes.push(TransformOutcome {
                    source_id: source_id.clone(),
                    name: source_id.clone(),
                    summary: None,
                    error: Some("unknown source".to_string()),
                });
                continue;
            }
        };

        info!("🔧 Transforming {}", transform.name());
        println!("🔧 Transforming {}...", transform.name());
        counter!("refdata_transform_runs_total", "source" => source_id.clone()).increment(1);
        let t_transform = std::time::Instant::now();

        match transform.run(ctx).await {
            Ok(summary) => {
                info!(
                    "✅ {}: {} records, {} relationships ({} sources skipped)",
                    transform.name(),
                    summary.records_written,
                    summary.relationships_written,
                    summary.skipped_sources
                );
                println!(
                    "   ✅ {} records, {} relationships",
                    summary.records_written, summary.relationships_written
                );
                counter!("refdata_records_written_total", "source" => source_id.clone())
                    .increment(summary.records_written as u64);
                counter!("refdata_relationships_written_total", "source" => source_id.clone())
                    .increment(summary.relationships_written as u64);
                outcomes.push(TransformOutcome {
                    source_id: source_id.clone(),
                    name: transform.name().to_string(),
                    summary: Some(summary),
                    error: None,
                });
            }
            Err(e) => {
                error!("Transform {} failed: {:#}", transform.name(), e);
                println!("   ❌ {} failed: {}", transform.name(), e);
                counter!("refdata_transform_errors_total", "source" => source_id.clone())
                    .increment(1);
                outcomes.push(TransformOutcome {
                    source_id: source_id.clone(),
                    name: transform.name().to_string(),
                    summary: None,
                    error: Some(format!("{:#}", e)),
                });
            }
        }

        histogram!("refdata_transform_duration_seconds", "source" => source_id.clone())
            .record(t_transform.elapsed().as_secs_f64());
    }

    let summary = RunSummary {
        run_id,
        started_at,
        finished_at: Utc::now(),
        outcomes,
    };

    if let Err(e) = persist_run_report(&summary) {
        warn!("Failed to write run report: {}", e);
    }

    summary
}

/// Persist the run summary as JSON under logs/ for later inspection.
fn persist_run_report(summary: &RunSummary) -> crate::error::Result<()> {
    fs::create_dir_all("logs")?;
    let filename = format!(
        "logs/run_{}_{}.json",
        summary.started_at.format("%Y%m%d_%H%M%S"),
        summary.run_id
    );
    let json_content = serde_json::to_string_pretty(summary)?;
    fs::write(&filename, json_content)?;
    info!("💾 Saved run report to {}", filename);
    Ok(())
}
