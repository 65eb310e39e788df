use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::warn;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{JOBS_NS, JOBS_SOURCE, ONET_NS};
use crate::records::{SameAsRef, StandardRecord, ENTITY_COLUMNS_WITH_SAME_AS};
use crate::relate;
use crate::tabular;
use crate::text::slugify;

/// Hand-curated jobs absent from the canonical occupation table:
/// (title, description, category).
const ADDITIONAL_JOBS: &[(&str, &str, &str)] = &[
    (
        "Prompt Engineer",
        "Designs, tests, and refines natural-language instructions that steer large language models toward reliable outputs.",
        "Technology",
    ),
    (
        "Developer Advocate",
        "Represents a platform to its developer community through documentation, sample code, and conference talks.",
        "Technology",
    ),
    (
        "Site Reliability Engineer",
        "Applies software engineering practice to infrastructure operations, availability targets, and incident response.",
        "Technology",
    ),
    (
        "Social Media Manager",
        "Plans and publishes an organization's presence across social platforms and reports on audience engagement.",
        "Marketing",
    ),
    (
        "Growth Marketer",
        "Runs data-driven experiments across acquisition, activation, and retention funnels.",
        "Marketing",
    ),
    (
        "Sustainability Officer",
        "Develops and oversees programs that reduce an organization's environmental footprint and report on compliance.",
        "Operations",
    ),
    (
        "Drone Operator",
        "Pilots unmanned aircraft for surveying, inspection, photography, and delivery work.",
        "Operations",
    ),
];

/// Superset transform building the Jobs namespace: the union of the
/// previously generated canonical occupation table plus the hand-curated
/// additions above. Canonical rows carry a sameAs back-reference to their
/// source record; additions do not, signaling they are original to this
/// namespace. The category taxonomy and membership edges are derived from
/// the additions' category field only.
pub struct JobsTransform;

impl JobsTransform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceTransform for JobsTransform {
    fn source_id(&self) -> &'static str {
        JOBS_SOURCE
    }

    fn name(&self) -> &'static str {
        "Jobs Superset"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();
        let mut jobs: Vec<StandardRecord> = Vec::new();

        // Canonical rows first, so output preserves canonical-then-additional order
        let canonical_path = ctx.paths.entity_file(ONET_NS, "Occupation");
        if canonical_path.exists() {
            let canonical = tabular::read_tsv(&canonical_path)?;
            for row in &canonical.rows {
                jobs.push(TransformUtils::superset_record(
                    JOBS_NS,
                    "Job",
                    row.require("id")?,
                    row.require("name")?.to_string(),
                    row.get("description"),
                    row.get("code"),
                    Some(SameAsRef {
                        ns: ONET_NS.to_string(),
                        entity_type: "Occupation".to_string(),
                        id: row.require("id")?.to_string(),
                    }),
                ));
            }
        } else {
            warn!(
                "Canonical table {} not found; Jobs will contain only hand-curated entries",
                canonical_path.display()
            );
            summary.skipped_sources += 1;
        }

        let mut edges = Vec::new();
        let mut categories: BTreeMap<String, String> = BTreeMap::new();
        for (title, description, category) in ADDITIONAL_JOBS {
            let record = TransformUtils::superset_record(
                JOBS_NS,
                "Job",
                title,
                title.to_string(),
                description,
                "",
                None,
            );
            let category_id = categories
                .entry(category.to_string())
                .or_insert_with(|| slugify(category))
                .clone();
            edges.push(relate::edge(
                (JOBS_NS, "Job", &record.id),
                (JOBS_NS, "JobCategory", &category_id),
                "belongs_to",
            ));
            jobs.push(record);
        }

        // Jobs carry the sameAs provenance column, so the file is written
        // with the extended column list rather than through write_entities
        let path = ctx.paths.entity_file(JOBS_NS, "Job");
        let rows: Vec<Vec<String>> = jobs.iter().map(|j| j.to_row_with_same_as()).collect();
        if tabular::write_table(&path, &ENTITY_COLUMNS_WITH_SAME_AS, &rows)? {
            summary.records_written += jobs.len();
            summary.output_files.push(path.display().to_string());
        }

        let category_records: Vec<_> = categories
            .iter()
            .map(|(name, _)| {
                TransformUtils::standard_record(JOBS_NS, "JobCategory", name, name.clone(), "", "")
            })
            .collect();
        summary.merge(TransformUtils::write_entities(
            ctx,
            JOBS_NS,
            "JobCategory",
            &category_records,
        )?);
        summary.merge(TransformUtils::write_relationships(
            ctx,
            JOBS_NS,
            "Job",
            "JobCategory",
            &[],
            &edges,
        )?);

        Ok(summary)
    }
}

impl Default for JobsTransform {
    fn default() -> Self {
        Self::new()
    }
}
