// Base trait and utilities for per-standard source transforms

pub mod eancom;
pub mod iso20022;
pub mod jobs;
pub mod mcc;
pub mod onet;
pub mod swift;
pub mod web;
pub mod x12;

use crate::config::Paths;
use crate::records::{
    RelationshipRecord, SameAsRef, StandardRecord, ENTITY_COLUMNS, RELATIONSHIP_COLUMNS,
};
use crate::tabular::{self, Table};
use crate::text::{clean_description, slugify};
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

pub use eancom::EancomTransform;
pub use iso20022::Iso20022Transform;
pub use jobs::JobsTransform;
pub use mcc::MccTransform;
pub use onet::OnetTransform;
pub use swift::SwiftTransform;
pub use web::WebTransform;
pub use x12::X12Transform;

/// Shared run context handed to every transform.
#[derive(Debug, Clone)]
pub struct TransformContext {
    pub paths: Paths,
}

/// What one transform produced. Counts cover every output file the
/// transform wrote; `skipped_sources` counts optional source files that
/// were absent.
#[derive(Debug, Default, Serialize)]
pub struct TransformSummary {
    pub records_written: usize,
    pub relationships_written: usize,
    pub skipped_sources: usize,
    pub output_files: Vec<String>,
}

impl TransformSummary {
    pub fn merge(&mut self, other: TransformSummary) {
        self.records_written += other.records_written;
        self.relationships_written += other.relationships_written;
        self.skipped_sources += other.skipped_sources;
        self.output_files.extend(other.output_files);
    }
}

/// Core trait that all per-standard transforms implement.
#[async_trait]
pub trait SourceTransform: Send + Sync {
    /// Unique identifier for this source (CLI selection key)
    fn source_id(&self) -> &'static str;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Convert this standard's source tables into standardized output
    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary>;
}

/// Shared utilities for transforms.
pub struct TransformUtils;

impl TransformUtils {
    /// Build a standard record: id slugged from the given label, description
    /// collapsed to a single line.
    pub fn standard_record(
        ns: &str,
        entity_type: &str,
        id_label: &str,
        name: String,
        description: &str,
        code: &str,
    ) -> StandardRecord {
        StandardRecord {
            ns: ns.to_string(),
            entity_type: entity_type.to_string(),
            id: slugify(id_label),
            name,
            description: clean_description(Some(description)),
            code: code.to_string(),
            same_as: None,
        }
    }

    /// Same as `standard_record`, carrying a canonical back-reference.
    pub fn superset_record(
        ns: &str,
        entity_type: &str,
        id_label: &str,
        name: String,
        description: &str,
        code: &str,
        same_as: Option<SameAsRef>,
    ) -> StandardRecord {
        let mut record = Self::standard_record(ns, entity_type, id_label, name, description, code);
        record.same_as = same_as;
        record
    }

    /// Read an optional TSV source. A missing file is the expected "skip
    /// this sub-transform" case: logged, returns None.
    pub fn read_optional_tsv(path: &Path) -> Result<Option<Table>> {
        if !path.exists() {
            warn!("Source file {} not found; skipping", path.display());
            return Ok(None);
        }
        Ok(Some(tabular::read_tsv(path)?))
    }

    /// CSV counterpart of `read_optional_tsv`.
    pub fn read_optional_csv(path: &Path) -> Result<Option<Table>> {
        if !path.exists() {
            warn!("Source file {} not found; skipping", path.display());
            return Ok(None);
        }
        Ok(Some(tabular::read_csv(path)?))
    }

    /// Write an entity table to `.data/<Namespace>.<EntityType>.tsv`.
    pub fn write_entities(
        ctx: &TransformContext,
        ns: &str,
        entity_type: &str,
        records: &[StandardRecord],
    ) -> Result<TransformSummary> {
        let path = ctx.paths.entity_file(ns, entity_type);
        let rows: Vec<Vec<String>> = records.iter().map(|r| r.to_row()).collect();
        let written = tabular::write_table(&path, &ENTITY_COLUMNS, &rows)?;

        let mut summary = TransformSummary::default();
        if written {
            info!("Wrote {} {}.{} records", records.len(), ns, entity_type);
            summary.records_written = records.len();
            summary.output_files.push(path.display().to_string());
        }
        Ok(summary)
    }

    /// Write a relationship table to
    /// `.data/relationships/<Namespace>.<FromType>.<ToType>.tsv`.
    /// `extra_columns` are appended after the seven standard columns.
    pub fn write_relationships(
        ctx: &TransformContext,
        ns: &str,
        from_type: &str,
        to_type: &str,
        extra_columns: &[&str],
        edges: &[RelationshipRecord],
    ) -> Result<TransformSummary> {
        let path = ctx.paths.relationship_file(ns, from_type, to_type);
        let mut columns: Vec<&str> = RELATIONSHIP_COLUMNS.to_vec();
        columns.extend_from_slice(extra_columns);
        let rows: Vec<Vec<String>> = edges.iter().map(|e| e.to_row()).collect();
        let written = tabular::write_table(&path, &columns, &rows)?;

        let mut summary = TransformSummary::default();
        if written {
            info!(
                "Wrote {} {}.{}.{} relationships",
                edges.len(),
                ns,
                from_type,
                to_type
            );
            summary.relationships_written = edges.len();
            summary.output_files.push(path.display().to_string());
        }
        Ok(summary)
    }

    /// The per-standard display-name convention: `<code> - <title>`.
    pub fn coded_name(code: &str, title: &str) -> String {
        format!("{} - {}", code, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_record_slugs_and_cleans() {
        let record = TransformUtils::standard_record(
            "Onet",
            "Occupation",
            "chief executives",
            TransformUtils::coded_name("11-1011.00", "Chief Executives"),
            "Determine and formulate\tpolicies",
            "11-1011.00",
        );
        assert_eq!(record.id, "Chief_Executives");
        assert_eq!(record.name, "11-1011.00 - Chief Executives");
        assert_eq!(record.description, "Determine and formulate policies");
        assert!(record.same_as.is_none());
    }
}
