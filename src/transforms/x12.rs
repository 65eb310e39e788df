use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{EDI_NS, X12_SOURCE};
use crate::relate;
use crate::records::{RelationshipRecord, StandardRecord};
use crate::tabular::Table;

/// Transform for the ANSI X12 EDI reference tables: transaction sets,
/// segments, and elements, plus the part_of edges linking them.
pub struct X12Transform;

impl X12Transform {
    pub fn new() -> Self {
        Self
    }

    fn map_entities(&self, table: &Table, entity_type: &str) -> Result<Vec<StandardRecord>> {
        table.require_columns(&["code", "name"])?;
        let mut records = Vec::new();
        for row in &table.rows {
            let code = row.require("code")?;
            let title = row.require("name")?;
            records.push(TransformUtils::standard_record(
                EDI_NS,
                entity_type,
                title,
                TransformUtils::coded_name(code, title),
                row.get("description"),
                code,
            ));
        }
        Ok(records)
    }

    /// Edges from a child table whose `parents_column` holds a
    /// comma-separated list of parent codes. Parent codes are resolved to
    /// slug ids through the parent records; unknown codes drop the edge.
    fn membership_edges(
        &self,
        child_table: &Table,
        children: &[StandardRecord],
        parents: &[StandardRecord],
        parents_column: &str,
        parent_type: &str,
        child_type: &str,
    ) -> Vec<RelationshipRecord> {
        let parent_ids: HashMap<&str, &str> = parents
            .iter()
            .map(|p| (p.code.as_str(), p.id.as_str()))
            .collect();

        let mut edges = Vec::new();
        for (row, child) in child_table.rows.iter().zip(children) {
            for parent_code in row
                .get(parents_column)
                .split(',')
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
            {
                match parent_ids.get(parent_code) {
                    Some(parent_id) => edges.push(relate::edge(
                        (EDI_NS, child_type, &child.id),
                        (EDI_NS, parent_type, parent_id),
                        "part_of",
                    )),
                    None => {
                        debug!(
                            "No {} with code {} for {} {}",
                            parent_type, parent_code, child_type, child.id
                        );
                    }
                }
            }
        }
        edges
    }
}

#[async_trait]
impl SourceTransform for X12Transform {
    fn source_id(&self) -> &'static str {
        X12_SOURCE
    }

    fn name(&self) -> &'static str {
        "ANSI X12 EDI"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();

        let transaction_sets = match TransformUtils::read_optional_tsv(
            &ctx.paths.source_file("EDI/X12/TransactionSets.tsv"),
        )? {
            Some(table) => {
                let records = self.map_entities(&table, "TransactionSet")?;
                summary.merge(TransformUtils::write_entities(
                    ctx,
                    EDI_NS,
                    "TransactionSet",
                    &records,
                )?);
                Some(records)
            }
            None => {
                summary.skipped_sources += 1;
                None
            }
        };

        let segments =
            match TransformUtils::read_optional_tsv(&ctx.paths.source_file("EDI/X12/Segments.tsv"))?
            {
                Some(table) => {
                    let records = self.map_entities(&table, "Segment")?;
                    summary.merge(TransformUtils::write_entities(
                        ctx, EDI_NS, "Segment", &records,
                    )?);

                    if let Some(parents) = &transaction_sets {
                        let edges = self.membership_edges(
                            &table,
                            &records,
                            parents,
                            "transactionSets",
                            "TransactionSet",
                            "Segment",
                        );
                        summary.merge(TransformUtils::write_relationships(
                            ctx,
                            EDI_NS,
                            "Segment",
                            "TransactionSet",
                            &[],
                            &edges,
                        )?);
                    }
                    Some(records)
                }
                None => {
                    summary.skipped_sources += 1;
                    None
                }
            };

        match TransformUtils::read_optional_tsv(&ctx.paths.source_file("EDI/X12/Elements.tsv"))? {
            Some(table) => {
                let records = self.map_entities(&table, "Element")?;
                summary.merge(TransformUtils::write_entities(
                    ctx, EDI_NS, "Element", &records,
                )?);

                if let Some(parents) = &segments {
                    let edges = self.membership_edges(
                        &table, &records, parents, "segments", "Segment", "Element",
                    );
                    summary.merge(TransformUtils::write_relationships(
                        ctx, EDI_NS, "Element", "Segment", &[], &edges,
                    )?);
                }
            }
            None => summary.skipped_sources += 1,
        }

        Ok(summary)
    }
}

impl Default for X12Transform {
    fn default() -> Self {
        Self::new()
    }
}
