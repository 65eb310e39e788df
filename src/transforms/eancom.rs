use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{EANCOM_NS, EANCOM_SOURCE};
use crate::relate;

/// Transform for the GS1 EANCOM subset of EDIFACT: messages and the
/// segments composing them.
pub struct EancomTransform;

impl EancomTransform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceTransform for EancomTransform {
    fn source_id(&self) -> &'static str {
        EANCOM_SOURCE
    }

    fn name(&self) -> &'static str {
        "GS1 EANCOM"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();

        let messages = match TransformUtils::read_optional_tsv(
            &ctx.paths.source_file("EDI/EANCOM/Messages.tsv"),
        )? {
            Some(table) => {
                table.require_columns(&["code", "name"])?;
                let mut records = Vec::new();
                for row in &table.rows {
                    let code = row.require("code")?;
                    let title = row.require("name")?;
                    records.push(TransformUtils::standard_record(
                        EANCOM_NS,
                        "Message",
                        title,
                        TransformUtils::coded_name(code, title),
                        row.get("description"),
                        code,
                    ));
                }
                summary.merge(TransformUtils::write_entities(
                    ctx, EANCOM_NS, "Message", &records,
                )?);
                Some(records)
            }
            None => {
                summary.skipped_sources += 1;
                None
            }
        };

        match TransformUtils::read_optional_tsv(&ctx.paths.source_file("EDI/EANCOM/Segments.tsv"))?
        {
            Some(table) => {
                table.require_columns(&["code", "name"])?;
                let mut records = Vec::new();
                let mut edges = Vec::new();
                let message_ids: HashMap<&str, &str> = messages
                    .iter()
                    .flatten()
                    .map(|m| (m.code.as_str(), m.id.as_str()))
                    .collect();

                for row in &table.rows {
                    let code = row.require("code")?;
                    let title = row.require("name")?;
                    let record = TransformUtils::standard_record(
                        EANCOM_NS,
                        "Segment",
                        title,
                        TransformUtils::coded_name(code, title),
                        row.get("description"),
                        code,
                    );

                    for message_code in row
                        .get("messages")
                        .split(',')
                        .map(|c| c.trim())
                        .filter(|c| !c.is_empty())
                    {
                        match message_ids.get(message_code) {
                            Some(message_id) => edges.push(relate::edge(
                                (EANCOM_NS, "Segment", &record.id),
                                (EANCOM_NS, "Message", message_id),
                                "part_of",
                            )),
                            None => debug!(
                                "No message with code {} for segment {}",
                                message_code, record.id
                            ),
                        }
                    }
                    records.push(record);
                }

                summary.merge(TransformUtils::write_entities(
                    ctx, EANCOM_NS, "Segment", &records,
                )?);
                summary.merge(TransformUtils::write_relationships(
                    ctx, EANCOM_NS, "Segment", "Message", &[], &edges,
                )?);
            }
            None => summary.skipped_sources += 1,
        }

        Ok(summary)
    }
}

impl Default for EancomTransform {
    fn default() -> Self {
        Self::new()
    }
}
