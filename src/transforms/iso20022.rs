use anyhow::Result;
use async_trait::async_trait;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{ISO20022_NS, ISO20022_SOURCE};

/// Transform for ISO 20022 financial message definitions. The business
/// area is the code prefix before the first dot (`pacs.008.001.08` →
/// `pacs`) and is folded into the display name.
pub struct Iso20022Transform;

impl Iso20022Transform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceTransform for Iso20022Transform {
    fn source_id(&self) -> &'static str {
        ISO20022_SOURCE
    }

    fn name(&self) -> &'static str {
        "ISO 20022"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();

        match TransformUtils::read_optional_tsv(&ctx.paths.source_file("Finance/Iso20022.tsv"))? {
            Some(table) => {
                table.require_columns(&["code", "name"])?;
                let mut records = Vec::new();
                for row in &table.rows {
                    let code = row.require("code")?;
                    let title = row.require("name")?;
                    let business_area = code.split('.').next().unwrap_or("");
                    let name = if business_area.is_empty() {
                        TransformUtils::coded_name(code, title)
                    } else {
                        format!("{} - {} ({})", code, title, business_area)
                    };
                    records.push(TransformUtils::standard_record(
                        ISO20022_NS,
                        "MessageDefinition",
                        title,
                        name,
                        row.get("description"),
                        code,
                    ));
                }
                summary.merge(TransformUtils::write_entities(
                    ctx,
                    ISO20022_NS,
                    "MessageDefinition",
                    &records,
                )?);
            }
            None => summary.skipped_sources += 1,
        }

        Ok(summary)
    }
}

impl Default for Iso20022Transform {
    fn default() -> Self {
        Self::new()
    }
}
