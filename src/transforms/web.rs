use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{WEB_NS, WEB_SOURCE};
use crate::relate;
use crate::text::slugify;

/// Transform for the W3C HTML element reference. The element table carries
/// a content-category column from which the category taxonomy and the
/// belongs_to membership edges are derived.
pub struct WebTransform;

impl WebTransform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceTransform for WebTransform {
    fn source_id(&self) -> &'static str {
        WEB_SOURCE
    }

    fn name(&self) -> &'static str {
        "W3C HTML"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();

        match TransformUtils::read_optional_tsv(&ctx.paths.source_file("W3c/HtmlElements.tsv"))? {
            Some(table) => {
                table.require_columns(&["element"])?;
                let mut elements = Vec::new();
                let mut edges = Vec::new();
                // BTreeMap keeps the derived taxonomy in stable name order
                let mut categories: BTreeMap<String, String> = BTreeMap::new();

                for row in &table.rows {
                    let tag = row.require("element")?;
                    let record = TransformUtils::standard_record(
                        WEB_NS,
                        "HtmlElement",
                        tag,
                        tag.to_string(),
                        row.get("description"),
                        tag,
                    );

                    let category = row.get("category");
                    if !category.is_empty() {
                        let category_id = categories
                            .entry(category.to_string())
                            .or_insert_with(|| slugify(category))
                            .clone();
                        edges.push(relate::edge(
                            (WEB_NS, "HtmlElement", &record.id),
                            (WEB_NS, "HtmlElementCategory", &category_id),
                            "belongs_to",
                        ));
                    }
                    elements.push(record);
                }

                let category_records: Vec<_> = categories
                    .iter()
                    .map(|(name, _)| {
                        TransformUtils::standard_record(
                            WEB_NS,
                            "HtmlElementCategory",
                            name,
                            name.clone(),
                            "",
                            "",
                        )
                    })
                    .collect();

                summary.merge(TransformUtils::write_entities(
                    ctx,
                    WEB_NS,
                    "HtmlElement",
                    &elements,
                )?);
                summary.merge(TransformUtils::write_entities(
                    ctx,
                    WEB_NS,
                    "HtmlElementCategory",
                    &category_records,
                )?);
                summary.merge(TransformUtils::write_relationships(
                    ctx,
                    WEB_NS,
                    "HtmlElement",
                    "HtmlElementCategory",
                    &[],
                    &edges,
                )?);
            }
            None => summary.skipped_sources += 1,
        }

        Ok(summary)
    }
}

impl Default for WebTransform {
    fn default() -> Self {
        Self::new()
    }
}
