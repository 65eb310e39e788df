use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{MCC_NS, MCC_SOURCE};
use crate::records::RelationshipRecord;
use crate::relate::{self, RangeBand};
use crate::text::slugify;

/// ISO 18245 merchant category code range bands. Each MCC belongs to the
/// first band containing it.
const CATEGORY_RANGES: &[(i64, i64, &str)] = &[
    (1, 1499, "Agricultural Services"),
    (1500, 2999, "Contracted Services"),
    (3000, 3299, "Airlines"),
    (3300, 3499, "Car Rental"),
    (3500, 3999, "Lodging"),
    (4000, 4799, "Transportation Services"),
    (4800, 4999, "Utility Services"),
    (5000, 5599, "Retail Outlet Services"),
    (5600, 5699, "Clothing Stores"),
    (5700, 7299, "Miscellaneous Stores"),
    (7300, 7999, "Business Services"),
    (8000, 8999, "Professional Services and Membership Organizations"),
    (9000, 9999, "Government Services"),
];

/// Transform for ISO 18245 merchant category codes. The source is the one
/// comma-separated file in the tree, so this uses the quote-aware CSV
/// reader; category membership is derived by range join.
pub struct MccTransform;

impl MccTransform {
    pub fn new() -> Self {
        Self
    }

    fn category_bands() -> Vec<RangeBand> {
        CATEGORY_RANGES
            .iter()
            .map(|(start, end, title)| RangeBand {
                start: *start,
                end: *end,
                parent_id: slugify(title),
            })
            .collect()
    }
}

#[async_trait]
impl SourceTransform for MccTransform {
    fn source_id(&self) -> &'static str {
        MCC_SOURCE
    }

    fn name(&self) -> &'static str {
        "Merchant Category Codes"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();

        // Category ranges come from the hardcoded table, not a source file
        let category_records: Vec<_> = CATEGORY_RANGES
            .iter()
            .map(|(start, end, title)| {
                let code = format!("{:04}-{:04}", start, end);
                TransformUtils::standard_record(
                    MCC_NS,
                    "CategoryRange",
                    title,
                    TransformUtils::coded_name(&code, title),
                    "",
                    &code,
                )
            })
            .collect();
        summary.merge(TransformUtils::write_entities(
            ctx,
            MCC_NS,
            "CategoryRange",
            &category_records,
        )?);

        match TransformUtils::read_optional_csv(&ctx.paths.source_file("Finance/Mcc.csv"))? {
            Some(table) => {
                table.require_columns(&["mcc", "description"])?;
                let bands = Self::category_bands();
                let mut records = Vec::new();
                let mut edges: Vec<RelationshipRecord> = Vec::new();

                for row in &table.rows {
                    let code = row.require("mcc")?;
                    let title = row.require("description")?;
                    let record = TransformUtils::standard_record(
                        MCC_NS,
                        "MerchantCategory",
                        title,
                        TransformUtils::coded_name(code, title),
                        row.get("notes"),
                        code,
                    );

                    match relate::range_lookup(&bands, code) {
                        Some(band) => edges.push(relate::edge(
                            (MCC_NS, "MerchantCategory", &record.id),
                            (MCC_NS, "CategoryRange", &band.parent_id),
                            "belongs_to",
                        )),
                        None => debug!("MCC {} falls outside all category ranges", code),
                    }
                    records.push(record);
                }

                summary.merge(TransformUtils::write_entities(
                    ctx,
                    MCC_NS,
                    "MerchantCategory",
                    &records,
                )?);
                summary.merge(TransformUtils::write_relationships(
                    ctx,
                    MCC_NS,
                    "MerchantCategory",
                    "CategoryRange",
                    &[],
                    &edges,
                )?);
            }
            None => summary.skipped_sources += 1,
        }

        Ok(summary)
    }
}

impl Default for MccTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_bands_cover_known_codes() {
        let bands = MccTransform::category_bands();
        assert_eq!(
            relate::range_lookup(&bands, "5812").unwrap().parent_id,
            "Miscellaneous_Stores"
        );
        assert_eq!(
            relate::range_lookup(&bands, "3000").unwrap().parent_id,
            "Airlines"
        );
        assert!(relate::range_lookup(&bands, "0").is_none());
    }
}
