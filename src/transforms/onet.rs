use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use super::{SourceTransform, TransformContext, TransformSummary, TransformUtils};
use crate::constants::{ONET_NS, ONET_SOURCE};
use crate::records::RelationshipRecord;

/// Transform for the O*NET occupational database: occupations, skills, and
/// the scored requires_skill edges between them. The edge file carries
/// `importance` and `level` as extra attribute columns.
pub struct OnetTransform;

impl OnetTransform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceTransform for OnetTransform {
    fn source_id(&self) -> &'static str {
        ONET_SOURCE
    }

    fn name(&self) -> &'static str {
        "O*NET Occupations"
    }

    async fn run(&self, ctx: &TransformContext) -> Result<TransformSummary> {
        let mut summary = TransformSummary::default();

        let occupations =
            match TransformUtils::read_optional_tsv(&ctx.paths.source_file("Onet/Occupations.tsv"))?
            {
                Some(table) => {
                    table.require_columns(&["code", "title"])?;
                    let mut records = Vec::new();
                    for row in &table.rows {
                        let code = row.require("code")?;
                        let title = row.require("title")?;
                        records.push(TransformUtils::standard_record(
                            ONET_NS,
                            "Occupation",
                            title,
                            title.to_string(),
                            row.get("description"),
                            code,
                        ));
                    }
                    summary.merge(TransformUtils::write_entities(
                        ctx,
                        ONET_NS,
                        "Occupation",
                        &records,
                    )?);
                    Some(records)
                }
                None => {
                    summary.skipped_sources += 1;
                    None
                }
            };

        let skills =
            match TransformUtils::read_optional_tsv(&ctx.paths.source_file("Onet/Skills.tsv"))? {
                Some(table) => {
                    table.require_columns(&["elementId", "elementName"])?;
                    let mut records = Vec::new();
                    for row in &table.rows {
                        let code = row.require("elementId")?;
                        let title = row.require("elementName")?;
                        records.push(TransformUtils::standard_record(
                            ONET_NS,
                            "Skill",
                            title,
                            title.to_string(),
                            row.get("description"),
                            code,
                        ));
                    }
                    summary.merge(TransformUtils::write_entities(
                        ctx, ONET_NS, "Skill", &records,
                    )?);
                    Some(records)
                }
                None => {
                    summary.skipped_sources += 1;
                    None
                }
            };

        // The edge table joins on codes; both entity tables must be present
        if let (Some(occupations), Some(skills)) = (&occupations, &skills) {
            match TransformUtils::read_optional_tsv(
                &ctx.paths.source_file("Onet/OccupationSkills.tsv"),
            )? {
                Some(table) => {
                    table.require_columns(&["occupationCode", "skillId"])?;
                    let occupation_ids: HashMap<&str, &str> = occupations
                        .iter()
                        .map(|o| (o.code.as_str(), o.id.as_str()))
                        .collect();
                    let skill_ids: HashMap<&str, &str> = skills
                        .iter()
                        .map(|s| (s.code.as_str(), s.id.as_str()))
                        .collect();

                    let mut edges = Vec::new();
                    for row in &table.rows {
                        let occupation_code = row.require("occupationCode")?;
                        let skill_id = row.require("skillId")?;
                        let (from_id, to_id) = match (
                            occupation_ids.get(occupation_code),
                            skill_ids.get(skill_id),
                        ) {
                            (Some(from), Some(to)) => (*from, *to),
                            _ => {
                                debug!(
                                    "Dropping edge {} -> {}: unresolved endpoint",
                                    occupation_code, skill_id
                                );
                                continue;
                            }
                        };
                        edges.push(RelationshipRecord {
                            from_ns: ONET_NS.to_string(),
                            from_type: "Occupation".to_string(),
                            from_id: from_id.to_string(),
                            to_ns: ONET_NS.to_string(),
                            to_type: "Skill".to_string(),
                            to_id: to_id.to_string(),
                            relationship_type: "requires_skill".to_string(),
                            extra: vec![
                                row.get("importance").to_string(),
                                row.get("level").to_string(),
                            ],
                        });
                    }

                    summary.merge(TransformUtils::write_relationships(
                        ctx,
                        ONET_NS,
                        "Occupation",
                        "Skill",
                        &["importance", "level"],
                        &edges,
                    )?);
                }
                None => summary.skipped_sources += 1,
            }
        }

        Ok(summary)
    }
}

impl Default for OnetTransform {
    fn default() -> Self {
        Self::new()
    }
}
