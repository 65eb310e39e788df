use crate::config::Paths;
use crate::error::Result;
use crate::tabular;
use std::collections::HashSet;
use std::fs;
use tracing::{info, warn};

/// One relationship endpoint that does not resolve to any entity record.
#[derive(Debug)]
pub struct DanglingRef {
    pub file: String,
    pub row: usize,
    pub ns: String,
    pub entity_type: String,
    pub id: String,
}

/// Result of a referential-integrity pass over the output directory.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub entity_files: usize,
    pub entities: usize,
    pub relationship_files: usize,
    pub edges_checked: usize,
    pub dangling: Vec<DanglingRef>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}

/// Check that every relationship endpoint in `.data/relationships/`
/// resolves to an entity in `.data/`. Dangling references are reported,
/// never fatal: the transforms do not enforce referential integrity and a
/// smaller-than-expected edge count is an expected operating mode.
pub fn check_references(paths: &Paths) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    let mut known: HashSet<(String, String, String)> = HashSet::new();

    if !paths.data_root.exists() {
        warn!("Output directory {} does not exist", paths.data_root.display());
        return Ok(report);
    }

    // Pass 1: collect every (ns, type, id) from the entity tables
    for entry in fs::read_dir(&paths.data_root)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("tsv") || !path.is_file() {
            continue;
        }
        let table = tabular::read_tsv(&path)?;
        report.entity_files += 1;
        for row in &table.rows {
            known.insert((
                row.get("ns").to_string(),
                row.get("type").to_string(),
                row.get("id").to_string(),
            ));
            report.entities += 1;
        }
    }

    // Pass 2: resolve both endpoints of every edge
    let relationships_root = paths.relationships_root();
    if relationships_root.exists() {
        for entry in fs::read_dir(&relationships_root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("tsv") {
                continue;
            }
            let table = tabular::read_tsv(&path)?;
            report.relationship_files += 1;
            for row in &table.rows {
                report.edges_checked += 1;
                for prefix in ["from", "to"] {
                    let ns = row.get(&format!("{}Ns", prefix)).to_string();
                    let entity_type = row.get(&format!("{}Type", prefix)).to_string();
                    let id = row.get(&format!("{}Id", prefix)).to_string();
                    if !known.contains(&(ns.clone(), entity_type.clone(), id.clone())) {
                        report.dangling.push(DanglingRef {
                            file: table.file.clone(),
                            row: row.index,
                            ns,
                            entity_type,
                            id,
                        });
                    }
                }
            }
        }
    }

    if report.is_clean() {
        info!(
            "Reference check clean: {} edges across {} files resolve against {} entities",
            report.edges_checked, report.relationship_files, report.entities
        );
    } else {
        for dangling in &report.dangling {
            warn!(
                "Dangling reference in {} row {}: {}:{}:{}",
                dangling.file, dangling.row, dangling.ns, dangling.entity_type, dangling.id
            );
        }
        warn!(
            "{} dangling references across {} relationship files",
            report.dangling.len(),
            report.relationship_files
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_output_dir_is_empty_report() {
        let dir = tempdir().unwrap();
        let paths = Paths::rooted_at(dir.path());
        let report = check_references(&paths).unwrap();
        assert_eq!(report.entity_files, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_detects_dangling_endpoint() {
        let dir = tempdir().unwrap();
        let paths = Paths::rooted_at(dir.path());
        fs::create_dir_all(paths.relationships_root()).unwrap();

        fs::write(
            paths.data_root.join("Ns.Thing.tsv"),
            "ns\ttype\tid\tname\tdescription\tcode\nNs\tThing\tAlpha\tAlpha\t\tA1\n",
        )
        .unwrap();
        fs::write(
            paths.relationships_root().join("Ns.Thing.Thing.tsv"),
            "fromNs\tfromType\tfromId\ttoNs\ttoType\ttoId\trelationshipType\n\
             Ns\tThing\tAlpha\tNs\tThing\tMissing\tchild_of\n",
        )
        .unwrap();

        let report = check_references(&paths).unwrap();
        assert_eq!(report.edges_checked, 1);
        assert_eq!(report.dangling.len(), 1);
        assert_eq!(report.dangling[0].id, "Missing");
    }
}
