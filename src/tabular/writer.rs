use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::info;

/// Serialize rows to a tab-separated file with the given column order.
///
/// Creates the destination directory if absent. An empty row set skips the
/// write entirely (no zero-byte file) and returns `false`; this is logged
/// as a notice, not treated as an error.
///
/// Field values have embedded tabs and newlines replaced with a space and
/// carriage returns removed. No delimiter quoting is performed: callers
/// are responsible for pre-sanitizing values (see `text::clean_description`),
/// and any value still containing a tab would corrupt column alignment.
pub fn write_table(path: &Path, columns: &[&str], rows: &[Vec<String>]) -> Result<bool> {
    if rows.is_empty() {
        info!("No records for {}; skipping write", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.join("\t"));
    for row in rows {
        let sanitized: Vec<String> = row.iter().map(|value| sanitize_field(value)).collect();
        lines.push(sanitized.join("\t"));
    }

    fs::write(path, lines.join("\n") + "\n")?;
    Ok(true)
}

fn sanitize_field(value: &str) -> String {
    value
        .replace('\r', "")
        .replace(['\t', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::parser::read_tsv;
    use tempfile::tempdir;

    #[test]
    fn test_write_skipped_on_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("Empty.Entity.tsv");
        let written = write_table(&path, &["ns", "code"], &[]).unwrap();
        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_creates_directories_and_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("Out.tsv");
        let rows = vec![vec!["A".to_string(), "1".to_string()]];
        assert!(write_table(&path, &["name", "code"], &rows).unwrap());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name\tcode\nA\t1\n");
    }

    #[test]
    fn test_write_sanitizes_embedded_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Out.tsv");
        let rows = vec![vec!["has\ttab".to_string(), "has\r\nnewline".to_string()]];
        write_table(&path, &["a", "b"], &rows).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a\tb\nhas tab\thas newline\n");
    }

    #[test]
    fn test_round_trip_with_parser() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Round.tsv");
        let rows = vec![
            vec!["001".to_string(), "Widget".to_string()],
            vec!["002".to_string(), "Gadget".to_string()],
        ];
        write_table(&path, &["code", "name"], &rows).unwrap();

        let table = read_tsv(&path).unwrap();
        assert_eq!(table.headers, vec!["code", "name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("code"), "001");
        assert_eq!(table.rows[1].get("name"), "Gadget");
    }
}
