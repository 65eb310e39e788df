use crate::error::{Result, TransformError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One parsed row, keyed by header name. Values are pre-trimmed; headers
/// the line was too short to reach map to the empty string.
#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based data row number (header row excluded), for error messages
    pub index: usize,
    /// Source file name, for error messages
    pub file: String,
    values: HashMap<String, String>,
}

impl Row {
    /// Look up an optional field; missing columns read as empty string.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(|v| v.as_str()).unwrap_or("")
    }

    /// Look up a field that the transform cannot proceed without.
    pub fn require(&self, field: &str) -> Result<&str> {
        match self.values.get(field) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(TransformError::MissingField {
                field: field.to_string(),
                row: self.index,
                file: self.file.clone(),
            }),
        }
    }
}

/// A fully materialized table: header order plus rows in source file order.
#[derive(Debug, Clone)]
pub struct Table {
    pub file: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Error if a column the caller depends on is absent from the header row.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        for column in columns {
            if !self.headers.iter().any(|h| h == column) {
                return Err(TransformError::MissingColumn {
                    column: column.to_string(),
                    file: self.file.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Read a delimited text file: line 1 is the header row, every subsequent
/// non-empty line is split by `delimiter` and zipped positionally against
/// the headers. Fields are trimmed; missing trailing fields become "".
///
/// Callers are expected to check existence first; a missing file
/// propagates as an io error, which for optional sources means "skip".
pub fn read_delimited(path: &Path, delimiter: char) -> Result<Table> {
    let content = fs::read_to_string(path)?;
    let file = path.display().to_string();

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let headers: Vec<String> = match lines.next() {
        Some(header_line) => header_line
            .split(delimiter)
            .map(|h| h.trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let rows = lines
        .enumerate()
        .map(|(i, line)| {
            let values: Vec<&str> = line.split(delimiter).collect();
            zip_row(&headers, &values, i + 1, &file)
        })
        .collect();

    Ok(Table {
        file,
        headers,
        rows,
    })
}

/// Tab-separated variant, the layout every source directory uses by default.
pub fn read_tsv(path: &Path) -> Result<Table> {
    read_delimited(path, '\t')
}

/// Comma-separated variant that respects double-quote-enclosed fields
/// containing commas. Quoted-quote escaping (`""` inside a quoted field)
/// is NOT handled; that convention is documented as unsupported.
pub fn read_csv(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)?;
    let file = path.display().to_string();

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());
    let headers: Vec<String> = match lines.next() {
        Some(header_line) => split_csv_line(header_line)
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let rows = lines
        .enumerate()
        .map(|(i, line)| {
            let values = split_csv_line(line);
            let value_refs: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
            zip_row(&headers, &value_refs, i + 1, &file)
        })
        .collect();

    Ok(Table {
        file,
        headers,
        rows,
    })
}

fn zip_row(headers: &[String], values: &[&str], index: usize, file: &str) -> Row {
    let mut map = HashMap::with_capacity(headers.len());
    for (position, header) in headers.iter().enumerate() {
        let value = values.get(position).map(|v| v.trim()).unwrap_or("");
        map.insert(header.clone(), value.to_string());
    }
    Row {
        index,
        file: file.to_string(),
        values: map,
    }
}

/// Split one CSV line, toggling an in-quotes flag character by character so
/// quoted fields may contain the delimiter. Enclosing quotes are dropped.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_read_tsv_zips_headers() {
        let f = write_temp("code\tname\tdescription\n001\tWidget\tA simple widget\n");
        let table = read_tsv(f.path()).unwrap();
        assert_eq!(table.headers, vec!["code", "name", "description"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("code"), "001");
        assert_eq!(table.rows[0].get("name"), "Widget");
        assert_eq!(table.rows[0].get("description"), "A simple widget");
    }

    #[test]
    fn test_read_tsv_ragged_line_reads_empty() {
        let f = write_temp("code\tname\tdescription\n001\tWidget\n");
        let table = read_tsv(f.path()).unwrap();
        assert_eq!(table.rows[0].get("description"), "");
    }

    #[test]
    fn test_read_tsv_trims_and_skips_blank_lines() {
        let f = write_temp("code\tname\n\n 001 \t Widget \n\n");
        let table = read_tsv(f.path()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("code"), "001");
        assert_eq!(table.rows[0].get("name"), "Widget");
    }

    #[test]
    fn test_require_missing_field_errors() {
        let f = write_temp("code\tname\n001\t\n");
        let table = read_tsv(f.path()).unwrap();
        assert!(table.rows[0].require("name").is_err());
        assert_eq!(table.rows[0].require("code").unwrap(), "001");
    }

    #[test]
    fn test_require_columns() {
        let f = write_temp("code\tname\n001\tWidget\n");
        let table = read_tsv(f.path()).unwrap();
        assert!(table.require_columns(&["code", "name"]).is_ok());
        assert!(table.require_columns(&["code", "absent"]).is_err());
    }

    #[test]
    fn test_read_csv_quoted_delimiter() {
        let f = write_temp("code,name\n5812,\"Eating Places, Restaurants\"\n");
        let table = read_csv(f.path()).unwrap();
        assert_eq!(table.rows[0].get("name"), "Eating Places, Restaurants");
    }

    #[test]
    fn test_read_missing_file_propagates() {
        let result = read_tsv(Path::new("/nonexistent/source.tsv"));
        assert!(result.is_err());
    }
}
