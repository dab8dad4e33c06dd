//! Minimal CSV formatting for derived artifacts.
//!
//! Fields containing commas, quotes, or line breaks are quoted with doubled
//! inner quotes. Rows are newline-terminated.

use std::fs;
use std::io;
use std::path::Path;

/// Escape a single field for CSV output.
pub fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format one row of fields as a CSV line (without the trailing newline).
pub fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write rows to a file, overwriting any existing content at the path.
pub fn write_rows<S: AsRef<str>>(path: &Path, rows: &[Vec<S>]) -> io::Result<()> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    fs::write(path, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("hello"), "hello");
    }

    #[test]
    fn test_escape_comma_and_quote() {
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_row() {
        assert_eq!(format_row(&["1", "http://example.com"]), "1,http://example.com");
        assert_eq!(format_row(&["a,b", "c"]), "\"a,b\",c");
    }

    #[test]
    fn test_write_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_rows(&path, &[vec!["x", "y"], vec!["1", "2"]]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "x,y\n1,2\n");
    }
}
