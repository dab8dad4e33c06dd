//! Relational sink backed by SQLite.
//!
//! One `documents` row per saved record, with six child tables keyed by the
//! document id. The schema is bootstrapped idempotently when the sink is
//! constructed. Connections are opened per call and never held across calls;
//! `save` and `delete_document` wrap their multi-row mutations in a single
//! transaction so a document and its children become visible (or disappear)
//! atomically.

use super::Storage;
use crate::error::{Error, Result};
use crate::model::ExtractionRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Timestamp format written for `created_at`; lexicographic order matches
/// chronological order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Child tables, in deletion order (children before parent).
const CHILD_TABLES: [&str; 6] = [
    "document_text",
    "document_headings",
    "document_links",
    "document_images",
    "document_tables",
    "document_font_styles",
];

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name TEXT NOT NULL,
    file_path TEXT NOT NULL,
    file_size INTEGER,
    file_type TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS document_text (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    page_number INTEGER NOT NULL,
    content TEXT
);

CREATE TABLE IF NOT EXISTS document_headings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    page_number INTEGER NOT NULL,
    heading TEXT
);

CREATE TABLE IF NOT EXISTS document_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    page_number INTEGER NOT NULL,
    url TEXT,
    link_text TEXT
);

CREATE TABLE IF NOT EXISTS document_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    page_number INTEGER NOT NULL,
    image_path TEXT,
    alt_text TEXT
);

CREATE TABLE IF NOT EXISTS document_tables (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    page_number INTEGER NOT NULL,
    table_index INTEGER,
    table_data TEXT
);

CREATE TABLE IF NOT EXISTS document_font_styles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    page_number INTEGER NOT NULL,
    text TEXT,
    font TEXT,
    size REAL
);

CREATE INDEX IF NOT EXISTS idx_document_text_document ON document_text(document_id);
CREATE INDEX IF NOT EXISTS idx_document_headings_document ON document_headings(document_id);
CREATE INDEX IF NOT EXISTS idx_document_links_document ON document_links(document_id);
CREATE INDEX IF NOT EXISTS idx_document_images_document ON document_images(document_id);
CREATE INDEX IF NOT EXISTS idx_document_tables_document ON document_tables(document_id);
CREATE INDEX IF NOT EXISTS idx_document_font_styles_document ON document_font_styles(document_id);
"#;

const SELECT_DOCUMENT: &str =
    "SELECT id, file_name, file_path, file_size, file_type, created_at FROM documents";

/// One row of the `documents` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Generated surrogate key
    pub id: i64,
    /// Document name the record was saved under
    pub file_name: String,
    /// Path of the source file
    pub file_path: String,
    /// Source file size in bytes
    pub file_size: i64,
    /// Source file extension
    pub file_type: String,
    /// Creation time of the row, UTC
    pub created_at: DateTime<Utc>,
}

/// One page's stored text: the page fragments joined with newlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPageText {
    pub page_number: u32,
    pub content: String,
}

/// One stored heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredHeading {
    pub page_number: u32,
    pub heading: String,
}

/// One stored hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLink {
    pub page_number: u32,
    pub url: String,
    pub link_text: Option<String>,
}

/// One stored image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredImage {
    pub page_number: u32,
    pub image_path: String,
    pub alt_text: Option<String>,
}

/// One stored table, its grid deserialized from the JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTable {
    pub page_number: u32,
    pub table_index: Option<u32>,
    pub table: Vec<Vec<String>>,
}

/// One stored font span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFontStyle {
    pub page_number: u32,
    pub text: String,
    pub font: String,
    pub size: f64,
}

/// A stored document with all six child row sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExtraction {
    pub document: StoredDocument,
    pub text: Vec<StoredPageText>,
    pub headings: Vec<StoredHeading>,
    pub links: Vec<StoredLink>,
    pub images: Vec<StoredImage>,
    pub tables: Vec<StoredTable>,
    pub font_styles: Vec<StoredFontStyle>,
}

impl StoredExtraction {
    /// Reconstruct the page → fragments mapping from the stored text rows.
    pub fn page_text(&self) -> BTreeMap<u32, Vec<String>> {
        self.text
            .iter()
            .map(|row| {
                let fragments = if row.content.is_empty() {
                    Vec::new()
                } else {
                    row.content.split('\n').map(str::to_string).collect()
                };
                (row.page_number, fragments)
            })
            .collect()
    }
}

/// SQLite-backed sink with create/query/list/delete lifecycle.
pub struct SqlStorage {
    db_path: PathBuf,
}

impl SqlStorage {
    /// Open the sink, creating the database file and bootstrapping the
    /// schema if needed. Safe to call repeatedly on the same path.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { db_path })
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(conn)
    }

    fn map_document(row: &Row<'_>) -> rusqlite::Result<StoredDocument> {
        Ok(StoredDocument {
            id: row.get(0)?,
            file_name: row.get(1)?,
            file_path: row.get(2)?,
            file_size: row.get(3)?,
            file_type: row.get(4)?,
            created_at: parse_timestamp(row.get::<_, String>(5)?)?,
        })
    }

    /// Fetch a stored document and all six child row sets.
    ///
    /// Exactly one of `file_name` or `document_id` must be supplied;
    /// anything else is an [`Error::InvalidQuery`]. Children are ordered by
    /// page number, tables additionally by table index.
    pub fn query_document(
        &self,
        file_name: Option<&str>,
        document_id: Option<i64>,
    ) -> Result<StoredExtraction> {
        let conn = self.connect()?;

        let document = match (file_name, document_id) {
            (Some(name), None) => conn
                .query_row(
                    &format!("{SELECT_DOCUMENT} WHERE file_name = ?1"),
                    params![name],
                    Self::map_document,
                )
                .optional()?
                .ok_or_else(|| Error::DocumentNotFound(name.to_string()))?,
            (None, Some(id)) => conn
                .query_row(
                    &format!("{SELECT_DOCUMENT} WHERE id = ?1"),
                    params![id],
                    Self::map_document,
                )
                .optional()?
                .ok_or_else(|| Error::DocumentNotFound(format!("id {id}")))?,
            _ => {
                return Err(Error::InvalidQuery(
                    "exactly one of file_name or document_id must be supplied".to_string(),
                ))
            }
        };

        let id = document.id;

        let text = conn
            .prepare(
                "SELECT page_number, content FROM document_text \
                 WHERE document_id = ?1 ORDER BY page_number",
            )?
            .query_map(params![id], |row| {
                Ok(StoredPageText {
                    page_number: row.get(0)?,
                    content: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let headings = conn
            .prepare(
                "SELECT page_number, heading FROM document_headings \
                 WHERE document_id = ?1 ORDER BY page_number",
            )?
            .query_map(params![id], |row| {
                Ok(StoredHeading {
                    page_number: row.get(0)?,
                    heading: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let links = conn
            .prepare(
                "SELECT page_number, url, link_text FROM document_links \
                 WHERE document_id = ?1 ORDER BY page_number",
            )?
            .query_map(params![id], |row| {
                Ok(StoredLink {
                    page_number: row.get(0)?,
                    url: row.get(1)?,
                    link_text: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let images = conn
            .prepare(
                "SELECT page_number, image_path, alt_text FROM document_images \
                 WHERE document_id = ?1 ORDER BY page_number",
            )?
            .query_map(params![id], |row| {
                Ok(StoredImage {
                    page_number: row.get(0)?,
                    image_path: row.get(1)?,
                    alt_text: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let table_rows = conn
            .prepare(
                "SELECT page_number, table_index, table_data FROM document_tables \
                 WHERE document_id = ?1 ORDER BY page_number, table_index",
            )?
            .query_map(params![id], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, Option<u32>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut tables = Vec::with_capacity(table_rows.len());
        for (page_number, table_index, data) in table_rows {
            tables.push(StoredTable {
                page_number,
                table_index,
                table: serde_json::from_str(&data)?,
            });
        }

        let font_styles = conn
            .prepare(
                "SELECT page_number, text, font, size FROM document_font_styles \
                 WHERE document_id = ?1 ORDER BY page_number",
            )?
            .query_map(params![id], |row| {
                Ok(StoredFontStyle {
                    page_number: row.get(0)?,
                    text: row.get(1)?,
                    font: row.get(2)?,
                    size: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(StoredExtraction {
            document,
            text,
            headings,
            links,
            images,
            tables,
            font_styles,
        })
    }

    /// All stored documents, newest first.
    pub fn list_documents(&self) -> Result<Vec<StoredDocument>> {
        let conn = self.connect()?;
        let documents = conn
            .prepare(&format!(
                "{SELECT_DOCUMENT} ORDER BY created_at DESC, id DESC"
            ))?
            .query_map([], Self::map_document)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(documents)
    }

    /// Delete a document and all its child rows in one transaction.
    ///
    /// Deleting an id with no matching rows succeeds and removes nothing.
    pub fn delete_document(&self, document_id: i64) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        for table in CHILD_TABLES {
            tx.execute(
                &format!("DELETE FROM {table} WHERE document_id = ?1"),
                params![document_id],
            )?;
        }
        tx.execute("DELETE FROM documents WHERE id = ?1", params![document_id])?;
        tx.commit()?;
        debug!("deleted document id {document_id}");
        Ok(())
    }
}

impl Storage for SqlStorage {
    fn save(&self, record: &ExtractionRecord, name: &str) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let file_path = record.metadata.file_path.to_string_lossy().into_owned();
        let created_at = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        tx.execute(
            "INSERT INTO documents (file_name, file_path, file_size, file_type, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                file_path,
                record.metadata.file_size as i64,
                record.metadata.file_type,
                created_at,
            ],
        )?;
        let document_id = tx.last_insert_rowid();

        for (page_number, fragments) in &record.text.pages {
            tx.execute(
                "INSERT INTO document_text (document_id, page_number, content) \
                 VALUES (?1, ?2, ?3)",
                params![document_id, page_number, fragments.join("\n")],
            )?;
        }

        for (page_number, headings) in &record.text.headings {
            for heading in headings {
                tx.execute(
                    "INSERT INTO document_headings (document_id, page_number, heading) \
                     VALUES (?1, ?2, ?3)",
                    params![document_id, page_number, heading],
                )?;
            }
        }

        for link in &record.links {
            tx.execute(
                "INSERT INTO document_links (document_id, page_number, url, link_text) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![document_id, link.page_number, link.url, link.text],
            )?;
        }

        for image in &record.images {
            let image_path = image.image_path.to_string_lossy().into_owned();
            tx.execute(
                "INSERT INTO document_images (document_id, page_number, image_path, alt_text) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![document_id, image.page_number, image_path, image.alt_text],
            )?;
        }

        for table in &record.tables {
            let table_data = serde_json::to_string(&table.table)?;
            tx.execute(
                "INSERT INTO document_tables (document_id, page_number, table_index, table_data) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    document_id,
                    table.page_number,
                    table.table_index,
                    table_data,
                ],
            )?;
        }

        for span in &record.text.font_styles {
            if span.text.trim().is_empty() {
                continue;
            }
            tx.execute(
                "INSERT INTO document_font_styles (document_id, page_number, text, font, size) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![document_id, span.page_number, span.text, span.font, span.size],
            )?;
        }

        tx.commit()?;
        debug!("saved document '{name}' (id {document_id})");
        Ok(())
    }
}

fn parse_timestamp(value: String) -> rusqlite::Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S%.f")
        .map(|dt| dt.and_utc())
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DocumentMetadata, FontSpan, ImageRef, LinkRef, TableRef, TextContent,
    };

    fn minimal_record() -> ExtractionRecord {
        let mut text = TextContent::new();
        text.pages.insert(1, vec!["Alpha".to_string()]);
        text.headings.insert(1, vec!["Alpha".to_string()]);
        text.font_styles.push(FontSpan {
            page_number: 1,
            text: "Alpha".to_string(),
            font: "Helvetica".to_string(),
            size: 14.0,
        });

        ExtractionRecord {
            metadata: DocumentMetadata {
                file_name: "doc.pdf".to_string(),
                file_path: "input/doc.pdf".into(),
                file_size: 10,
                file_type: ".pdf".to_string(),
            },
            text,
            links: vec![LinkRef {
                url: "https://example.com".to_string(),
                page_number: 1,
                text: None,
                shape_name: None,
            }],
            images: vec![ImageRef {
                page_number: 1,
                image_path: "output/doc/images/page_1_img_0.png".into(),
                alt_text: None,
            }],
            tables: vec![TableRef {
                page_number: 1,
                table: vec![vec!["a".to_string()]],
                table_index: None,
            }],
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_delete_removes_all_child_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.db");
        let storage = SqlStorage::open(&path).unwrap();

        storage.save(&minimal_record(), "doc").unwrap();
        let id = storage.list_documents().unwrap()[0].id;

        // Every child table received a row for the document.
        let conn = Connection::open(&path).unwrap();
        for table in CHILD_TABLES {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
                .unwrap();
            assert_eq!(count, 1, "{table} not populated");
        }

        storage.delete_document(id).unwrap();
        for table in CHILD_TABLES {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
                .unwrap();
            assert_eq!(count, 0, "{table} not emptied");
        }
        let docs: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))
            .unwrap();
        assert_eq!(docs, 0);
    }

    #[test]
    fn test_schema_bootstrap_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.db");

        SqlStorage::open(&path).unwrap();
        SqlStorage::open(&path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'documents'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_schema_creates_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.db");
        SqlStorage::open(&path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"documents".to_string()));
        for child in CHILD_TABLES {
            assert!(tables.contains(&child.to_string()), "missing {child}");
        }
    }

    #[test]
    fn test_parse_timestamp_with_and_without_fraction() {
        assert!(parse_timestamp("2026-08-06 10:15:30.123456".to_string()).is_ok());
        // CURRENT_TIMESTAMP default rows carry no fractional part.
        assert!(parse_timestamp("2026-08-06 10:15:30".to_string()).is_ok());
    }
}
