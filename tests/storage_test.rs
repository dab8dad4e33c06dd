//! Integration tests for the filesystem and relational sinks.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use undoc::{
    DocumentMetadata, Error, ExtractionRecord, FileStorage, FontSpan, ImageRef, LinkRef,
    OutputConfig, SqlStorage, Storage, TableRef, TextContent,
};

fn sample_record() -> ExtractionRecord {
    let mut text = TextContent::new();
    text.pages
        .insert(1, vec!["Intro".to_string(), "Hello".to_string()]);
    text.pages.insert(2, vec!["Second page".to_string()]);
    text.headings.insert(1, vec!["Intro".to_string()]);
    text.font_styles = vec![
        FontSpan {
            page_number: 1,
            text: "Intro".to_string(),
            font: "Default".to_string(),
            size: 24.0,
        },
        FontSpan {
            page_number: 1,
            text: "Hello".to_string(),
            font: "Default".to_string(),
            size: 12.0,
        },
        // Blank spans must be skipped by both sinks.
        FontSpan {
            page_number: 2,
            text: "   ".to_string(),
            font: "Default".to_string(),
            size: 12.0,
        },
    ];

    ExtractionRecord {
        metadata: DocumentMetadata {
            file_name: "deck.pptx".to_string(),
            file_path: PathBuf::from("input/deck.pptx"),
            file_size: 2048,
            file_type: ".pptx".to_string(),
        },
        text,
        links: vec![
            LinkRef {
                url: "https://example.com".to_string(),
                page_number: 1,
                text: Some("visit us".to_string()),
                shape_name: Some("Content 2".to_string()),
            },
            LinkRef {
                url: "https://example.org".to_string(),
                page_number: 2,
                text: None,
                shape_name: None,
            },
        ],
        images: vec![ImageRef {
            page_number: 1,
            image_path: PathBuf::from("output/deck/images/slide_1_img_0.png"),
            alt_text: Some("logo".to_string()),
        }],
        tables: vec![
            TableRef {
                page_number: 1,
                table: vec![
                    vec!["Name".to_string(), "Age".to_string()],
                    vec!["Alice".to_string(), "30".to_string()],
                ],
                table_index: Some(0),
            },
            TableRef {
                page_number: 2,
                table: vec![vec!["only,cell".to_string()]],
                table_index: Some(1),
            },
        ],
        skipped: Vec::new(),
    }
}

// ==================== Filesystem sink ====================

#[test]
fn file_storage_writes_four_artifacts() {
    let scratch = tempfile::tempdir().unwrap();
    let output = OutputConfig::new(scratch.path().join("out"));
    let storage = FileStorage::new(output.clone());

    storage.save(&sample_record(), "deck").unwrap();

    let dir = output.document_dir("deck");
    let text = fs::read_to_string(dir.join("extracted_text.txt")).unwrap();
    assert_eq!(text, "Page 1\nIntro\nHello\n\nPage 2\nSecond page\n\n");

    let headings = fs::read_to_string(dir.join("headings.txt")).unwrap();
    assert_eq!(headings, "Page 1\nIntro\n\n");

    let links = fs::read_to_string(dir.join("extracted_links.csv")).unwrap();
    assert_eq!(
        links,
        "Page Number,URL\n1,https://example.com\n2,https://example.org\n"
    );

    let fonts = fs::read_to_string(dir.join("font_styles.csv")).unwrap();
    assert_eq!(
        fonts,
        "Page Number,Text,Font,Size\n1,Intro,Default,24\n1,Hello,Default,12\n"
    );
}

#[test]
fn file_storage_save_is_repeatable() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(OutputConfig::new(scratch.path().join("out")));

    storage.save(&sample_record(), "deck").unwrap();
    storage.save(&sample_record(), "deck").unwrap();
}

// ==================== Relational sink ====================

#[test]
fn sql_storage_round_trip_by_name() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();
    let record = sample_record();

    storage.save(&record, "deck").unwrap();
    let stored = storage.query_document(Some("deck"), None).unwrap();

    assert_eq!(stored.document.file_name, "deck");
    assert_eq!(stored.document.file_path, "input/deck.pptx");
    assert_eq!(stored.document.file_size, 2048);
    assert_eq!(stored.document.file_type, ".pptx");

    // Text pages reconstruct to what was saved.
    let mut expected = BTreeMap::new();
    expected.insert(1, vec!["Intro".to_string(), "Hello".to_string()]);
    expected.insert(2, vec!["Second page".to_string()]);
    assert_eq!(stored.page_text(), expected);

    assert_eq!(stored.headings.len(), 1);
    assert_eq!(stored.headings[0].heading, "Intro");

    assert_eq!(stored.links.len(), 2);
    assert_eq!(stored.links[0].url, "https://example.com");
    assert_eq!(stored.links[0].link_text.as_deref(), Some("visit us"));
    assert_eq!(stored.links[1].link_text, None);

    assert_eq!(stored.images.len(), 1);
    assert_eq!(
        stored.images[0].image_path,
        "output/deck/images/slide_1_img_0.png"
    );
    assert_eq!(stored.images[0].alt_text.as_deref(), Some("logo"));

    // Table grids round-trip through JSON serialization, in index order.
    assert_eq!(stored.tables.len(), 2);
    assert_eq!(stored.tables[0].table, record.tables[0].table);
    assert_eq!(stored.tables[0].table_index, Some(0));
    assert_eq!(stored.tables[1].table, record.tables[1].table);

    // The blank font span was not persisted.
    assert_eq!(stored.font_styles.len(), 2);
    assert_eq!(stored.font_styles[0].text, "Intro");
    assert_eq!(stored.font_styles[0].size, 24.0);
}

#[test]
fn sql_storage_query_by_id() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();
    storage.save(&sample_record(), "deck").unwrap();

    let id = storage.list_documents().unwrap()[0].id;
    let stored = storage.query_document(None, Some(id)).unwrap();
    assert_eq!(stored.document.id, id);
    assert_eq!(stored.document.file_name, "deck");
}

#[test]
fn sql_storage_rejects_bad_selectors() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();

    assert!(matches!(
        storage.query_document(None, None),
        Err(Error::InvalidQuery(_))
    ));
    assert!(matches!(
        storage.query_document(Some("deck"), Some(1)),
        Err(Error::InvalidQuery(_))
    ));
}

#[test]
fn sql_storage_reports_missing_document() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();

    assert!(matches!(
        storage.query_document(Some("ghost"), None),
        Err(Error::DocumentNotFound(_))
    ));
    assert!(matches!(
        storage.query_document(None, Some(42)),
        Err(Error::DocumentNotFound(_))
    ));
}

#[test]
fn sql_storage_lists_newest_first() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();

    storage.save(&sample_record(), "first").unwrap();
    storage.save(&sample_record(), "second").unwrap();
    storage.save(&sample_record(), "third").unwrap();

    let documents = storage.list_documents().unwrap();
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0].file_name, "third");
    assert_eq!(documents[2].file_name, "first");
}

#[test]
fn sql_storage_list_count_matches_saves() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();

    for i in 0..5 {
        storage.save(&sample_record(), &format!("doc_{i}")).unwrap();
    }
    assert_eq!(storage.list_documents().unwrap().len(), 5);
}

#[test]
fn sql_storage_delete_removes_document() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();

    storage.save(&sample_record(), "keep").unwrap();
    storage.save(&sample_record(), "drop").unwrap();

    let id = storage
        .list_documents()
        .unwrap()
        .into_iter()
        .find(|d| d.file_name == "drop")
        .unwrap()
        .id;
    storage.delete_document(id).unwrap();

    let remaining = storage.list_documents().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].file_name, "keep");

    assert!(matches!(
        storage.query_document(None, Some(id)),
        Err(Error::DocumentNotFound(_))
    ));

    // The surviving document still queries with its children intact.
    let kept = storage.query_document(Some("keep"), None).unwrap();
    assert_eq!(kept.links.len(), 2);
    assert_eq!(kept.tables.len(), 2);
}

#[test]
fn sql_storage_delete_unknown_id_is_ok() {
    let scratch = tempfile::tempdir().unwrap();
    let storage = SqlStorage::open(scratch.path().join("docs.db")).unwrap();
    storage.delete_document(999).unwrap();
}

#[test]
fn sql_storage_reopen_preserves_rows() {
    let scratch = tempfile::tempdir().unwrap();
    let db_path = scratch.path().join("docs.db");

    {
        let storage = SqlStorage::open(&db_path).unwrap();
        storage.save(&sample_record(), "deck").unwrap();
    }

    let storage = SqlStorage::open(&db_path).unwrap();
    assert_eq!(storage.list_documents().unwrap().len(), 1);
}
