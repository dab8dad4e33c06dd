//! Document metadata probed at loader construction.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// File-level metadata, derived once when a loader is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Base name of the source file (e.g., "report.pdf")
    pub file_name: String,

    /// Full path to the source file
    pub file_path: PathBuf,

    /// File size in bytes
    pub file_size: u64,

    /// File extension including the leading dot (e.g., ".pdf")
    pub file_type: String,
}

impl DocumentMetadata {
    /// Probe the filesystem for the file's metadata.
    ///
    /// Fails with [`Error::FileNotFound`] if the path does not resolve to an
    /// existing file.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_type = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Ok(Self {
            file_name,
            file_path: path.to_path_buf(),
            file_size: meta.len(),
            file_type,
        })
    }

    /// File name without its extension, used to name per-document artifact
    /// directories.
    pub fn file_stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }
}
