//! File inputs for upload operations

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Content type used when neither the extension nor the leading bytes identify the file
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file to upload, either on disk or already in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileInput {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A file read into memory, ready to be placed in a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Last path segment, empty for in-memory input
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

impl FileInput {
    /// Reads the input into memory and determines its filename and content type.
    ///
    /// Paths are typed by extension, in-memory bytes by their leading bytes.
    /// I/O failures are returned unmodified.
    pub fn read(self) -> Result<FileContent> {
        match self {
            FileInput::Path(path) => {
                let content = fs::read(&path)?;
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let content_type = mime_guess::from_path(&path)
                    .first_raw()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();

                Ok(FileContent {
                    filename,
                    content,
                    content_type,
                })
            }
            FileInput::Bytes(content) => {
                let content_type = infer::get(&content)
                    .map(|kind| kind.mime_type())
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();

                Ok(FileContent {
                    filename: String::new(),
                    content,
                    content_type,
                })
            }
        }
    }
}

impl From<PathBuf> for FileInput {
    fn from(path: PathBuf) -> Self {
        FileInput::Path(path)
    }
}

impl From<&Path> for FileInput {
    fn from(path: &Path) -> Self {
        FileInput::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for FileInput {
    fn from(path: &PathBuf) -> Self {
        FileInput::Path(path.clone())
    }
}

impl From<&str> for FileInput {
    fn from(path: &str) -> Self {
        FileInput::Path(PathBuf::from(path))
    }
}

impl From<String> for FileInput {
    fn from(path: String) -> Self {
        FileInput::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for FileInput {
    fn from(bytes: Vec<u8>) -> Self {
        FileInput::Bytes(bytes)
    }
}

impl From<&[u8]> for FileInput {
    fn from(bytes: &[u8]) -> Self {
        FileInput::Bytes(bytes.to_vec())
    }
}
