//! File-based page source.
//!
//! Reads a JSONL file of pages once, on construction.

use crate::model::error::InputError;
use crate::model::AppError;
use crate::parser::{parse_pages, MainlineCommitsPage};
use std::path::{Path, PathBuf};

/// Read-once JSONL page file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    content: Option<String>,
}

impl FileSource {
    /// Open and read the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            content: Some(content),
        })
    }

    /// Path the pages were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse all pages on the first call; empty afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Parse` for the first malformed line.
    pub fn drain_pages(&mut self) -> Result<Vec<MainlineCommitsPage>, AppError> {
        match self.content.take() {
            Some(content) => Ok(parse_pages(&content)?),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_file_not_found() {
        let err = FileSource::new("/nonexistent/histrow/pages.jsonl").unwrap_err();
        assert!(matches!(err, InputError::FileNotFound { .. }));
    }

    #[test]
    fn drain_returns_pages_once() {
        let path = std::env::temp_dir().join("histrow_file_source_drain.jsonl");
        fs::write(
            &path,
            "[{\"version\":{\"order\":2,\"createTime\":\"2024-01-01T00:00:00Z\"}}]\n\n[]\n",
        )
        .unwrap();

        let mut source = FileSource::new(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(source.drain_pages().unwrap().len(), 2);
        assert!(source.drain_pages().unwrap().is_empty());
    }
}
