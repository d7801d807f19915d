//! Page input sources.
//!
//! Stand-ins for the history fetch layer: JSONL pages from a file or
//! piped stdin, parsed at the boundary.

use crate::model::error::InputError;
use crate::model::AppError;
use crate::parser::MainlineCommitsPage;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for JSONL pages.
#[derive(Debug)]
pub enum InputSource {
    /// Pages from a file.
    File(FileSource),
    /// Pages piped through stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// All pages not yet returned, in input order.
    ///
    /// # Errors
    ///
    /// Returns `AppError` for I/O or parse failures.
    pub fn drain_pages(&mut self) -> Result<Vec<MainlineCommitsPage>, AppError> {
        match self {
            InputSource::File(f) => f.drain_pages(),
            InputSource::Stdin(s) => s.drain_pages(),
        }
    }
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided: FileSource (reads on construction)
/// 2. Otherwise: StdinSource, unless stdin is a terminal
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
