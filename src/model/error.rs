//! Error types for histrow.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the command-line shell
//!   - [`InputError`] - Page file/stdin reading failures
//!   - [`ParseError`] - Page JSON parsing failures
//!   - [`ClassificationError`] - An entry matched neither the commit nor the folded shape
//!   - [`ConfigError`](crate::config::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failures
//!
//! # Error Recovery Strategy
//!
//! None of these are recovered locally. A [`ClassificationError`] means the upstream
//! data contract was violated; the row builder returns it before building anything,
//! so callers never see a half-built row sequence.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use histrow::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = read_pages()?;
///     Ok(())
/// }
/// # fn read_pages() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to parse a page of entries.
    #[error("Failed to parse page: {0}")]
    Parse(#[from] ParseError),

    /// A page contained an entry of unknown shape.
    #[error("Failed to classify entry: {0}")]
    Classification(#[from] ClassificationError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Raised when a raw mainline entry is neither a single version nor a
/// non-empty rolled-up group.
///
/// This is fatal: it signals that the upstream source broke its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// The entry carries neither `version` nor `rolledUpVersions`.
    #[error("Entry has neither a version nor rolled-up versions")]
    UnrecognizedEntry,

    /// The entry carries `rolledUpVersions`, but the list is empty.
    #[error("Entry has an empty rolled-up versions list")]
    EmptyFoldedGroup,
}

/// Errors encountered when reading pages from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified page file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use histrow::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No file was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from parsing a JSONL page line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not valid JSON, or does not match the page shape.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Error message from serde_json.
        message: String,
    },

    /// A `createTime` value could not be parsed as an RFC 3339 timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use histrow::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidTimestamp {
    ///     line: 8,
    ///     raw: "not-a-timestamp".to_string()
    /// };
    /// assert!(err.to_string().contains("'not-a-timestamp'"));
    /// assert!(err.to_string().contains("line 8"));
    /// ```
    #[error("Invalid timestamp '{raw}' at line {line}")]
    InvalidTimestamp {
        /// 1-based line number.
        line: usize,
        /// The raw value that failed to parse.
        raw: String,
    },
}
