//! Stdin-based page source for piped input.

use crate::model::error::InputError;
use crate::model::AppError;
use crate::parser::{parse_pages, MainlineCommitsPage};
use std::io::{IsTerminal, Read};

/// Pages piped through stdin, read to EOF on first drain.
pub struct StdinSource<R: Read> {
    reader: R,
    complete: bool,
}

impl StdinSource<std::io::Stdin> {
    /// Create a StdinSource from the process stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal,
    /// so the command never blocks waiting for typed input.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a StdinSource from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            complete: false,
        }
    }

    /// Read to EOF and parse every page; empty after the first call.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InputRead` for I/O errors and `AppError::Parse`
    /// for malformed lines.
    pub fn drain_pages(&mut self) -> Result<Vec<MainlineCommitsPage>, AppError> {
        if self.complete {
            return Ok(Vec::new());
        }
        let mut content = String::new();
        self.reader
            .read_to_string(&mut content)
            .map_err(InputError::from)?;
        self.complete = true;
        Ok(parse_pages(&content)?)
    }

    /// Check if EOF has been reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource")
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}
