//! Stdin-based record source for piped input.

use crate::model::error::InputError;
use std::io::{BufRead, BufReader, IsTerminal, Read};

use super::{SourceLine, collect_lines};

/// Check if stdin is a TTY (interactive terminal).
pub fn stdin_is_tty() -> bool {
    std::io::stdin().is_terminal()
}

/// Stdin source for piped JSON Lines input, read to EOF in one go.
pub struct StdinSource<R: Read> {
    reader: BufReader<R>,
    complete: bool,
}

impl StdinSource<std::io::Stdin> {
    /// Create a new StdinSource from stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY. Reading would otherwise block
    /// waiting for a user who forgot to pipe data.
    pub fn new() -> Result<Self, InputError> {
        if stdin_is_tty() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(std::io::stdin()))
    }
}

impl<R: Read> StdinSource<R> {
    /// Create StdinSource from any reader. Bypasses the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            complete: false,
        }
    }

    /// Read every remaining line until EOF.
    ///
    /// Returns an empty vec once EOF has been reached.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors (including invalid UTF-8).
    pub fn read_to_end(&mut self) -> Result<Vec<SourceLine>, InputError> {
        if self.complete {
            return Ok(Vec::new());
        }
        let lines = collect_lines((&mut self.reader).lines())?;
        self.complete = true;
        Ok(lines)
    }

    /// Check if EOF has been reached (no more data will arrive).
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
