//! Record input sources.
//!
//! This module provides input sources for JSON Lines delivery records:
//! - File loading for read-once file input
//! - Stdin for piped input
//! - Unified InputSource enum for both
//!
//! Sources hand out numbered, non-blank lines; parsing happens in [`crate::parser`].

use crate::model::error::InputError;
use std::io;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::{stdin_is_tty, StdinSource};

/// One non-blank input line with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number, counting blank lines.
    pub number: usize,
    /// Line content without the trailing newline.
    pub text: String,
}

impl SourceLine {
    /// Create a numbered line.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Number lines from 1, strip `\r`, drop blank ones.
fn collect_lines(
    lines: impl Iterator<Item = io::Result<String>>,
) -> Result<Vec<SourceLine>, InputError> {
    let mut collected = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        let text = line.trim_end_matches('\r');
        if text.trim().is_empty() {
            continue;
        }
        collected.push(SourceLine::new(index + 1, text));
    }
    Ok(collected)
}

/// Unified input source for JSON Lines records.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// File source - read-once loading
    File(FileSource),
    /// Stdin source - reads piped stdin to EOF
    Stdin(StdinSource<io::Stdin>),
}

impl InputSource {
    /// Read all available lines from the source.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn read_lines(&mut self) -> Result<Vec<SourceLine>, InputError> {
        match self {
            InputSource::File(f) => Ok(f.drain_lines()),
            InputSource::Stdin(s) => s.read_to_end(),
        }
    }

    /// Human-readable name of the source for logs.
    pub fn describe(&self) -> String {
        match self {
            InputSource::File(f) => f.path().display().to_string(),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: create FileSource (loads on construction)
/// 2. Else: use StdinSource, which requires stdin to be piped
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
/// Returns `InputError::FileNotFound` if file does not exist.
/// Returns `InputError::Io` for I/O errors during file reading.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
