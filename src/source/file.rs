//! File-based record source.
//!
//! Reads a JSON Lines file once, at construction.

use crate::model::error::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{SourceLine, collect_lines};

/// Read-once file source.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    lines: Vec<SourceLine>,
}

impl FileSource {
    /// Open and read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        // Check if file exists before trying to open
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let lines = collect_lines(BufReader::new(file).lines())?;

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Path the records were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take all lines. Returns an empty vec on subsequent calls.
    pub fn drain_lines(&mut self) -> Vec<SourceLine> {
        std::mem::take(&mut self.lines)
    }
}
