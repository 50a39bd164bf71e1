//! Malformed input lines that could not be read as a delivery record.
//!
//! When a JSON Lines row cannot be parsed, we keep a MalformedLine so the report can show
//! it next to the priced deliveries instead of aborting the batch.

use serde::Serialize;

/// A line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    line_number: usize,
    raw_line: String,
    error_message: String,
}

impl MalformedLine {
    /// Create a new malformed line.
    ///
    /// # Arguments
    ///
    /// * `line_number` - The line number in the input (1-indexed)
    /// * `raw_line` - The raw line content that failed to parse
    /// * `error_message` - Human-readable error message
    pub fn new(
        line_number: usize,
        raw_line: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            raw_line: raw_line.into(),
            error_message: error_message.into(),
        }
    }

    /// Get the line number where the error occurred.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get the raw line content.
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Get the error message.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}
