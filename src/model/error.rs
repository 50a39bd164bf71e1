//! Error types for parcelcost.
//!
//! This module defines a hierarchical error taxonomy using `thiserror` for structured error
//! handling. Errors compose cleanly via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`ValidationError`] - A single failed field check on a delivery record. Always a value,
//!   never a fault: validators collect these and hand them back to the caller.
//! - [`AppError`] - Top-level error for the binary, wrapping all shell failures
//!   - [`InputError`] - File/stdin reading failures (file not found, no input, IO)
//!   - [`ParseError`] - JSON Lines failures (malformed JSON, non-object lines)
//!   - [`ConfigError`] - Unreadable or invalid configuration file
//!   - [`LoggingError`] - Log file / subscriber setup failures
//!   - `std::io::Error` - Writing the report to stdout
//!
//! # Error Recovery Strategy
//!
//! Validation and parse errors are **non-fatal**: a rejected or malformed record is reported
//! alongside the priced ones and the batch continues. Input, config and output errors are
//! fatal and propagate to `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::zone::VALID_ZONES;

// ===== Validation =====

/// Primitive kind a delivery field was expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    /// A finite JSON number.
    Number,
    /// Strictly `true` or `false`.
    Boolean,
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedKind::Number => f.write_str("a number"),
            ExpectedKind::Boolean => f.write_str("true or false"),
        }
    }
}

/// A failed check on one field of a delivery record.
///
/// The `Display` output is the human-readable message shown to users; the variant is the
/// machine-readable category.
///
/// # Examples
///
/// ```
/// use parcelcost::model::ValidationError;
///
/// let err = ValidationError::NegativeValue { field: "Weight".to_string(), value: -2.0 };
/// assert_eq!(err.to_string(), "Weight cannot be negative");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The field's value is not of the expected primitive kind
    /// (non-numeric weight, non-boolean flag, ...).
    #[error("{field} must be {expected}")]
    InvalidType {
        /// Display name of the offending field (e.g. "Weight").
        field: String,
        /// What the field should have held.
        expected: ExpectedKind,
    },

    /// A numeric field is present but negative.
    #[error("{field} cannot be negative")]
    NegativeValue {
        /// Display name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// A numeric field is above [`crate::validation::MAX_QUANTITY`].
    #[error("{field} cannot exceed {}", crate::validation::MAX_QUANTITY)]
    TooLarge {
        /// Display name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// The zone identifier is not in the pricing table.
    #[error("Zone '{zone}' is invalid. Valid zones: {}", VALID_ZONES.join(", "))]
    UnknownZone {
        /// The identifier as received.
        zone: String,
    },
}

// ===== Shell errors =====

/// Top-level application error encompassing all failure modes of the binary.
///
/// All domain-specific error types convert to `AppError` via `From`, so `main` can use `?`
/// throughout.
///
/// # Examples
///
/// ```no_run
/// use parcelcost::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = read_records()?;
///     Ok(())
/// }
/// # fn read_records() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    ///
    /// **Recovery**: Display error to user and exit with non-zero status.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to parse a delivery record line.
    ///
    /// The batch pipeline keeps malformed lines as values, so this only surfaces from
    /// single-record entry points that cannot continue without the record.
    #[error("Failed to parse delivery record: {0}")]
    Parse(#[from] ParseError),

    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file or tracing subscriber could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Writing the report to the terminal failed (broken pipe, closed stdout, ...).
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Strict mode: at least one record could not be priced or verified.
    ///
    /// The report has already been printed when this is returned; it only changes the
    /// exit status.
    #[error("{failed} record(s) rejected, malformed or failing the cost invariant")]
    StrictFailure {
        /// Number of records that did not make it through cleanly.
        failed: usize,
    },
}

/// Errors encountered when reading delivery records from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified records file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use parcelcost::model::error::InputError;
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

    /// No input source was provided: stdin is a terminal and no file path was given.
    ///
    /// **Recovery**: Display usage showing both invocation modes:
    /// - `parcelcost deliveries.jsonl` (file mode)
    /// - `cat deliveries.jsonl | parcelcost` (stdin mode)
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    ///
    /// The `#[from]` attribute lets `?` convert `std::io::Error` directly:
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use parcelcost::model::error::InputError;
    ///
    /// fn open_records(path: &str) -> Result<File, InputError> {
    ///     Ok(File::open(path)?)
    /// }
    /// ```
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing a JSON Lines delivery record.
///
/// All variants carry the 1-based line number so users can find the offending line in
/// their editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line contains syntactically invalid JSON.
    ///
    /// `message` is extracted from `serde_json::Error::to_string()` rather than wrapping the
    /// error itself, so the value stays `Clone` and comparable.
    ///
    /// # Examples
    ///
    /// ```
    /// use parcelcost::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "EOF while parsing an object".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Parser error message.
        message: String,
    },

    /// The object names one field twice, once in English and once by its Portuguese alias.
    #[error("Line {line} sets both '{key}' and '{alias}'; use only one of them")]
    ConflictingKeys {
        /// 1-based line number.
        line: usize,
        /// English key.
        key: &'static str,
        /// Portuguese alias of the same field.
        alias: &'static str,
    },

    /// The line is valid JSON but not an object (e.g. an array or a bare number).
    #[error("Expected a JSON object at line {line}, found {found}")]
    NotAnObject {
        /// 1-based line number.
        line: usize,
        /// JSON kind that was found instead ("array", "number", ...).
        found: &'static str,
    },
}
