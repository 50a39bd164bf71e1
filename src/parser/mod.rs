//! JSON Lines parser for delivery records.
//!
//! This module provides pure parsing functions for converting JSON Lines rows into
//! [`RawDelivery`] values. Field kinds are not checked here: a row like
//! `{"weight": "heavy"}` parses fine and is rejected later by validation.

use crate::model::{MalformedLine, ParseError, RawDelivery, KEY_ALIASES};
use serde_json::Value;

/// Result of parsing a JSON Lines row with graceful error handling.
///
/// This allows the caller to continue processing subsequent lines even when
/// encountering malformed JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// Successfully parsed a delivery record (not yet validated).
    Valid(RawDelivery),
    /// Encountered a malformed line that could not be parsed.
    Malformed(MalformedLine),
}

/// Parse a single JSON Lines row gracefully.
///
/// Unlike [`parse_record`], this function never returns an error. It returns either a
/// raw record or a [`MalformedLine`] that can be shown in the report.
///
/// # Arguments
///
/// * `raw` - The raw line to parse
/// * `line_number` - The line number (1-indexed) for error reporting
pub fn parse_record_graceful(raw: &str, line_number: usize) -> ParseResult {
    match parse_record(raw, line_number) {
        Ok(record) => ParseResult::Valid(record),
        Err(parse_error) => {
            ParseResult::Malformed(MalformedLine::new(line_number, raw, parse_error.to_string()))
        }
    }
}

/// Parse a single JSON Lines row into a raw delivery record.
///
/// # Errors
///
/// - [`ParseError::InvalidJson`] if the line is not valid JSON
/// - [`ParseError::NotAnObject`] if the line is JSON but not an object
/// - [`ParseError::ConflictingKeys`] if a field appears under both its English and
///   Portuguese name
pub fn parse_record(raw: &str, line_number: usize) -> Result<RawDelivery, ParseError> {
    let object = parse_object(raw, line_number)?;

    if let Some(&(key, alias)) = KEY_ALIASES
        .iter()
        .find(|(key, alias)| object.get(key).is_some() && object.get(alias).is_some())
    {
        return Err(ParseError::ConflictingKeys {
            line: line_number,
            key,
            alias,
        });
    }

    serde_json::from_value(object).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })
}

/// Parse a row that must be a JSON object, keeping it untyped.
///
/// Used for priced results being re-verified, whose shape is checked field by field.
///
/// # Errors
///
/// Same as [`parse_record`].
pub fn parse_object(raw: &str, line_number: usize) -> Result<Value, ParseError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    if !value.is_object() {
        return Err(ParseError::NotAnObject {
            line: line_number,
            found: json_kind(&value),
        });
    }

    Ok(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ===== Successful Parsing Tests =====

    #[test]
    fn parse_record_full_english_keys() {
        let raw = r#"{"zone":"zona2","weight":15.0,"volume":0.8,"critical_window":true}"#;
        let record = parse_record(raw, 1).expect("Should parse complete record");
        assert_eq!(record, RawDelivery::new("zona2", 15.0, 0.8, true));
    }

    #[test]
    fn parse_record_integer_weight() {
        let raw = r#"{"zone":"zona1","weight":5,"volume":0.3,"critical_window":false}"#;
        let record = parse_record(raw, 1).unwrap();
        assert_eq!(record.weight.and_then(|w| w.as_f64()), Some(5.0));
    }

    #[test]
    fn parse_record_keeps_wrong_kinds_for_validation() {
        let raw = r#"{"zone":3,"weight":"heavy","volume":0.3,"critical_window":"s"}"#;
        let record = parse_record(raw, 1).expect("Wrong kinds are a validation concern");
        assert_eq!(record.zone, Some(json!(3)));
        assert_eq!(record.weight, Some(json!("heavy")));
        assert_eq!(record.critical_window, Some(json!("s")));
    }

    #[test]
    fn parse_record_empty_object_has_no_fields() {
        let record = parse_record("{}", 1).unwrap();
        assert_eq!(record, RawDelivery::default());
    }

    // ===== Error Tests =====

    #[test]
    fn parse_record_invalid_json_reports_line() {
        let err = parse_record(r#"{"zone":"zona1""#, 7).unwrap_err();
        match err {
            ParseError::InvalidJson { line, .. } => assert_eq!(line, 7),
            other => panic!("Expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn parse_record_array_is_not_an_object() {
        let err = parse_record("[1,2]", 2).unwrap_err();
        assert_eq!(
            err,
            ParseError::NotAnObject {
                line: 2,
                found: "array"
            }
        );
    }

    #[test]
    fn parse_object_string_is_not_an_object() {
        let err = parse_object(r#""zona1""#, 4).unwrap_err();
        assert_eq!(
            err,
            ParseError::NotAnObject {
                line: 4,
                found: "string"
            }
        );
    }

    #[test]
    fn parse_record_rejects_field_given_under_both_names() {
        let err = parse_record(r#"{"zone":"zona1","zona":"zona2","weight":1}"#, 3).unwrap_err();
        assert_eq!(
            err,
            ParseError::ConflictingKeys {
                line: 3,
                key: "zone",
                alias: "zona"
            }
        );

        let err = parse_record(r#"{"weight":1,"peso":2}"#, 1).unwrap_err();
        assert!(matches!(err, ParseError::ConflictingKeys { key: "weight", .. }));
    }

    #[test]
    fn graceful_reports_conflicting_keys_not_invalid_json() {
        match parse_record_graceful(r#"{"critical_window":true,"janela_critica":false}"#, 9) {
            ParseResult::Malformed(line) => {
                assert!(line.error_message().contains("'critical_window' and 'janela_critica'"));
                assert!(!line.error_message().contains("Invalid JSON"));
            }
            ParseResult::Valid(_) => panic!("Expected Malformed"),
        }
    }

    // ===== Graceful Parsing Tests =====

    #[test]
    fn graceful_returns_valid_for_object() {
        let result = parse_record_graceful(r#"{"zone":"zona1"}"#, 1);
        assert!(matches!(result, ParseResult::Valid(_)));
    }

    #[test]
    fn graceful_returns_malformed_with_raw_line() {
        let result = parse_record_graceful("not json", 12);
        match result {
            ParseResult::Malformed(line) => {
                assert_eq!(line.line_number(), 12);
                assert_eq!(line.raw_line(), "not json");
                assert!(line.error_message().contains("line 12"));
            }
            ParseResult::Valid(_) => panic!("Expected Malformed"),
        }
    }
}
