//! Field and record validation.
//!
//! Field validators are pure, total functions: each takes one field value and returns the
//! typed value on success or a [`ValidationError`] describing the failure. The record
//! validator runs all four checks, never short-circuiting, so callers see every problem
//! with a record in one pass.

use serde_json::Value;

use crate::model::{DeliveryRecord, ExpectedKind, RawDelivery, ValidationError, Zone};

/// Display name used in weight error messages.
pub const WEIGHT_FIELD: &str = "Weight";
/// Display name used in volume error messages.
pub const VOLUME_FIELD: &str = "Volume";
/// Display name used in critical-window error messages.
pub const CRITICAL_WINDOW_FIELD: &str = "Critical window";

/// Largest accepted weight (kg) or volume (m³). Keeps every surcharge and total finite.
pub const MAX_QUANTITY: f64 = 1.0e9;

/// Stand-in for an absent weight or volume. Fails the non-negativity check.
const MISSING_NUMBER: f64 = -1.0;

// ===== Field validators =====

/// Check that `value` is a finite number between zero and [`MAX_QUANTITY`].
///
/// # Errors
///
/// - [`ValidationError::InvalidType`] if the value is not a number (strings, booleans,
///   `null`, non-finite values)
/// - [`ValidationError::NegativeValue`] if the number is below zero
/// - [`ValidationError::TooLarge`] if the number is above [`MAX_QUANTITY`]
pub fn validate_non_negative_number(value: &Value, field_name: &str) -> Result<f64, ValidationError> {
    let number = value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::InvalidType {
            field: field_name.to_string(),
            expected: ExpectedKind::Number,
        })?;

    if number < 0.0 {
        return Err(ValidationError::NegativeValue {
            field: field_name.to_string(),
            value: number,
        });
    }

    if number > MAX_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: field_name.to_string(),
            value: number,
        });
    }

    Ok(number)
}

/// Check that `zone` names one of the priced zones.
///
/// # Errors
///
/// [`ValidationError::UnknownZone`] for any identifier outside the table.
pub fn validate_zone(zone: &str) -> Result<Zone, ValidationError> {
    zone.parse()
}

/// Check that `value` is strictly a JSON boolean.
///
/// # Errors
///
/// [`ValidationError::InvalidType`] for anything else, including `"true"` and `1`.
pub fn validate_boolean_flag(value: &Value) -> Result<bool, ValidationError> {
    value.as_bool().ok_or_else(|| ValidationError::InvalidType {
        field: CRITICAL_WINDOW_FIELD.to_string(),
        expected: ExpectedKind::Boolean,
    })
}

// ===== Record validator =====

/// Outcome of validating one raw delivery record.
///
/// Holds every failed check in order (weight, volume, zone, flag) and, when there are
/// none, the typed [`DeliveryRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    record: Option<DeliveryRecord>,
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// True when no check failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failed checks, in validation order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Human-readable messages of the failed checks, in validation order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// The validated record, if every check passed.
    pub fn record(&self) -> Option<&DeliveryRecord> {
        self.record.as_ref()
    }

    /// Consume the report, keeping only the validated record.
    pub fn into_record(self) -> Option<DeliveryRecord> {
        self.into_result().ok()
    }

    /// Consume the report into the record or the list of failures.
    ///
    /// # Errors
    ///
    /// Returns every failed check when the record is invalid.
    pub fn into_result(self) -> Result<DeliveryRecord, Vec<ValidationError>> {
        match (self.record, self.errors.is_empty()) {
            (Some(record), true) => Ok(record),
            _ => Err(self.errors),
        }
    }

    /// `(is_valid, messages)` pair for callers that only present the outcome.
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.is_valid(), self.messages())
    }
}

/// Validate every field of a raw delivery record.
///
/// Absent fields are replaced by sentinels rather than short-circuiting: a missing weight
/// or volume counts as `-1`, a missing zone as the empty string, and a missing flag as
/// `null`. A non-string zone is checked using its JSON text.
pub fn validate_record(raw: &RawDelivery) -> ValidationReport {
    let missing_number = Value::from(MISSING_NUMBER);
    let missing_flag = Value::Null;

    let weight = validate_non_negative_number(
        raw.weight.as_ref().unwrap_or(&missing_number),
        WEIGHT_FIELD,
    );
    let volume = validate_non_negative_number(
        raw.volume.as_ref().unwrap_or(&missing_number),
        VOLUME_FIELD,
    );
    let zone = validate_zone(&zone_text(raw.zone.as_ref()));
    let critical_window =
        validate_boolean_flag(raw.critical_window.as_ref().unwrap_or(&missing_flag));

    let errors: Vec<ValidationError> = [
        weight.as_ref().err(),
        volume.as_ref().err(),
        zone.as_ref().err(),
        critical_window.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    .cloned()
    .collect();

    let record = match (zone, weight, volume, critical_window) {
        (Ok(zone), Ok(weight), Ok(volume), Ok(critical_window)) => Some(
            DeliveryRecord::from_checked(zone, weight, volume, critical_window),
        ),
        _ => None,
    };

    ValidationReport { record, errors }
}

fn zone_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(zone)) => zone.clone(),
        Some(other) => other.to_string(),
    }
}

impl TryFrom<&RawDelivery> for DeliveryRecord {
    type Error = Vec<ValidationError>;

    fn try_from(raw: &RawDelivery) -> Result<Self, Self::Error> {
        validate_record(raw).into_result()
    }
}
