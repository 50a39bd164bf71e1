//! Delivery records, as received and as validated.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ValidationError;
use super::zone::Zone;

/// English keys paired with the Portuguese alias accepted for each. A record may use
/// either name for a field, never both.
pub const KEY_ALIASES: [(&str, &str); 3] = [
    ("zone", "zona"),
    ("weight", "peso"),
    ("critical_window", "janela_critica"),
];

/// A delivery record as received at the boundary.
///
/// Every field is kept as an untyped JSON value so that a wrong kind (a string weight,
/// a numeric flag) reaches the validators instead of failing deserialization. `None`
/// means the key was absent; an explicit `null` is `Some(Value::Null)`.
///
/// Portuguese keys (`zona`, `peso`, `janela_critica`) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDelivery {
    /// Destination zone identifier, expected to be a string.
    #[serde(
        default,
        alias = "zona",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub zone: Option<Value>,

    /// Parcel weight in kilograms, expected to be a non-negative number.
    #[serde(
        default,
        alias = "peso",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<Value>,

    /// Parcel volume in cubic meters, expected to be a non-negative number.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume: Option<Value>,

    /// Critical delivery window flag, expected to be a boolean.
    #[serde(
        default,
        alias = "janela_critica",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub critical_window: Option<Value>,
}

/// Keep an explicit `null` distinguishable from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RawDelivery {
    /// Build a fully-populated raw record from typed values.
    ///
    /// Non-finite numbers become JSON `null` and are later rejected as `InvalidType`.
    pub fn new(zone: &str, weight: f64, volume: f64, critical_window: bool) -> Self {
        Self {
            zone: Some(Value::from(zone)),
            weight: Some(Value::from(weight)),
            volume: Some(Value::from(volume)),
            critical_window: Some(Value::Bool(critical_window)),
        }
    }
}

/// A delivery record that has passed every field check.
///
/// Only obtainable through [`crate::validation::validate_record`], the `TryFrom<&RawDelivery>`
/// impl, or [`DeliveryRecord::new`], all of which run the same validators. The cost
/// calculator accepts nothing else, so an unknown zone or a negative weight can never be
/// priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeliveryRecord {
    zone: Zone,
    weight: f64,
    volume: f64,
    critical_window: bool,
}

impl DeliveryRecord {
    /// Smart constructor: validates weight and volume.
    ///
    /// # Errors
    ///
    /// Returns every failed check (weight first, then volume).
    pub fn new(
        zone: Zone,
        weight: f64,
        volume: f64,
        critical_window: bool,
    ) -> Result<Self, Vec<ValidationError>> {
        let raw = RawDelivery::new(zone.as_str(), weight, volume, critical_window);
        crate::validation::validate_record(&raw).into_result()
    }

    /// Constructor for values that already went through the field validators.
    pub(crate) fn from_checked(zone: Zone, weight: f64, volume: f64, critical_window: bool) -> Self {
        Self {
            zone,
            weight,
            volume,
            critical_window,
        }
    }

    /// Destination zone.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Weight in kilograms (non-negative, finite).
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Volume in cubic meters (non-negative, finite).
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether the delivery has a critical time window.
    pub fn critical_window(&self) -> bool {
        self.critical_window
    }
}

impl From<&DeliveryRecord> for RawDelivery {
    fn from(record: &DeliveryRecord) -> Self {
        RawDelivery::new(
            record.zone.as_str(),
            record.weight,
            record.volume,
            record.critical_window,
        )
    }
}
