//! Delivery destination zones.
//!
//! The set of zones is closed: every zone has a row in the pricing table, and an
//! identifier outside this set is rejected at validation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Wire identifiers of every zone, in table order.
pub const VALID_ZONES: [&str; 4] = ["zona1", "zona2", "zona3", "zona4"];

/// Enumerated delivery-destination category.
///
/// Serialized as its wire identifier (`"zona1"` .. `"zona4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    /// `zona1`: city centre, no toll.
    #[serde(rename = "zona1")]
    Zone1,
    /// `zona2`
    #[serde(rename = "zona2")]
    Zone2,
    /// `zona3`
    #[serde(rename = "zona3")]
    Zone3,
    /// `zona4`: outer ring, highest base price and toll.
    #[serde(rename = "zona4")]
    Zone4,
}

impl Zone {
    /// All zones in table order.
    pub const ALL: [Zone; 4] = [Zone::Zone1, Zone::Zone2, Zone::Zone3, Zone::Zone4];

    /// Wire identifier used in records and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Zone::Zone1 => VALID_ZONES[0],
            Zone::Zone2 => VALID_ZONES[1],
            Zone::Zone3 => VALID_ZONES[2],
            Zone::Zone4 => VALID_ZONES[3],
        }
    }

    /// Look up a zone by identifier. Exact, case-sensitive match.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|zone| zone.as_str() == id)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| ValidationError::UnknownZone {
            zone: s.to_string(),
        })
    }
}
