//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod delivery;
pub mod error;
pub mod malformed_line;
pub mod priced;
pub mod zone;

// Re-export for convenience
pub use delivery::{DeliveryRecord, RawDelivery, KEY_ALIASES};
pub use error::{AppError, ExpectedKind, InputError, ParseError, ValidationError};
pub use malformed_line::MalformedLine;
pub use priced::{CostBreakdown, PricedDelivery};
pub use zone::{Zone, VALID_ZONES};
