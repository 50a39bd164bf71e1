//! Urban delivery cost calculator (parcelcost).
//!
//! Validates delivery records, prices them against a static zone tariff, checks that
//! every itemized breakdown adds up to its total, and aggregates batches.
//!
//! The crate follows a Pure Core / Impure Shell split:
//!
//! - Core: [`model`], [`validation`], [`pricing`], [`parser`] and [`pipeline`] are
//!   deterministic and never touch the terminal.
//! - Shell: [`source`], [`prompt`], [`report`], [`config`] and [`logging`] deal with
//!   files, stdin, stdout and the environment.
//!
//! ```
//! use parcelcost::model::RawDelivery;
//! use parcelcost::pricing::{check_invariant, compute_cost};
//! use parcelcost::validation::validate_record;
//!
//! let record = validate_record(&RawDelivery::new("zona2", 15.0, 0.8, true))
//!     .into_record()
//!     .expect("valid delivery");
//! let priced = compute_cost(&record);
//! assert!((priced.total() - 58.9).abs() < 1e-9);
//! assert!(check_invariant(&priced));
//! ```

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod pricing;
pub mod prompt;
pub mod report;
pub mod source;
pub mod validation;
