//! Batch processing: map, filter and fold over sequences of deliveries.
//!
//! All three operations preserve input order and never exit early.

use serde::Serialize;

use crate::model::{DeliveryRecord, PricedDelivery, RawDelivery};
use crate::validation::validate_record;

use super::calculator::compute_cost;

/// Price every record, 1:1 and in input order.
pub fn map_costs(records: &[DeliveryRecord]) -> Vec<PricedDelivery> {
    records.iter().map(compute_cost).collect()
}

/// Keep the records that pass validation, in their relative order.
///
/// Invalid records are dropped silently; callers that need to report them should run
/// [`validate_record`] themselves.
pub fn filter_valid(records: &[RawDelivery]) -> Vec<DeliveryRecord> {
    records
        .iter()
        .filter_map(|raw| validate_record(raw).into_record())
        .collect()
}

/// Left fold of the totals, starting at `0.0`, in input order.
pub fn sum_totals(results: &[PricedDelivery]) -> f64 {
    results.iter().fold(0.0, |acc, result| acc + result.total())
}

/// Count and grand total of a priced batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Number of priced deliveries.
    pub count: usize,
    /// Sum of their totals.
    pub grand_total: f64,
}

impl BatchSummary {
    /// Summarize a sequence of priced deliveries.
    pub fn from_results(results: &[PricedDelivery]) -> Self {
        Self {
            count: results.len(),
            grand_total: sum_totals(results),
        }
    }
}
