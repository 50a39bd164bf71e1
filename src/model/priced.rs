//! Priced deliveries: a validated record plus its itemized cost breakdown.

use serde::Serialize;

use super::delivery::DeliveryRecord;

/// Itemized cost of one delivery.
///
/// # Invariants
///
/// - `total` equals the sum of the five components (checked by
///   [`crate::pricing::check_invariant`] within a 0.01 tolerance)
/// - Every component is non-negative when produced by [`crate::pricing::compute_cost`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Base price of the destination zone.
    pub base_cost: f64,
    /// Toll of the destination zone.
    pub toll_cost: f64,
    /// Surcharge for weight above the free threshold.
    pub weight_surcharge: f64,
    /// Surcharge for volume above the free threshold.
    pub volume_surcharge: f64,
    /// Flat surcharge for a critical delivery window, or zero.
    pub critical_window_cost: f64,
    /// Reported total.
    pub total: f64,
}

impl CostBreakdown {
    /// The five cost components in summation order (base, toll, weight, volume, window).
    pub fn components(&self) -> [f64; 5] {
        [
            self.base_cost,
            self.toll_cost,
            self.weight_surcharge,
            self.volume_surcharge,
            self.critical_window_cost,
        ]
    }

    /// Left-fold sum of [`Self::components`], independent of the stored `total`.
    pub fn component_sum(&self) -> f64 {
        self.components().iter().fold(0.0, |acc, value| acc + value)
    }
}

/// Enriched delivery result: the original record carried forward unchanged, plus costs.
///
/// Serializes flat: `zone`, `weight`, `volume`, `critical_window`, then the six cost
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricedDelivery {
    #[serde(flatten)]
    record: DeliveryRecord,
    #[serde(flatten)]
    breakdown: CostBreakdown,
}

impl PricedDelivery {
    /// Pair a record with a breakdown.
    ///
    /// No consistency check happens here; use [`crate::pricing::check_invariant`] to
    /// verify a breakdown that did not come from the calculator.
    pub fn new(record: DeliveryRecord, breakdown: CostBreakdown) -> Self {
        Self { record, breakdown }
    }

    /// The record this price was computed from.
    pub fn record(&self) -> &DeliveryRecord {
        &self.record
    }

    /// The itemized costs.
    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    /// Shorthand for `breakdown().total`.
    pub fn total(&self) -> f64 {
        self.breakdown.total
    }
}
