//! Pricing core: static tables, cost calculator, invariant checker and batch operations.
//!
//! Pure functions only. Nothing in this module logs, reads input or fails.

pub mod batch;
pub mod calculator;
pub mod invariant;
pub mod tables;

pub use batch::{filter_valid, map_costs, sum_totals, BatchSummary};
pub use calculator::{compute_cost, compute_cost_with};
pub use invariant::{
    breakdown_is_consistent, check_invariant, check_invariant_json, INVARIANT_TOLERANCE,
};
pub use tables::{PricingTable, Surcharge, ZoneRate, PRICING};
