//! Cost calculator: validated record in, priced delivery out.
//!
//! Every function here is pure. The calculator only accepts [`DeliveryRecord`], so the
//! zone lookup can never miss.

use crate::model::{CostBreakdown, DeliveryRecord, PricedDelivery, Zone};

use super::tables::{PricingTable, PRICING};

/// Base price of a zone.
pub fn base_cost(zone: Zone) -> f64 {
    PRICING.rate(zone).base_price
}

/// Toll of a zone.
pub fn toll_cost(zone: Zone) -> f64 {
    PRICING.rate(zone).toll_price
}

/// Surcharge for the kilograms above the free weight.
pub fn weight_surcharge(weight: f64) -> f64 {
    PRICING.weight.apply(weight)
}

/// Surcharge for the cubic meters above the free volume.
pub fn volume_surcharge(volume: f64) -> f64 {
    PRICING.volume.apply(volume)
}

/// Flat critical-window fee, or zero.
pub fn critical_window_cost(critical_window: bool) -> f64 {
    if critical_window {
        PRICING.critical_window_fee
    } else {
        0.0
    }
}

/// Price a delivery with the tariff in force.
pub fn compute_cost(record: &DeliveryRecord) -> PricedDelivery {
    compute_cost_with(&PRICING, record)
}

/// Price a delivery against an explicit table.
///
/// The total is a left fold over the components in breakdown order.
pub fn compute_cost_with(table: &PricingTable, record: &DeliveryRecord) -> PricedDelivery {
    let rate = table.rate(record.zone());

    let mut breakdown = CostBreakdown {
        base_cost: rate.base_price,
        toll_cost: rate.toll_price,
        weight_surcharge: table.weight.apply(record.weight()),
        volume_surcharge: table.volume.apply(record.volume()),
        critical_window_cost: if record.critical_window() {
            table.critical_window_fee
        } else {
            0.0
        },
        total: 0.0,
    };
    breakdown.total = breakdown.component_sum();

    PricedDelivery::new(*record, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(zone: Zone, weight: f64, volume: f64, critical_window: bool) -> DeliveryRecord {
        DeliveryRecord::new(zone, weight, volume, critical_window).expect("valid record")
    }

    #[test]
    fn light_small_zone1_costs_base_only() {
        let priced = compute_cost(&record(Zone::Zone1, 5.0, 0.3, false));
        let breakdown = priced.breakdown();

        assert_eq!(breakdown.base_cost, 15.0);
        assert_eq!(breakdown.toll_cost, 0.0);
        assert_eq!(breakdown.weight_surcharge, 0.0);
        assert_eq!(breakdown.volume_surcharge, 0.0);
        assert_eq!(breakdown.critical_window_cost, 0.0);
        assert_eq!(breakdown.total, 15.0);
    }

    #[test]
    fn heavy_bulky_critical_zone2_adds_every_surcharge() {
        let priced = compute_cost(&record(Zone::Zone2, 15.0, 0.8, true));
        let breakdown = priced.breakdown();

        assert_eq!(breakdown.base_cost, 25.0);
        assert_eq!(breakdown.toll_cost, 5.5);
        assert_eq!(breakdown.weight_surcharge, 12.5);
        assert!((breakdown.volume_surcharge - 0.9).abs() < 1e-9);
        assert_eq!(breakdown.critical_window_cost, 15.0);
        assert!((breakdown.total - 58.9).abs() < 1e-9);
    }

    #[test]
    fn result_carries_record_unchanged() {
        let input = record(Zone::Zone4, 11.0, 0.6, true);
        let priced = compute_cost(&input);
        assert_eq!(priced.record(), &input);
    }

    #[test]
    fn component_functions_agree_with_calculator() {
        let input = record(Zone::Zone3, 12.0, 1.0, true);
        let breakdown = *compute_cost(&input).breakdown();

        assert_eq!(breakdown.base_cost, base_cost(Zone::Zone3));
        assert_eq!(breakdown.toll_cost, toll_cost(Zone::Zone3));
        assert_eq!(breakdown.weight_surcharge, weight_surcharge(12.0));
        assert_eq!(breakdown.volume_surcharge, volume_surcharge(1.0));
        assert_eq!(breakdown.critical_window_cost, critical_window_cost(true));
        assert_eq!(critical_window_cost(false), 0.0);
    }

    #[test]
    fn compute_cost_with_uses_given_table() {
        let mut table = PRICING.clone();
        table.critical_window_fee = 20.0;

        let priced = compute_cost_with(&table, &record(Zone::Zone1, 1.0, 0.1, true));
        assert_eq!(priced.breakdown().critical_window_cost, 20.0);
        assert_eq!(priced.total(), 35.0);
    }
}
