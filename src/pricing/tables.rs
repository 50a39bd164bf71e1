//! Static pricing tables.
//!
//! The tables are process-wide, read-only data. Pricing is never loaded from
//! configuration; a change of tariff is a code change.

use crate::model::Zone;

/// Base price and toll for one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRate {
    /// Base price charged for every delivery to the zone.
    pub base_price: f64,
    /// Toll charged for every delivery to the zone.
    pub toll_price: f64,
}

impl ZoneRate {
    /// Rate returned for an identifier outside the table.
    pub const ZERO: ZoneRate = ZoneRate::new(0.0, 0.0);

    /// Create a zone rate.
    pub const fn new(base_price: f64, toll_price: f64) -> Self {
        Self {
            base_price,
            toll_price,
        }
    }
}

/// Per-unit surcharge applied above a free allowance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surcharge {
    /// Amount included in the base price (kg or m³).
    pub free_threshold: f64,
    /// Price per unit above the threshold.
    pub rate: f64,
}

impl Surcharge {
    /// Create a surcharge rule.
    pub const fn new(free_threshold: f64, rate: f64) -> Self {
        Self {
            free_threshold,
            rate,
        }
    }

    /// `max(0, amount - free_threshold) * rate`.
    pub fn apply(&self, amount: f64) -> f64 {
        if amount > self.free_threshold {
            (amount - self.free_threshold) * self.rate
        } else {
            0.0
        }
    }
}

/// Complete tariff: zone rates plus weight, volume and critical-window rules.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    /// Indexed by `Zone` declaration order.
    zone_rates: [ZoneRate; 4],
    /// Surcharge per kg above the free weight.
    pub weight: Surcharge,
    /// Surcharge per m³ above the free volume.
    pub volume: Surcharge,
    /// Flat fee for a critical delivery window.
    pub critical_window_fee: f64,
}

/// The tariff in force.
pub static PRICING: PricingTable = PricingTable {
    zone_rates: [
        ZoneRate::new(15.0, 0.0),  // zona1
        ZoneRate::new(25.0, 5.50), // zona2
        ZoneRate::new(35.0, 8.00), // zona3
        ZoneRate::new(50.0, 12.00), // zona4
    ],
    weight: Surcharge::new(10.0, 2.50),
    volume: Surcharge::new(0.5, 3.00),
    critical_window_fee: 15.0,
};

impl PricingTable {
    /// Rate for a zone.
    pub const fn rate(&self, zone: Zone) -> ZoneRate {
        self.zone_rates[zone as usize]
    }

    /// Rate for a zone identifier, or [`ZoneRate::ZERO`] when the identifier is unknown.
    ///
    /// Only for contexts where the identifier was never validated (re-checking stored
    /// results, diagnostics). Pricing goes through [`Self::rate`].
    pub fn rate_for_id(&self, zone_id: &str) -> ZoneRate {
        Zone::from_id(zone_id)
            .map(|zone| self.rate(zone))
            .unwrap_or(ZoneRate::ZERO)
    }

    /// Every zone with its rate, in table order.
    pub fn zone_rates(&self) -> impl Iterator<Item = (Zone, ZoneRate)> + '_ {
        Zone::ALL.into_iter().map(move |zone| (zone, self.rate(zone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_rates_match_tariff() {
        let rates: Vec<_> = PRICING.zone_rates().collect();
        assert_eq!(
            rates,
            vec![
                (Zone::Zone1, ZoneRate::new(15.0, 0.0)),
                (Zone::Zone2, ZoneRate::new(25.0, 5.5)),
                (Zone::Zone3, ZoneRate::new(35.0, 8.0)),
                (Zone::Zone4, ZoneRate::new(50.0, 12.0)),
            ]
        );
    }

    #[test]
    fn rate_for_unknown_id_is_zero() {
        assert_eq!(PRICING.rate_for_id("zona5"), ZoneRate::ZERO);
        assert_eq!(PRICING.rate_for_id(""), ZoneRate::ZERO);
        assert_eq!(PRICING.rate_for_id("zona4"), ZoneRate::new(50.0, 12.0));
    }

    #[test]
    fn surcharge_is_zero_at_and_below_threshold() {
        assert_eq!(PRICING.weight.apply(0.0), 0.0);
        assert_eq!(PRICING.weight.apply(10.0), 0.0);
        assert_eq!(PRICING.volume.apply(0.5), 0.0);
    }

    #[test]
    fn surcharge_is_linear_above_threshold() {
        assert_eq!(PRICING.weight.apply(14.0), 10.0);
        assert_eq!(PRICING.volume.apply(1.5), 3.0);
    }
}
