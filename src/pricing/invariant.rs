//! Post-condition check: the itemized components add up to the reported total.

use serde_json::Value;

use crate::model::{CostBreakdown, PricedDelivery};

/// Largest accepted gap between the component sum and the reported total (exclusive).
pub const INVARIANT_TOLERANCE: f64 = 0.01;

/// Component keys of a serialized result, with the Portuguese key accepted as fallback.
const COMPONENT_KEYS: [(&str, &str); 5] = [
    ("base_cost", "custo_base"),
    ("toll_cost", "pedagio"),
    ("weight_surcharge", "sobretaxa_peso"),
    ("volume_surcharge", "sobretaxa_volume"),
    ("critical_window_cost", "custo_janela_critica"),
];

/// True when the result's components sum to its total within [`INVARIANT_TOLERANCE`].
pub fn check_invariant(result: &PricedDelivery) -> bool {
    breakdown_is_consistent(result.breakdown())
}

/// Same check on a bare breakdown. A NaN anywhere makes it fail.
pub fn breakdown_is_consistent(breakdown: &CostBreakdown) -> bool {
    (breakdown.component_sum() - breakdown.total).abs() < INVARIANT_TOLERANCE
}

/// Re-check a priced result read back as JSON.
///
/// Returns `false`, never an error, when the value is not an object or when any of the
/// five components or `total` is absent or not a number.
pub fn check_invariant_json(result: &Value) -> bool {
    let number = |key: &str, fallback: &str| {
        result
            .get(key)
            .or_else(|| result.get(fallback))
            .and_then(Value::as_f64)
    };

    let components: Option<Vec<f64>> = COMPONENT_KEYS
        .iter()
        .map(|&(key, fallback)| number(key, fallback))
        .collect();

    match (components, number("total", "total")) {
        (Some(components), Some(total)) => {
            let sum = components.iter().fold(0.0, |acc, value| acc + value);
            (sum - total).abs() < INVARIANT_TOLERANCE
        }
        _ => false,
    }
}
