//! Cost aggregation over the registry.
//!
//! Items are grouped by their current label in first-seen order. A group's
//! unit price is the price of the first item seen with that label; items that
//! share a label but not a price are not reconciled in the group line. The
//! total sums every item's own price, so it stays correct regardless.

#[cfg(test)]
#[path = "cost_test.rs"]
mod cost_test;

use serde::Serialize;

use crate::registry::Registry;

/// One label group in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostLine {
    pub label: String,
    pub unit_price: u64,
    pub count: u64,
    pub subtotal: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CostSummary {
    pub total_cost: u64,
    pub by_label: Vec<CostLine>,
}

/// Derive the grouped cost summary from the current registry.
#[must_use]
pub fn compute_cost_summary(registry: &Registry) -> CostSummary {
    let mut summary = CostSummary::default();
    for item in registry.iter() {
        let price = item.price.units();
        summary.total_cost = summary.total_cost.saturating_add(price);
        match summary.by_label.iter_mut().find(|line| line.label == item.label) {
            Some(line) => {
                line.count += 1;
                line.subtotal = line.unit_price.saturating_mul(line.count);
            }
            None => summary.by_label.push(CostLine {
                label: item.label.clone(),
                unit_price: price,
                count: 1,
                subtotal: price,
            }),
        }
    }
    summary
}
