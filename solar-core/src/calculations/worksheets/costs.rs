//! Itemized cost worksheet.
//!
//! Totals each line of the cost schedule against the projected array and
//! sums the fixed project cost ("grand total") that the margin figures
//! are measured against.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{CostLineItem, ExtraCostItem};

/// A computed worksheet row: the item label and its dollar total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTotal {
    pub label: String,
    pub total: Decimal,
}

/// Result of the itemized cost worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Standard schedule rows, in schedule order.
    pub items: Vec<ItemTotal>,

    /// Filled optional extras only; unfilled rows are omitted.
    pub extras: Vec<ItemTotal>,

    /// Sum of all rows above: the fixed project cost.
    pub grand_total: Decimal,
}

/// Totals the cost schedule and optional extras for the projected array.
///
/// Unfilled extras contribute exactly zero; there is no way for a row to
/// fail, so this never errors.
pub fn summarize_costs(
    schedule: &[CostLineItem],
    extras: &[ExtraCostItem],
    total_panels: u32,
    output_watts: Decimal,
) -> CostSummary {
    let items: Vec<ItemTotal> = schedule
        .iter()
        .map(|item| ItemTotal {
            label: item.label.clone(),
            total: item.total(total_panels, output_watts),
        })
        .collect();

    let filled_extras: Vec<ItemTotal> = extras
        .iter()
        .filter(|extra| extra.amount.is_some())
        .map(|extra| ItemTotal {
            label: extra.label.clone(),
            total: extra.total(),
        })
        .collect();

    let grand_total = round_half_up(
        items.iter().map(|row| row.total).sum::<Decimal>()
            + filled_extras.iter().map(|row| row.total).sum::<Decimal>(),
    );

    CostSummary {
        items,
        extras: filled_extras,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{CostBasis, builtin_catalog, extra_cost_items, standard_cost_schedule};

    #[test]
    fn grand_total_sums_all_bases() {
        let schedule = vec![
            CostLineItem::new("Panels", CostBasis::PerPanel, dec!(230)),
            CostLineItem::new("Labor", CostBasis::PerWatt, dec!(0.69)),
            CostLineItem::new("Permits", CostBasis::Flat, dec!(900.00)),
        ];

        let summary = summarize_costs(&schedule, &[], 21, dec!(8925));

        assert_eq!(summary.items[0].total, dec!(4830.00));
        assert_eq!(summary.items[1].total, dec!(6158.25));
        assert_eq!(summary.items[2].total, dec!(900.00));
        assert_eq!(summary.grand_total, dec!(11888.25));
    }

    #[test]
    fn default_schedule_grand_total_for_qcell_21_panels() {
        let catalog = builtin_catalog();
        let schedule = standard_cost_schedule(&catalog[0]);

        let summary = summarize_costs(&schedule, &extra_cost_items(), 21, dec!(8925));

        assert_eq!(summary.grand_total, dec!(20982.22));
    }

    #[test]
    fn unfilled_extras_contribute_zero_and_are_omitted() {
        let schedule = vec![CostLineItem::new("Permits", CostBasis::Flat, dec!(900.00))];
        let extras = extra_cost_items();

        let summary = summarize_costs(&schedule, &extras, 0, Decimal::ZERO);

        assert!(summary.extras.is_empty());
        assert_eq!(summary.grand_total, dec!(900.00));
    }

    #[test]
    fn filled_extras_are_added_to_the_grand_total() {
        let schedule = vec![CostLineItem::new("Permits", CostBasis::Flat, dec!(900.00))];
        let mut extras = extra_cost_items();
        extras[0].amount = Some(dec!(450.00)); // Loam and Seed
        extras[9].amount = Some(dec!(1000.00)); // Additional Margin

        let summary = summarize_costs(&schedule, &extras, 0, Decimal::ZERO);

        assert_eq!(summary.extras.len(), 2);
        assert_eq!(summary.grand_total, dec!(2350.00));
    }

    #[test]
    fn empty_schedule_totals_zero() {
        let summary = summarize_costs(&[], &[], 21, dec!(8925));

        assert_eq!(summary.grand_total, Decimal::ZERO);
    }
}
