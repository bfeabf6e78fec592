use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::PanelSpec;

/// How a line item's rate is turned into a dollar total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostBasis {
    /// rate × total panel count
    PerPanel,
    /// rate × array output watts
    PerWatt,
    /// rate taken as-is
    Flat,
}

impl CostBasis {
    /// Short caption shown next to the rate entry field.
    pub fn rate_caption(&self) -> &'static str {
        match self {
            Self::PerPanel => "Cost per Panel",
            Self::PerWatt => "Cost per Watt",
            Self::Flat => "Cost",
        }
    }
}

/// One row of the itemized cost worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub label: String,
    pub basis: CostBasis,
    pub rate: Decimal,
}

impl CostLineItem {
    pub fn new(
        label: impl Into<String>,
        basis: CostBasis,
        rate: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            basis,
            rate,
        }
    }

    /// Dollar total for this row, rounded to cents.
    pub fn total(
        &self,
        total_panels: u32,
        output_watts: Decimal,
    ) -> Decimal {
        let raw = match self.basis {
            CostBasis::PerPanel => self.rate * Decimal::from(total_panels),
            CostBasis::PerWatt => self.rate * output_watts,
            CostBasis::Flat => self.rate,
        };
        round_half_up(raw)
    }
}

/// An optional flat cost. `amount` stays `None` until the user enters a
/// valid figure; unfilled items contribute exactly zero to the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCostItem {
    pub label: String,
    pub amount: Option<Decimal>,
}

impl ExtraCostItem {
    pub fn total(&self) -> Decimal {
        self.amount.map(round_half_up).unwrap_or(Decimal::ZERO)
    }
}

// Labels of the lookup-driven rows; `apply_panel_defaults` re-resolves
// these when the panel selection changes.
const PANELS_PREFIX: &str = "Panels";
const TRUNK_CABLE: &str = "A/C Trunk Cable";
const RACKING: &str = "Racking and Hardware";
const GROUND_SCREWS: &str = "Ground Screw Costs";
const DIRT_WORK: &str = "Dirt Work";

/// The standard cost schedule for a freshly selected panel, with default
/// rates resolved from the panel spec.
pub fn standard_cost_schedule(panel: &PanelSpec) -> Vec<CostLineItem> {
    vec![
        CostLineItem::new(
            format!("{PANELS_PREFIX} ({})", panel.name),
            CostBasis::PerPanel,
            panel.panel_cost,
        ),
        CostLineItem::new("Solarinsure", CostBasis::PerWatt, dec!(0.10)),
        CostLineItem::new(TRUNK_CABLE, CostBasis::PerPanel, panel.trunk_cable_cost),
        CostLineItem::new(
            "Enphase Micros IQ-8+ (300-watt) / IQ8A with 445's",
            CostBasis::PerPanel,
            dec!(190.00),
        ),
        CostLineItem::new("Enphase 10yr Labor Buy Up", CostBasis::PerPanel, dec!(6.00)),
        CostLineItem::new(
            "Envoy-S Metered with 10-year monitoring",
            CostBasis::Flat,
            dec!(585.47),
        ),
        CostLineItem::new("Boxes and Hardware", CostBasis::Flat, dec!(1200.00)),
        CostLineItem::new(RACKING, CostBasis::PerPanel, panel.racking_cost),
        CostLineItem::new(GROUND_SCREWS, CostBasis::PerPanel, panel.ground_screw_cost),
        CostLineItem::new(DIRT_WORK, CostBasis::Flat, dirt_work_default(panel)),
        CostLineItem::new("Underground Location", CostBasis::Flat, dec!(200.00)),
        CostLineItem::new("Permits", CostBasis::Flat, dec!(900.00)),
        CostLineItem::new("Labor", CostBasis::PerWatt, dec!(0.69)),
    ]
}

fn dirt_work_default(panel: &PanelSpec) -> Decimal {
    if panel.ground_mount {
        dec!(2000.00)
    } else {
        Decimal::ZERO
    }
}

/// Re-resolves the lookup-driven rates (panels, trunk cable, racking,
/// ground screws, dirt work) to the given panel's defaults, leaving
/// user-edited rates on the other rows untouched.
pub fn apply_panel_defaults(
    schedule: &mut [CostLineItem],
    panel: &PanelSpec,
) {
    for item in schedule.iter_mut() {
        if item.label.starts_with(PANELS_PREFIX) {
            item.label = format!("{PANELS_PREFIX} ({})", panel.name);
            item.rate = panel.panel_cost;
        } else if item.label == TRUNK_CABLE {
            item.rate = panel.trunk_cable_cost;
        } else if item.label == RACKING {
            item.rate = panel.racking_cost;
        } else if item.label == GROUND_SCREWS {
            item.rate = panel.ground_screw_cost;
        } else if item.label == DIRT_WORK {
            item.rate = dirt_work_default(panel);
        }
    }
}

/// The optional extra cost rows, all unfilled.
pub fn extra_cost_items() -> Vec<ExtraCostItem> {
    [
        "Loam and Seed",
        "Man Lift Rental ($500 each)",
        "Trench Run ($20.00/foot for all roofs and any feet over 100 for ground array)",
        "Enphase Cell Card for Areas with No WiFI access (5yr plan) $500",
        "Enphase Line Filter  (All system with greater than 200' from micro's to Envoy). ($450)",
        "Septic Vent Pipe Relocation ($900)",
        "SunModo Ledge Drilling ($50/panel)",
        "Other Upgrades (Panel Replacement, Service Upgrade Etc.)",
        "Multiple Arrays beyond 2 ($600 per additional array)",
        "Additional Margin",
    ]
    .into_iter()
    .map(|label| ExtraCostItem {
        label: label.into(),
        amount: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::builtin_catalog;

    fn qcell() -> PanelSpec {
        builtin_catalog().swap_remove(0)
    }

    fn sunmodo() -> PanelSpec {
        builtin_catalog().swap_remove(4)
    }

    #[test]
    fn per_panel_total_multiplies_by_panel_count() {
        let item = CostLineItem::new("Panels", CostBasis::PerPanel, dec!(230));

        assert_eq!(item.total(21, dec!(8925)), dec!(4830.00));
    }

    #[test]
    fn per_watt_total_multiplies_by_output_watts() {
        let item = CostLineItem::new("Labor", CostBasis::PerWatt, dec!(0.69));

        assert_eq!(item.total(21, dec!(8925)), dec!(6158.25));
    }

    #[test]
    fn flat_total_ignores_quantities() {
        let item = CostLineItem::new("Permits", CostBasis::Flat, dec!(900.00));

        assert_eq!(item.total(0, Decimal::ZERO), dec!(900.00));
    }

    #[test]
    fn unfilled_extra_contributes_zero() {
        let extra = ExtraCostItem {
            label: "Loam and Seed".into(),
            amount: None,
        };

        assert_eq!(extra.total(), Decimal::ZERO);
    }

    #[test]
    fn standard_schedule_resolves_panel_dependent_defaults() {
        let schedule = standard_cost_schedule(&qcell());

        assert_eq!(schedule[0].label, "Panels (Qcell Qtron+ 425w cell Blk/blk)");
        assert_eq!(schedule[0].rate, dec!(230));
        assert_eq!(schedule[2].rate, dec!(20)); // trunk cable
        assert_eq!(schedule[7].rate, dec!(80)); // racking
        assert_eq!(schedule[8].rate, Decimal::ZERO); // ground screws
        assert_eq!(schedule[9].rate, Decimal::ZERO); // dirt work
    }

    #[test]
    fn ground_mount_schedule_includes_screws_and_dirt_work() {
        let schedule = standard_cost_schedule(&sunmodo());

        assert_eq!(schedule[8].rate, dec!(230));
        assert_eq!(schedule[9].rate, dec!(2000.00));
    }

    #[test]
    fn apply_panel_defaults_updates_lookup_rows_only() {
        let mut schedule = standard_cost_schedule(&qcell());
        // User tweaks a non-lookup row.
        schedule[11].rate = dec!(1250.00); // permits

        apply_panel_defaults(&mut schedule, &sunmodo());

        assert!(schedule[0].label.contains("Fixed Ground SunModo"));
        assert_eq!(schedule[0].rate, dec!(230));
        assert_eq!(schedule[2].rate, dec!(22));
        assert_eq!(schedule[7].rate, dec!(175));
        assert_eq!(schedule[8].rate, dec!(230));
        assert_eq!(schedule[9].rate, dec!(2000.00));
        // The user's edit survives the panel switch.
        assert_eq!(schedule[11].rate, dec!(1250.00));
    }

    #[test]
    fn extra_cost_items_start_unfilled() {
        let extras = extra_cost_items();

        assert_eq!(extras.len(), 10);
        assert!(extras.iter().all(|e| e.amount.is_none()));
    }
}
