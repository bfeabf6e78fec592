use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A panel model with its rated wattage and the per-panel unit cost
/// defaults that depend on the panel choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub name: String,

    /// Rated DC output of one panel, in watts.
    pub wattage: Decimal,

    // Per-panel unit cost defaults
    pub panel_cost: Decimal,
    pub trunk_cable_cost: Decimal,
    pub racking_cost: Decimal,
    pub ground_screw_cost: Decimal,

    /// Fixed ground-mount array. Drives the $/watt tier, ground screw
    /// costs, and the dirt work default.
    pub ground_mount: bool,
}

impl PanelSpec {
    /// A user-defined panel. Unit costs default to zero and stay editable
    /// in the cost worksheet.
    pub fn custom(
        name: impl Into<String>,
        wattage: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            wattage,
            panel_cost: Decimal::ZERO,
            trunk_cable_cost: Decimal::ZERO,
            racking_cost: Decimal::ZERO,
            ground_screw_cost: Decimal::ZERO,
            ground_mount: false,
        }
    }
}

/// The built-in panel catalog.
///
/// Rates are per panel. The catalog can be extended at startup from a CSV
/// file or from the "Add New" entry on the projection worksheet.
pub fn builtin_catalog() -> Vec<PanelSpec> {
    vec![
        PanelSpec {
            name: "Qcell Qtron+ 425w cell Blk/blk".into(),
            wattage: dec!(425),
            panel_cost: dec!(230),
            trunk_cable_cost: dec!(20),
            racking_cost: dec!(80),
            ground_screw_cost: Decimal::ZERO,
            ground_mount: false,
        },
        PanelSpec {
            name: "Jinko 425 all black".into(),
            wattage: dec!(425),
            panel_cost: dec!(180),
            trunk_cable_cost: dec!(20),
            racking_cost: dec!(80),
            ground_screw_cost: Decimal::ZERO,
            ground_mount: false,
        },
        PanelSpec {
            name: "Solaria 390w 60-Cell Black on Black".into(),
            wattage: dec!(390),
            panel_cost: dec!(254),
            trunk_cable_cost: dec!(20),
            racking_cost: dec!(80),
            ground_screw_cost: Decimal::ZERO,
            ground_mount: false,
        },
        PanelSpec {
            name: "REC 420 Q pure".into(),
            wattage: dec!(420),
            panel_cost: dec!(350),
            trunk_cable_cost: dec!(20),
            racking_cost: dec!(80),
            ground_screw_cost: Decimal::ZERO,
            ground_mount: false,
        },
        PanelSpec {
            name: "Fixed Ground SunModo racking with Jinko 425w (Even numbers only)".into(),
            wattage: dec!(425),
            panel_cost: dec!(230),
            trunk_cable_cost: dec!(22),
            racking_cost: dec!(175),
            ground_screw_cost: dec!(230),
            ground_mount: true,
        },
    ]
}
