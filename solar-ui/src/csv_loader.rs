//! CSV loader for extending the panel catalog.
//!
//! ## CSV Format
//!
//! Headers are matched by name (column order does not matter) and are
//! case-sensitive.
//!
//! | Column              | Required | Type    | Notes                                |
//! |---------------------|----------|---------|--------------------------------------|
//! | `name`              | yes      | string  | Shown in the panel dropdown          |
//! | `wattage`           | yes      | decimal | Rated DC watts per panel, positive   |
//! | `panel_cost`        | yes      | decimal | Per panel                            |
//! | `trunk_cable_cost`  | yes      | decimal | Per panel                            |
//! | `racking_cost`      | yes      | decimal | Per panel                            |
//! | `ground_screw_cost` | no       | decimal | Per panel; empty cell means 0        |
//! | `ground_mount`      | no       | bool    | `true`/`false`; empty cell means false |
//!
//! ### Example
//!
//! ```csv
//! name,wattage,panel_cost,trunk_cable_cost,racking_cost,ground_screw_cost,ground_mount
//! Silfab 430 Prime,430,215,20,80,,
//! Ground SunModo with Canadian 445,445,240,22,175,230,true
//! ```

use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use solar_core::models::PanelSpec;
use tracing::info;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    wattage: Decimal,
    panel_cost: Decimal,
    trunk_cable_cost: Decimal,
    racking_cost: Decimal,
    #[serde(default)]
    ground_screw_cost: Option<Decimal>,
    #[serde(default)]
    ground_mount: Option<bool>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading catalog CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, unreadable file, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `wattage` cell was zero or negative. `row` is 1-based
    /// (header = row 0).
    #[error("panel '{name}' on row {row} has non-positive wattage")]
    NonPositiveWattage { name: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CatalogRow,
    row_number: usize,
) -> Result<PanelSpec, CatalogLoadError> {
    if row.wattage <= Decimal::ZERO {
        return Err(CatalogLoadError::NonPositiveWattage {
            name: row.name,
            row: row_number,
        });
    }

    Ok(PanelSpec {
        name: row.name,
        wattage: row.wattage,
        panel_cost: row.panel_cost,
        trunk_cable_cost: row.trunk_cable_cost,
        racking_cost: row.racking_cost,
        ground_screw_cost: row.ground_screw_cost.unwrap_or(Decimal::ZERO),
        ground_mount: row.ground_mount.unwrap_or(false),
    })
}

/// Loads panel specs from any reader producing catalog CSV.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<PanelSpec>, CatalogLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut panels = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        panels.push(convert_row(row, index + 1)?);
    }

    Ok(panels)
}

/// Loads panel specs from a catalog CSV file on disk.
pub fn load_from_file(path: &Path) -> Result<Vec<PanelSpec>, CatalogLoadError> {
    let csv_reader = csv::Reader::from_path(path)?;
    let mut panels = Vec::new();

    for (index, record) in csv_reader.into_deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        panels.push(convert_row(row, index + 1)?);
    }

    info!(count = panels.len(), path = %path.display(), "loaded panel catalog");
    Ok(panels)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const FULL_ROW: &str = "\
name,wattage,panel_cost,trunk_cable_cost,racking_cost,ground_screw_cost,ground_mount
Ground SunModo with Canadian 445,445,240,22,175,230,true
";

    const MINIMAL_COLUMNS: &str = "\
name,wattage,panel_cost,trunk_cable_cost,racking_cost
Silfab 430 Prime,430,215,20,80
";

    #[test]
    fn loads_a_fully_specified_row() {
        let panels = load_from_reader(FULL_ROW.as_bytes()).unwrap();

        assert_eq!(panels.len(), 1);
        let p = &panels[0];
        assert_eq!(p.name, "Ground SunModo with Canadian 445");
        assert_eq!(p.wattage, dec!(445));
        assert_eq!(p.panel_cost, dec!(240));
        assert_eq!(p.trunk_cable_cost, dec!(22));
        assert_eq!(p.racking_cost, dec!(175));
        assert_eq!(p.ground_screw_cost, dec!(230));
        assert!(p.ground_mount);
    }

    #[test]
    fn optional_columns_may_be_omitted_entirely() {
        let panels = load_from_reader(MINIMAL_COLUMNS.as_bytes()).unwrap();

        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].ground_screw_cost, Decimal::ZERO);
        assert!(!panels[0].ground_mount);
    }

    #[test]
    fn empty_optional_cells_default_to_zero_and_false() {
        let csv = "\
name,wattage,panel_cost,trunk_cable_cost,racking_cost,ground_screw_cost,ground_mount
Silfab 430 Prime,430,215,20,80,,
";
        let panels = load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(panels[0].ground_screw_cost, Decimal::ZERO);
        assert!(!panels[0].ground_mount);
    }

    #[test]
    fn rejects_non_positive_wattage_with_row_number() {
        let csv = "\
name,wattage,panel_cost,trunk_cable_cost,racking_cost
Good Panel,430,215,20,80
Bad Panel,0,215,20,80
";
        let err = load_from_reader(csv.as_bytes()).unwrap_err();

        match err {
            CatalogLoadError::NonPositiveWattage { name, row } => {
                assert_eq!(name, "Bad Panel");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_a_missing_required_column() {
        let csv = "\
name,panel_cost,trunk_cable_cost,racking_cost
No Wattage,215,20,80
";
        let result = load_from_reader(csv.as_bytes());

        assert!(matches!(result, Err(CatalogLoadError::Parse(_))));
    }
}
