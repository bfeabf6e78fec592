//! Panel projection worksheet view.
//!
//! Sizes the array from the annual usage, with live recalculation as the
//! user types. Picking a panel from the dropdown re-resolves the
//! panel-dependent cost defaults on the itemized cost worksheet.

use cursive::Cursive;
use cursive::view::{Nameable, Resizable};
use cursive::views::{Dialog, DummyView, EditView, LinearLayout, SelectView, TextView};
use rust_decimal::Decimal;

use solar_core::calculations::common::{fmt_ratio_percent, fmt_whole};
use solar_core::calculations::{ProjectionResult, ProjectionWorksheet};

use super::status_bar::{build_status_bar, hints};
use super::workflow::show_workflow;
use crate::state::AppState;
use crate::utils::{blank_if_zero, parse_count, parse_money, truncate_label};

// View names for accessing components
const ANNUAL_KWH_FIELD: &str = "annual_kwh";
const MONTHLY_BILL_FIELD: &str = "monthly_bill";
const ADDITIONAL_FIELD: &str = "additional_panels";
const FACTOR_FIELD: &str = "production_factor";
const RESULTS_VIEW: &str = "projection_results";

const CUSTOM_NAME_FIELD: &str = "custom_panel_name";
const CUSTOM_WATTS_FIELD: &str = "custom_panel_watts";

/// Panel dropdown entries: a catalog index or the "Add New" action.
#[derive(Debug, Clone, Copy)]
enum PanelChoice {
    Catalog(usize),
    AddNew,
}

/// Display the panel projection worksheet.
pub fn show_projection_worksheet(siv: &mut Cursive) {
    let (names, selected, annual_kwh, monthly_bill, additional, factor) = siv
        .with_user_data(|state: &mut AppState| {
            (
                state
                    .catalog
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>(),
                state.selected_panel,
                state.annual_kwh,
                state.monthly_bill,
                state.additional_panels,
                state.production_factor,
            )
        })
        .expect("app state is set at startup");

    let mut panel_select = SelectView::new();
    for (i, name) in names.iter().enumerate() {
        panel_select.add_item(truncate_label(name, 56), PanelChoice::Catalog(i));
    }
    panel_select.add_item("Add New…", PanelChoice::AddNew);
    let _ = panel_select.set_selection(selected);
    let panel_select = panel_select.on_submit(on_panel_chosen);

    let form = LinearLayout::vertical()
        .child(TextView::new("Panel type (Enter to choose):"))
        .child(panel_select)
        .child(DummyView.fixed_height(1))
        .child(field_row(
            "Kilowatt Hours Annual:",
            ANNUAL_KWH_FIELD,
            &blank_if_zero(annual_kwh),
        ))
        .child(field_row(
            "Avg Monthly Bill ($):",
            MONTHLY_BILL_FIELD,
            &blank_if_zero(monthly_bill),
        ))
        .child(field_row(
            "Add'l Panels:",
            ADDITIONAL_FIELD,
            &additional.to_string(),
        ))
        .child(field_row(
            "Production Factor:",
            FACTOR_FIELD,
            &factor.to_string(),
        ));

    let results = TextView::new(format_results(None, Decimal::ZERO))
        .with_name(RESULTS_VIEW)
        .fixed_height(5);

    let status = build_status_bar(&[hints::TAB, hints::SHIFT_TAB, hints::ESC, hints::CTRL_Q]);

    let layout = LinearLayout::vertical()
        .child(form)
        .child(TextView::new("─".repeat(56)))
        .child(results)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Panel Projection")
        .button("Cancel", on_cancel)
        .button("Save", on_save)
        .padding_lrtb(1, 1, 0, 0);

    siv.add_layer(dialog);

    // Trigger initial calculation
    recalculate(siv);
}

/// Create a labeled field row.
fn field_row(
    label: &str,
    name: &str,
    content: &str,
) -> LinearLayout {
    LinearLayout::horizontal()
        .child(TextView::new(format!("{label:24} ")))
        .child(
            EditView::new()
                .content(content)
                .on_edit(|s, _, _| recalculate(s))
                .on_submit(|s, _| on_save(s))
                .with_name(name)
                .fixed_width(14),
        )
}

/// Get decimal value from a named EditView.
fn get_field(
    siv: &mut Cursive,
    name: &str,
) -> Decimal {
    siv.call_on_name(name, |v: &mut EditView| parse_money(&v.get_content()))
        .unwrap_or(Decimal::ZERO)
}

fn get_count_field(
    siv: &mut Cursive,
    name: &str,
) -> u32 {
    siv.call_on_name(name, |v: &mut EditView| parse_count(&v.get_content()))
        .unwrap_or(0)
}

/// Current projection from the field values (not yet saved to state).
fn current_projection(siv: &mut Cursive) -> (Option<ProjectionResult>, Decimal) {
    let annual_kwh = get_field(siv, ANNUAL_KWH_FIELD);
    let additional = get_count_field(siv, ADDITIONAL_FIELD);
    let factor = get_field(siv, FACTOR_FIELD);

    let wattage = siv
        .with_user_data(|state: &mut AppState| state.panel().wattage)
        .unwrap_or(Decimal::ZERO);

    let result = ProjectionWorksheet::new(factor)
        .calculate(annual_kwh, wattage, additional)
        .ok();
    (result, wattage)
}

/// Recalculate and update the results display.
fn recalculate(siv: &mut Cursive) {
    let (result, wattage) = current_projection(siv);

    siv.call_on_name(RESULTS_VIEW, |v: &mut TextView| {
        v.set_content(format_results(result.as_ref(), wattage));
    });
}

/// Format calculation results for display.
fn format_results(
    result: Option<&ProjectionResult>,
    wattage: Decimal,
) -> String {
    match result {
        Some(r) => format!(
            "Panel Size: {:>6} W      Projected Panels: {:>6}\n\
             Total Panels: {:>6}     Output: {:>10} W\n\
             Output: {:>10} kWh   Production Offset: {:>6}",
            wattage,
            r.projected_panels,
            r.total_panels,
            fmt_whole(r.output_watts),
            fmt_whole(r.output_kwh),
            fmt_ratio_percent(r.production_offset),
        ),
        None => "Enter a valid production factor to project the array.".to_string(),
    }
}

/// Panel dropdown submit handler.
fn on_panel_chosen(
    siv: &mut Cursive,
    choice: &PanelChoice,
) {
    match choice {
        PanelChoice::Catalog(index) => {
            siv.with_user_data(|state: &mut AppState| state.select_panel(*index));
            recalculate(siv);
        }
        PanelChoice::AddNew => show_add_panel_dialog(siv),
    }
}

/// Small dialog collecting a custom panel name and wattage.
fn show_add_panel_dialog(siv: &mut Cursive) {
    let form = LinearLayout::vertical()
        .child(
            LinearLayout::horizontal()
                .child(TextView::new("Panel Name:       "))
                .child(EditView::new().with_name(CUSTOM_NAME_FIELD).fixed_width(28)),
        )
        .child(
            LinearLayout::horizontal()
                .child(TextView::new("Panel Size (W):   "))
                .child(
                    EditView::new()
                        .content("425")
                        .with_name(CUSTOM_WATTS_FIELD)
                        .fixed_width(28),
                ),
        );

    let dialog = Dialog::around(form)
        .title("Add New Panel")
        .button("Cancel", |s| {
            s.pop_layer();
        })
        .button("Add", on_add_panel);

    siv.add_layer(dialog);
}

fn on_add_panel(siv: &mut Cursive) {
    let name = siv
        .call_on_name(CUSTOM_NAME_FIELD, |v: &mut EditView| {
            v.get_content().to_string()
        })
        .unwrap_or_default();
    let wattage = get_field(siv, CUSTOM_WATTS_FIELD);
    let wattage = if wattage <= Decimal::ZERO {
        Decimal::from(425)
    } else {
        wattage
    };

    siv.with_user_data(|state: &mut AppState| {
        state.add_custom_panel(name, wattage);
    });

    // Rebuild the worksheet so the dropdown picks up the new entry.
    siv.pop_layer(); // add-panel dialog
    siv.pop_layer(); // projection worksheet
    show_projection_worksheet(siv);
}

/// Handle cancel button - discard and return to workflow.
fn on_cancel(siv: &mut Cursive) {
    siv.pop_layer();
    show_workflow(siv);
}

/// Handle save button - store inputs and return to workflow.
fn on_save(siv: &mut Cursive) {
    let annual_kwh = get_field(siv, ANNUAL_KWH_FIELD);
    let monthly_bill = get_field(siv, MONTHLY_BILL_FIELD);
    let additional = get_count_field(siv, ADDITIONAL_FIELD);
    let factor = get_field(siv, FACTOR_FIELD);

    siv.with_user_data(|state: &mut AppState| {
        state.annual_kwh = annual_kwh;
        state.monthly_bill = monthly_bill;
        state.additional_panels = additional;
        state.production_factor = factor;
        state.projection_saved = true;
    });

    siv.pop_layer();
    show_workflow(siv);
}
