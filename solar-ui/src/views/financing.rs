//! Pricing and financing worksheet view.
//!
//! Shows the Client Funded / 15yr / 20yr grid over the saved projection
//! and cost schedule, recomputed live as the deposit, loan rates, or the
//! $/watt figure change.

use cursive::Cursive;
use cursive::view::{Nameable, Resizable};
use cursive::views::{Dialog, DummyView, EditView, LinearLayout, TextView};
use rust_decimal::Decimal;

use solar_core::calculations::common::fmt_currency;
use solar_core::calculations::{FinancingResult, PricingResult, PricingWorksheet};

use super::status_bar::{build_status_bar, hints};
use super::workflow::show_workflow;
use crate::state::AppState;
use crate::utils::{blank_if_zero, parse_money};

// View names for accessing components
const DEPOSIT_FIELD: &str = "fin_deposit";
const RATE_SHORT_FIELD: &str = "fin_rate_short";
const RATE_LONG_FIELD: &str = "fin_rate_long";
const PER_WATT_FIELD: &str = "fin_per_watt";
const GRID_VIEW: &str = "financing_grid";

/// Display the pricing and financing worksheet.
pub fn show_financing_worksheet(siv: &mut Cursive) {
    let (deposit, rate_short, rate_long, per_watt) = siv
        .with_user_data(|state: &mut AppState| {
            let per_watt = state.per_watt_override.unwrap_or_else(|| {
                let watts = state
                    .projection()
                    .map(|p| p.output_watts)
                    .unwrap_or(Decimal::ZERO);
                PricingWorksheet::new(state.config.clone())
                    .default_per_watt_rate(watts, state.panel().ground_mount)
            });
            (state.deposit, state.rate_short, state.rate_long, per_watt)
        })
        .expect("app state is set at startup");

    let form = LinearLayout::vertical()
        .child(field_row(
            "Deposit Amount ($):",
            DEPOSIT_FIELD,
            &blank_if_zero(deposit),
        ))
        .child(field_row(
            "15-Year Rate (%):",
            RATE_SHORT_FIELD,
            &rate_short.to_string(),
        ))
        .child(field_row(
            "20-Year Rate (%):",
            RATE_LONG_FIELD,
            &rate_long.to_string(),
        ))
        .child(field_row("$/Watt:", PER_WATT_FIELD, &per_watt.to_string()));

    let grid = TextView::new("")
        .with_name(GRID_VIEW)
        .fixed_height(12);

    let status = build_status_bar(&[hints::TAB, hints::SHIFT_TAB, hints::ESC, hints::CTRL_Q]);

    let layout = LinearLayout::vertical()
        .child(form)
        .child(TextView::new("─".repeat(68)))
        .child(grid)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Pricing & Financing")
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
        .child(TextView::new(format!("{label:22} ")))
        .child(
            EditView::new()
                .content(content)
                .on_edit(|s, _, _| recalculate(s))
                .on_submit(|s, _| on_save(s))
                .with_name(name)
                .fixed_width(12),
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

/// Raw $/watt field: blank means "use the tier default".
fn get_per_watt_override(siv: &mut Cursive) -> Option<Decimal> {
    siv.call_on_name(PER_WATT_FIELD, |v: &mut EditView| {
        let raw = v.get_content();
        if raw.trim().is_empty() {
            None
        } else {
            Some(parse_money(&raw))
        }
    })
    .flatten()
}

/// Run pricing and financing over the saved worksheets plus the current
/// field values.
fn current_results(siv: &mut Cursive) -> Option<(PricingResult, FinancingResult, Decimal, Decimal)> {
    let deposit = get_field(siv, DEPOSIT_FIELD);
    let rate_short = get_field(siv, RATE_SHORT_FIELD);
    let rate_long = get_field(siv, RATE_LONG_FIELD);
    let per_watt = get_per_watt_override(siv);

    siv.with_user_data(|state: &mut AppState| {
        let projection = state.projection()?;
        let costs = state.cost_summary(&projection);
        let pricing = PricingWorksheet::new(state.config.clone())
            .calculate(
                projection.output_watts,
                costs.grand_total,
                state.panel().ground_mount,
                per_watt,
                deposit,
            )
            .ok()?;
        let financing = state
            .financing_with_rates(&pricing, rate_short, rate_long)?;
        Some((pricing, financing, rate_short, rate_long))
    })
    .flatten()
}

/// Recalculate and update the grid.
fn recalculate(siv: &mut Cursive) {
    let content = match current_results(siv) {
        Some((pricing, financing, rate_short, rate_long)) => {
            format_grid(&pricing, &financing, rate_short, rate_long)
        }
        None => "Complete the panel projection worksheet first.".to_string(),
    };

    siv.call_on_name(GRID_VIEW, |v: &mut TextView| {
        v.set_content(content);
    });
}

/// Format the Client Funded / 15yr / 20yr grid.
fn format_grid(
    pricing: &PricingResult,
    financing: &FinancingResult,
    rate_short: Decimal,
    rate_long: Decimal,
) -> String {
    let margin_pct = pricing
        .margin_pct
        .map(|p| format!("{p}%"))
        .unwrap_or_else(|| "N/A".to_string());

    let mut grid = String::new();
    grid.push_str(&row("", "Client Funded", "15yr Financed", "20yr Financed"));
    grid.push_str(&same_row("Customer Cost", &fmt_currency(pricing.total_project_cost)));
    grid.push_str(&same_row("Cost per Watt", &fmt_currency(pricing.actual_cost_per_watt)));
    grid.push_str(&same_row("Sales Commission", &fmt_currency(pricing.sales_commission)));
    grid.push_str(&same_row("Margin Above Fixed", &fmt_currency(pricing.margin)));
    grid.push_str(&same_row("Margin %", &margin_pct));
    grid.push_str(&same_row("Federal Tax Credit", &fmt_currency(pricing.federal_tax_credit)));
    grid.push_str(&same_row("Final NET Cost", &fmt_currency(pricing.net_customer_cost)));
    grid.push_str(&row(
        "Payment w/ ITC",
        "N/A",
        &fmt_currency(financing.with_credit_short.monthly_payment),
        &fmt_currency(financing.with_credit_long.monthly_payment),
    ));
    grid.push_str(&row(
        "Payment w/o ITC",
        "N/A",
        &fmt_currency(financing.without_credit_short.monthly_payment),
        &fmt_currency(financing.without_credit_long.monthly_payment),
    ));
    grid.push_str(&row(
        "Rate",
        "N/A",
        &format!("{rate_short}%"),
        &format!("{rate_long}%"),
    ));
    grid
}

fn row(
    label: &str,
    funded: &str,
    short: &str,
    long: &str,
) -> String {
    format!("{label:20}{funded:>15}{short:>15}{long:>15}\n")
}

fn same_row(
    label: &str,
    value: &str,
) -> String {
    row(label, value, value, value)
}

/// Handle cancel button - discard edits and return to workflow.
fn on_cancel(siv: &mut Cursive) {
    siv.pop_layer();
    show_workflow(siv);
}

/// Handle save button - store the financing inputs.
fn on_save(siv: &mut Cursive) {
    let deposit = get_field(siv, DEPOSIT_FIELD);
    let rate_short = get_field(siv, RATE_SHORT_FIELD);
    let rate_long = get_field(siv, RATE_LONG_FIELD);
    let per_watt = get_per_watt_override(siv);

    siv.with_user_data(|state: &mut AppState| {
        state.deposit = deposit;
        state.rate_short = rate_short;
        state.rate_long = rate_long;
        // A value equal to the current tier default is not an override;
        // keeping it None lets the rate follow later panel changes.
        let tier_default = {
            let watts = state
                .projection()
                .map(|p| p.output_watts)
                .unwrap_or(Decimal::ZERO);
            PricingWorksheet::new(state.config.clone())
                .default_per_watt_rate(watts, state.panel().ground_mount)
        };
        state.per_watt_override = per_watt.filter(|rate| *rate != tier_default);
        state.financing_saved = true;
    });

    siv.pop_layer();
    show_workflow(siv);
}
