//! Itemized cost worksheet view.
//!
//! One row per line item: label, editable rate, computed total. Totals
//! and the fixed project cost update live; rates are written back to the
//! schedule on save. Rows with panel-dependent defaults were already
//! resolved when the panel was picked on the projection worksheet.

use cursive::Cursive;
use cursive::view::{Nameable, Resizable, Scrollable};
use cursive::views::{Dialog, DummyView, EditView, LinearLayout, TextView};
use rust_decimal::Decimal;

use solar_core::calculations::common::fmt_currency;
use solar_core::models::{CostBasis, CostLineItem};

use super::status_bar::{build_status_bar, hints};
use super::workflow::show_workflow;
use crate::state::AppState;
use crate::utils::{parse_money, truncate_label};

const GRAND_TOTAL_VIEW: &str = "cost_grand_total";

fn rate_field_name(index: usize) -> String {
    format!("cost_rate_{index}")
}

fn total_view_name(index: usize) -> String {
    format!("cost_total_{index}")
}

/// Display the itemized cost worksheet.
pub fn show_costs_worksheet(siv: &mut Cursive) {
    let (schedule, total_panels, output_watts) = match worksheet_context(siv) {
        Some(ctx) => ctx,
        None => return,
    };

    let mut rows = LinearLayout::vertical();
    for (i, item) in schedule.iter().enumerate() {
        rows.add_child(item_row(i, item));
    }

    let header = TextView::new(format!(
        "Total panels: {total_panels}    Array output: {output_watts} W"
    ));

    let grand_total = LinearLayout::horizontal()
        .child(TextView::new(format!("{:44} ", "Fixed Project Cost")))
        .child(
            TextView::new(fmt_currency(Decimal::ZERO))
                .with_name(GRAND_TOTAL_VIEW)
                .fixed_width(14),
        );

    let status = build_status_bar(&[hints::TAB, hints::SHIFT_TAB, hints::ESC, hints::CTRL_Q]);

    let layout = LinearLayout::vertical()
        .child(header)
        .child(TextView::new("─".repeat(70)))
        .child(rows.scrollable().max_height(14))
        .child(TextView::new("─".repeat(70)))
        .child(grand_total)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Itemized Costs")
        .button("Cancel", on_cancel)
        .button("Save", on_save)
        .padding_lrtb(1, 1, 0, 0);

    siv.add_layer(dialog);

    // Trigger initial calculation
    recalculate(siv);
}

/// Schedule snapshot plus the projected quantities the totals run on.
fn worksheet_context(siv: &mut Cursive) -> Option<(Vec<CostLineItem>, u32, Decimal)> {
    siv.with_user_data(|state: &mut AppState| {
        let projection = state.projection();
        let (panels, watts) = projection
            .map(|p| (p.total_panels, p.output_watts))
            .unwrap_or((0, Decimal::ZERO));
        (state.schedule.clone(), panels, watts)
    })
}

/// One worksheet row: label, rate entry, computed total.
fn item_row(
    index: usize,
    item: &CostLineItem,
) -> LinearLayout {
    let label = truncate_label(&item.label, 42);
    let caption = match item.basis {
        CostBasis::PerPanel => "/panel",
        CostBasis::PerWatt => "/watt",
        CostBasis::Flat => "flat",
    };

    LinearLayout::horizontal()
        .child(TextView::new(format!("{label:44}")))
        .child(
            EditView::new()
                .content(item.rate.to_string())
                .on_edit(|s, _, _| recalculate(s))
                .with_name(rate_field_name(index))
                .fixed_width(10),
        )
        .child(TextView::new(format!(" {caption:6} ")))
        .child(
            TextView::new("")
                .with_name(total_view_name(index))
                .fixed_width(14),
        )
}

/// Recalculate every row total and the fixed project cost.
fn recalculate(siv: &mut Cursive) {
    let (schedule, total_panels, output_watts) = match worksheet_context(siv) {
        Some(ctx) => ctx,
        None => return,
    };

    let extras_total = siv
        .with_user_data(|state: &mut AppState| {
            state
                .extras
                .iter()
                .map(|e| e.total())
                .sum::<Decimal>()
        })
        .unwrap_or(Decimal::ZERO);

    let mut grand_total = extras_total;
    for (i, item) in schedule.iter().enumerate() {
        let rate = siv
            .call_on_name(&rate_field_name(i), |v: &mut EditView| {
                parse_money(&v.get_content())
            })
            .unwrap_or(Decimal::ZERO);

        let row = CostLineItem::new(item.label.clone(), item.basis, rate);
        let total = row.total(total_panels, output_watts);
        grand_total += total;

        siv.call_on_name(&total_view_name(i), |v: &mut TextView| {
            v.set_content(fmt_currency(total));
        });
    }

    siv.call_on_name(GRAND_TOTAL_VIEW, |v: &mut TextView| {
        v.set_content(fmt_currency(grand_total));
    });
}

/// Handle cancel button - discard edits and return to workflow.
fn on_cancel(siv: &mut Cursive) {
    siv.pop_layer();
    show_workflow(siv);
}

/// Handle save button - write rates back to the schedule.
fn on_save(siv: &mut Cursive) {
    let count = siv
        .with_user_data(|state: &mut AppState| state.schedule.len())
        .unwrap_or(0);

    let mut rates = Vec::with_capacity(count);
    for i in 0..count {
        let rate = siv
            .call_on_name(&rate_field_name(i), |v: &mut EditView| {
                parse_money(&v.get_content())
            })
            .unwrap_or(Decimal::ZERO);
        rates.push(rate);
    }

    siv.with_user_data(|state: &mut AppState| {
        for (item, rate) in state.schedule.iter_mut().zip(rates) {
            item.rate = rate;
        }
        state.costs_saved = true;
    });

    siv.pop_layer();
    show_workflow(siv);
}
