//! Additional (optional) cost worksheet view.
//!
//! Each row is an optional flat amount: blank contributes nothing,
//! unparseable input is marked invalid inline and also contributes
//! nothing, per the form's degrade-don't-crash rule.

use cursive::Cursive;
use cursive::view::{Nameable, Resizable, Scrollable};
use cursive::views::{Dialog, DummyView, EditView, LinearLayout, TextView};
use rust_decimal::Decimal;

use solar_core::calculations::common::fmt_currency;

use super::status_bar::{build_status_bar, hints};
use super::workflow::show_workflow;
use crate::state::AppState;
use crate::utils::{parse_optional_money, truncate_label};

const EXTRAS_TOTAL_VIEW: &str = "extras_total";

fn amount_field_name(index: usize) -> String {
    format!("extra_amount_{index}")
}

fn total_view_name(index: usize) -> String {
    format!("extra_total_{index}")
}

/// Display the additional costs worksheet.
pub fn show_extras_worksheet(siv: &mut Cursive) {
    let extras = siv
        .with_user_data(|state: &mut AppState| state.extras.clone())
        .unwrap_or_default();

    let mut rows = LinearLayout::vertical();
    for (i, extra) in extras.iter().enumerate() {
        let content = extra
            .amount
            .map(|a| a.to_string())
            .unwrap_or_default();

        rows.add_child(
            LinearLayout::horizontal()
                .child(TextView::new(format!("{:46}", truncate_label(&extra.label, 44))))
                .child(
                    EditView::new()
                        .content(content)
                        .on_edit(|s, _, _| recalculate(s))
                        .with_name(amount_field_name(i))
                        .fixed_width(12),
                )
                .child(
                    TextView::new("")
                        .with_name(total_view_name(i))
                        .fixed_width(14),
                ),
        );
    }

    let total_row = LinearLayout::horizontal()
        .child(TextView::new(format!("{:46}", "Additional Costs Total")))
        .child(
            TextView::new(fmt_currency(Decimal::ZERO))
                .with_name(EXTRAS_TOTAL_VIEW)
                .fixed_width(14),
        );

    let status = build_status_bar(&[hints::TAB, hints::SHIFT_TAB, hints::ESC, hints::CTRL_Q]);

    let layout = LinearLayout::vertical()
        .child(TextView::new("Leave a row blank to skip it."))
        .child(TextView::new("─".repeat(72)))
        .child(rows.scrollable().max_height(12))
        .child(TextView::new("─".repeat(72)))
        .child(total_row)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Additional Costs (Optional)")
        .button("Cancel", on_cancel)
        .button("Save", on_save)
        .padding_lrtb(1, 1, 0, 0);

    siv.add_layer(dialog);

    // Trigger initial calculation
    recalculate(siv);
}

/// Raw field contents, in row order.
fn field_contents(siv: &mut Cursive) -> Vec<String> {
    let count = siv
        .with_user_data(|state: &mut AppState| state.extras.len())
        .unwrap_or(0);

    (0..count)
        .map(|i| {
            siv.call_on_name(&amount_field_name(i), |v: &mut EditView| {
                v.get_content().to_string()
            })
            .unwrap_or_default()
        })
        .collect()
}

/// Recalculate each row's total cell and the running total.
fn recalculate(siv: &mut Cursive) {
    let contents = field_contents(siv);

    let mut sum = Decimal::ZERO;
    for (i, raw) in contents.iter().enumerate() {
        let display = if raw.trim().is_empty() {
            String::new()
        } else {
            match parse_optional_money(raw) {
                Some(amount) => {
                    sum += amount;
                    fmt_currency(amount)
                }
                None => "invalid".to_string(),
            }
        };

        siv.call_on_name(&total_view_name(i), |v: &mut TextView| {
            v.set_content(display);
        });
    }

    siv.call_on_name(EXTRAS_TOTAL_VIEW, |v: &mut TextView| {
        v.set_content(fmt_currency(sum));
    });
}

/// Handle cancel button - discard edits and return to workflow.
fn on_cancel(siv: &mut Cursive) {
    siv.pop_layer();
    show_workflow(siv);
}

/// Handle save button - store valid amounts, leave the rest unfilled.
fn on_save(siv: &mut Cursive) {
    let contents = field_contents(siv);

    siv.with_user_data(|state: &mut AppState| {
        for (extra, raw) in state.extras.iter_mut().zip(&contents) {
            extra.amount = parse_optional_money(raw);
        }
        state.extras_saved = true;
    });

    siv.pop_layer();
    show_workflow(siv);
}
