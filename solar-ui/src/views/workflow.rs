//! Proposal workflow coordinator.
//!
//! This view manages the multi-step process of building a proposal,
//! guiding the user through the worksheets and showing which steps have
//! been saved.

use cursive::Cursive;
use cursive::align::HAlign;
use cursive::view::Resizable;
use cursive::views::{Dialog, DummyView, LinearLayout, SelectView, TextView};

use super::client_info::show_client_info;
use super::costs::show_costs_worksheet;
use super::export::show_export;
use super::extras::show_extras_worksheet;
use super::financing::show_financing_worksheet;
use super::projection::show_projection_worksheet;
use super::status_bar::{KeyHint, build_status_bar, hints};
use crate::state::AppState;

/// Workflow step actions.
#[derive(Debug, Clone, Copy)]
enum WorkflowAction {
    ClientInfo,
    Projection,
    Costs,
    Extras,
    Financing,
    Export,
    Back,
}

/// Display the proposal workflow screen.
pub fn show_workflow(siv: &mut Cursive) {
    let ticks = siv
        .with_user_data(|state: &mut AppState| {
            [
                state.client_saved,
                state.projection_saved,
                state.costs_saved,
                state.extras_saved,
                state.financing_saved,
                state.last_export.is_some(),
            ]
        })
        .unwrap_or([false; 6]);

    let header = LinearLayout::vertical()
        .child(
            TextView::new("New Proposal")
                .h_align(HAlign::Center)
                .full_width(),
        )
        .child(DummyView.fixed_height(1))
        .child(TextView::new(
            "Work through the worksheets below. Figures update as\n\
             you type; save each step to carry it into the proposal.",
        ));

    let tick = |done: bool| if done { " ✓" } else { "" };

    let menu = SelectView::new()
        .item(
            format!("1. Client Information{}", tick(ticks[0])),
            WorkflowAction::ClientInfo,
        )
        .item(
            format!("2. Panel Projection{}", tick(ticks[1])),
            WorkflowAction::Projection,
        )
        .item(
            format!("3. Itemized Costs{}", tick(ticks[2])),
            WorkflowAction::Costs,
        )
        .item(
            format!("4. Additional Costs{}", tick(ticks[3])),
            WorkflowAction::Extras,
        )
        .item(
            format!("5. Pricing & Financing{}", tick(ticks[4])),
            WorkflowAction::Financing,
        )
        .item(
            format!("6. Export Proposal PDF{}", tick(ticks[5])),
            WorkflowAction::Export,
        )
        .item("← Back to Main Menu".to_string(), WorkflowAction::Back)
        .on_submit(handle_workflow_selection);

    let status = build_status_bar(&[
        KeyHint::new("↑↓", "Navigate"),
        hints::ENTER,
        hints::ESC,
        hints::CTRL_Q,
    ]);

    let layout = LinearLayout::vertical()
        .child(header)
        .child(DummyView.fixed_height(1))
        .child(menu)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Proposal Workflow")
        .padding_lrtb(1, 1, 1, 1);

    siv.add_layer(dialog);
}

/// Handle workflow menu selection.
fn handle_workflow_selection(
    siv: &mut Cursive,
    action: &WorkflowAction,
) {
    match action {
        WorkflowAction::ClientInfo => {
            siv.pop_layer();
            show_client_info(siv);
        }
        WorkflowAction::Projection => {
            siv.pop_layer();
            show_projection_worksheet(siv);
        }
        WorkflowAction::Costs => {
            siv.pop_layer();
            show_costs_worksheet(siv);
        }
        WorkflowAction::Extras => {
            siv.pop_layer();
            show_extras_worksheet(siv);
        }
        WorkflowAction::Financing => {
            siv.pop_layer();
            show_financing_worksheet(siv);
        }
        WorkflowAction::Export => {
            siv.pop_layer();
            show_export(siv);
        }
        WorkflowAction::Back => {
            siv.pop_layer();
        }
    }
}
