//! Main menu view for the proposal estimator.

use chrono::Local;
use cursive::Cursive;
use cursive::align::HAlign;
use cursive::view::Resizable;
use cursive::views::{Dialog, DummyView, LinearLayout, SelectView, TextView};

use super::status_bar::{KeyHint, build_status_bar, hints};
use super::workflow::show_workflow;
use crate::state::AppState;

/// Menu actions available from the main menu.
#[derive(Debug, Clone, Copy)]
enum MenuAction {
    NewProposal,
    Exit,
}

/// Displays the main menu as the root view.
pub fn show_main_menu(siv: &mut Cursive) {
    let menu = SelectView::new()
        .item("New Proposal", MenuAction::NewProposal)
        .item("Exit", MenuAction::Exit)
        .on_submit(handle_menu_selection);

    let prepared = Local::now().format("%m/%d/%Y");

    let header = LinearLayout::vertical()
        .child(
            TextView::new("J4 Energy Solutions")
                .h_align(HAlign::Center)
                .full_width(),
        )
        .child(
            TextView::new(format!("Solar Investment Calculator - {prepared}"))
                .h_align(HAlign::Center)
                .full_width(),
        )
        .child(DummyView.fixed_height(1));

    let status = build_status_bar(&[
        KeyHint::new("↑↓", "Navigate"),
        hints::ENTER,
        hints::CTRL_Q,
    ]);

    let layout = LinearLayout::vertical()
        .child(header)
        .child(menu)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Solar Proposal")
        .padding_lrtb(2, 2, 1, 1);

    siv.add_layer(dialog);
}

/// Handles the user's menu selection.
fn handle_menu_selection(
    siv: &mut Cursive,
    action: &MenuAction,
) {
    match action {
        MenuAction::NewProposal => start_new_proposal(siv),
        MenuAction::Exit => siv.quit(),
    }
}

/// Clears the previous session and opens the workflow.
fn start_new_proposal(siv: &mut Cursive) {
    siv.with_user_data(|state: &mut AppState| {
        state.reset_proposal();
    });

    show_workflow(siv);
}
