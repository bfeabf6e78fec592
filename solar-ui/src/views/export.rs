//! Proposal export view.
//!
//! Renders the proposal HTML from the saved worksheets and hands it to
//! the PDF renderer. Renderer problems (missing wkhtmltopdf, failed
//! conversion) surface in a dialog; the session keeps running.

use std::path::PathBuf;

use cursive::Cursive;
use cursive::view::{Nameable, Resizable};
use cursive::views::{Dialog, DummyView, EditView, LinearLayout, TextView};
use tracing::{error, info};

use solar_core::proposal::{PdfRenderer, default_file_name, render_proposal};

use super::status_bar::{build_status_bar, hints};
use super::workflow::show_workflow;
use crate::state::AppState;

const OUTPUT_PATH_FIELD: &str = "export_path";

/// Display the export view.
pub fn show_export(siv: &mut Cursive) {
    let (client_name, default_path, renderer_note) = siv
        .with_user_data(|state: &mut AppState| {
            let file_name = default_file_name(&state.client);
            let path = state.out_dir.join(file_name);
            let note = match &state.renderer_override {
                Some(p) => format!("Renderer: {}", p.display()),
                None => "Renderer: wkhtmltopdf (auto-detected)".to_string(),
            };
            (state.client.name.clone(), path, note)
        })
        .expect("app state is set at startup");

    let client_line = if client_name.trim().is_empty() {
        "Client: (not entered)".to_string()
    } else {
        format!("Client: {client_name}")
    };

    let form = LinearLayout::vertical()
        .child(TextView::new(client_line))
        .child(TextView::new(renderer_note))
        .child(DummyView.fixed_height(1))
        .child(TextView::new("Output file:"))
        .child(
            EditView::new()
                .content(default_path.display().to_string())
                .with_name(OUTPUT_PATH_FIELD)
                .fixed_width(56),
        );

    let status = build_status_bar(&[hints::TAB, hints::ESC, hints::CTRL_Q]);

    let layout = LinearLayout::vertical()
        .child(form)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Export Proposal PDF")
        .button("Back", on_back)
        .button("Generate PDF", on_generate)
        .padding_lrtb(1, 1, 0, 0);

    siv.add_layer(dialog);
}

fn on_back(siv: &mut Cursive) {
    siv.pop_layer();
    show_workflow(siv);
}

fn on_generate(siv: &mut Cursive) {
    let output = siv
        .call_on_name(OUTPUT_PATH_FIELD, |v: &mut EditView| {
            PathBuf::from(v.get_content().trim())
        })
        .unwrap_or_default();

    if output.as_os_str().is_empty() {
        show_error(siv, "Enter an output file path.");
        return;
    }

    let (figures, renderer_override) = match siv.with_user_data(|state: &mut AppState| {
        (state.proposal_figures(), state.renderer_override.clone())
    }) {
        Some(pair) => pair,
        None => return,
    };

    let Some(figures) = figures else {
        show_error(siv, "The worksheets could not be calculated; check the production factor.");
        return;
    };

    let html = render_proposal(&figures);

    let result = PdfRenderer::discover(renderer_override.as_deref())
        .and_then(|renderer| renderer.render_to_file(&html, &output));

    match result {
        Ok(()) => {
            info!(output = %output.display(), "proposal exported");
            siv.with_user_data(|state: &mut AppState| {
                state.last_export = Some(output.clone());
            });
            siv.add_layer(
                Dialog::text(format!("Proposal written to\n{}", output.display()))
                    .title("Export Complete")
                    .button("OK", |s| {
                        s.pop_layer();
                    }),
            );
        }
        Err(e) => {
            error!(%e, "proposal export failed");
            show_error(siv, &format!("{e}"));
        }
    }
}

fn show_error(
    siv: &mut Cursive,
    message: &str,
) {
    siv.add_layer(
        Dialog::text(message.to_string())
            .title("PDF Export Failed")
            .button("OK", |s| {
                s.pop_layer();
            }),
    );
}
