//! Client information form.
//!
//! Free-text contact fields; nothing is validated here, the values land
//! on the proposal header as entered.

use cursive::Cursive;
use cursive::view::{Nameable, Resizable};
use cursive::views::{Dialog, DummyView, EditView, LinearLayout, TextView};

use super::status_bar::{build_status_bar, hints};
use super::workflow::show_workflow;
use crate::state::AppState;

const NAME_FIELD: &str = "client_name";
const ADDRESS_FIELD: &str = "client_address";
const CITY_FIELD: &str = "client_city";
const STATE_FIELD: &str = "client_state";
const ZIP_FIELD: &str = "client_zip";
const PHONE_FIELD: &str = "client_phone";
const EMAIL_FIELD: &str = "client_email";

/// Display the client information form.
pub fn show_client_info(siv: &mut Cursive) {
    let client = siv
        .with_user_data(|state: &mut AppState| state.client.clone())
        .unwrap_or_default();

    let form = LinearLayout::vertical()
        .child(field_row("Name:", NAME_FIELD, &client.name))
        .child(field_row("Address:", ADDRESS_FIELD, &client.address))
        .child(field_row("City:", CITY_FIELD, &client.city))
        .child(field_row("State:", STATE_FIELD, &client.state))
        .child(field_row("Zip Code:", ZIP_FIELD, &client.zip))
        .child(field_row("Phone Number:", PHONE_FIELD, &client.phone))
        .child(field_row("Email Address:", EMAIL_FIELD, &client.email));

    let status = build_status_bar(&[hints::TAB, hints::SHIFT_TAB, hints::ESC, hints::CTRL_Q]);

    let layout = LinearLayout::vertical()
        .child(form)
        .child(DummyView.fixed_height(1))
        .child(status);

    let dialog = Dialog::around(layout)
        .title("Client Information")
        .button("Cancel", on_cancel)
        .button("Save", on_save)
        .padding_lrtb(1, 1, 0, 0);

    siv.add_layer(dialog);
}

/// Create a labeled text field row.
fn field_row(
    label: &str,
    name: &str,
    content: &str,
) -> LinearLayout {
    LinearLayout::horizontal()
        .child(TextView::new(format!("{label:16} ")))
        .child(
            EditView::new()
                .content(content)
                .with_name(name)
                .fixed_width(34),
        )
}

/// Get the current contents of a named EditView.
fn get_field(
    siv: &mut Cursive,
    name: &str,
) -> String {
    siv.call_on_name(name, |v: &mut EditView| v.get_content().to_string())
        .unwrap_or_default()
}

fn on_cancel(siv: &mut Cursive) {
    siv.pop_layer();
    show_workflow(siv);
}

fn on_save(siv: &mut Cursive) {
    let name = get_field(siv, NAME_FIELD);
    let address = get_field(siv, ADDRESS_FIELD);
    let city = get_field(siv, CITY_FIELD);
    let state_field = get_field(siv, STATE_FIELD);
    let zip = get_field(siv, ZIP_FIELD);
    let phone = get_field(siv, PHONE_FIELD);
    let email = get_field(siv, EMAIL_FIELD);

    siv.with_user_data(|state: &mut AppState| {
        state.client.name = name;
        state.client.address = address;
        state.client.city = city;
        state.client.state = state_field;
        state.client.zip = zip;
        state.client.phone = phone;
        state.client.email = email;
        state.client_saved = true;
    });

    siv.pop_layer();
    show_workflow(siv);
}
