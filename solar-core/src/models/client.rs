use serde::{Deserialize, Serialize};

/// Client contact information as entered on the proposal form.
///
/// All fields are free text; nothing is validated or persisted beyond the
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl ClientInfo {
    /// Single-line "name, address, city, state, zip" form used on the
    /// proposal header. Empty fields are skipped so a partially filled
    /// form does not render stray commas.
    pub fn summary_line(&self) -> String {
        [
            self.name.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.zip.as_str(),
        ]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim())
        .collect::<Vec<_>>()
        .join(", ")
    }
}
