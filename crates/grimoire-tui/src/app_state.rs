//! AppState — shared read-only data components receive on every call.

use crate::action::Screen;
use crate::widgets::status_bar::InputMode;

pub struct AppState {
    /// Chosen race name, used verbatim as the faction path segment.
    /// Empty until the player picks one; held in memory only.
    pub faction: String,
    pub screen: Screen,
    pub input_mode: InputMode,
    /// API base URL, for resolving asset references to copyable urls.
    pub api_base: String,
    pub logs: Vec<String>,
}

impl AppState {
    pub fn new(api_base: String) -> Self {
        Self {
            faction: String::new(),
            screen: Screen::Races,
            input_mode: InputMode::Normal,
            api_base,
            logs: Vec::new(),
        }
    }

    pub fn has_faction(&self) -> bool {
        !self.faction.trim().is_empty()
    }

    pub fn asset_url(&self, icon: &str) -> String {
        format!("{}/assets/{}", self.api_base, icon)
    }

    pub fn last_log(&self) -> Option<&str> {
        self.logs.last().map(String::as_str)
    }
}
