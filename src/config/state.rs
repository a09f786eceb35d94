// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Contents of the "profile URL" text field
    pub url_input: String,

    /// Author whose papers are shown in the side panel
    pub selected_user: Option<String>,

    /// Papers panel → only papers whose citations changed on the last refresh
    pub papers_changed_only: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            url_input: s!(),
            selected_user: None,
            papers_changed_only: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl AppState {
    pub fn new(options: AppOptions) -> Self {
        Self { options, gui: GuiState::default() }
    }
}
