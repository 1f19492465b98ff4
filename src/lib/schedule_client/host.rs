//! Everything the client may ask of an embedding chat host. Each capability defaults to
//! a no-op, so a page running on its own simply uses [`NoHost`].
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::ViewState;

pub const SHOW_SCHEDULE_TEXT: &str = "Показать расписание";
pub const LOADING_TEXT: &str = "Загрузка…";

#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Colour tokens as the host reports them. Any of them may be missing.
#[derive(Deserialize, Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ThemeParams {
    pub bg_color: Option<String>,
    pub secondary_bg_color: Option<String>,
    pub text_color: Option<String>,
    pub hint_color: Option<String>,
    pub section_separator_color: Option<String>,
    pub button_color: Option<String>,
}

pub type ThemeVariables = BTreeMap<&'static str, String>;

/// Maps host tokens onto the page's variables. Fallback literals are used only for a
/// light scheme; with any other scheme a missing token leaves its variable unset.
pub fn theme_variables(scheme: Option<ColorScheme>, params: &ThemeParams) -> ThemeVariables {
    let light = scheme == Some(ColorScheme::Light);
    /* output variable, host token, light fallback */
    let mapping = [
        ("--bg", &params.bg_color, "#ffffff"),
        ("--bg-secondary", &params.secondary_bg_color, "#f4f4f5"),
        ("--text", &params.text_color, "#111827"),
        ("--text-muted", &params.hint_color, "#6b7280"),
        ("--border", &params.section_separator_color, "#e5e7eb"),
        ("--accent", &params.button_color, "#2481cc"),
    ];
    mapping
        .into_iter()
        .filter_map(|(name, token, fallback)| match token {
            Some(value) => Some((name, value.clone())),
            None if light => Some((name, fallback.to_owned())),
            None => None,
        })
        .collect()
}

#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

/// What a host button does when pressed. A host keeps at most one per button.
#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChromeAction {
    Submit,
    Back,
}

/// Look of the host's primary button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainButton {
    Hidden,
    Visible { text: &'static str, active: bool },
}

impl MainButton {
    /// Primary button for the current controller state: active "show schedule" on a
    /// valid idle form, an inactive loading label while a request runs, hidden otherwise.
    pub fn derive(view: ViewState, form_valid: bool, loading: bool) -> Self {
        match view {
            ViewState::Schedule => MainButton::Hidden,
            ViewState::Form if loading => MainButton::Visible {
                text: LOADING_TEXT,
                active: false,
            },
            ViewState::Form if form_valid => MainButton::Visible {
                text: SHOW_SCHEDULE_TEXT,
                active: true,
            },
            ViewState::Form => MainButton::Hidden,
        }
    }

    /// Only an active button carries a click handler.
    pub fn is_active(&self) -> bool {
        matches!(self, MainButton::Visible { active: true, .. })
    }
}

/// Capabilities of an embedding host. Implementations only override what they support.
pub trait Host {
    fn ready(&mut self) {}
    fn expand(&mut self) {}
    fn color_scheme(&self) -> Option<ColorScheme> {
        None
    }
    fn theme_params(&self) -> ThemeParams {
        ThemeParams::default()
    }
    fn subscribe_theme_changed(&mut self) {}
    fn unsubscribe_theme_changed(&mut self) {}
    fn set_main_button(&mut self, _button: &MainButton) {}
    /// Replaces whatever action the primary button had.
    fn bind_main_button(&mut self, _action: ChromeAction) {}
    fn unbind_main_button(&mut self) {}
    fn show_back_button(&mut self) {}
    fn hide_back_button(&mut self) {}
    /// Replaces whatever action the back button had.
    fn bind_back_button(&mut self, _action: ChromeAction) {}
    fn unbind_back_button(&mut self) {}
    fn impact_occurred(&mut self, _style: ImpactStyle) {}
    /// Session data forwarded to the schedule API, empty without a host.
    fn init_data(&self) -> String {
        String::new()
    }
    fn is_embedded(&self) -> bool {
        true
    }
}

/// Stand-in when the page runs on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHost;

impl Host for NoHost {
    fn is_embedded(&self) -> bool {
        false
    }
}
