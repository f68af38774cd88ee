use serde::{Deserialize, Serialize};

use crate::{ButtonAction, defaults};

/// How a panel is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PanelMode {
    /// Pinned to a screen edge; stays visible after a button press.
    Docked,
    /// Pops up on its hotkey and may hide after a button press.
    #[default]
    Dynamic,
}

/// A button in a panel grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelButton {
    /// Stable identifier (a GUID string in files written by the editor).
    #[serde(default)]
    pub id: String,
    /// Caption shown on the button.
    #[serde(default)]
    pub label: String,
    /// Optional icon reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Steps run when the button is pressed.
    #[serde(default)]
    pub actions: Vec<ButtonAction>,
    /// Whether pressing flips [`toggle_state`](Self::toggle_state).
    #[serde(default)]
    pub is_toggle: bool,
    /// Current toggle state.
    #[serde(default)]
    pub toggle_state: bool,
}

/// A grid of buttons with an optional global hotkey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default = "defaults::default_panel_name")]
    pub name: String,
    /// Grid rows.
    #[serde(default = "defaults::default_rows")]
    pub rows: u32,
    /// Grid columns.
    #[serde(default = "defaults::default_cols")]
    pub cols: u32,
    /// Presentation mode.
    #[serde(default)]
    pub mode: PanelMode,
    /// Global hotkey that toggles the panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
    /// Buttons in grid order.
    #[serde(default)]
    pub buttons: Vec<PanelButton>,
}

impl Panel {
    /// The hotkey text, if set and not blank.
    pub fn hotkey_text(&self) -> Option<&str> {
        self.hotkey.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Launch at login.
    #[serde(default, rename = "startWithOS")]
    pub start_with_os: bool,
    /// Show a tray icon.
    #[serde(default = "defaults::default_true")]
    pub show_in_tray: bool,
    /// UI theme name.
    #[serde(default = "defaults::default_theme")]
    pub theme: String,
    /// Hide a dynamic panel once a button's actions have run.
    #[serde(default = "defaults::default_true")]
    pub hide_on_action_execute: bool,
    /// Show/hide animation length.
    #[serde(default = "defaults::default_animation_ms")]
    pub animation_duration_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_with_os: false,
            show_in_tray: true,
            theme: defaults::default_theme(),
            hide_on_action_execute: true,
            animation_duration_ms: defaults::ANIMATION_DURATION_MS,
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Format version.
    #[serde(default = "defaults::default_version")]
    pub version: String,
    /// Panels in file order.
    #[serde(default)]
    pub panels: Vec<Panel>,
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: defaults::default_version(),
            panels: Vec::new(),
            settings: Settings::default(),
        }
    }
}
