// Defaults for persisted configuration

pub(crate) const CONFIG_VERSION: &str = "1.0";
pub(crate) const PANEL_NAME: &str = "New panel";
pub(crate) const PANEL_ROWS: u32 = 3;
pub(crate) const PANEL_COLS: u32 = 4;
pub(crate) const THEME: &str = "dark";
pub(crate) const ANIMATION_DURATION_MS: u64 = 150;

// Serde default functions
pub(crate) fn default_version() -> String {
    CONFIG_VERSION.to_string()
}
pub(crate) fn default_panel_name() -> String {
    PANEL_NAME.to_string()
}
pub(crate) const fn default_rows() -> u32 {
    PANEL_ROWS
}
pub(crate) const fn default_cols() -> u32 {
    PANEL_COLS
}
pub(crate) fn default_theme() -> String {
    THEME.to_string()
}
pub(crate) const fn default_true() -> bool {
    true
}
pub(crate) const fn default_animation_ms() -> u64 {
    ANIMATION_DURATION_MS
}
