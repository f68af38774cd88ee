//! Configuration types (panels, buttons, action steps) used by quickpad.
//!
//! The engine treats configuration as read-only: it reads panel hotkeys and
//! button action sequences, and decodes each step into an
//! [`ActionPayload`] just before running it.
#![warn(unsafe_op_in_unsafe_fn)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod action;
mod de;
mod defaults;
mod error;
mod loader;
mod types;

#[cfg(test)]
mod test_parse;

pub use action::{
    ActionPayload, ActionType, ButtonAction, CommandPayload, HotkeyPayload, MAX_NESTING,
    MultiActionPayload, OpenPayload, Problem, SystemAction, SystemPayload, TextMode, TextPayload,
    check_actions,
};
pub use error::{Error, Result, excerpt_at};
pub use loader::{ActionProblem, load_from_path, load_from_str};
pub use types::{Config, Panel, PanelButton, PanelMode, Settings};

/// Directory under the per-user config root.
const APP_DIR: &str = "quickpad";
/// Config file name.
const CONFIG_FILE: &str = "config.json";

/// Determine the preferred user config path.
///
/// `%APPDATA%\quickpad\config.json` when `APPDATA` is set (Windows), else
/// `~/.quickpad/config.json`.
pub fn default_config_path() -> PathBuf {
    if let Some(appdata) = env::var_os("APPDATA").filter(|v| !v.is_empty()) {
        let mut p = PathBuf::from(appdata);
        p.push(APP_DIR);
        p.push(CONFIG_FILE);
        return p;
    }
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(format!(".{APP_DIR}"));
    p.push(CONFIG_FILE);
    p
}

/// Resolve the effective config path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use [`default_config_path`] when it exists.
/// 3) Else return a clear "no config found" error naming the expected path.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let preferred = default_config_path();
    if preferred.exists() {
        return Ok(preferred);
    }

    Err(Error::Read {
        message: format!(
            "No config found. Create {} or pass a path explicitly",
            preferred.display()
        ),
        path: Some(preferred),
    })
}
