//! Quickpad engine: runs button action sequences and wires panel hotkeys.
//!
//! The [`ActionDispatcher`] executes a sequence of [`config::ButtonAction`]
//! steps in order against three seams: a [`KeyInjector`](injectkey::KeyInjector)
//! for keystrokes, a [`Launcher`] for processes and a [`ClipboardSink`] for
//! pasted text. [`PanelHotkeys`] binds each panel's hotkey through a
//! [`HotkeyRegistry`](win_hotkey::HotkeyRegistry) and maps hotkey events back
//! to panels; [`press_button`] is the whole press flow for one button.
mod clipboard;
mod dispatcher;
mod error;
mod launcher;
mod panels;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use dispatcher::{ActionDispatcher, MAX_VOLUME_STEPS, system_key};
pub use error::{Error, Result};
pub use launcher::{ExitWait, Launcher, Spawned, SystemLauncher};
pub use panels::{ButtonOutcome, FIRST_PANEL_HOTKEY_ID, PanelBinding, PanelHotkeys, press_button};
