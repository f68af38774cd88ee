//! win-keycode: Windows virtual-key codes and key-combination parsing.
//!
//! - `Key`: enum of Windows virtual keys, `repr(u16)` with the exact `VK_*`
//!   values.
//! - `Modifier` / `Modifiers`: modifier keys and the `MOD_*` bit set used by
//!   `RegisterHotKey`.
//! - `KeyCombo`: a parsed combination such as `"Ctrl+Shift+Space"`.
//!
//! Spec helpers: `Key::from_spec`, `Key::to_spec`, `Modifier::from_spec`,
//! `Modifier::to_spec`, `KeyCombo::parse`.

mod key;
pub use key::Key;

mod spec;

mod modifiers;
pub use modifiers::{Modifier, Modifiers};

mod combo;
pub use combo::KeyCombo;
