//! Synthesizes keystrokes for the focused Windows application.
//!
//! A [`KeyInjector`] turns combo text such as `"Ctrl+Shift+T"` into an
//! ordered run of key-down/key-up events: modifiers down in canonical order,
//! the base key down and up, then the modifiers up in reverse. It also types
//! arbitrary text as Unicode input.
//!
//! The injector holds no lock. Overlapping sequences can leave a modifier
//! stuck down, so callers run one sequence at a time.
#![warn(unsafe_op_in_unsafe_fn)]

mod error;
#[cfg(any(test, feature = "test-utils"))]
mod record;
mod sys;

use std::sync::Arc;

use tracing::{debug, trace, warn};
use win_keycode::{Key, KeyCombo, Modifier};

pub use crate::error::{Error, Result};
#[cfg(any(test, feature = "test-utils"))]
pub use crate::record::{Posted, Recorded, RecordingPoster};
pub use crate::sys::SystemPoster;

/// Low-level event sink.
pub trait Poster: Send + Sync {
    /// Post a virtual-key event.
    fn post_key(&self, vk: u16, down: bool, extended: bool) -> Result<()>;
    /// Post one UTF-16 unit as a `KEYEVENTF_UNICODE` event.
    fn post_unicode(&self, unit: u16, down: bool) -> Result<()>;
}

/// Ordered keystroke synthesis on top of a [`Poster`].
#[derive(Clone)]
pub struct KeyInjector {
    /// Event sink.
    poster: Arc<dyn Poster>,
}

impl Default for KeyInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInjector {
    /// Inject through `SendInput`, tagging every event with `QPAD_TAG`.
    pub fn new() -> Self {
        Self::with_poster(Arc::new(SystemPoster))
    }

    /// Inject through a custom poster.
    pub fn with_poster(poster: Arc<dyn Poster>) -> Self {
        Self { poster }
    }

    /// Create an injector over a fresh [`RecordingPoster`], returning both.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_with_recorder() -> (Self, Arc<RecordingPoster>) {
        let rec = Arc::new(RecordingPoster::new());
        (Self::with_poster(rec.clone()), rec)
    }

    /// Parse `text` and press it as a combo.
    ///
    /// Unknown tokens are ignored, so text without a base key presses and
    /// releases only its modifiers, and empty text does nothing.
    pub fn send_keys(&self, text: &str) {
        let combo = KeyCombo::parse(text);
        if combo.modifiers.is_empty() && combo.key.is_none() {
            debug!(text, "send_keys_nothing_to_press");
            return;
        }
        self.send_combo(&combo);
    }

    /// Press a parsed combo.
    pub fn send_combo(&self, combo: &KeyCombo) {
        trace!(combo = %combo, "send_combo");
        let pressed: Vec<Modifier> = combo.modifiers.ordered().collect();
        for m in &pressed {
            self.key(m.key(), true);
        }
        if let Some(k) = combo.key {
            self.key(k, true);
            self.key(k, false);
        }
        for m in pressed.iter().rev() {
            self.key(m.key(), false);
        }
    }

    /// Tap a single key with no modifiers (media and volume keys).
    pub fn send_key(&self, key: Key) {
        self.send_combo(&KeyCombo::single(key));
    }

    /// Type `text` as Unicode input.
    ///
    /// Line breaks (`\n`, `\r\n` or a lone `\r`) are sent as Enter and `\t`
    /// as Tab so they behave like typed keys in every application.
    pub fn type_text(&self, text: &str) {
        trace!(len = text.len(), "type_text");
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.tap(Key::Enter);
                }
                '\n' => self.tap(Key::Enter),
                '\t' => self.tap(Key::Tab),
                _ => {
                    let mut buf = [0u16; 2];
                    for unit in c.encode_utf16(&mut buf) {
                        self.unicode(*unit, true);
                        self.unicode(*unit, false);
                    }
                }
            }
        }
    }

    /// Key down then up.
    fn tap(&self, key: Key) {
        self.key(key, true);
        self.key(key, false);
    }

    /// Post a key event, logging failures.
    fn key(&self, key: Key, down: bool) {
        if let Err(e) = self.poster.post_key(key.vk(), down, key.is_extended()) {
            warn!(key = key.name(), down, error = %e, "inject_key_failed");
        }
    }

    /// Post a Unicode event, logging failures.
    fn unicode(&self, unit: u16, down: bool) {
        if let Err(e) = self.poster.post_unicode(unit, down) {
            warn!(unit, down, error = %e, "inject_unicode_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTRL: u16 = 0x11;
    const ALT: u16 = 0x12;
    const SHIFT: u16 = 0x10;
    const LWIN: u16 = 0x5B;

    #[test]
    fn modifiers_release_in_reverse_press_order() {
        let (inj, rec) = KeyInjector::new_with_recorder();
        inj.send_keys("Win+Shift+Alt+Ctrl+T");
        assert_eq!(
            rec.key_events(),
            vec![
                (CTRL, true),
                (ALT, true),
                (SHIFT, true),
                (LWIN, true),
                (0x54, true),
                (0x54, false),
                (LWIN, false),
                (SHIFT, false),
                (ALT, false),
                (CTRL, false),
            ]
        );
    }

    #[test]
    fn plain_combo() {
        let (inj, rec) = KeyInjector::new_with_recorder();
        inj.send_keys("ctrl+v");
        assert_eq!(
            rec.key_events(),
            vec![(CTRL, true), (0x56, true), (0x56, false), (CTRL, false)]
        );
    }

    #[test]
    fn modifier_only_chord_presses_and_releases_modifiers() {
        let (inj, rec) = KeyInjector::new_with_recorder();
        inj.send_keys("Ctrl+Shift+NoSuchKey");
        assert_eq!(
            rec.key_events(),
            vec![(CTRL, true), (SHIFT, true), (SHIFT, false), (CTRL, false)]
        );
    }

    #[test]
    fn empty_text_injects_nothing() {
        let (inj, rec) = KeyInjector::new_with_recorder();
        inj.send_keys("");
        inj.send_keys("bogus");
        assert!(rec.events().is_empty());
    }

    #[test]
    fn media_key_is_extended() {
        let (inj, rec) = KeyInjector::new_with_recorder();
        inj.send_key(Key::VolumeUp);
        assert_eq!(
            rec.events(),
            vec![
                Posted::Key {
                    vk: 0xAF,
                    down: true,
                    extended: true
                },
                Posted::Key {
                    vk: 0xAF,
                    down: false,
                    extended: true
                },
            ]
        );
    }

    #[test]
    fn type_text_uses_unicode_and_named_line_breaks() {
        let (inj, rec) = KeyInjector::new_with_recorder();
        inj.type_text("hé\r\nx\ty😀");
        assert_eq!(rec.typed_text(), "hé\nx\ty😀");
        // One down/up pair per UTF-16 unit: h, é, x, y and two surrogates.
        let unicode = rec
            .events()
            .iter()
            .filter(|e| matches!(e, Posted::Unicode { .. }))
            .count();
        assert_eq!(unicode, 12);
        assert_eq!(
            rec.key_events(),
            vec![(0x0D, true), (0x0D, false), (0x09, true), (0x09, false)]
        );
    }

    #[test]
    fn failures_are_swallowed() {
        let (inj, rec) = KeyInjector::new_with_recorder();
        rec.set_failing(true);
        inj.send_keys("ctrl+a");
        inj.type_text("abc");
        assert!(rec.events().is_empty());
        rec.set_failing(false);
        inj.send_keys("a");
        assert_eq!(rec.key_events(), vec![(0x41, true), (0x41, false)]);
    }

    #[cfg(not(windows))]
    #[test]
    fn system_poster_is_unsupported_off_windows() {
        let p = SystemPoster;
        assert_eq!(p.post_key(0x41, true, false), Err(Error::Unsupported));
        assert_eq!(p.post_unicode(0x41, true), Err(Error::Unsupported));
    }
}
