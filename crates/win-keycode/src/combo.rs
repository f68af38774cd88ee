use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Key, Modifier, Modifiers};

/// A key combination: a set of modifiers plus an optional base key.
///
/// Combos used for global hotkeys need a base key; combos used for key
/// injection may be a bare modifier chord.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct KeyCombo {
    /// Modifier keys held for this combination.
    pub modifiers: Modifiers,
    /// The non-modifier key, if one was recognized.
    pub key: Option<Key>,
}

impl KeyCombo {
    /// Parses a combination such as `"Ctrl+Shift+Space"`.
    ///
    /// - Tokens are separated by `+`, trimmed and matched case-insensitively.
    /// - Modifier tokens set flags; repeats are harmless.
    /// - Any other token is looked up with `Key::from_spec`. The last
    ///   recognized key wins.
    /// - Unknown tokens are skipped. Parsing never fails; check `key` (or use
    ///   `hotkey_parts`) before registering the result as a hotkey.
    pub fn parse(s: &str) -> Self {
        let mut combo = Self::default();
        for token in s.split('+').map(str::trim) {
            if token.is_empty() {
                continue;
            }
            if let Some(m) = Modifier::from_spec(token) {
                combo.modifiers |= m.flag();
            } else if let Some(k) = Key::from_spec(token) {
                combo.key = Some(k);
            }
        }
        combo
    }

    /// A combination consisting of a single key and no modifiers.
    pub const fn single(key: Key) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            key: Some(key),
        }
    }

    /// Returns true when a base key was recognized.
    pub const fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Returns the `(fsModifiers, vk)` pair used for OS registration, or
    /// `None` when there is no base key.
    pub fn hotkey_parts(&self) -> Option<(u32, u16)> {
        self.key.map(|k| (self.modifiers.bits(), k.vk()))
    }

    /// Returns the canonical string form: modifiers in canonical order
    /// followed by the key spec, joined with `+`.
    pub fn to_string_canonical(&self) -> String {
        let mut out: Vec<String> = self
            .modifiers
            .ordered()
            .map(|m| m.to_spec().to_string())
            .collect();
        if let Some(k) = self.key {
            out.push(k.to_spec());
        }
        out.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_canonical())
    }
}

impl Serialize for KeyCombo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_canonical())
    }
}

impl<'de> Deserialize<'de> for KeyCombo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
