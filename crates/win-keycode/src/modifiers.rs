use bitflags::bitflags;

use crate::Key;

bitflags! {
    /// A set of modifier keys.
    ///
    /// Bit values are the Win32 `MOD_*` constants, so `bits()` is the
    /// `fsModifiers` argument of `RegisterHotKey`.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Modifiers: u32 {
        /// `MOD_ALT`
        const ALT = 0x0001;
        /// `MOD_CONTROL`
        const CONTROL = 0x0002;
        /// `MOD_SHIFT`
        const SHIFT = 0x0004;
        /// `MOD_WIN`
        const WIN = 0x0008;
    }
}

/// A single modifier key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Modifier {
    /// Ctrl
    Control,
    /// Alt
    Alt,
    /// Shift
    Shift,
    /// The Windows logo key
    Win,
}

impl Modifier {
    /// All modifiers in canonical press order.
    pub const ALL: [Self; 4] = [Self::Control, Self::Alt, Self::Shift, Self::Win];

    /// Parses a modifier token (`ctrl`/`control`, `alt`, `shift`,
    /// `win`/`windows`), ignoring ASCII case.
    pub fn from_spec(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(Self::Control),
            "alt" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            "win" | "windows" => Some(Self::Win),
            _ => None,
        }
    }

    /// Returns the canonical spec token for this modifier.
    pub const fn to_spec(self) -> &'static str {
        match self {
            Self::Control => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Win => "win",
        }
    }

    /// Returns the flag for this modifier.
    pub const fn flag(self) -> Modifiers {
        match self {
            Self::Control => Modifiers::CONTROL,
            Self::Alt => Modifiers::ALT,
            Self::Shift => Modifiers::SHIFT,
            Self::Win => Modifiers::WIN,
        }
    }

    /// Returns the virtual key pressed to synthesize this modifier.
    ///
    /// Ctrl, Alt and Shift use the side-neutral codes; Win has no neutral
    /// code, so the left key is used.
    pub const fn key(self) -> Key {
        match self {
            Self::Control => Key::Control,
            Self::Alt => Key::Alt,
            Self::Shift => Key::Shift,
            Self::Win => Key::LeftWin,
        }
    }
}

impl From<Modifier> for Modifiers {
    fn from(m: Modifier) -> Self {
        m.flag()
    }
}

impl Modifiers {
    /// Iterates the modifiers in this set in canonical order (Ctrl, Alt,
    /// Shift, Win).
    pub fn ordered(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(move |m| self.contains(m.flag()))
    }
}
