use crate::Key;

// Single-character specs on the US layout. Letters are matched
// case-insensitively before this table is consulted.
macro_rules! key_char_map {
    ($m:ident, $arg:tt) => {
        $m! { $arg,
            Digit0 => '0',
            Digit1 => '1',
            Digit2 => '2',
            Digit3 => '3',
            Digit4 => '4',
            Digit5 => '5',
            Digit6 => '6',
            Digit7 => '7',
            Digit8 => '8',
            Digit9 => '9',
            Space => ' ',
            Minus => '-',
            Equal => '=',
            LeftBracket => '[',
            RightBracket => ']',
            Backslash => '\\',
            Semicolon => ';',
            Quote => '\'',
            Comma => ',',
            Period => '.',
            Slash => '/',
            Grave => '`',
        }
    };
}

macro_rules! to_char_match {
    ( $key:expr, $( $k:ident => $c:expr, )* ) => {
        match $key {
            $( Key::$k => Some($c), )*
            _ => None,
        }
    }
}

macro_rules! from_char_match {
    ( $c:expr, $( $k:ident => $v:expr, )* ) => {{
        match $c {
            $( $v => Some(Key::$k), )*
            _ => None,
        }
    }}
}

// Alias words accepted when parsing (never emitted by `to_spec`). These
// cover the names people type in config files, including the .NET `Key`
// names the persisted format has always used.
macro_rules! key_spec_aliases {
    ($m:ident, $arg:expr) => {
        $m! { $arg,
            Enter => "return",
            Enter => "ret",
            Backspace => "back",
            Escape => "esc",
            Delete => "del",
            Insert => "ins",
            PageUp => "pgup",
            PageUp => "prior",
            PageDown => "pgdn",
            PageDown => "next",
            CapsLock => "caps",
            CapsLock => "capital",
            PrintScreen => "snapshot",
            PrintScreen => "prtsc",
            ScrollLock => "scroll",
            Apps => "menu",
            LeftWin => "lwin",
            RightWin => "rwin",
            LeftShift => "lshift",
            RightShift => "rshift",
            LeftControl => "lctrl",
            RightControl => "rctrl",
            LeftAlt => "lalt",
            RightAlt => "ralt",

            Digit0 => "d0",
            Digit1 => "d1",
            Digit2 => "d2",
            Digit3 => "d3",
            Digit4 => "d4",
            Digit5 => "d5",
            Digit6 => "d6",
            Digit7 => "d7",
            Digit8 => "d8",
            Digit9 => "d9",

            Numpad0 => "num0",
            Numpad1 => "num1",
            Numpad2 => "num2",
            Numpad3 => "num3",
            Numpad4 => "num4",
            Numpad5 => "num5",
            Numpad6 => "num6",
            Numpad7 => "num7",
            Numpad8 => "num8",
            Numpad9 => "num9",

            Semicolon => "oemsemicolon",
            Semicolon => "oem1",
            Equal => "oemplus",
            Equal => "equals",
            Comma => "oemcomma",
            Minus => "oemminus",
            Period => "oemperiod",
            Slash => "oemquestion",
            Slash => "oem2",
            Grave => "oemtilde",
            Grave => "oem3",
            Grave => "backtick",
            LeftBracket => "oemopenbrackets",
            LeftBracket => "oem4",
            Backslash => "oempipe",
            Backslash => "oem5",
            RightBracket => "oemclosebrackets",
            RightBracket => "oem6",
            Quote => "oemquotes",
            Quote => "oem7",

            VolumeMute => "mute",
            MediaPlayPause => "playpause",
            MediaNextTrack => "medianext",
            MediaNextTrack => "nexttrack",
            MediaPreviousTrack => "mediaprevious",
            MediaPreviousTrack => "mediaprev",
            MediaPreviousTrack => "prevtrack",
            LaunchApp1 => "launchapplication1",
            LaunchApp2 => "launchapplication2",
        }
    };
}

macro_rules! from_alias_match {
    ( $s:expr, $( $k:ident => $v:expr, )* ) => {{
        match $s {
            $( $v => Some(Key::$k), )*
            _ => None,
        }
    }}
}

/// Parses a single-character key spec.
fn from_char(c: char) -> Option<Key> {
    if c.is_ascii_alphabetic() {
        let upper = c.to_ascii_uppercase() as u16;
        return Key::from_vk(upper);
    }
    key_char_map!(from_char_match, c)
}

/// Parses a key specification into a `Key`.
///
/// A one-character spec is a literal key on the US layout (letters, digits,
/// unshifted punctuation). Longer specs match a variant name
/// case-insensitively, then the alias table.
pub fn from_spec(s: &str) -> Option<Key> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return from_char(c);
    }
    if let Some(k) = Key::from_name(s) {
        return Some(k);
    }
    let lowered = s.to_ascii_lowercase();
    key_spec_aliases!(from_alias_match, lowered.as_str())
}

/// Returns the canonical spec string for a `Key`.
///
/// Letters, digits and punctuation use their character; every other key
/// (space included) uses its lowercased variant name.
pub fn to_spec(key: Key) -> String {
    // A bare space would be trimmed away when the combo is re-parsed.
    if key == Key::Space {
        return "space".to_string();
    }
    if let Some(c) = key_char_map!(to_char_match, key) {
        return c.to_string();
    }
    key.name().to_ascii_lowercase()
}

impl Key {
    /// Parses a key specification string into a `Key`.
    ///
    /// Accepts single characters (`a`, `7`, `,`), variant names in any case
    /// (`VolumeUp`, `f5`), and the alias words used by persisted configs
    /// (`esc`, `return`, `pgdn`, `d1`, `oemcomma`, `mediaprev`, ...).
    pub fn from_spec(s: &str) -> Option<Self> {
        from_spec(s)
    }

    /// Returns the canonical spec string for this key.
    pub fn to_spec(self) -> String {
        to_spec(self)
    }
}
