//! The `Key` enum: Windows virtual-key codes (`VK_*` in `WinUser.h`).

/// Declares `Key` with its virtual-key values and the name lookup tables.
macro_rules! define_keys {
    ( $( $(#[$meta:meta])* $name:ident = $vk:literal, )* ) => {
        /// A Windows virtual key.
        ///
        /// Discriminants are the exact `VK_*` values, so `key as u16` is the
        /// code passed to `RegisterHotKey` and `SendInput`.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Key {
            $( $(#[$meta])* $name = $vk, )*
        }

        impl Key {
            /// Every known key, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$name, )* ];

            /// Returns the enum variant name (e.g. `"VolumeUp"`).
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )*
                }
            }

            /// Looks up a key by variant name, ignoring ASCII case.
            pub fn from_name(s: &str) -> Option<Self> {
                $(
                    if s.eq_ignore_ascii_case(stringify!($name)) {
                        return Some(Self::$name);
                    }
                )*
                None
            }

            /// Looks up a key from its virtual-key code.
            pub const fn from_vk(vk: u16) -> Option<Self> {
                match vk {
                    $( $vk => Some(Self::$name), )*
                    _ => None,
                }
            }
        }
    };
}

define_keys! {
    Backspace = 0x08,
    Tab = 0x09,
    Clear = 0x0C,
    Enter = 0x0D,
    /// Either shift key (`VK_SHIFT`).
    Shift = 0x10,
    /// Either control key (`VK_CONTROL`).
    Control = 0x11,
    /// Either alt key (`VK_MENU`).
    Alt = 0x12,
    Pause = 0x13,
    CapsLock = 0x14,
    Escape = 0x1B,
    Space = 0x20,
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    Select = 0x29,
    Print = 0x2A,
    Execute = 0x2B,
    PrintScreen = 0x2C,
    Insert = 0x2D,
    Delete = 0x2E,
    Help = 0x2F,
    Digit0 = 0x30,
    Digit1 = 0x31,
    Digit2 = 0x32,
    Digit3 = 0x33,
    Digit4 = 0x34,
    Digit5 = 0x35,
    Digit6 = 0x36,
    Digit7 = 0x37,
    Digit8 = 0x38,
    Digit9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    LeftWin = 0x5B,
    RightWin = 0x5C,
    Apps = 0x5D,
    Sleep = 0x5F,
    Numpad0 = 0x60,
    Numpad1 = 0x61,
    Numpad2 = 0x62,
    Numpad3 = 0x63,
    Numpad4 = 0x64,
    Numpad5 = 0x65,
    Numpad6 = 0x66,
    Numpad7 = 0x67,
    Numpad8 = 0x68,
    Numpad9 = 0x69,
    Multiply = 0x6A,
    Add = 0x6B,
    Separator = 0x6C,
    Subtract = 0x6D,
    Decimal = 0x6E,
    Divide = 0x6F,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    F13 = 0x7C,
    F14 = 0x7D,
    F15 = 0x7E,
    F16 = 0x7F,
    F17 = 0x80,
    F18 = 0x81,
    F19 = 0x82,
    F20 = 0x83,
    F21 = 0x84,
    F22 = 0x85,
    F23 = 0x86,
    F24 = 0x87,
    NumLock = 0x90,
    ScrollLock = 0x91,
    LeftShift = 0xA0,
    RightShift = 0xA1,
    LeftControl = 0xA2,
    RightControl = 0xA3,
    LeftAlt = 0xA4,
    RightAlt = 0xA5,
    BrowserBack = 0xA6,
    BrowserForward = 0xA7,
    BrowserRefresh = 0xA8,
    BrowserStop = 0xA9,
    BrowserSearch = 0xAA,
    BrowserFavorites = 0xAB,
    BrowserHome = 0xAC,
    VolumeMute = 0xAD,
    VolumeDown = 0xAE,
    VolumeUp = 0xAF,
    MediaNextTrack = 0xB0,
    MediaPreviousTrack = 0xB1,
    MediaStop = 0xB2,
    MediaPlayPause = 0xB3,
    LaunchMail = 0xB4,
    SelectMedia = 0xB5,
    LaunchApp1 = 0xB6,
    LaunchApp2 = 0xB7,
    /// `;:` on the US layout (`VK_OEM_1`).
    Semicolon = 0xBA,
    /// `=+` on the US layout (`VK_OEM_PLUS`).
    Equal = 0xBB,
    Comma = 0xBC,
    Minus = 0xBD,
    Period = 0xBE,
    /// `/?` on the US layout (`VK_OEM_2`).
    Slash = 0xBF,
    /// `` `~ `` on the US layout (`VK_OEM_3`).
    Grave = 0xC0,
    LeftBracket = 0xDB,
    Backslash = 0xDC,
    RightBracket = 0xDD,
    Quote = 0xDE,
}

impl Key {
    /// Returns the virtual-key code.
    pub const fn vk(self) -> u16 {
        self as u16
    }

    /// True for keys that live on the extended part of the keyboard.
    ///
    /// Injected events for these keys must carry `KEYEVENTF_EXTENDEDKEY`,
    /// otherwise e.g. `Up` arrives as numpad 8 when NumLock is off.
    pub const fn is_extended(self) -> bool {
        matches!(
            self,
            Self::PageUp
                | Self::PageDown
                | Self::End
                | Self::Home
                | Self::Left
                | Self::Up
                | Self::Right
                | Self::Down
                | Self::Insert
                | Self::Delete
                | Self::PrintScreen
                | Self::Divide
                | Self::NumLock
                | Self::LeftWin
                | Self::RightWin
                | Self::Apps
                | Self::RightControl
                | Self::RightAlt
                | Self::BrowserBack
                | Self::BrowserForward
                | Self::BrowserRefresh
                | Self::BrowserStop
                | Self::BrowserSearch
                | Self::BrowserFavorites
                | Self::BrowserHome
                | Self::VolumeMute
                | Self::VolumeDown
                | Self::VolumeUp
                | Self::MediaNextTrack
                | Self::MediaPreviousTrack
                | Self::MediaStop
                | Self::MediaPlayPause
                | Self::LaunchMail
                | Self::SelectMedia
                | Self::LaunchApp1
                | Self::LaunchApp2
        )
    }
}
