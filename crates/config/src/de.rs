//! Lenient deserialization for hand-edited config files.
//!
//! Enum tags are persisted by variant name and read back ignoring ASCII case,
//! so `"hotkey"`, `"HOTKEY"` and `"Hotkey"` are the same tag. Negative delays
//! read as zero.

use std::result::Result as StdResult;

use serde::{Deserialize, Deserializer, de::Error as _};

use crate::{ActionType, PanelMode, SystemAction, TextMode};

/// Match `name` against `variants` ignoring ASCII case, falling back to
/// `fallback` when nothing matches.
fn by_name<'de, D, T>(
    d: D,
    variants: &[(&'static str, T)],
    fallback: Option<T>,
) -> StdResult<T, D::Error>
where
    D: Deserializer<'de>,
    T: Copy,
{
    let name = String::deserialize(d)?;
    let wanted = name.trim();
    if let Some((_, v)) = variants
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(wanted))
    {
        return Ok(*v);
    }
    fallback.ok_or_else(|| {
        let expected: Vec<&str> = variants.iter().map(|(n, _)| *n).collect();
        D::Error::custom(format!(
            "unknown variant `{name}`, expected one of {}",
            expected.join(", ")
        ))
    })
}

macro_rules! deserialize_by_name {
    ($ty:ident, [$($v:ident),+ $(,)?] $(, fallback = $fb:ident)?) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(d: D) -> StdResult<Self, D::Error> {
                by_name(d, &[$((stringify!($v), Self::$v)),+], None $(.or(Some(Self::$fb)))?)
            }
        }
    };
}

deserialize_by_name!(
    ActionType,
    [
        Hotkey,
        Text,
        Open,
        Command,
        Folder,
        ProfileSwitch,
        System,
        MultiAction
    ],
    fallback = Unknown
);
deserialize_by_name!(TextMode, [Type, Clipboard]);
deserialize_by_name!(
    SystemAction,
    [
        VolumeUp,
        VolumeDown,
        VolumeMute,
        MediaPlayPause,
        MediaNext,
        MediaPrevious,
        BrightnessUp,
        BrightnessDown
    ]
);
deserialize_by_name!(PanelMode, [Docked, Dynamic]);

/// A millisecond count where negative values mean "no delay".
pub(crate) fn delay_ms<'de, D>(d: D) -> StdResult<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u64::try_from(i64::deserialize(d)?).unwrap_or(0))
}
