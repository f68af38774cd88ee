//! The OS registration boundary.
//!
//! The registry never calls Win32 directly; it goes through
//! [`NativeHotkeys`] so tests (and non-Windows hosts) can substitute their
//! own implementation.

use tracing::trace;

use crate::{Error, HotkeyId, Result, WindowHandle};

/// Native registration of system-wide hotkeys against a window handle.
pub trait NativeHotkeys: Send + Sync {
    /// Claim `(modifiers, vk)` for `id`, delivering presses to `handle`.
    fn register(&self, handle: WindowHandle, id: HotkeyId, modifiers: u32, vk: u16) -> Result<()>;
    /// Release the registration for `id` on `handle`.
    fn unregister(&self, handle: WindowHandle, id: HotkeyId) -> Result<()>;
}

/// `RegisterHotKey`/`UnregisterHotKey` on Windows; elsewhere every call fails
/// with [`Error::Unsupported`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHotkeys;

#[cfg(windows)]
impl NativeHotkeys for SystemHotkeys {
    fn register(&self, handle: WindowHandle, id: HotkeyId, modifiers: u32, vk: u16) -> Result<()> {
        use windows::Win32::{
            Foundation::ERROR_HOTKEY_ALREADY_REGISTERED,
            UI::Input::KeyboardAndMouse::{HOT_KEY_MODIFIERS, MOD_NOREPEAT, RegisterHotKey},
        };

        // Holding the combo must not flood the message queue with repeats.
        let mods = HOT_KEY_MODIFIERS(modifiers) | MOD_NOREPEAT;
        trace!(id, modifiers, vk, "register_hotkey_native");
        unsafe { RegisterHotKey(handle.as_hwnd(), id, mods, u32::from(vk)) }.map_err(|e| {
            if e.code() == ERROR_HOTKEY_ALREADY_REGISTERED.to_hresult() {
                Error::Conflict(format!("modifiers {modifiers:#x} vk {vk:#04x}"))
            } else {
                Error::OsError(e.to_string())
            }
        })
    }

    fn unregister(&self, handle: WindowHandle, id: HotkeyId) -> Result<()> {
        use windows::Win32::UI::Input::KeyboardAndMouse::UnregisterHotKey;

        trace!(id, "unregister_hotkey_native");
        unsafe { UnregisterHotKey(handle.as_hwnd(), id) }.map_err(|e| Error::OsError(e.to_string()))
    }
}

#[cfg(not(windows))]
impl NativeHotkeys for SystemHotkeys {
    fn register(
        &self,
        _handle: WindowHandle,
        id: HotkeyId,
        _modifiers: u32,
        _vk: u16,
    ) -> Result<()> {
        tracing::warn!(id, "global_hotkeys_unsupported");
        Err(Error::Unsupported)
    }

    fn unregister(&self, _handle: WindowHandle, id: HotkeyId) -> Result<()> {
        trace!(id, "unregister_unsupported_platform");
        Err(Error::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn system_backend_reports_unsupported_off_windows() {
        let sys = SystemHotkeys;
        let h = WindowHandle(1);
        assert_eq!(sys.register(h, 1, 2, 0x41), Err(Error::Unsupported));
        assert_eq!(sys.unregister(h, 1), Err(Error::Unsupported));
    }
}
