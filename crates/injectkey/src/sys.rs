//! `SendInput` poster.

#[cfg(windows)]
use tracing::trace;
#[cfg(windows)]
use windows::Win32::UI::Input::KeyboardAndMouse::KEYBD_EVENT_FLAGS;

use crate::{Poster, Result};
#[cfg(not(windows))]
use crate::Error;

/// Posts events to the active desktop through `SendInput`.
/// Every event is stamped with `QPAD_TAG` in `dwExtraInfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPoster;

#[cfg(windows)]
impl SystemPoster {
    /// Send one keyboard event.
    fn send(&self, vk: u16, scan: u16, flags: KEYBD_EVENT_FLAGS) -> Result<()> {
        use std::mem::size_of;

        use windows::Win32::UI::Input::KeyboardAndMouse::{
            INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, SendInput, VIRTUAL_KEY,
        };

        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(vk),
                    wScan: scan,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: eventtag::QPAD_TAG,
                },
            },
        };
        let sent = unsafe { SendInput(&[input], size_of::<INPUT>() as i32) };
        if sent != 1 {
            return Err(crate::Error::Rejected(
                windows::core::Error::from_win32().to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(windows)]
impl Poster for SystemPoster {
    fn post_key(&self, vk: u16, down: bool, extended: bool) -> Result<()> {
        use windows::Win32::UI::Input::KeyboardAndMouse::{KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP};

        let mut flags = KEYBD_EVENT_FLAGS(0);
        if !down {
            flags |= KEYEVENTF_KEYUP;
        }
        if extended {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        trace!(vk, down, extended, "send_input_key");
        self.send(vk, 0, flags)
    }

    fn post_unicode(&self, unit: u16, down: bool) -> Result<()> {
        use windows::Win32::UI::Input::KeyboardAndMouse::{KEYEVENTF_KEYUP, KEYEVENTF_UNICODE};

        let mut flags = KEYEVENTF_UNICODE;
        if !down {
            flags |= KEYEVENTF_KEYUP;
        }
        trace!(unit, down, "send_input_unicode");
        self.send(0, unit, flags)
    }
}

#[cfg(not(windows))]
impl Poster for SystemPoster {
    fn post_key(&self, _vk: u16, _down: bool, _extended: bool) -> Result<()> {
        Err(Error::Unsupported)
    }

    fn post_unicode(&self, _unit: u16, _down: bool) -> Result<()> {
        Err(Error::Unsupported)
    }
}
