//! Hidden message-only window and message pump.
//!
//! `WM_HOTKEY` is posted to the thread that owns the registering window, so
//! the window and the pump must live on the same thread. `MessageWindow::run`
//! blocks that thread until a [`QuitHandle`] posts `WM_QUIT`.

use crate::{Result, WindowHandle};

#[cfg(windows)]
mod imp {
    use tracing::{debug, trace, warn};
    use windows::{
        Win32::{
            Foundation::{HWND, LPARAM, WPARAM},
            System::{LibraryLoader::GetModuleHandleW, Threading::GetCurrentThreadId},
            UI::WindowsAndMessaging::{
                CreateWindowExW, DestroyWindow, DispatchMessageW, GetMessageW, HWND_MESSAGE, MSG,
                PostThreadMessageW, TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_QUIT,
            },
        },
        core::w,
    };

    use super::{Result, WindowHandle};
    use crate::Error;

    /// A message-only window owned by the current thread.
    pub struct MessageWindow {
        /// Native window handle.
        hwnd: HWND,
        /// Thread that created the window and must pump it.
        thread_id: u32,
    }

    impl MessageWindow {
        /// Create the window on the calling thread.
        pub fn create() -> Result<Self> {
            let instance =
                unsafe { GetModuleHandleW(None) }.map_err(|e| Error::OsError(e.to_string()))?;
            // The predefined STATIC class needs no RegisterClassW.
            let hwnd = unsafe {
                CreateWindowExW(
                    WINDOW_EX_STYLE::default(),
                    w!("STATIC"),
                    w!("quickpad"),
                    WINDOW_STYLE::default(),
                    0,
                    0,
                    0,
                    0,
                    HWND_MESSAGE,
                    None,
                    instance,
                    None,
                )
            }
            .map_err(|e| Error::OsError(e.to_string()))?;
            let thread_id = unsafe { GetCurrentThreadId() };
            debug!(thread_id, "message_window_created");
            Ok(Self { hwnd, thread_id })
        }

        /// Handle to pass to `HotkeyRegistry::initialize`.
        pub fn handle(&self) -> WindowHandle {
            WindowHandle(self.hwnd.0 as isize)
        }

        /// A `Send` handle that can stop [`MessageWindow::run`] from any thread.
        pub fn quit_handle(&self) -> QuitHandle {
            QuitHandle {
                thread_id: self.thread_id,
            }
        }

        /// Pump messages until `WM_QUIT`.
        ///
        /// Each message is offered to `on_message(msg, wparam)` first; when it
        /// returns true the message is considered handled and not dispatched.
        pub fn run<F>(&self, mut on_message: F) -> Result<()>
        where
            F: FnMut(u32, usize) -> bool,
        {
            let mut msg = MSG::default();
            loop {
                let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
                match ret.0 {
                    0 => break,
                    -1 => return Err(Error::OsError("GetMessageW failed".into())),
                    _ => {}
                }
                trace!(message = msg.message, wparam = msg.wParam.0, "message_pumped");
                if on_message(msg.message, msg.wParam.0) {
                    continue;
                }
                unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
            debug!("message_loop_exited");
            Ok(())
        }
    }

    impl Drop for MessageWindow {
        fn drop(&mut self) {
            if let Err(e) = unsafe { DestroyWindow(self.hwnd) } {
                warn!(error = %e, "message_window_destroy_failed");
            }
        }
    }

    /// Stops a running [`MessageWindow::run`] loop.
    #[derive(Debug, Clone, Copy)]
    pub struct QuitHandle {
        /// Target thread for `WM_QUIT`.
        thread_id: u32,
    }

    impl QuitHandle {
        /// Post `WM_QUIT` to the pumping thread.
        pub fn quit(&self) -> Result<()> {
            unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
                .map_err(|e| Error::OsError(e.to_string()))
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use super::{Result, WindowHandle};
    use crate::Error;

    /// Placeholder: message windows only exist on Windows.
    pub struct MessageWindow {
        /// Never constructed.
        _private: (),
    }

    impl MessageWindow {
        /// Always fails with [`Error::Unsupported`].
        pub fn create() -> Result<Self> {
            Err(Error::Unsupported)
        }

        /// Handle to pass to `HotkeyRegistry::initialize`.
        pub fn handle(&self) -> WindowHandle {
            WindowHandle(0)
        }

        /// A handle that can stop [`MessageWindow::run`].
        pub fn quit_handle(&self) -> QuitHandle {
            QuitHandle { _private: () }
        }

        /// Always fails with [`Error::Unsupported`].
        pub fn run<F>(&self, _on_message: F) -> Result<()>
        where
            F: FnMut(u32, usize) -> bool,
        {
            Err(Error::Unsupported)
        }
    }

    /// Placeholder quit handle.
    #[derive(Debug, Clone, Copy)]
    pub struct QuitHandle {
        /// Never constructed.
        _private: (),
    }

    impl QuitHandle {
        /// Always fails with [`Error::Unsupported`].
        pub fn quit(&self) -> Result<()> {
            Err(Error::Unsupported)
        }
    }
}

pub use imp::{MessageWindow, QuitHandle};
