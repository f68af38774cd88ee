//! Global hotkey registration for Windows.
//!
//! A [`HotkeyRegistry`] owns the mapping from process-local hotkey ids to the
//! text they were registered from, talks to the OS through a
//! [`NativeHotkeys`] implementation, and turns `WM_HOTKEY` messages into
//! [`HotkeyEvent`]s for every subscriber.
//!
//! The registry is `Sync`: the message pump calls
//! [`HotkeyRegistry::handle_message`] while other code registers and
//! unregisters through a shared `Arc`.

mod error;
#[cfg(any(test, feature = "test-utils"))]
mod mock;
mod native;
mod sys;

use std::{collections::HashMap, sync::Arc};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};
use win_keycode::KeyCombo;

pub use crate::error::{Error, Result};
#[cfg(any(test, feature = "test-utils"))]
pub use crate::mock::{MockCall, MockHotkeys};
pub use crate::{
    native::{NativeHotkeys, SystemHotkeys},
    sys::{MessageWindow, QuitHandle},
};

/// Process-local hotkey id, as passed to `RegisterHotKey`.
pub type HotkeyId = i32;

/// The `WM_HOTKEY` window message.
pub const WM_HOTKEY: u32 = 0x0312;

/// An opaque native window handle (`HWND`) stored as an integer so it can
/// cross threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

#[cfg(windows)]
impl WindowHandle {
    /// Convert back into a Win32 `HWND`.
    pub(crate) fn as_hwnd(self) -> windows::Win32::Foundation::HWND {
        windows::Win32::Foundation::HWND(self.0 as *mut std::ffi::c_void)
    }
}

/// A registered hotkey was pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyEvent {
    /// The id the hotkey was registered under.
    pub id: HotkeyId,
    /// The hotkey text as it was registered.
    pub hotkey: String,
}

/// Mutable registry state guarded by a single lock.
#[derive(Default)]
struct Inner {
    /// The bound message source, once initialized.
    handle: Option<WindowHandle>,
    /// id -> hotkey text for every live registration.
    hotkeys: HashMap<HotkeyId, String>,
    /// Event sinks; closed receivers are pruned on send.
    subscribers: Vec<Sender<HotkeyEvent>>,
}

/// Maps hotkey ids to OS registrations and fans out presses.
pub struct HotkeyRegistry {
    /// OS boundary.
    native: Arc<dyn NativeHotkeys>,
    /// Registry state.
    inner: Mutex<Inner>,
}

impl HotkeyRegistry {
    /// Create a registry backed by the real OS API.
    pub fn new() -> Self {
        Self::with_native(Arc::new(SystemHotkeys))
    }

    /// Create a registry over a custom OS boundary.
    pub fn with_native(native: Arc<dyn NativeHotkeys>) -> Self {
        Self {
            native,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Create a registry over a fresh [`MockHotkeys`], returning both.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_with_mock() -> (Self, Arc<MockHotkeys>) {
        let mock = Arc::new(MockHotkeys::new());
        (Self::with_native(mock.clone()), mock)
    }

    /// Bind the registry to the window that will receive `WM_HOTKEY`.
    ///
    /// The first binding sticks: a later call with a different handle is
    /// logged and ignored, repeating the same handle is a no-op.
    pub fn initialize(&self, handle: WindowHandle) {
        let mut inner = self.inner.lock();
        match inner.handle {
            None => {
                inner.handle = Some(handle);
                debug!(handle = handle.0, "hotkey_registry_initialized");
            }
            Some(current) if current == handle => {}
            Some(current) => {
                warn!(
                    current = current.0,
                    requested = handle.0,
                    "hotkey_registry_already_initialized"
                );
            }
        }
    }

    /// True once [`initialize`](Self::initialize) has bound a handle.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().handle.is_some()
    }

    /// Register `hotkey` under `id`. Returns true on success.
    ///
    /// Text without a base key is rejected before any OS call. If `id` is
    /// already registered the old registration is released first, so the id
    /// ends up either bound to the new text or unbound.
    pub fn register(&self, id: HotkeyId, hotkey: &str) -> bool {
        let combo = KeyCombo::parse(hotkey);
        let Some((modifiers, vk)) = combo.hotkey_parts() else {
            warn!(id, hotkey, "hotkey_without_base_key");
            return false;
        };

        let mut inner = self.inner.lock();
        let Some(handle) = inner.handle else {
            warn!(id, hotkey, "hotkey_registry_not_initialized");
            return false;
        };

        if let Some(previous) = inner.hotkeys.remove(&id) {
            debug!(id, previous = %previous, "hotkey_replacing_registration");
            if let Err(e) = self.native.unregister(handle, id) {
                warn!(id, error = %e, "hotkey_release_before_replace_failed");
            }
        }

        match self.native.register(handle, id, modifiers, vk) {
            Ok(()) => {
                inner.hotkeys.insert(id, hotkey.to_string());
                info!(id, hotkey, combo = %combo, "hotkey_registered");
                true
            }
            Err(e) => {
                warn!(id, hotkey, error = %e, "hotkey_register_failed");
                false
            }
        }
    }

    /// Release `id`. Returns the OS result.
    ///
    /// The id is forgotten either way; a release the OS refuses is logged.
    pub fn unregister(&self, id: HotkeyId) -> bool {
        let mut inner = self.inner.lock();
        let known = inner.hotkeys.remove(&id);
        let Some(handle) = inner.handle else {
            trace!(id, "unregister_without_handle");
            return false;
        };
        match self.native.unregister(handle, id) {
            Ok(()) => {
                debug!(id, hotkey = ?known, "hotkey_unregistered");
                true
            }
            Err(e) => {
                warn!(id, hotkey = ?known, error = %e, "hotkey_unregister_failed");
                false
            }
        }
    }

    /// Release every known registration. Individual failures are logged and
    /// the sweep continues.
    pub fn unregister_all(&self) {
        let mut inner = self.inner.lock();
        if inner.hotkeys.is_empty() {
            return;
        }
        let mut ids: Vec<HotkeyId> = inner.hotkeys.drain().map(|(id, _)| id).collect();
        ids.sort_unstable();
        let Some(handle) = inner.handle else {
            return;
        };
        let mut failed = 0usize;
        for id in &ids {
            if let Err(e) = self.native.unregister(handle, *id) {
                warn!(id, error = %e, "hotkey_unregister_failed");
                failed += 1;
            }
        }
        debug!(count = ids.len(), failed, "hotkeys_unregistered_all");
    }

    /// Inspect a native window message.
    ///
    /// Returns true (handled) only for `WM_HOTKEY` carrying a known id; every
    /// subscriber then receives a [`HotkeyEvent`].
    pub fn handle_message(&self, msg: u32, wparam: usize) -> bool {
        if msg != WM_HOTKEY {
            return false;
        }
        let id = wparam as HotkeyId;
        let mut inner = self.inner.lock();
        let Some(hotkey) = inner.hotkeys.get(&id).cloned() else {
            trace!(id, "hotkey_message_unknown_id");
            return false;
        };
        trace!(id, hotkey = %hotkey, "hotkey_pressed");
        let ev = HotkeyEvent { id, hotkey };
        inner.subscribers.retain(|tx| tx.send(ev.clone()).is_ok());
        true
    }

    /// Receive a [`HotkeyEvent`] for every press from now on.
    pub fn subscribe(&self) -> Receiver<HotkeyEvent> {
        let (tx, rx) = unbounded();
        self.inner.lock().subscribers.push(tx);
        rx
    }

    /// Snapshot of live registrations, sorted by id.
    pub fn registrations(&self) -> Vec<(HotkeyId, String)> {
        let mut out: Vec<(HotkeyId, String)> = self
            .inner
            .lock()
            .hotkeys
            .iter()
            .map(|(id, text)| (*id, text.clone()))
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// The text registered under `id`, if any.
    pub fn hotkey_for(&self, id: HotkeyId) -> Option<String> {
        self.inner.lock().hotkeys.get(&id).cloned()
    }

    /// Release everything and detach from the window. Safe to call without
    /// `initialize` and more than once.
    pub fn dispose(&self) {
        self.unregister_all();
        let mut inner = self.inner.lock();
        if inner.handle.take().is_some() {
            debug!("hotkey_registry_disposed");
        }
    }
}

impl Default for HotkeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HotkeyRegistry {
    fn drop(&mut self) {
        self.dispose();
    }
}
