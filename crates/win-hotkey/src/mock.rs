//! In-memory [`NativeHotkeys`] used by tests across the workspace.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use crate::{Error, HotkeyId, NativeHotkeys, Result, WindowHandle};

/// One call observed by [`MockHotkeys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    /// `register(handle, id, modifiers, vk)`
    Register(WindowHandle, HotkeyId, u32, u16),
    /// `unregister(handle, id)`
    Unregister(WindowHandle, HotkeyId),
}

/// Mutable state behind the mock.
#[derive(Default)]
struct MockState {
    /// Every call, in order.
    calls: Vec<MockCall>,
    /// Live registrations: id -> (modifiers, vk).
    live: HashMap<HotkeyId, (u32, u16)>,
    /// Combos "owned by another process": registering them fails.
    taken: HashSet<(u32, u16)>,
    /// Ids whose release should fail.
    stuck: HashSet<HotkeyId>,
}

/// Fake OS registration table.
///
/// Behaves like `RegisterHotKey`: a combo can only be held once, and an id
/// that is already live on the window is rejected.
#[derive(Default)]
pub struct MockHotkeys {
    /// Shared state.
    state: Mutex<MockState>,
}

impl MockHotkeys {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate another application holding `(modifiers, vk)`.
    pub fn claim_elsewhere(&self, modifiers: u32, vk: u16) {
        self.state.lock().taken.insert((modifiers, vk));
    }

    /// Make the next releases of `id` fail at the OS level.
    pub fn fail_unregister(&self, id: HotkeyId) {
        self.state.lock().stuck.insert(id);
    }

    /// All calls seen so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    /// Number of `register` calls seen so far.
    pub fn register_calls(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, MockCall::Register(..)))
            .count()
    }

    /// Number of `unregister` calls seen so far.
    pub fn unregister_calls(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, MockCall::Unregister(..)))
            .count()
    }

    /// Ids currently held at the "OS" level.
    pub fn live_ids(&self) -> Vec<HotkeyId> {
        let mut ids: Vec<HotkeyId> = self.state.lock().live.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl NativeHotkeys for MockHotkeys {
    fn register(&self, handle: WindowHandle, id: HotkeyId, modifiers: u32, vk: u16) -> Result<()> {
        let mut st = self.state.lock();
        st.calls.push(MockCall::Register(handle, id, modifiers, vk));
        let held = st.live.values().any(|&combo| combo == (modifiers, vk));
        if held || st.taken.contains(&(modifiers, vk)) {
            return Err(Error::Conflict(format!("{modifiers:#x}/{vk:#04x}")));
        }
        if st.live.contains_key(&id) {
            return Err(Error::OsError(format!("id {id} already in use")));
        }
        st.live.insert(id, (modifiers, vk));
        Ok(())
    }

    fn unregister(&self, handle: WindowHandle, id: HotkeyId) -> Result<()> {
        let mut st = self.state.lock();
        st.calls.push(MockCall::Unregister(handle, id));
        if st.stuck.contains(&id) {
            return Err(Error::OsError(format!("cannot release {id}")));
        }
        match st.live.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::OsError(format!("id {id} not registered"))),
        }
    }
}
