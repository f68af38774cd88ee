//! A [`Poster`] that records events instead of injecting them.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use parking_lot::Mutex;
use win_keycode::Key;

use crate::{Error, Poster, Result};

/// One synthesized keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posted {
    /// Virtual-key event.
    Key {
        /// Virtual-key code.
        vk: u16,
        /// Key down (true) or up (false).
        down: bool,
        /// Extended-key flag.
        extended: bool,
    },
    /// `KEYEVENTF_UNICODE` event.
    Unicode {
        /// UTF-16 code unit.
        unit: u16,
        /// Key down (true) or up (false).
        down: bool,
    },
}

/// A posted event with the time it was posted.
#[derive(Debug, Clone, Copy)]
pub struct Recorded {
    /// The event.
    pub event: Posted,
    /// When it was posted, according to the poster's clock.
    pub at: Instant,
}

/// Clock used to stamp recorded events.
type Clock = Box<dyn Fn() -> Instant + Send + Sync>;

/// Records every event with a timestamp.
pub struct RecordingPoster {
    /// Everything posted so far.
    log: Mutex<Vec<Recorded>>,
    /// Timestamp source.
    clock: Clock,
    /// When set, every post fails without being recorded.
    failing: AtomicBool,
}

impl Default for RecordingPoster {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPoster {
    /// Record with wall-clock timestamps.
    pub fn new() -> Self {
        Self::with_clock(Instant::now)
    }

    /// Record with a custom clock, e.g. tokio's paused test clock.
    pub fn with_clock(clock: impl Fn() -> Instant + Send + Sync + 'static) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            clock: Box::new(clock),
            failing: AtomicBool::new(false),
        }
    }

    /// Make subsequent posts fail with [`Error::Rejected`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Recorded events with timestamps.
    pub fn records(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    /// Recorded events without timestamps.
    pub fn events(&self) -> Vec<Posted> {
        self.log.lock().iter().map(|r| r.event).collect()
    }

    /// Virtual-key events as `(vk, down)` pairs.
    pub fn key_events(&self) -> Vec<(u16, bool)> {
        self.log
            .lock()
            .iter()
            .filter_map(|r| match r.event {
                Posted::Key { vk, down, .. } => Some((vk, down)),
                Posted::Unicode { .. } => None,
            })
            .collect()
    }

    /// Reassemble text from Unicode key-downs plus Enter and Tab presses.
    pub fn typed_text(&self) -> String {
        let mut units = Vec::new();
        for r in self.log.lock().iter() {
            match r.event {
                Posted::Unicode { unit, down: true } => units.push(unit),
                Posted::Key { vk, down: true, .. } if vk == Key::Enter.vk() => {
                    units.push(u16::from(b'\n'));
                }
                Posted::Key { vk, down: true, .. } if vk == Key::Tab.vk() => {
                    units.push(u16::from(b'\t'));
                }
                _ => {}
            }
        }
        String::from_utf16_lossy(&units)
    }

    /// Append an event unless failing.
    fn push(&self, event: Posted) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Rejected("recording poster set to fail".into()));
        }
        let at = (self.clock)();
        self.log.lock().push(Recorded { event, at });
        Ok(())
    }
}

impl Poster for RecordingPoster {
    fn post_key(&self, vk: u16, down: bool, extended: bool) -> Result<()> {
        self.push(Posted::Key { vk, down, extended })
    }

    fn post_unicode(&self, unit: u16, down: bool) -> Result<()> {
        self.push(Posted::Unicode { unit, down })
    }
}
