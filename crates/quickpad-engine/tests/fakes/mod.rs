//! In-memory launcher and clipboard used by the engine tests.
#![allow(dead_code)]

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant as StdInstant},
};

use async_trait::async_trait;
use config::{ActionPayload, ButtonAction, CommandPayload, HotkeyPayload, OpenPayload};
use injectkey::{KeyInjector, Posted, RecordingPoster};
use parking_lot::Mutex;
use quickpad_engine::{ActionDispatcher, ClipboardSink, Error, Launcher, Result, Spawned};
use tokio::time::{Instant, sleep};

/// Something the fake launcher saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// `open` with this path.
    Open(String),
    /// `spawn_command` with this command line.
    Spawn(String),
    /// The spawned command finished.
    Exited(String),
}

/// Records launches with tokio timestamps.
#[derive(Default)]
pub struct FakeLauncher {
    /// Launch log.
    log: Arc<Mutex<Vec<(Launch, Instant)>>>,
    /// Fail every `open`.
    fail_open: Mutex<bool>,
    /// Fail every spawn.
    fail_spawn: Mutex<bool>,
    /// How long each spawned command "runs".
    run_for: Mutex<Duration>,
}

impl FakeLauncher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_open(&self) {
        *self.fail_open.lock() = true;
    }

    pub fn fail_spawn(&self) {
        *self.fail_spawn.lock() = true;
    }

    pub fn set_run_for(&self, d: Duration) {
        *self.run_for.lock() = d;
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.log.lock().iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn time_of(&self, launch: &Launch) -> Option<Instant> {
        self.log
            .lock()
            .iter()
            .find(|(l, _)| l == launch)
            .map(|(_, t)| *t)
    }
}

#[async_trait]
impl Launcher for FakeLauncher {
    async fn open(&self, spec: &OpenPayload) -> io::Result<()> {
        if *self.fail_open.lock() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }
        self.log
            .lock()
            .push((Launch::Open(spec.path.clone()), Instant::now()));
        Ok(())
    }

    fn spawn_command(&self, spec: &CommandPayload) -> io::Result<Spawned> {
        if *self.fail_spawn.lock() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "cmd.exe missing"));
        }
        self.log
            .lock()
            .push((Launch::Spawn(spec.command.clone()), Instant::now()));
        let log = self.log.clone();
        let run_for = *self.run_for.lock();
        let command = spec.command.clone();
        Ok(Spawned {
            pid: Some(4242),
            exit: Box::pin(async move {
                sleep(run_for).await;
                log.lock().push((Launch::Exited(command), Instant::now()));
                Ok(Some(0))
            }),
        })
    }
}

/// Records clipboard writes.
#[derive(Default)]
pub struct FakeClipboard {
    /// Texts written, in order.
    texts: Mutex<Vec<String>>,
    /// Reject every write.
    failing: Mutex<bool>,
}

impl FakeClipboard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self) {
        *self.failing.lock() = true;
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }
}

impl ClipboardSink for FakeClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        if *self.failing.lock() {
            return Err(Error::Clipboard("locked by another process".into()));
        }
        self.texts.lock().push(text.to_string());
        Ok(())
    }
}

/// A dispatcher wired to fakes, plus handles to inspect them.
pub struct Harness {
    pub dispatcher: ActionDispatcher,
    pub keys: Arc<RecordingPoster>,
    pub launcher: Arc<FakeLauncher>,
    pub clipboard: Arc<FakeClipboard>,
}

impl Harness {
    /// Build a harness whose key log is stamped with tokio's clock, so paused
    /// tests see virtual time.
    pub fn new() -> Self {
        let keys = Arc::new(RecordingPoster::with_clock(|| Instant::now().into_std()));
        let launcher = FakeLauncher::new();
        let clipboard = FakeClipboard::new();
        let dispatcher = ActionDispatcher::with_parts(
            KeyInjector::with_poster(keys.clone()),
            launcher.clone(),
            clipboard.clone(),
        );
        Self {
            dispatcher,
            keys,
            launcher,
            clipboard,
        }
    }

    /// Instant of the first key-down for `vk`.
    pub fn key_down_at(&self, vk: u16) -> Option<StdInstant> {
        self.keys
            .records()
            .into_iter()
            .find(|r| {
                matches!(r.event, Posted::Key { vk: v, down: true, .. } if v == vk)
            })
            .map(|r| r.at)
    }
}

/// A `Hotkey` step.
pub fn hotkey(keys: &str, delay_ms: u64) -> ButtonAction {
    ButtonAction::new(
        &ActionPayload::Hotkey(HotkeyPayload { keys: keys.into() }),
        delay_ms,
    )
}

/// Parse a step from JSON.
pub fn step(v: serde_json::Value) -> ButtonAction {
    serde_json::from_value(v).unwrap()
}

pub const CTRL: u16 = 0x11;
pub const VK_A: u16 = 0x41;
pub const VK_C: u16 = 0x43;
pub const VK_V: u16 = 0x56;
