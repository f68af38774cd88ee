//! Runs a button's action sequence.
//!
//! Steps execute strictly in order. Each step's `delay_ms` is slept after the
//! step, including steps that were skipped because their payload could not be
//! decoded. Malformed steps are logged and skipped; a step whose program
//! cannot be started aborts the remainder of the sequence.

use std::{sync::Arc, time::Duration};

use config::{
    ActionPayload, ButtonAction, CommandPayload, MAX_NESTING, SystemAction, SystemPayload,
    TextMode, TextPayload,
};
use injectkey::KeyInjector;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};
use win_keycode::Key;

use crate::{ClipboardSink, Error, Launcher, Result, SystemClipboard, SystemLauncher};

/// Upper bound on the notch count of a single volume step.
pub const MAX_VOLUME_STEPS: i32 = 50;

/// Combo pressed after placing text on the clipboard.
const PASTE_COMBO: &str = "Ctrl+V";

/// Executes decoded action steps against injectable OS seams.
#[derive(Clone)]
pub struct ActionDispatcher {
    /// Keystroke synthesis.
    injector: KeyInjector,
    /// Process launch.
    launcher: Arc<dyn Launcher>,
    /// Clipboard writes for pasted text.
    clipboard: Arc<dyn ClipboardSink>,
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionDispatcher {
    /// Dispatcher over the real OS: `SendInput`, the shell and the system
    /// clipboard.
    pub fn new() -> Self {
        Self::with_parts(
            KeyInjector::new(),
            Arc::new(SystemLauncher),
            Arc::new(SystemClipboard::new()),
        )
    }

    /// Dispatcher over caller-provided seams.
    pub fn with_parts(
        injector: KeyInjector,
        launcher: Arc<dyn Launcher>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        Self {
            injector,
            launcher,
            clipboard,
        }
    }

    /// Run `actions` in order.
    ///
    /// Returns [`Error::Launch`] when an `Open` or `Command` step cannot be
    /// started; steps after it are not run. Every other failure is logged and
    /// the sequence continues.
    pub async fn execute(&self, actions: &[ButtonAction]) -> Result<()> {
        debug!(steps = actions.len(), "execute_sequence");
        self.run_sequence(actions, 0, None).await
    }

    /// Run one (possibly nested) sequence. `outer` is the top-level step index
    /// that owns a nested sequence.
    async fn run_sequence(
        &self,
        actions: &[ButtonAction],
        depth: usize,
        outer: Option<usize>,
    ) -> Result<()> {
        for (i, action) in actions.iter().enumerate() {
            let step = outer.unwrap_or(i);
            match action.decode() {
                Ok(payload) => self.run_step(step, payload, depth).await?,
                Err(e) => warn!(step, depth, error = %e, "action_skipped_malformed"),
            }
            if action.delay_ms > 0 {
                trace!(step, delay_ms = action.delay_ms, "action_delay");
                sleep(Duration::from_millis(action.delay_ms)).await;
            }
        }
        Ok(())
    }

    /// Execute one decoded step.
    async fn run_step(&self, step: usize, payload: ActionPayload, depth: usize) -> Result<()> {
        match payload {
            ActionPayload::Hotkey(p) => {
                trace!(step, keys = %p.keys, "action_hotkey");
                self.injector.send_keys(&p.keys);
            }
            ActionPayload::Text(p) => self.text(step, &p),
            ActionPayload::Open(p) => {
                info!(step, path = %p.path, admin = p.run_as_admin, "action_open");
                self.launcher
                    .open(&p)
                    .await
                    .map_err(|source| Error::Launch {
                        step,
                        target: p.path.clone(),
                        source,
                    })?;
            }
            ActionPayload::Command(p) => self.command(step, &p).await?,
            ActionPayload::System(p) => self.system(step, p),
            ActionPayload::MultiAction(multi) => {
                if depth >= MAX_NESTING {
                    warn!(step, depth, "action_skipped_nesting_limit");
                } else {
                    Box::pin(self.run_sequence(&multi.actions, depth + 1, Some(step))).await?;
                }
            }
        }
        Ok(())
    }

    /// Type the text, or place it on the clipboard and paste.
    fn text(&self, step: usize, p: &TextPayload) {
        match p.mode {
            TextMode::Type => {
                trace!(step, len = p.text.len(), "action_text_type");
                self.injector.type_text(&p.text);
            }
            TextMode::Clipboard => match self.clipboard.set_text(&p.text) {
                Ok(()) => {
                    trace!(step, len = p.text.len(), "action_text_paste");
                    self.injector.send_keys(PASTE_COMBO);
                }
                Err(e) => warn!(step, error = %e, "action_clipboard_failed"),
            },
        }
    }

    /// Start a shell command, optionally holding the sequence until it exits.
    async fn command(&self, step: usize, p: &CommandPayload) -> Result<()> {
        let spawned = self
            .launcher
            .spawn_command(p)
            .map_err(|source| Error::Launch {
                step,
                target: p.command.clone(),
                source,
            })?;
        info!(
            step,
            pid = ?spawned.pid,
            command = %p.command,
            wait = p.wait_for_exit,
            "action_command_spawned"
        );
        if p.wait_for_exit {
            match spawned.exit.await {
                Ok(code) => debug!(step, code = ?code, "action_command_exited"),
                Err(e) => warn!(step, error = %e, "action_command_wait_failed"),
            }
        }
        Ok(())
    }

    /// Press the key behind a system control.
    fn system(&self, step: usize, p: SystemPayload) {
        let Some(key) = system_key(p.action) else {
            info!(step, action = ?p.action, "action_system_unsupported");
            return;
        };
        let presses = match p.action {
            SystemAction::VolumeUp | SystemAction::VolumeDown => {
                p.value.map_or(1, |v| v.clamp(1, MAX_VOLUME_STEPS))
            }
            _ => 1,
        };
        trace!(step, action = ?p.action, presses, "action_system");
        for _ in 0..presses {
            self.injector.send_key(key);
        }
    }
}

/// The media or volume key for a system control. Brightness has no
/// virtual key.
pub const fn system_key(action: SystemAction) -> Option<Key> {
    match action {
        SystemAction::VolumeUp => Some(Key::VolumeUp),
        SystemAction::VolumeDown => Some(Key::VolumeDown),
        SystemAction::VolumeMute => Some(Key::VolumeMute),
        SystemAction::MediaPlayPause => Some(Key::MediaPlayPause),
        SystemAction::MediaNext => Some(Key::MediaNextTrack),
        SystemAction::MediaPrevious => Some(Key::MediaPreviousTrack),
        SystemAction::BrightnessUp | SystemAction::BrightnessDown => None,
    }
}
