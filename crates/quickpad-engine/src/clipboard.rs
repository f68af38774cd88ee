//! Clipboard seam for `Text` steps in clipboard mode.

use parking_lot::Mutex;
use tracing::trace;

use crate::{Error, Result};

/// Something that can hold text for a following paste.
pub trait ClipboardSink: Send + Sync {
    /// Replace the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<()>;
}

/// The system clipboard via `arboard`.
///
/// The handle is opened on first use and kept for the life of the sink.
/// On X11 and Wayland the contents are served by the owning handle, so
/// dropping it right after a write would empty the clipboard before the
/// paste lands.
#[derive(Default)]
pub struct SystemClipboard {
    /// Lazily opened handle.
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    /// Create a sink; the OS clipboard is opened on first write.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut guard = self.inner.lock();
        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?);
        }
        let Some(cb) = guard.as_mut() else {
            return Err(Error::Clipboard("clipboard unavailable".into()));
        };
        trace!(len = text.len(), "clipboard_set");
        cb.set_text(text.to_owned())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}
