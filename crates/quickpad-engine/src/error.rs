use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Failures surfaced while running an action sequence.
#[derive(Debug, Error)]
pub enum Error {
    /// An `Open` or `Command` step could not be started. The rest of the
    /// sequence is abandoned.
    #[error("step {step}: failed to launch {target}: {source}")]
    Launch {
        /// Index of the failing step in the top-level sequence.
        step: usize,
        /// Path or command line that failed.
        target: String,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The clipboard could not be opened or written.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}
