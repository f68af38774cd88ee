//! Error types and result alias for the win-hotkey crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Underlying OS provided an error.
    #[error("OS error: {0}")]
    OsError(String),
    /// The combination is already claimed by another process (or by us).
    #[error("Hotkey already registered: {0}")]
    Conflict(String),
    /// Global hotkeys are only available on Windows.
    #[error("Global hotkeys are not supported on this platform")]
    Unsupported,
}
