//! Error types and result alias for the injectkey crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Crate-local `Result` alias using the injection error type.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while synthesizing or posting events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `SendInput` inserted fewer events than requested (blocked by UIPI or
    /// another input desktop).
    #[error("SendInput rejected the event: {0}")]
    Rejected(String),
    /// Key injection is only available on Windows.
    #[error("Key injection is not supported on this platform")]
    Unsupported,
}
