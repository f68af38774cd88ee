//! Shared event tagging helpers used across crates.
//!
//! Every keyboard event we synthesize carries a process-unique marker in
//! the `dwExtraInfo` field of its `KEYBDINPUT`, so hooks and tests can
//! tell injected input apart from physical input.

/// 'qpad' in ASCII bytes: 0x71 0x70 0x61 0x64 -> 1903190372
pub const QPAD_TAG: usize = 0x7170_6164;
