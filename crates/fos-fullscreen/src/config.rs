//! Fullscreen manager configuration

use serde::{Deserialize, Serialize};

/// Delay before checking that a direct request actually produced a
/// fullscreen element. Some platforms swallow unpermitted requests without
/// raising an error signal.
pub const CONFIRM_DELAY_MS: u64 = 100;

/// Delay before deciding whether a speculative request from inside a frame
/// worked, on platforms that cannot report whether fullscreen is enabled.
pub const PROBE_DELAY_MS: u64 = 250;

/// Tunables for [`FullscreenManager`](crate::FullscreenManager).
///
/// Missing fields fall back to the defaults, so hosts can override a single
/// delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullscreenConfig {
    pub confirm_delay_ms: u64,
    pub probe_delay_ms: u64,
    /// Ask for keyboard input while fullscreen when the platform advertises it
    pub allow_keyboard_input: bool,
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            confirm_delay_ms: CONFIRM_DELAY_MS,
            probe_delay_ms: PROBE_DELAY_MS,
            allow_keyboard_input: true,
        }
    }
}
