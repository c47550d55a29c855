//! fOS Media
//!
//! Media element state for the fOS browser engine.
//!
//! Features:
//! - HTMLVideoElement ready/network state
//! - Media-level (native player) fullscreen

pub mod element;
pub mod fullscreen;

pub use element::{HTMLMediaElement, HTMLVideoElement, NetworkState, ReadyState};
pub use fullscreen::VideoFullscreen;

/// Media error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}
