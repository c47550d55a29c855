//! Media-level fullscreen
//!
//! The proprietary `webkitEnterFullscreen` mode: a single video element is
//! presented fullscreen by the platform's native player.

use crate::element::ReadyState;
use crate::MediaError;

/// Media fullscreen surface of one video element
#[derive(Debug, Clone, Copy)]
pub struct VideoFullscreen {
    /// The element exposes an enter-fullscreen entry point at all
    pub entry_point: bool,
    /// Platform support flag; `None` when the platform exposes no flag
    pub supported: Option<bool>,
    /// `webkitDisplayingFullscreen`
    pub displaying: bool,
}

impl Default for VideoFullscreen {
    fn default() -> Self {
        Self {
            entry_point: true,
            supported: Some(true),
            displaying: false,
        }
    }
}

impl VideoFullscreen {
    /// No media fullscreen surface at all
    pub fn unavailable() -> Self {
        Self {
            entry_point: false,
            supported: None,
            displaying: false,
        }
    }

    /// Support flag as the element reports it at `ready` state.
    /// Before metadata the platform always reports `false`.
    pub fn supported_for(&self, ready: ReadyState) -> Option<bool> {
        self.supported.map(|s| s && ready.has_metadata())
    }

    pub fn enter(&mut self, ready: ReadyState) -> Result<(), MediaError> {
        if !self.entry_point {
            return Err(MediaError::NotSupported("enter fullscreen".into()));
        }
        if !ready.has_metadata() {
            return Err(MediaError::InvalidState("metadata not loaded".into()));
        }
        if self.supported != Some(true) {
            return Err(MediaError::NotSupported("fullscreen video".into()));
        }
        self.displaying = true;
        Ok(())
    }

    /// Leave fullscreen. Returns true if it was displaying.
    pub fn exit(&mut self) -> bool {
        std::mem::replace(&mut self.displaying, false)
    }
}
