//! Media Elements
//!
//! HTMLVideoElement state that matters for media-level fullscreen.

use crate::fullscreen::VideoFullscreen;
use crate::MediaError;

/// Network state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NetworkState {
    #[default]
    Empty = 0,
    Idle = 1,
    Loading = 2,
    NoSource = 3,
}

/// Ready state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    #[default]
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl ReadyState {
    /// Duration and dimensions are known
    #[inline]
    pub fn has_metadata(self) -> bool {
        self >= ReadyState::HaveMetadata
    }
}

/// Base media element (shared between video/audio)
#[derive(Debug, Default)]
pub struct HTMLMediaElement {
    pub src: String,
    pub network_state: NetworkState,
    pub ready_state: ReadyState,
    pub paused: bool,
}

impl HTMLMediaElement {
    pub fn new() -> Self {
        Self {
            src: String::new(),
            network_state: NetworkState::Empty,
            ready_state: ReadyState::HaveNothing,
            paused: true,
        }
    }

    /// Restart resource selection. Metadata arrives later via `metadata_loaded`.
    pub fn load(&mut self) {
        self.network_state = if self.src.is_empty() {
            NetworkState::NoSource
        } else {
            NetworkState::Loading
        };
        self.ready_state = ReadyState::HaveNothing;
        self.paused = true;
    }

    /// Mark metadata as available (the `loadedmetadata` point)
    pub fn metadata_loaded(&mut self) -> Result<(), MediaError> {
        if self.network_state == NetworkState::NoSource {
            return Err(MediaError::InvalidState("no source to load metadata from".into()));
        }
        self.network_state = NetworkState::Idle;
        if self.ready_state < ReadyState::HaveMetadata {
            self.ready_state = ReadyState::HaveMetadata;
        }
        Ok(())
    }
}

/// HTML Video Element
#[derive(Debug, Default)]
pub struct HTMLVideoElement {
    pub base: HTMLMediaElement,
    pub fullscreen: VideoFullscreen,
}

impl HTMLVideoElement {
    pub fn new() -> Self {
        Self {
            base: HTMLMediaElement::new(),
            fullscreen: VideoFullscreen::default(),
        }
    }

    /// Create from URL
    pub fn from_url(src: &str) -> Self {
        let mut video = Self::new();
        video.base.src = src.to_string();
        video
    }

    /// Enter media-level fullscreen. Requires metadata.
    pub fn enter_fullscreen(&mut self) -> Result<(), MediaError> {
        self.fullscreen.enter(self.base.ready_state)
    }

    pub fn exit_fullscreen(&mut self) -> bool {
        self.fullscreen.exit()
    }

    /// `webkitSupportsFullscreen`, which only becomes meaningful once metadata is known
    pub fn supports_fullscreen(&self) -> Option<bool> {
        self.fullscreen.supported_for(self.base.ready_state)
    }
}
