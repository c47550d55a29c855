//! Media fallback
//!
//! When whole-element fullscreen is missing or disabled, a `<video>` inside
//! the requested element can still go fullscreen through the platform's
//! native player. Its begin/end signals feed the same transitions as the
//! document change signal.

use std::collections::HashSet;
use std::fmt;

use fos_dom::NodeId;

use crate::manager::FullscreenManager;
use crate::platform::{MediaEvent, Platform, Target};
use crate::stack::RequestId;
use crate::FullscreenError;

/// Answer of [`FullscreenManager::video_enabled`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSupport {
    Yes,
    No,
    /// A video exists but its metadata has not loaded, so support is unknown
    Maybe,
}

impl From<bool> for VideoSupport {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for VideoSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "true",
            Self::No => "false",
            Self::Maybe => "maybe",
        })
    }
}

/// The single video currently driven through media-level fullscreen
#[derive(Debug, Default)]
pub struct MediaFallbackState {
    active: Option<NodeId>,
    /// `controls` attribute as it was when fullscreen was entered
    had_controls: Option<bool>,
    /// Scopes waiting on `loadedmetadata`, in request order
    awaiting_metadata: Vec<(NodeId, RequestId)>,
    /// Scope whose platform enter call is waiting for `BeginFullscreen`
    entering: Option<(NodeId, RequestId)>,
    /// Armed one-shot listeners
    listeners: HashSet<(NodeId, MediaEvent)>,
}

impl MediaFallbackState {
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn had_controls(&self) -> Option<bool> {
        self.had_controls
    }

    pub fn is_listening(&self, media: NodeId, event: MediaEvent) -> bool {
        self.listeners.contains(&(media, event))
    }

    fn listen(&mut self, media: NodeId, event: MediaEvent) {
        self.listeners.insert((media, event));
    }

    /// Consume a one-shot listener. False if none was armed.
    pub(crate) fn take_listener(&mut self, media: NodeId, event: MediaEvent) -> bool {
        self.listeners.remove(&(media, event))
    }

    fn forget(&mut self, media: NodeId) {
        self.listeners.retain(|(m, _)| *m != media);
        self.awaiting_metadata.retain(|(m, _)| *m != media);
    }

    /// Every scope waiting on `media`, oldest first
    fn take_awaiting(&mut self, media: NodeId) -> Vec<RequestId> {
        let mut taken = Vec::new();
        self.awaiting_metadata.retain(|&(m, scope)| {
            if m == media {
                taken.push(scope);
            }
            m != media
        });
        taken
    }

    /// Scope that asked `media` to enter, if its begin signal is still due
    pub(crate) fn take_entering(&mut self, media: NodeId) -> Option<RequestId> {
        match self.entering {
            Some((m, scope)) if m == media => {
                self.entering = None;
                Some(scope)
            }
            _ => None,
        }
    }

    /// Drop the tracked video. Armed listeners stay until they fire.
    pub(crate) fn clear(&mut self) {
        self.active = None;
        self.had_controls = None;
        self.entering = None;
    }
}

impl<P: Platform> FullscreenManager<P> {
    /// Whether a video inside `element` can go fullscreen
    pub fn video_enabled(&self, element: Option<NodeId>) -> VideoSupport {
        if self.enabled() {
            return VideoSupport::Yes;
        }

        let element = element.unwrap_or_else(|| self.platform.document_element());
        let Some(video) = Target::classify(&self.platform, element).video(&self.platform) else {
            return VideoSupport::No;
        };
        let Some(supported) = self.platform.media_supports_fullscreen(video) else {
            return VideoSupport::No;
        };

        if self.platform.media_ready_state(video).has_metadata() {
            supported.into()
        } else {
            VideoSupport::Maybe
        }
    }

    pub(crate) fn media_fallback(&mut self, scope: RequestId, target: Target) {
        let reason = if self.profile.request().is_none() {
            FullscreenError::NotSupported
        } else {
            FullscreenError::NotEnabled
        };

        let video = target
            .video(&self.platform)
            .filter(|&v| self.platform.media_has_entry_point(v));
        let Some(video) = video else {
            tracing::debug!(element = ?target.node(), "no video to fall back to");
            return self.error_transition(scope, reason);
        };

        // Listeners go in before the platform call that can trigger them
        self.media.listen(video, MediaEvent::BeginFullscreen);
        self.media.listen(video, MediaEvent::EndFullscreen);
        self.media.active = Some(video);

        if self.platform.media_ready_state(video).has_metadata() {
            self.enter_media_fullscreen(video, scope);
        } else {
            tracing::debug!(?video, "loading metadata before media fullscreen");
            self.media.listen(video, MediaEvent::LoadedMetadata);
            self.media.awaiting_metadata.push((video, scope));
            self.platform.media_load(video);
        }
    }

    /// `loadedmetadata` for a video we were waiting on
    pub(crate) fn media_metadata_loaded(&mut self, video: NodeId) {
        // One video enters once; the innermost scope still open drives it
        let waiting = self.media.take_awaiting(video);
        match waiting.into_iter().rev().find(|&scope| self.stack.get(scope).is_some()) {
            Some(scope) => self.enter_media_fullscreen(video, scope),
            None => self.drop_stale_video(video),
        }
    }

    fn enter_media_fullscreen(&mut self, video: NodeId, scope: RequestId) {
        if self.stack.get(scope).is_none() {
            return self.drop_stale_video(video);
        }
        match self.platform.media_enter_fullscreen(video) {
            Ok(()) => {
                self.media.active = Some(video);
                self.media.entering = Some((video, scope));
                self.media.had_controls = Some(self.platform.has_controls(video));
            }
            Err(err) => {
                tracing::warn!(%err, ?video, "media fullscreen failed");
                self.media.forget(video);
                if self.media.active == Some(video) {
                    self.media.clear();
                }
                self.error_transition(scope, FullscreenError::NotSupported);
            }
        }
    }

    fn drop_stale_video(&mut self, video: NodeId) {
        tracing::debug!(?video, "requesting scope already closed, not entering");
        self.media.forget(video);
        if self.media.active == Some(video) {
            self.media.clear();
        }
    }

    /// Some WebKit builds force native controls visible when leaving media
    /// fullscreen. Toggling the attribute twice makes the player re-read it.
    pub(crate) fn restore_controls(&mut self) {
        let (Some(video), Some(had_controls)) = (self.media.active, self.media.had_controls) else {
            return;
        };
        self.platform.set_controls(video, !had_controls);
        self.platform.set_controls(video, had_controls);
    }
}
