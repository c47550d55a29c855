//! Signal reconciliation
//!
//! Turns platform signals into ENTER / EXIT / ERROR transitions on the
//! request stack. Every transition re-checks the stack before acting: the
//! change signal and the resize watcher can both report the same exit, and
//! some platforms fire the change signal twice on enter.

use fos_dom::NodeId;

use crate::manager::FullscreenManager;
use crate::platform::{MediaEvent, Platform, Signal};
use crate::resize_hack::ResizeExitHack;
use crate::stack::RequestId;
use crate::FullscreenError;

impl<P: Platform> FullscreenManager<P> {
    /// Reconcile one platform signal
    pub fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Document(name) => {
                if self.profile.change_event() == Some(name.as_str()) {
                    self.on_change_signal();
                } else if self.profile.error_event() == Some(name.as_str()) {
                    self.on_error_signal();
                } else {
                    tracing::trace!(event = %name, "ignoring unrelated document event");
                }
            }
            Signal::Media { target, event } => self.on_media_signal(target, event),
            Signal::WindowResize => self.on_window_resize(),
        }
    }

    fn on_change_signal(&mut self) {
        let active = self.element();
        self.handlers.change(active);

        let Some(active) = active else {
            return self.exit_transition();
        };

        // One signal can stand for the inner scope closing: the element
        // beneath it is fullscreen again.
        if self.stack.beneath_top().is_some_and(|s| s.element == active) {
            tracing::debug!(?active, "outer scope active again, closing inner scope");
            return self.exit_transition();
        }

        self.enter_transition(active);
        if ResizeExitHack::applies(&self.profile, self.embedded) {
            self.resize_hack.arm(&mut self.platform);
        }
    }

    fn on_error_signal(&mut self) {
        match self.stack.last().map(|s| s.id) {
            Some(scope) => self.error_transition(scope, FullscreenError::NotAllowed),
            None => tracing::debug!("fullscreen error with no pending request"),
        }
    }

    fn on_media_signal(&mut self, media: NodeId, event: MediaEvent) {
        if !self.media.take_listener(media, event) {
            tracing::trace!(?media, event = event.name(), "no listener armed");
            return;
        }
        match event {
            MediaEvent::BeginFullscreen => {
                self.handlers.change(Some(media));
                // A video that finished loading late belongs to the outer
                // scope that asked for it, not to whatever is innermost now
                let outer = self
                    .media
                    .take_entering(media)
                    .filter(|&scope| self.stack.last().is_some_and(|top| top.id != scope));
                match outer {
                    Some(scope) => self.enter_scope(scope, media),
                    None => self.enter_transition(media),
                }
            }
            MediaEvent::EndFullscreen => {
                self.handlers.change(None);
                self.exit_transition();
            }
            MediaEvent::LoadedMetadata => self.media_metadata_loaded(media),
        }
    }

    fn on_window_resize(&mut self) {
        if !self.resize_hack.is_armed() || self.element().is_some() {
            return;
        }
        tracing::debug!("window resized with no fullscreen element, treating as exit");
        self.exit_transition();
        self.resize_hack.disarm(&mut self.platform);
    }

    /// The innermost scope entered fullscreen as `candidate`
    pub(crate) fn enter_transition(&mut self, candidate: NodeId) {
        let tracked_media = self.media.active();
        let Some(top) = self.stack.last() else {
            tracing::debug!(?candidate, "fullscreen entered with no pending request");
            return;
        };

        if top.has_entered && (candidate == top.element || Some(candidate) == tracked_media) {
            tracing::debug!(?candidate, "duplicate enter suppressed");
            return;
        }

        if self.stack.len() == 1 {
            let active = self.element();
            self.handlers.enter(active);
        }

        if let Some(top) = self.stack.last_mut() {
            top.enter(candidate);
        }
    }

    /// A scope below the innermost one entered fullscreen as `candidate`
    fn enter_scope(&mut self, scope: RequestId, candidate: NodeId) {
        if self.stack.get(scope).is_none_or(|s| s.has_entered) {
            tracing::debug!(?scope, ?candidate, "scope closed or already entered");
            return;
        }

        if !self.stack.any_entered() {
            let active = self.element();
            self.handlers.enter(active);
        }

        if let Some(target) = self.stack.get_mut(scope) {
            target.enter(candidate);
        }
    }

    /// The innermost scope left fullscreen
    pub(crate) fn exit_transition(&mut self) {
        self.restore_controls();
        self.media.clear();

        let Some(mut scope) = self.stack.pop() else {
            return;
        };
        scope.exit();

        if self.element().is_some() {
            return;
        }

        // Nothing is fullscreen any more, so every outer scope closed as well
        while let Some(mut outer) = self.stack.pop() {
            outer.exit();
        }
        self.resize_hack.disarm(&mut self.platform);
        self.handlers.exit();
    }

    /// `scope` failed to open
    pub(crate) fn error_transition(&mut self, scope: RequestId, reason: FullscreenError) {
        let Some(mut failed) = self.stack.remove(scope) else {
            return;
        };
        tracing::debug!(element = ?failed.element, reason = reason.reason(), "fullscreen request failed");
        failed.error(reason);
        self.handlers.error(failed.element, reason);
    }
}
