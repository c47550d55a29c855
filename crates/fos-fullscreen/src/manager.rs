//! Fullscreen manager
//!
//! Public entry point. Owns the request stack, the resolved capability
//! profile and the media fallback state; all mutation goes through `&mut self`
//! on the host's event loop.

use fos_dom::NodeId;

use crate::capability::{CapabilityProfile, EnabledQuery};
use crate::config::FullscreenConfig;
use crate::handlers::HandlerRegistry;
use crate::media::MediaFallbackState;
use crate::platform::{Platform, PlatformError, RequestOptions, Target};
use crate::resize_hack::ResizeExitHack;
use crate::stack::{Callbacks, RequestId, RequestStack};
use crate::timers::{TimerQueue, TimerTask};
use crate::FullscreenError;

/// Fullscreen manager
pub struct FullscreenManager<P: Platform> {
    pub(crate) platform: P,
    pub(crate) profile: CapabilityProfile,
    pub(crate) stack: RequestStack,
    pub(crate) handlers: HandlerRegistry,
    pub(crate) media: MediaFallbackState,
    pub(crate) resize_hack: ResizeExitHack,
    pub(crate) timers: TimerQueue,
    pub(crate) config: FullscreenConfig,
    pub(crate) embedded: bool,
}

impl<P: Platform> FullscreenManager<P> {
    /// Resolve the platform's capability profile once and start tracking requests
    pub fn new(platform: P, handlers: HandlerRegistry) -> Self {
        Self::with_config(platform, handlers, FullscreenConfig::default())
    }

    pub fn with_config(platform: P, handlers: HandlerRegistry, config: FullscreenConfig) -> Self {
        let profile = CapabilityProfile::resolve(&platform);
        let embedded = platform.is_embedded();
        Self {
            platform,
            profile,
            stack: RequestStack::new(),
            handlers,
            media: MediaFallbackState::default(),
            resize_hack: ResizeExitHack::new(),
            timers: TimerQueue::new(),
            config,
            embedded,
        }
    }

    /// Request fullscreen for `element`, or the document element when `None`.
    ///
    /// The outcome arrives later through `callbacks` and the global handlers.
    pub fn request(&mut self, element: Option<NodeId>, callbacks: Callbacks) {
        let element = element.unwrap_or_else(|| self.platform.document_element());
        let scope = self.stack.push(element, callbacks);
        let target = Target::classify(&self.platform, element);

        let Some(request) = self.profile.request() else {
            return self.media_fallback(scope, target);
        };

        if self.embedded {
            if self.profile.reports_enabled(&self.platform) == Some(false) {
                tracing::debug!(?element, "fullscreen disabled in frame, trying media fallback");
                return self.media_fallback(scope, target);
            }
            if self.profile.enabled() == EnabledQuery::Unresolved {
                return self.probe_request(scope, element, request);
            }
        }

        self.direct_request(scope, element, request);
    }

    /// Leave fullscreen. Safe to call when nothing is fullscreen.
    pub fn exit(&mut self) {
        // The resize watcher would report this exit a second time
        self.resize_hack.disarm(&mut self.platform);

        let media = self
            .media
            .active()
            .filter(|&m| self.platform.media_displaying_fullscreen(m));

        let result = match (media, self.profile.exit()) {
            (Some(media), _) => self.platform.media_exit_fullscreen(media),
            (None, Some(exit)) => self.platform.call_exit(exit),
            (None, None) => Ok(()),
        };
        if let Err(err) = result {
            tracing::warn!(%err, "fullscreen exit call failed");
        }
    }

    /// Exit when something is fullscreen, request otherwise
    pub fn toggle(&mut self, element: Option<NodeId>, callbacks: Callbacks) {
        if self.element().is_some() {
            self.exit();
        } else {
            self.request(element, callbacks);
        }
    }

    /// Element currently fullscreen
    pub fn element(&self) -> Option<NodeId> {
        if let Some(media) = self.media.active() {
            if self.platform.media_displaying_fullscreen(media) {
                return Some(media);
            }
        }
        self.profile
            .element()
            .and_then(|symbol| self.platform.query_element(symbol))
    }

    /// Whole-element fullscreen is usable in this context
    pub fn enabled(&self) -> bool {
        if self.profile.is_legacy_webkit() && !self.embedded {
            return true;
        }
        self.profile.reports_enabled(&self.platform).unwrap_or(false)
    }

    /// Number of open scopes
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Requested elements of the open scopes, outermost first
    pub fn pending_elements(&self) -> Vec<NodeId> {
        self.stack.elements()
    }

    pub fn profile(&self) -> &CapabilityProfile {
        &self.profile
    }

    pub fn config(&self) -> &FullscreenConfig {
        &self.config
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    pub fn set_handlers(&mut self, handlers: HandlerRegistry) {
        self.handlers = handlers;
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Virtual time of the timer queue
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Milliseconds until the next confirmation or probe timer is due
    pub fn next_timer_in(&self) -> Option<u64> {
        self.timers.time_until_next()
    }

    /// Reconcile every signal the platform has queued
    pub fn pump(&mut self) {
        while let Some(signal) = self.platform.poll_signal() {
            self.handle_signal(signal);
        }
    }

    /// Advance the clock by `elapsed_ms`, firing due timers in order.
    ///
    /// Queued signals are reconciled before each timer so that an earlier
    /// platform event is never overtaken by a later timeout.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.timers.now().saturating_add(elapsed_ms);
        self.pump();
        while let Some(timer) = self.timers.pop_due(until) {
            self.run_timer(timer.task);
            self.pump();
        }
        self.timers.advance_to(until);
    }

    /// Speculative request from a frame that cannot tell whether fullscreen is enabled
    fn probe_request(&mut self, scope: RequestId, element: NodeId, request: &'static str) {
        self.profile.begin_probe();
        if let Err(err) = self.platform.call_request(element, request, RequestOptions::default()) {
            tracing::warn!(%err, "speculative fullscreen request failed");
        }
        self.timers
            .set_timeout(TimerTask::ProbeEnabled(scope), self.config.probe_delay_ms);
    }

    fn direct_request(&mut self, scope: RequestId, element: NodeId, request: &'static str) {
        match self.call_request(element, request) {
            Ok(()) => {
                self.timers
                    .set_timeout(TimerTask::ConfirmRequest(scope), self.config.confirm_delay_ms);
            }
            Err(err) => {
                tracing::warn!(%err, ?element, "fullscreen request threw");
                self.error_transition(scope, FullscreenError::NotEnabled);
            }
        }
    }

    fn call_request(&mut self, element: NodeId, request: &'static str) -> Result<(), PlatformError> {
        let keyboard = self.config.allow_keyboard_input && self.platform.keyboard_input_supported();
        let options = RequestOptions {
            allow_keyboard_input: keyboard,
        };
        self.platform.call_request(element, request, options)?;

        // Safari 5.1 claims keyboard support but ignores such requests
        if keyboard && self.element().is_none() {
            self.platform
                .call_request(element, request, RequestOptions::default())?;
        }
        Ok(())
    }

    fn run_timer(&mut self, task: TimerTask) {
        match task {
            TimerTask::ConfirmRequest(scope) => {
                // An outer scope still being fullscreen does not answer a nested request
                let requested = self
                    .stack
                    .get(scope)
                    .filter(|s| !s.has_entered)
                    .map(|s| s.element);
                let Some(requested) = requested else {
                    return;
                };
                if self.element() != Some(requested) {
                    let reason = if self.embedded {
                        FullscreenError::NotEnabled
                    } else {
                        FullscreenError::NotAllowed
                    };
                    tracing::debug!(?scope, reason = reason.reason(), "request produced no fullscreen element");
                    self.error_transition(scope, reason);
                }
            }
            TimerTask::ProbeEnabled(scope) => {
                let enabled = self.element().is_some();
                tracing::debug!(enabled, "fullscreen probe finished");
                self.profile.cache_enabled(enabled);
                if enabled {
                    return;
                }
                let target = self
                    .stack
                    .get(scope)
                    .filter(|s| !s.has_entered)
                    .map(|s| Target::classify(&self.platform, s.element));
                if let Some(target) = target {
                    self.media_fallback(scope, target);
                }
            }
        }
    }
}

impl<P: Platform + std::fmt::Debug> std::fmt::Debug for FullscreenManager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenManager")
            .field("platform", &self.platform)
            .field("profile", &self.profile)
            .field("stack", &self.stack)
            .field("media", &self.media)
            .field("resize_hack", &self.resize_hack)
            .field("timers", &self.timers)
            .field("embedded", &self.embedded)
            .finish_non_exhaustive()
    }
}
