//! Headless platform
//!
//! An in-process fullscreen surface backed by a `fos_dom::Document`. It
//! reproduces the quirks the manager has to cope with (duplicate change
//! signals, swallowed requests, missing exit signals inside frames) and is
//! used when no window system is attached, including in tests.

use std::collections::{HashMap, VecDeque};

use fos_dom::{Document, DomResult, NodeId};
use fos_media::{HTMLVideoElement, ReadyState, VideoFullscreen};

use crate::capability::{self, VariantDescriptor};
use crate::platform::{MediaEvent, Platform, PlatformError, ProbeTarget, RequestOptions, Signal};

/// Symbols exposed by the simulated platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    element_symbols: Vec<String>,
    document_symbols: Vec<String>,
    change_event: Option<String>,
    error_event: Option<String>,
    /// Videos expose `webkitEnterFullscreen`
    media_fullscreen: bool,
    /// `Element.ALLOW_KEYBOARD_INPUT` is defined
    keyboard_flag: bool,
}

impl Surface {
    /// No fullscreen API of any kind
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_variant(variant: &VariantDescriptor) -> Self {
        let mut document_symbols = vec![
            variant.exit.to_string(),
            variant.element.to_string(),
            format!("on{}", variant.change),
            format!("on{}", variant.error),
        ];
        if let Some(enabled) = variant.enabled {
            document_symbols.push(enabled.to_string());
        }
        Self {
            element_symbols: vec![variant.request.to_string()],
            document_symbols,
            change_event: Some(variant.change.to_string()),
            error_event: Some(variant.error.to_string()),
            media_fullscreen: false,
            keyboard_flag: false,
        }
    }

    /// Add another variant's symbols. Signals keep using this surface's events.
    pub fn merge(&mut self, other: &Surface) {
        for symbol in &other.element_symbols {
            if !self.element_symbols.contains(symbol) {
                self.element_symbols.push(symbol.clone());
            }
        }
        for symbol in &other.document_symbols {
            if !self.document_symbols.contains(symbol) {
                self.document_symbols.push(symbol.clone());
            }
        }
        if self.change_event.is_none() {
            self.change_event = other.change_event.clone();
            self.error_event = other.error_event.clone();
        }
        self.media_fullscreen |= other.media_fullscreen;
        self.keyboard_flag |= other.keyboard_flag;
    }

    pub fn with_media_fullscreen(mut self, enabled: bool) -> Self {
        self.media_fullscreen = enabled;
        self
    }

    pub fn with_keyboard_flag(mut self, enabled: bool) -> Self {
        self.keyboard_flag = enabled;
        self
    }

    pub fn remove_document_symbol(&mut self, symbol: &str) {
        self.document_symbols.retain(|s| s != symbol);
    }

    fn has(&self, target: ProbeTarget, symbol: &str) -> bool {
        let symbols = match target {
            ProbeTarget::Element => &self.element_symbols,
            ProbeTarget::Document => &self.document_symbols,
        };
        symbols.iter().any(|s| s == symbol)
    }
}

/// Platform misbehaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// Page runs inside an embedded frame
    pub embedded: bool,
    /// Frame permission, also reported as the enabled flag. A disallowed request is dropped.
    pub fullscreen_allowed: bool,
    /// Requests carry a user gesture; without one the error event fires
    pub user_gesture: bool,
    /// Requests are silently ignored
    pub swallow_requests: bool,
    /// Requests raise synchronously
    pub throw_on_request: bool,
    /// Every change event is delivered twice
    pub duplicate_change: bool,
    /// No change event when the user leaves fullscreen from inside a frame
    pub drop_frame_exit_signal: bool,
    /// Requests asking for keyboard input are honoured rather than ignored
    pub honour_keyboard_input: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            embedded: false,
            fullscreen_allowed: true,
            user_gesture: true,
            swallow_requests: false,
            throw_on_request: false,
            duplicate_change: false,
            drop_frame_exit_signal: false,
            honour_keyboard_input: true,
        }
    }
}

/// In-process fullscreen platform
#[derive(Debug)]
pub struct HeadlessPlatform {
    document: Document,
    surface: Surface,
    quirks: Quirks,
    videos: HashMap<NodeId, HTMLVideoElement>,
    /// Whole-element fullscreen stack, topmost last
    fullscreen: Vec<NodeId>,
    signals: VecDeque<Signal>,
    watching_resize: bool,
    request_calls: usize,
    controls_writes: Vec<(NodeId, bool)>,
}

impl HeadlessPlatform {
    pub fn new(surface: Surface, quirks: Quirks) -> Self {
        Self {
            document: Document::default(),
            surface,
            quirks,
            videos: HashMap::new(),
            fullscreen: Vec::new(),
            signals: VecDeque::new(),
            watching_resize: false,
            request_calls: 0,
            controls_writes: Vec::new(),
        }
    }

    /// Current browsers
    pub fn standard() -> Self {
        Self::new(Surface::for_variant(&capability::STANDARD), Quirks::default())
    }

    /// Chrome / Safari 6 with native video fullscreen
    pub fn webkit() -> Self {
        Self::new(
            Surface::for_variant(&capability::WEBKIT).with_media_fullscreen(true),
            Quirks::default(),
        )
    }

    /// Safari 5.1: no enabled flag, advertises keyboard input it ignores
    pub fn legacy_webkit() -> Self {
        Self::new(
            Surface::for_variant(&capability::LEGACY_WEBKIT)
                .with_media_fullscreen(true)
                .with_keyboard_flag(true),
            Quirks {
                honour_keyboard_input: false,
                ..Quirks::default()
            },
        )
    }

    /// Firefox 10+
    pub fn moz() -> Self {
        Self::new(Surface::for_variant(&capability::MOZ), Quirks::default())
    }

    /// iOS: only videos can go fullscreen
    pub fn media_only() -> Self {
        Self::new(Surface::none().with_media_fullscreen(true), Quirks::default())
    }

    /// No fullscreen at all
    pub fn unsupported() -> Self {
        Self::new(Surface::none(), Quirks::default())
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn quirks_mut(&mut self) -> &mut Quirks {
        &mut self.quirks
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Append a plain element under `parent`
    pub fn add_element(&mut self, parent: NodeId, tag: &str) -> DomResult<NodeId> {
        self.document.append_element(parent, tag)
    }

    /// Append a `<video>` with media state under `parent`
    pub fn add_video(&mut self, parent: NodeId, src: &str) -> DomResult<NodeId> {
        let id = self.document.append_element(parent, "video")?;
        let mut video = HTMLVideoElement::from_url(src);
        if !self.surface.media_fullscreen {
            video.fullscreen = VideoFullscreen::unavailable();
        }
        self.videos.insert(id, video);
        Ok(id)
    }

    pub fn video(&self, id: NodeId) -> Option<&HTMLVideoElement> {
        self.videos.get(&id)
    }

    pub fn video_mut(&mut self, id: NodeId) -> Option<&mut HTMLVideoElement> {
        self.videos.get_mut(&id)
    }

    /// Make metadata available without a `loadedmetadata` signal
    pub fn preload_metadata(&mut self, id: NodeId) -> Result<(), PlatformError> {
        let video = self.videos.get_mut(&id).ok_or(PlatformError::UnknownElement(id))?;
        video.base.load();
        video.base.metadata_loaded()?;
        Ok(())
    }

    /// Finish a pending load and fire `loadedmetadata`
    pub fn finish_loading(&mut self, id: NodeId) -> Result<(), PlatformError> {
        let video = self.videos.get_mut(&id).ok_or(PlatformError::UnknownElement(id))?;
        video.base.metadata_loaded()?;
        self.push_signal(Signal::Media {
            target: id,
            event: MediaEvent::LoadedMetadata,
        });
        Ok(())
    }

    /// The user leaves fullscreen (Escape key, native player Done button)
    pub fn user_exit(&mut self) {
        let displaying: Vec<NodeId> = self
            .videos
            .iter_mut()
            .filter_map(|(id, v)| v.exit_fullscreen().then_some(*id))
            .collect();
        for id in displaying {
            self.push_signal(Signal::Media {
                target: id,
                event: MediaEvent::EndFullscreen,
            });
        }

        if self.fullscreen.is_empty() {
            return;
        }
        self.fullscreen.clear();
        if self.quirks.drop_frame_exit_signal && self.quirks.embedded {
            return;
        }
        self.push_change();
    }

    /// Resize the window; delivered only while a watcher is installed
    pub fn resize_window(&mut self) {
        if self.watching_resize {
            self.push_signal(Signal::WindowResize);
        }
    }

    pub fn push_signal(&mut self, signal: Signal) {
        self.signals.push_back(signal);
    }

    pub fn pending_signals(&self) -> usize {
        self.signals.len()
    }

    /// Topmost whole-element fullscreen element
    pub fn fullscreen_element(&self) -> Option<NodeId> {
        self.fullscreen.last().copied()
    }

    pub fn is_watching_resize(&self) -> bool {
        self.watching_resize
    }

    /// Number of request calls received, including rejected ones
    pub fn request_calls(&self) -> usize {
        self.request_calls
    }

    /// Every `controls` write, in order
    pub fn controls_writes(&self) -> &[(NodeId, bool)] {
        &self.controls_writes
    }

    fn push_change(&mut self) {
        let Some(event) = self.surface.change_event.clone() else {
            return;
        };
        if self.quirks.duplicate_change {
            self.push_signal(Signal::Document(event.clone()));
        }
        self.push_signal(Signal::Document(event));
    }

    fn push_error(&mut self) {
        if let Some(event) = self.surface.error_event.clone() {
            self.push_signal(Signal::Document(event));
        }
    }

    fn video_or_err(&mut self, id: NodeId) -> Result<&mut HTMLVideoElement, PlatformError> {
        self.videos.get_mut(&id).ok_or(PlatformError::UnknownElement(id))
    }
}

impl Platform for HeadlessPlatform {
    fn has_symbol(&self, target: ProbeTarget, symbol: &str) -> bool {
        self.surface.has(target, symbol)
    }

    fn document_element(&self) -> NodeId {
        self.document.document_element()
    }

    fn is_embedded(&self) -> bool {
        self.quirks.embedded
    }

    fn keyboard_input_supported(&self) -> bool {
        self.surface.keyboard_flag
    }

    fn call_request(
        &mut self,
        element: NodeId,
        symbol: &str,
        options: RequestOptions,
    ) -> Result<(), PlatformError> {
        self.request_calls += 1;
        if !self.surface.has(ProbeTarget::Element, symbol) {
            return Err(PlatformError::MissingSymbol(symbol.to_string()));
        }
        if self.document.tree().element(element).is_none() {
            return Err(PlatformError::UnknownElement(element));
        }
        if self.quirks.throw_on_request {
            return Err(PlatformError::Rejected("SecurityError".into()));
        }
        if options.allow_keyboard_input && !self.quirks.honour_keyboard_input {
            return Ok(());
        }
        if !self.quirks.fullscreen_allowed || self.quirks.swallow_requests {
            return Ok(());
        }
        if !self.quirks.user_gesture {
            self.push_error();
            return Ok(());
        }
        if self.fullscreen.last() != Some(&element) {
            self.fullscreen.push(element);
            self.push_change();
        }
        Ok(())
    }

    fn call_exit(&mut self, symbol: &str) -> Result<(), PlatformError> {
        if !self.surface.has(ProbeTarget::Document, symbol) {
            return Err(PlatformError::MissingSymbol(symbol.to_string()));
        }
        if self.fullscreen.pop().is_some() {
            self.push_change();
        }
        Ok(())
    }

    fn query_element(&self, symbol: &str) -> Option<NodeId> {
        if !self.surface.has(ProbeTarget::Document, symbol) {
            return None;
        }
        self.fullscreen_element()
    }

    fn query_enabled(&self, symbol: &str) -> Option<bool> {
        self.surface
            .has(ProbeTarget::Document, symbol)
            .then_some(self.quirks.fullscreen_allowed)
    }

    fn is_video(&self, element: NodeId) -> bool {
        self.document.tree().element(element).is_some_and(|e| e.is_video())
    }

    fn find_video(&self, root: NodeId) -> Option<NodeId> {
        self.document.tree().first_descendant_by_tag(root, "video")
    }

    fn media_has_entry_point(&self, media: NodeId) -> bool {
        self.videos.get(&media).is_some_and(|v| v.fullscreen.entry_point)
    }

    fn media_supports_fullscreen(&self, media: NodeId) -> Option<bool> {
        self.videos.get(&media).and_then(|v| v.supports_fullscreen())
    }

    fn media_ready_state(&self, media: NodeId) -> ReadyState {
        self.videos
            .get(&media)
            .map_or(ReadyState::HaveNothing, |v| v.base.ready_state)
    }

    fn media_load(&mut self, media: NodeId) {
        if let Some(video) = self.videos.get_mut(&media) {
            video.base.load();
        }
    }

    fn media_enter_fullscreen(&mut self, media: NodeId) -> Result<(), PlatformError> {
        self.video_or_err(media)?.enter_fullscreen()?;
        self.push_signal(Signal::Media {
            target: media,
            event: MediaEvent::BeginFullscreen,
        });
        Ok(())
    }

    fn media_exit_fullscreen(&mut self, media: NodeId) -> Result<(), PlatformError> {
        if self.video_or_err(media)?.exit_fullscreen() {
            self.push_signal(Signal::Media {
                target: media,
                event: MediaEvent::EndFullscreen,
            });
        }
        Ok(())
    }

    fn media_displaying_fullscreen(&self, media: NodeId) -> bool {
        self.videos.get(&media).is_some_and(|v| v.fullscreen.displaying)
    }

    fn has_controls(&self, media: NodeId) -> bool {
        self.document.tree().has_attribute(media, "controls")
    }

    fn set_controls(&mut self, media: NodeId, visible: bool) {
        let tree = self.document.tree_mut();
        let result = if visible {
            tree.set_attribute(media, "controls", "controls")
        } else {
            tree.remove_attribute(media, "controls").map(|_| ())
        };
        match result {
            Ok(()) => self.controls_writes.push((media, visible)),
            Err(err) => tracing::warn!(%err, ?media, "cannot update controls attribute"),
        }
    }

    fn watch_window_resize(&mut self, enabled: bool) {
        self.watching_resize = enabled;
    }

    fn poll_signal(&mut self) -> Option<Signal> {
        self.signals.pop_front()
    }
}
