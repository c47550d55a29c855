//! Platform fullscreen surface
//!
//! Everything the manager needs from the host: symbol probing, the
//! whole-element fullscreen calls addressed by their platform symbol name,
//! media-level fullscreen, and the asynchronous signals those calls produce.

use fos_dom::NodeId;
use fos_media::{MediaError, ReadyState};

/// Where a symbol is looked up during capability resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeTarget {
    /// A throwaway `<video>` element
    Element,
    /// The document object
    Document,
}

/// Flags passed along with a request call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// `Element.ALLOW_KEYBOARD_INPUT`
    pub allow_keyboard_input: bool,
}

/// Signals fired on media elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    BeginFullscreen,
    EndFullscreen,
    LoadedMetadata,
}

impl MediaEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::BeginFullscreen => "webkitbeginfullscreen",
            Self::EndFullscreen => "webkitendfullscreen",
            Self::LoadedMetadata => "loadedmetadata",
        }
    }
}

/// Asynchronous signal delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Event dispatched on the document, by event name
    Document(String),
    /// Event dispatched on a media element
    Media { target: NodeId, event: MediaEvent },
    /// Window resize
    WindowResize,
}

impl Signal {
    pub fn document(name: impl Into<String>) -> Self {
        Self::Document(name.into())
    }
}

/// Failure of a synchronous platform call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("{0} is not a function")]
    MissingSymbol(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unknown element {0:?}")]
    UnknownElement(NodeId),

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Host fullscreen surface.
///
/// Calls never block. Their outcome is reported later through
/// [`poll_signal`](Platform::poll_signal) or pushed by the host into
/// [`FullscreenManager::handle_signal`](crate::FullscreenManager::handle_signal).
pub trait Platform {
    /// Does `symbol` exist on the probe target?
    fn has_symbol(&self, target: ProbeTarget, symbol: &str) -> bool;

    /// Root container used when a request names no element
    fn document_element(&self) -> NodeId;

    /// Running inside an embedded frame
    fn is_embedded(&self) -> bool;

    /// The platform advertises keyboard input while fullscreen.
    /// Some platforms advertise it without honouring it.
    fn keyboard_input_supported(&self) -> bool {
        false
    }

    fn call_request(
        &mut self,
        element: NodeId,
        symbol: &str,
        options: RequestOptions,
    ) -> Result<(), PlatformError>;

    fn call_exit(&mut self, symbol: &str) -> Result<(), PlatformError>;

    /// Current fullscreen element through the given document property
    fn query_element(&self, symbol: &str) -> Option<NodeId>;

    /// Enabled flag through the given document property, `None` when undefined
    fn query_enabled(&self, symbol: &str) -> Option<bool>;

    fn is_video(&self, element: NodeId) -> bool;

    /// First `<video>` strictly below `root`
    fn find_video(&self, root: NodeId) -> Option<NodeId>;

    /// The media element exposes an enter-fullscreen entry point
    fn media_has_entry_point(&self, media: NodeId) -> bool;

    /// Media fullscreen support flag, `None` when the platform exposes none
    fn media_supports_fullscreen(&self, media: NodeId) -> Option<bool>;

    fn media_ready_state(&self, media: NodeId) -> ReadyState;

    /// Start loading; `LoadedMetadata` follows once metadata is known
    fn media_load(&mut self, media: NodeId);

    fn media_enter_fullscreen(&mut self, media: NodeId) -> Result<(), PlatformError>;

    fn media_exit_fullscreen(&mut self, media: NodeId) -> Result<(), PlatformError>;

    fn media_displaying_fullscreen(&self, media: NodeId) -> bool;

    /// `controls` attribute present
    fn has_controls(&self, media: NodeId) -> bool;

    fn set_controls(&mut self, media: NodeId, visible: bool);

    /// Start or stop delivering `WindowResize`
    fn watch_window_resize(&mut self, _enabled: bool) {}

    /// Next queued signal, if the platform buffers them
    fn poll_signal(&mut self) -> Option<Signal> {
        None
    }
}

/// A request target, classified once at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Plain(NodeId),
    Media(NodeId),
}

impl Target {
    pub fn classify<P: Platform + ?Sized>(platform: &P, element: NodeId) -> Self {
        if platform.is_video(element) {
            Self::Media(element)
        } else {
            Self::Plain(element)
        }
    }

    pub fn node(self) -> NodeId {
        match self {
            Self::Plain(id) | Self::Media(id) => id,
        }
    }

    /// The element itself when it is a video, otherwise its first video descendant
    pub fn video<P: Platform + ?Sized>(self, platform: &P) -> Option<NodeId> {
        match self {
            Self::Media(id) => Some(id),
            Self::Plain(id) => platform.find_video(id),
        }
    }
}
