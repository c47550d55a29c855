//! Fullscreen errors

/// Why a fullscreen request failed.
///
/// Delivered to the scope's error callback first and then to the global
/// error handler, at most once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FullscreenError {
    /// No platform capability and no usable media fallback
    #[error("Fullscreen not supported")]
    NotSupported,
    /// A capability exists but this context (e.g. a frame without permission) disallows it
    #[error("Fullscreen not enabled in this context")]
    NotEnabled,
    /// The platform rejected an otherwise eligible request
    #[error("Fullscreen not allowed")]
    NotAllowed,
}

impl FullscreenError {
    /// Stable reason code handed to scripts
    pub fn reason(self) -> &'static str {
        match self {
            Self::NotSupported => "not_supported",
            Self::NotEnabled => "not_enabled",
            Self::NotAllowed => "not_allowed",
        }
    }
}
