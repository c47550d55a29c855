//! Capability profile
//!
//! Which flavour of the fullscreen API the platform exposes. Variants are
//! tried in priority order: the standard names first, then the prefixed
//! variants in the order browsers shipped them.

use crate::platform::{Platform, ProbeTarget};

/// Change event of the WebKit variants. Frames on these platforms miss exit signals.
pub const WEBKIT_CHANGE_EVENT: &str = "webkitfullscreenchange";

/// Exit symbol that identifies Safari 5.1
pub const LEGACY_WEBKIT_EXIT: &str = "webkitCancelFullScreen";

/// Symbol names for one API flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub name: &'static str,
    pub request: &'static str,
    pub exit: &'static str,
    pub enabled: Option<&'static str>,
    pub element: &'static str,
    pub change: &'static str,
    pub error: &'static str,
}

pub const STANDARD: VariantDescriptor = VariantDescriptor {
    name: "standard",
    request: "requestFullscreen",
    exit: "exitFullscreen",
    enabled: Some("fullscreenEnabled"),
    element: "fullscreenElement",
    change: "fullscreenchange",
    error: "fullscreenerror",
};

pub const WEBKIT: VariantDescriptor = VariantDescriptor {
    name: "webkit",
    request: "webkitRequestFullscreen",
    exit: "webkitExitFullscreen",
    enabled: Some("webkitFullscreenEnabled"),
    element: "webkitFullscreenElement",
    change: WEBKIT_CHANGE_EVENT,
    error: "webkitfullscreenerror",
};

pub const LEGACY_WEBKIT: VariantDescriptor = VariantDescriptor {
    name: "legacy-webkit",
    request: "webkitRequestFullScreen",
    exit: LEGACY_WEBKIT_EXIT,
    enabled: None,
    element: "webkitCurrentFullScreenElement",
    change: WEBKIT_CHANGE_EVENT,
    error: "webkitfullscreenerror",
};

pub const MOZ: VariantDescriptor = VariantDescriptor {
    name: "moz",
    request: "mozRequestFullScreen",
    exit: "mozCancelFullScreen",
    enabled: Some("mozFullScreenEnabled"),
    element: "mozFullScreenElement",
    change: "mozfullscreenchange",
    error: "mozfullscreenerror",
};

/// Known variants in priority order
pub const VARIANTS: [VariantDescriptor; 4] = [STANDARD, WEBKIT, LEGACY_WEBKIT, MOZ];

/// How "is fullscreen enabled" is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnabledQuery {
    /// Ask the platform through this document property
    Symbol(&'static str),
    /// Unknown; the first request from a frame will probe
    Unresolved,
    /// A speculative probe is in flight
    Probing,
    /// Learned from the probe
    Inferred(bool),
}

/// Resolved fullscreen surface. Absent fields are unsupported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityProfile {
    variant: Option<&'static str>,
    request: Option<&'static str>,
    exit: Option<&'static str>,
    enabled: EnabledQuery,
    element: Option<&'static str>,
    change: Option<&'static str>,
    error: Option<&'static str>,
}

impl CapabilityProfile {
    /// No whole-element fullscreen at all
    pub fn unsupported() -> Self {
        Self {
            variant: None,
            request: None,
            exit: None,
            enabled: EnabledQuery::Unresolved,
            element: None,
            change: None,
            error: None,
        }
    }

    /// Resolve against the known variant table
    pub fn resolve<P: Platform + ?Sized>(platform: &P) -> Self {
        Self::resolve_from(platform, &VARIANTS)
    }

    /// Pick the first variant whose request symbol exists on a probe element,
    /// then null out every other symbol the platform does not have.
    pub fn resolve_from<P: Platform + ?Sized>(platform: &P, variants: &[VariantDescriptor]) -> Self {
        let Some(variant) = variants
            .iter()
            .find(|v| platform.has_symbol(ProbeTarget::Element, v.request))
        else {
            tracing::info!("no fullscreen request API; media fallback only");
            return Self::unsupported();
        };

        let verify = |symbol: &'static str| {
            let present = platform.has_symbol(ProbeTarget::Element, symbol)
                || platform.has_symbol(ProbeTarget::Document, symbol);
            if !present {
                tracing::debug!(variant = variant.name, symbol, "dropping missing fullscreen symbol");
            }
            present.then_some(symbol)
        };

        // Event names are kept even when `on<event>` is not visible; some
        // platforms report the handler property as undefined.
        let trust_event = |event: &'static str| {
            if !platform.has_symbol(ProbeTarget::Document, &format!("on{event}")) {
                tracing::debug!(variant = variant.name, event, "event handler property not visible");
            }
            Some(event)
        };

        let profile = Self {
            variant: Some(variant.name),
            request: Some(variant.request),
            exit: verify(variant.exit),
            enabled: variant
                .enabled
                .and_then(verify)
                .map_or(EnabledQuery::Unresolved, EnabledQuery::Symbol),
            element: verify(variant.element),
            change: trust_event(variant.change),
            error: trust_event(variant.error),
        };
        tracing::info!(variant = variant.name, "resolved fullscreen API");
        profile
    }

    /// Name of the matched variant
    pub fn variant(&self) -> Option<&'static str> {
        self.variant
    }

    pub fn request(&self) -> Option<&'static str> {
        self.request
    }

    pub fn exit(&self) -> Option<&'static str> {
        self.exit
    }

    pub fn enabled(&self) -> EnabledQuery {
        self.enabled
    }

    pub fn element(&self) -> Option<&'static str> {
        self.element
    }

    pub fn change_event(&self) -> Option<&'static str> {
        self.change
    }

    pub fn error_event(&self) -> Option<&'static str> {
        self.error
    }

    /// Safari 5.1: element fullscreen works outside frames without an enabled flag
    pub fn is_legacy_webkit(&self) -> bool {
        self.exit == Some(LEGACY_WEBKIT_EXIT)
    }

    /// Platforms that drop the exit signal when a frame leaves fullscreen
    pub fn misses_frame_exit(&self) -> bool {
        self.change == Some(WEBKIT_CHANGE_EVENT)
    }

    /// What the platform (or the probe) says about the enabled flag
    pub fn reports_enabled<P: Platform + ?Sized>(&self, platform: &P) -> Option<bool> {
        match self.enabled {
            EnabledQuery::Symbol(symbol) => platform.query_enabled(symbol),
            EnabledQuery::Inferred(value) => Some(value),
            EnabledQuery::Unresolved | EnabledQuery::Probing => None,
        }
    }

    pub(crate) fn begin_probe(&mut self) {
        if self.enabled == EnabledQuery::Unresolved {
            self.enabled = EnabledQuery::Probing;
        }
    }

    pub(crate) fn cache_enabled(&mut self, value: bool) {
        if matches!(self.enabled, EnabledQuery::Unresolved | EnabledQuery::Probing) {
            self.enabled = EnabledQuery::Inferred(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessPlatform, Surface};

    #[test]
    fn test_standard_wins_over_prefixed() {
        let mut surface = Surface::for_variant(&STANDARD);
        surface.merge(&Surface::for_variant(&WEBKIT));
        let platform = HeadlessPlatform::new(surface, Default::default());

        let profile = CapabilityProfile::resolve(&platform);
        assert_eq!(profile.variant(), Some("standard"));
        assert_eq!(profile.request(), Some("requestFullscreen"));
        assert_eq!(profile.enabled(), EnabledQuery::Symbol("fullscreenEnabled"));
    }

    #[test]
    fn test_each_variant_resolves() {
        for variant in VARIANTS {
            let platform = HeadlessPlatform::new(Surface::for_variant(&variant), Default::default());
            let profile = CapabilityProfile::resolve(&platform);
            assert_eq!(profile.variant(), Some(variant.name));
            assert_eq!(profile.exit(), Some(variant.exit));
            assert_eq!(profile.element(), Some(variant.element));
            assert_eq!(profile.change_event(), Some(variant.change));
        }
    }

    #[test]
    fn test_legacy_webkit_has_no_enabled_query() {
        let profile = CapabilityProfile::resolve(&HeadlessPlatform::legacy_webkit());
        assert_eq!(profile.enabled(), EnabledQuery::Unresolved);
        assert!(profile.is_legacy_webkit());
        assert!(profile.misses_frame_exit());
    }

    #[test]
    fn test_missing_symbols_are_dropped() {
        let mut surface = Surface::for_variant(&MOZ);
        surface.remove_document_symbol("mozFullScreenEnabled");
        surface.remove_document_symbol("mozCancelFullScreen");
        let profile = CapabilityProfile::resolve(&HeadlessPlatform::new(surface, Default::default()));

        assert_eq!(profile.request(), Some("mozRequestFullScreen"));
        assert_eq!(profile.exit(), None);
        assert_eq!(profile.enabled(), EnabledQuery::Unresolved);
    }

    #[test]
    fn test_events_trusted_without_handler_property() {
        let mut surface = Surface::for_variant(&STANDARD);
        surface.remove_document_symbol("onfullscreenerror");
        let profile = CapabilityProfile::resolve(&HeadlessPlatform::new(surface, Default::default()));
        assert_eq!(profile.error_event(), Some("fullscreenerror"));
    }

    #[test]
    fn test_nothing_matches() {
        let profile = CapabilityProfile::resolve(&HeadlessPlatform::unsupported());
        assert_eq!(profile, CapabilityProfile::unsupported());
    }

    #[test]
    fn test_probe_cache_fills_once() {
        let mut profile = CapabilityProfile::resolve(&HeadlessPlatform::legacy_webkit());
        profile.begin_probe();
        assert_eq!(profile.enabled(), EnabledQuery::Probing);
        profile.cache_enabled(false);
        profile.cache_enabled(true);
        assert_eq!(profile.enabled(), EnabledQuery::Inferred(false));
    }
}
