//! Exit detection for frames on WebKit
//!
//! Older WebKit does not fire a change event when an embedded frame leaves
//! fullscreen. Leaving fullscreen always resizes the window, so a resize
//! with no fullscreen element left is treated as the exit.

use crate::capability::CapabilityProfile;
use crate::platform::Platform;

#[derive(Debug, Default)]
pub struct ResizeExitHack {
    armed: bool,
}

impl ResizeExitHack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the WebKit change-event variants inside a frame need the watcher
    pub fn applies(profile: &CapabilityProfile, embedded: bool) -> bool {
        embedded && profile.misses_frame_exit()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        if !self.armed {
            self.armed = true;
            platform.watch_window_resize(true);
            tracing::debug!("resize exit watcher installed");
        }
    }

    pub fn disarm<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        if self.armed {
            self.armed = false;
            platform.watch_window_resize(false);
            tracing::debug!("resize exit watcher removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessPlatform, Quirks};

    #[test]
    fn test_applies_only_to_webkit_frames() {
        let webkit = CapabilityProfile::resolve(&HeadlessPlatform::webkit());
        let standard = CapabilityProfile::resolve(&HeadlessPlatform::standard());

        assert!(ResizeExitHack::applies(&webkit, true));
        assert!(!ResizeExitHack::applies(&webkit, false));
        assert!(!ResizeExitHack::applies(&standard, true));
    }

    #[test]
    fn test_arm_disarm_toggles_platform_watch() {
        let mut platform = HeadlessPlatform::webkit().with_quirks(Quirks {
            embedded: true,
            ..Default::default()
        });
        let mut hack = ResizeExitHack::new();

        hack.arm(&mut platform);
        hack.arm(&mut platform);
        assert!(hack.is_armed());
        assert!(platform.is_watching_resize());

        hack.disarm(&mut platform);
        assert!(!hack.is_armed());
        assert!(!platform.is_watching_resize());
    }
}
