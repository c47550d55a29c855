//! fOS Fullscreen
//!
//! One request/exit fullscreen API over the platform's many fullscreen
//! flavours. Nested and concurrent requests are tracked on a stack so each
//! request's callbacks fire exactly once and in order, even when the
//! platform duplicates, drops or misreports its signals.
//!
//! Features:
//! - Standard, WebKit, legacy WebKit and Mozilla fullscreen APIs
//! - Media-level fullscreen fallback for `<video>`
//! - Exit detection for frames that never report the exit
//! - Headless platform for running without a window system

pub mod capability;
pub mod config;
pub mod handlers;
pub mod headless;
pub mod platform;
pub mod stack;
pub mod timers;

mod error;
mod manager;
mod media;
mod reconcile;
mod resize_hack;

pub use capability::{CapabilityProfile, EnabledQuery, VariantDescriptor};
pub use config::FullscreenConfig;
pub use error::FullscreenError;
pub use handlers::HandlerRegistry;
pub use headless::{HeadlessPlatform, Quirks, Surface};
pub use manager::FullscreenManager;
pub use media::{MediaFallbackState, VideoSupport};
pub use platform::{MediaEvent, Platform, PlatformError, ProbeTarget, RequestOptions, Signal, Target};
pub use resize_hack::ResizeExitHack;
pub use stack::{Callbacks, PendingRequest, RequestId, RequestStack};

pub use fos_dom::NodeId;
