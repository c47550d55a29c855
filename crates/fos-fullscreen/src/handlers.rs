//! Global fullscreen handlers
//!
//! Process-wide slots that fire alongside the per-request callbacks.

use std::fmt;

use fos_dom::NodeId;

use crate::FullscreenError;

type ElementHandler = Box<dyn FnMut(Option<NodeId>)>;
type ExitHandler = Box<dyn FnMut()>;
type ErrorHandler = Box<dyn FnMut(NodeId, FullscreenError)>;

/// Global handler registry, injected into the manager.
///
/// Every slot defaults to a no-op and can be replaced at any time.
pub struct HandlerRegistry {
    on_enter: ElementHandler,
    on_exit: ExitHandler,
    on_change: ElementHandler,
    on_error: ErrorHandler,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            on_enter: Box::new(|_| {}),
            on_exit: Box::new(|| {}),
            on_change: Box::new(|_| {}),
            on_error: Box::new(|_, _| {}),
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry").finish_non_exhaustive()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// First scope entered fullscreen
    pub fn with_on_enter(mut self, f: impl FnMut(Option<NodeId>) + 'static) -> Self {
        self.set_on_enter(f);
        self
    }

    /// Last scope left fullscreen
    pub fn with_on_exit(mut self, f: impl FnMut() + 'static) -> Self {
        self.set_on_exit(f);
        self
    }

    /// Any platform change, with the element now fullscreen
    pub fn with_on_change(mut self, f: impl FnMut(Option<NodeId>) + 'static) -> Self {
        self.set_on_change(f);
        self
    }

    /// Any failed request, after the scope's own error callback
    pub fn with_on_error(mut self, f: impl FnMut(NodeId, FullscreenError) + 'static) -> Self {
        self.set_on_error(f);
        self
    }

    pub fn set_on_enter(&mut self, f: impl FnMut(Option<NodeId>) + 'static) {
        self.on_enter = Box::new(f);
    }

    pub fn set_on_exit(&mut self, f: impl FnMut() + 'static) {
        self.on_exit = Box::new(f);
    }

    pub fn set_on_change(&mut self, f: impl FnMut(Option<NodeId>) + 'static) {
        self.on_change = Box::new(f);
    }

    pub fn set_on_error(&mut self, f: impl FnMut(NodeId, FullscreenError) + 'static) {
        self.on_error = Box::new(f);
    }

    pub(crate) fn enter(&mut self, element: Option<NodeId>) {
        (self.on_enter)(element)
    }

    pub(crate) fn exit(&mut self) {
        (self.on_exit)()
    }

    pub(crate) fn change(&mut self, element: Option<NodeId>) {
        (self.on_change)(element)
    }

    pub(crate) fn error(&mut self, element: NodeId, reason: FullscreenError) {
        (self.on_error)(element, reason)
    }
}
