//! Request stack
//!
//! One entry ("scope") per outstanding `request()` call. Index 0 is the
//! outermost scope; entries are pushed and popped at the tail.

use std::fmt;

use fos_dom::NodeId;

use crate::FullscreenError;

pub type EnterCallback = Box<dyn FnMut(NodeId)>;
pub type ExitCallback = Box<dyn FnMut()>;
pub type ErrorCallback = Box<dyn FnMut(FullscreenError)>;

/// Per-request callbacks. Unset callbacks are no-ops.
#[derive(Default)]
pub struct Callbacks {
    on_enter: Option<EnterCallback>,
    on_exit: Option<ExitCallback>,
    on_error: Option<ErrorCallback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the element that actually entered fullscreen, which may be
    /// a descendant video rather than the requested element.
    pub fn on_enter(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_exit(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_exit = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(FullscreenError) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Identity of one scope, stable for its whole life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// One outstanding fullscreen request
#[derive(Debug)]
pub struct PendingRequest {
    pub id: RequestId,
    /// Requested element. Not owned.
    pub element: NodeId,
    pub has_entered: bool,
    callbacks: Callbacks,
}

impl PendingRequest {
    pub(crate) fn enter(&mut self, actual: NodeId) {
        if let Some(f) = self.callbacks.on_enter.as_mut() {
            f(actual);
        }
        self.has_entered = true;
    }

    pub(crate) fn exit(&mut self) {
        if let Some(f) = self.callbacks.on_exit.as_mut() {
            f();
        }
    }

    pub(crate) fn error(&mut self, reason: FullscreenError) {
        if let Some(f) = self.callbacks.on_error.as_mut() {
            f(reason);
        }
    }
}

/// Ordered scopes, innermost last
#[derive(Debug, Default)]
pub struct RequestStack {
    entries: Vec<PendingRequest>,
    next_id: u64,
}

impl RequestStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope at the tail
    pub fn push(&mut self, element: NodeId, callbacks: Callbacks) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.entries.push(PendingRequest {
            id,
            element,
            has_entered: false,
            callbacks,
        });
        id
    }

    pub fn pop(&mut self) -> Option<PendingRequest> {
        self.entries.pop()
    }

    /// Take a specific scope out, wherever it sits
    pub fn remove(&mut self, id: RequestId) -> Option<PendingRequest> {
        let index = self.entries.iter().rposition(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: RequestId) -> Option<&PendingRequest> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: RequestId) -> Option<&mut PendingRequest> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Some scope has already seen fullscreen
    pub fn any_entered(&self) -> bool {
        self.entries.iter().any(|e| e.has_entered)
    }

    /// Innermost scope
    pub fn last(&self) -> Option<&PendingRequest> {
        self.entries.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut PendingRequest> {
        self.entries.last_mut()
    }

    /// The scope directly beneath the innermost one
    pub fn beneath_top(&self) -> Option<&PendingRequest> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        self.entries.get(len - 2)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Requested elements, outermost first
    pub fn elements(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.element).collect()
    }
}
