//! fOS DOM - Document Object Model
//!
//! Arena-backed element tree used to identify fullscreen targets and to
//! locate the media element inside a requested subtree.

mod node;
mod tree;
mod document;
mod operations;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children, Descendants};
pub use document::Document;
pub use operations::{DomError, DomResult};

/// Node identifier (index into arena)
///
/// A `NodeId` never owns the node it names. Holders keep it as a plain
/// back-reference and must tolerate the node having been detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Build an id from a raw arena index.
    pub fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
