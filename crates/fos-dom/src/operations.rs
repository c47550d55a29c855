//! DOM Node Operations
//!
//! Errors raised by tree mutation.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Inserting a node under itself or one of its descendants
    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Invalid node type")]
    InvalidNodeType,
}
