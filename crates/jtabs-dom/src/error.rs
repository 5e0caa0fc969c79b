//! Error types for the document model.

use crate::NodeId;

/// Error raised while mutating a [`Document`](crate::Document).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomError {
    /// A node that must be attached to a parent has none.
    #[error("node {0} has no parent")]
    Detached(NodeId),
}
