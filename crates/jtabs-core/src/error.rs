//! Error types for tab processing.

use jtabs_dom::{DomError, NodeId};

use crate::HeaderRef;

/// Error from tab setup or click handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TabsError {
    /// Structural document error.
    #[error("document error: {0}")]
    Dom(#[from] DomError),

    /// No header exists at the given reference.
    #[error("no tab header at group {}, position {}", .0.group, .0.position)]
    UnknownHeader(HeaderRef),

    /// Copy button markup has no element to inject.
    #[error("copy button markup contains no element: {0:?}")]
    InvalidButtonMarkup(String),

    /// The node is not a bound copy button.
    #[error("node {0} is not a copy button")]
    UnknownCopyButton(NodeId),
}
