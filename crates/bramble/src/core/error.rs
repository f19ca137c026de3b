use std::result::Result as StdResult;

use thiserror::Error;

use crate::core::id::NodeId;

/// Result type for bramble operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Every variant signals a broken structural invariant or a misuse of the
/// tree API. Input that nobody handles and hit-tests that miss are ordinary
/// values (`Ok(false)`, `None`), never errors.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The node id does not refer to a live node.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The node is not a child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Parent that was searched.
        parent: NodeId,
        /// Node that was not found among the children.
        child: NodeId,
    },

    /// A child index was outside the parent's children.
    #[error("child index {index} out of range (len {len})")]
    ChildIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of children.
        len: usize,
    },

    /// The node already has a parent.
    #[error("node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// Attaching the node would create a cycle.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Intended parent.
        parent: NodeId,
        /// Intended child.
        child: NodeId,
    },

    /// No window was found between the node and the top of its tree.
    #[error("widget {0:?} is not attached under any window")]
    NoWindow(NodeId),

    /// The node's outermost ancestor is not the screen root.
    #[error("widget {0:?} is not rooted in a screen")]
    Detached(NodeId),

    /// The node was expected to be a window.
    #[error("node {0:?} is not a window")]
    NotAWindow(NodeId),

    /// The node's widget is already checked out by a running handler.
    #[error("widget {0:?} re-entered while its handler is running")]
    ReentrantWidget(NodeId),

    /// Theme configuration could not be loaded.
    #[error("theme: {0}")]
    Theme(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Theme(e.to_string())
    }
}
