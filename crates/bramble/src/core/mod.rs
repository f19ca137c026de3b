//! Core types and traits for the bramble widget tree.

/// Rendering context boundary and backends.
pub mod backend;
/// Contexts handed to widget handlers.
pub mod context;
/// Core error types.
pub mod error;
/// Pointer input types.
pub mod event;
/// Focus path management.
pub mod focus;
/// Node ID types.
pub mod id;
/// Layout strategy contract.
pub mod layout;
/// Node data stored in the arena.
pub mod node;
/// Shared appearance data.
pub mod theme;
/// Arena tree and protocol entry points.
pub mod tree;
/// Window stacking and lifecycle.
pub mod windows;

pub use context::{Cx, ViewCx};
pub use id::NodeId;
pub use node::Node;
pub use tree::Tree;
