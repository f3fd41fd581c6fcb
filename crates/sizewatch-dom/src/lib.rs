//! sizewatch DOM
//!
//! Arena-based DOM host used by the resize watcher: a document tree with
//! id lookup, event targets, embedded frame content windows, the native
//! `ResizeObserver` primitive and a `Window` that drives layout changes.

mod node;
mod tree;
mod document;
mod events;
mod observer;
mod window;

pub use node::{Node, NodeData, ElementData, Namespace, Size};
pub use tree::{DomTree, Children};
pub use document::Document;
pub use events::{Event, EventTarget, ListenerId};
pub use observer::{DOMRect, ResizeObserver, ResizeObserverEntry, ResizeObserverSize};
pub use window::{Window, WindowConfig};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for a missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID points at a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Node is not an element: {0:?}")]
    NotAnElement(NodeId),

    #[error("Hierarchy request error: cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Not supported: {0}")]
    NotSupported(&'static str),
}
