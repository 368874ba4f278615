//! Display Tree - The externally owned retained tree the engine mutates.
//!
//! The engine only talks to the tree through [`DisplayTree`]. Any retained
//! tree (a browser document, a native widget tree, a terminal scene) can be
//! driven by implementing it. [`Document`] is an in-memory implementation
//! that also records every mutation, which is what the tests observe.
//!
//! # Contract
//!
//! - `append_child` and `insert_before` move a node that is already attached
//! - `remove` detaches a node from its parent; the node itself stays valid
//! - Methods take `&self`; implementations use interior mutability and must
//!   not hold internal borrows while calling back into user code

mod document;
mod html;
mod mutation;

pub use document::Document;
pub use mutation::{Mutation, MutationKind};

use crate::types::{Handler, NodeId};
use crate::vnode::PropValue;

/// Operations the engine needs from a retained display tree.
pub trait DisplayTree {
    fn create_element(&self, tag: &str) -> NodeId;
    fn create_text(&self, text: &str) -> NodeId;

    fn append_child(&self, parent: NodeId, child: NodeId);
    /// Insert `child` before `reference`, or append when `reference` is `None`.
    fn insert_before(&self, parent: NodeId, child: NodeId, reference: Option<NodeId>);
    /// Detach `node` from its parent.
    fn remove(&self, node: NodeId);

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&self, node: NodeId, name: &str);
    /// Assign a live property (`value`, `checked`) rather than an attribute.
    fn set_property(&self, node: NodeId, name: &str, value: &PropValue);

    fn add_event_listener(&self, node: NodeId, event: &str, handler: &Handler);
    fn remove_event_listener(&self, node: NodeId, event: &str, handler: &Handler);

    fn set_text_content(&self, node: NodeId, text: &str);

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children(node).get(index).copied()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&sibling| sibling == node)?;
        siblings.get(index + 1).copied()
    }
}
