//! In-memory display tree.
//!
//! [`Document`] is an arena of nodes addressed by [`NodeId`]. It behaves like
//! a browser document for the operations the engine uses (moving an attached
//! node detaches it first, listeners are keyed by event name and handler
//! identity) and logs every change as a [`Mutation`].
//!
//! It is a headless target for tests and snapshots, not a long-lived host
//! tree. Slots are never freed: a removed node stays addressable so the log
//! and late lookups through stale ids keep working, and [`Document::node_count`]
//! only grows. [`Document::attached_count`] reports what is still in the tree.
//!
//! ```ignore
//! let document = Rc::new(Document::new());
//! let root = Root::new(document.clone());
//! root.render(&app, document.root())?;
//!
//! document.clear_mutations();
//! document.click(button);
//! assert_eq!(document.count(MutationKind::STRUCTURE), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::mutation::{Mutation, MutationKind};
use super::DisplayTree;
use crate::types::{Event, Handler, NodeId};
use crate::vnode::PropValue;

// =============================================================================
// Node Storage
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element(String),
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: Vec<(String, String)>,
    properties: HashMap<String, PropValue>,
    listeners: Vec<(String, Handler)>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
            properties: HashMap::new(),
            listeners: Vec::new(),
        }
    }
}

#[derive(Default)]
struct Arena {
    nodes: Vec<NodeData>,
}

impl Arena {
    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        id
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.index())
    }

    /// Unlink `node` from its parent. Returns the former parent.
    fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.get_mut(node)?.parent.take()?;
        if let Some(data) = self.get_mut(parent) {
            data.children.retain(|&child| child != node);
        }
        Some(parent)
    }

    fn text_content(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.get(node) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for &child in &data.children {
                    self.text_content(child, out);
                }
            }
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// In-memory retained tree with a mutation log.
pub struct Document {
    arena: RefCell<Arena>,
    log: RefCell<Vec<Mutation>>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with an empty `root` container element.
    pub fn new() -> Self {
        let mut arena = Arena::default();
        let root = arena.push(NodeKind::Element("root".to_string()));
        Self {
            arena: RefCell::new(arena),
            log: RefCell::new(Vec::new()),
            root,
        }
    }

    /// The container element created with the document.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn record(&self, mutation: Mutation) {
        trace!(?mutation, "document mutation");
        self.log.borrow_mut().push(mutation);
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Number of nodes ever created, including the root.
    pub fn node_count(&self) -> usize {
        self.arena.borrow().nodes.len()
    }

    /// Number of nodes reachable from the root, including the root.
    pub fn attached_count(&self) -> usize {
        let arena = self.arena.borrow();
        let mut stack = vec![self.root];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            if let Some(data) = arena.get(node) {
                stack.extend(data.children.iter().copied());
            }
        }
        count
    }

    /// Tag name of an element node.
    pub fn tag(&self, node: NodeId) -> Option<String> {
        match &self.arena.borrow().get(node)?.kind {
            NodeKind::Element(tag) => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(
            self.arena.borrow().get(node).map(|data| &data.kind),
            Some(NodeKind::Text(_))
        )
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.arena.borrow().text_content(node, &mut out);
        out
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.arena
            .borrow()
            .get(node)?
            .attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.clone())
    }

    /// All attributes in the order they were first set.
    pub fn attributes(&self, node: NodeId) -> Vec<(String, String)> {
        self.arena
            .borrow()
            .get(node)
            .map(|data| data.attributes.clone())
            .unwrap_or_default()
    }

    pub fn property(&self, node: NodeId, name: &str) -> Option<PropValue> {
        self.arena.borrow().get(node)?.properties.get(name).cloned()
    }

    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        self.arena
            .borrow()
            .get(node)
            .map(|data| data.listeners.iter().filter(|(name, _)| name == event).count())
            .unwrap_or(0)
    }

    /// Total listeners registered on `node` for any event.
    pub fn listeners(&self, node: NodeId) -> usize {
        self.arena
            .borrow()
            .get(node)
            .map(|data| data.listeners.len())
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Deliver `event` to the listeners on its target. Returns how many ran.
    ///
    /// Handlers are cloned out before running so they may mutate the document.
    /// Events do not bubble.
    pub fn dispatch(&self, event: &Event) -> usize {
        let handlers: Vec<Handler> = match self.arena.borrow().get(event.target) {
            Some(data) => data
                .listeners
                .iter()
                .filter(|(name, _)| *name == event.name)
                .map(|(_, handler)| handler.clone())
                .collect(),
            None => return 0,
        };
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn click(&self, node: NodeId) -> usize {
        self.dispatch(&Event::new("click", node))
    }

    /// Dispatch a `keydown` event carrying `key`.
    pub fn key_down(&self, node: NodeId, key: &str) -> usize {
        self.dispatch(&Event::key("keydown", node, key))
    }

    // -------------------------------------------------------------------------
    // Mutation Log
    // -------------------------------------------------------------------------

    pub fn mutations(&self) -> Vec<Mutation> {
        self.log.borrow().clone()
    }

    /// Drain the log.
    pub fn take_mutations(&self) -> Vec<Mutation> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Number of logged mutations whose kind intersects `mask`.
    pub fn count(&self, mask: MutationKind) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|mutation| mask.intersects(mutation.kind()))
            .count()
    }

    pub fn clear_mutations(&self) {
        self.log.borrow_mut().clear();
    }
}

// =============================================================================
// DisplayTree
// =============================================================================

impl DisplayTree for Document {
    fn create_element(&self, tag: &str) -> NodeId {
        let node = self.arena.borrow_mut().push(NodeKind::Element(tag.to_string()));
        self.record(Mutation::CreateElement {
            node,
            tag: tag.to_string(),
        });
        node
    }

    fn create_text(&self, text: &str) -> NodeId {
        let node = self.arena.borrow_mut().push(NodeKind::Text(text.to_string()));
        self.record(Mutation::CreateText {
            node,
            text: text.to_string(),
        });
        node
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    fn insert_before(&self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if reference == Some(child) || parent == child {
            return;
        }
        {
            let mut arena = self.arena.borrow_mut();
            if arena.get(parent).is_none() || arena.get(child).is_none() {
                return;
            }
            arena.detach(child);
            if let Some(data) = arena.get_mut(child) {
                data.parent = Some(parent);
            }
            if let Some(data) = arena.get_mut(parent) {
                let index = reference
                    .and_then(|r| data.children.iter().position(|&sibling| sibling == r))
                    .unwrap_or(data.children.len());
                data.children.insert(index, child);
            }
        }
        self.record(Mutation::Insert {
            parent,
            node: child,
            before: reference,
        });
    }

    fn remove(&self, node: NodeId) {
        let parent = self.arena.borrow_mut().detach(node);
        if let Some(parent) = parent {
            self.record(Mutation::Remove { parent, node });
        }
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        {
            let mut arena = self.arena.borrow_mut();
            let Some(data) = arena.get_mut(node) else {
                return;
            };
            match data.attributes.iter_mut().find(|(existing, _)| existing == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => data.attributes.push((name.to_string(), value.to_string())),
            }
        }
        self.record(Mutation::SetAttribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(data) = self.arena.borrow_mut().get_mut(node) {
            data.attributes.retain(|(existing, _)| existing != name);
        }
        self.record(Mutation::RemoveAttribute {
            node,
            name: name.to_string(),
        });
    }

    fn set_property(&self, node: NodeId, name: &str, value: &PropValue) {
        if let Some(data) = self.arena.borrow_mut().get_mut(node) {
            data.properties.insert(name.to_string(), value.clone());
        }
        self.record(Mutation::SetProperty {
            node,
            name: name.to_string(),
        });
    }

    fn add_event_listener(&self, node: NodeId, event: &str, handler: &Handler) {
        {
            let mut arena = self.arena.borrow_mut();
            let Some(data) = arena.get_mut(node) else {
                return;
            };
            let registered = data
                .listeners
                .iter()
                .any(|(name, existing)| name == event && Rc::ptr_eq(existing, handler));
            if registered {
                return;
            }
            data.listeners.push((event.to_string(), handler.clone()));
        }
        self.record(Mutation::AddListener {
            node,
            event: event.to_string(),
        });
    }

    fn remove_event_listener(&self, node: NodeId, event: &str, handler: &Handler) {
        let removed = {
            let mut arena = self.arena.borrow_mut();
            let Some(data) = arena.get_mut(node) else {
                return;
            };
            let before = data.listeners.len();
            data.listeners
                .retain(|(name, existing)| !(name == event && Rc::ptr_eq(existing, handler)));
            before != data.listeners.len()
        };
        if removed {
            self.record(Mutation::RemoveListener {
                node,
                event: event.to_string(),
            });
        }
    }

    fn set_text_content(&self, node: NodeId, text: &str) {
        let is_text = {
            let mut arena = self.arena.borrow_mut();
            let Some(data) = arena.get_mut(node) else {
                return;
            };
            match &mut data.kind {
                NodeKind::Text(content) => {
                    *content = text.to_string();
                    true
                }
                NodeKind::Element(_) => false,
            }
        };
        if is_text {
            self.record(Mutation::SetText {
                node,
                text: text.to_string(),
            });
            return;
        }
        for child in self.children(node) {
            self.remove(child);
        }
        if !text.is_empty() {
            let child = self.create_text(text);
            self.append_child(node, child);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.borrow().get(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.arena
            .borrow()
            .get(node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_insert_moves_attached_node() {
        let doc = Document::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        doc.append_child(doc.root(), a);
        doc.append_child(doc.root(), b);
        assert_eq!(doc.children(doc.root()), vec![a, b]);

        doc.insert_before(doc.root(), b, Some(a));
        assert_eq!(doc.children(doc.root()), vec![b, a]);
        assert_eq!(doc.parent(b), Some(doc.root()));
    }

    #[test]
    fn test_remove_detaches() {
        let doc = Document::new();
        let a = doc.create_element("a");
        doc.append_child(doc.root(), a);
        doc.clear_mutations();

        doc.remove(a);
        doc.remove(a);
        assert!(doc.children(doc.root()).is_empty());
        assert_eq!(doc.parent(a), None);
        assert_eq!(doc.count(MutationKind::STRUCTURE), 1);
    }

    #[test]
    fn test_removed_nodes_keep_their_slot() {
        let doc = Document::new();
        let list = doc.create_element("ul");
        let item = doc.create_element("li");
        doc.append_child(doc.root(), list);
        doc.append_child(list, item);
        assert_eq!(doc.node_count(), 3);
        assert_eq!(doc.attached_count(), 3);

        doc.remove(list);
        assert_eq!(doc.node_count(), 3);
        assert_eq!(doc.attached_count(), 1);
        assert_eq!(doc.tag(item).as_deref(), Some("li"));
        assert_eq!(doc.parent(item), Some(list));

        let fresh = doc.create_element("p");
        assert_ne!(fresh, list);
        assert_ne!(fresh, item);
    }

    #[test]
    fn test_siblings() {
        let doc = Document::new();
        let a = doc.create_text("a");
        let b = doc.create_text("b");
        doc.append_child(doc.root(), a);
        doc.append_child(doc.root(), b);

        assert_eq!(doc.first_child(doc.root()), Some(a));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.next_sibling(b), None);
        assert_eq!(doc.child_at(doc.root(), 1), Some(b));
        assert_eq!(doc.text(doc.root()), "ab");
    }

    #[test]
    fn test_attributes_replace_in_place() {
        let doc = Document::new();
        let node = doc.create_element("div");
        doc.set_attribute(node, "id", "x");
        doc.set_attribute(node, "class", "c");
        doc.set_attribute(node, "id", "y");
        assert_eq!(
            doc.attributes(node),
            vec![("id".to_string(), "y".to_string()), ("class".to_string(), "c".to_string())]
        );
        doc.remove_attribute(node, "id");
        assert_eq!(doc.attribute(node, "id"), None);
    }

    #[test]
    fn test_dispatch_runs_matching_listeners() {
        let doc = Document::new();
        let node = doc.create_element("button");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let handler: Handler = Rc::new(move |_: &Event| counter.set(counter.get() + 1));

        doc.add_event_listener(node, "click", &handler);
        doc.add_event_listener(node, "click", &handler);
        assert_eq!(doc.listener_count(node, "click"), 1);

        assert_eq!(doc.click(node), 1);
        assert_eq!(doc.key_down(node, "Enter"), 0);
        assert_eq!(hits.get(), 1);

        doc.remove_event_listener(node, "click", &handler);
        assert_eq!(doc.click(node), 0);
    }

    #[test]
    fn test_handler_may_mutate_document() {
        let doc = Rc::new(Document::new());
        let node = doc.create_element("button");
        let weak = Rc::downgrade(&doc);
        let handler: Handler = Rc::new(move |event: &Event| {
            if let Some(doc) = weak.upgrade() {
                doc.set_attribute(event.target, "data-hit", "1");
            }
        });
        doc.add_event_listener(node, "click", &handler);
        doc.click(node);
        assert_eq!(doc.attribute(node, "data-hit").as_deref(), Some("1"));
    }

    #[test]
    fn test_set_text_content() {
        let doc = Document::new();
        let text = doc.create_text("a");
        doc.set_text_content(text, "b");
        assert_eq!(doc.text(text), "b");

        let el = doc.create_element("p");
        doc.append_child(el, text);
        doc.set_text_content(el, "c");
        assert_eq!(doc.text(el), "c");
        assert_eq!(doc.parent(text), None);
    }
}
