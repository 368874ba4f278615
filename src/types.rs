//! Core types for spark-vdom.
//!
//! These types are shared by every layer: the display tree hands out
//! [`NodeId`]s, virtual nodes carry [`Key`]s, and callbacks receive
//! [`Event`]s or [`RefTarget`]s.

use std::fmt;
use std::rc::Rc;

use crate::component::ComponentRef;

// =============================================================================
// Node Handles
// =============================================================================

/// Opaque handle to a node owned by a display tree.
///
/// The engine never dereferences a `NodeId` itself; it only passes handles
/// back to the [`DisplayTree`](crate::dom::DisplayTree) that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw index issued by a display tree implementation.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Keys
// =============================================================================

/// Sibling identity used by keyed reconciliation.
///
/// Numbers and strings both become keys; `Key::from(1)` and `Key::from("1")`
/// are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(Rc<str>);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(Rc::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

macro_rules! key_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Self(Rc::from(value.to_string()))
                }
            }
        )*
    };
}

key_from_int!(i32, i64, u32, u64, usize);

// =============================================================================
// Events
// =============================================================================

/// An event delivered to a listener registered through an `on<Event>` prop.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Lower-case event name ("click", "dblclick", "keydown", ...).
    pub name: String,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Key name for keyboard events (e.g. "Enter").
    pub key: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            target,
            key: None,
        }
    }

    /// Create a keyboard event carrying `key`.
    pub fn key(name: impl Into<String>, target: NodeId, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target,
            key: Some(key.into()),
        }
    }
}

// =============================================================================
// Callback Types
// =============================================================================

/// Event listener. Listener identity is the `Rc` pointer, so passing the same
/// handler on every render keeps the registered listener untouched.
pub type Handler = Rc<dyn Fn(&Event)>;

/// Ref callback: receives the mounted node or component, then `None` on unmount.
pub type RefCallback = Rc<dyn Fn(Option<RefTarget>)>;

/// Typed callback passed between components as a prop.
pub type Callback<A> = Rc<dyn Fn(A)>;

/// What a ref callback is attached to.
#[derive(Clone)]
pub enum RefTarget {
    /// A host element or text node.
    Node(NodeId),
    /// A stateful component instance.
    Component(ComponentRef),
}

impl RefTarget {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            RefTarget::Node(node) => Some(*node),
            RefTarget::Component(_) => None,
        }
    }

    pub fn component(&self) -> Option<&ComponentRef> {
        match self {
            RefTarget::Node(_) => None,
            RefTarget::Component(component) => Some(component),
        }
    }
}

impl fmt::Debug for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefTarget::Node(node) => f.debug_tuple("Node").field(node).finish(),
            RefTarget::Component(component) => {
                f.debug_tuple("Component").field(&component.name()).finish()
            }
        }
    }
}
