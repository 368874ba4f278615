//! Virtual Nodes - Immutable descriptions of UI.
//!
//! A [`VNode`] is produced fresh on every render pass and never mutated
//! afterwards. It names what to show ([`Kind`]), how to configure it
//! ([`Props`]) and what goes inside it (children).
//!
//! # Kinds
//!
//! ```text
//! Element("li")        host element, patched in place when the tag matches
//! Text                 text node, props = { textContent, children: [] }
//! Function(Header)     stateless: props -> VNode, invoked on every pass
//! Stateful(TodoItem)   Component instance with lifecycle, matched by type
//! ```
//!
//! Stateful component types are compared by their Rust `TypeId`, so two
//! distinct component types can never be mistaken for each other.

mod builder;
mod props;

pub use builder::{build, component, element, function, text, Child};
pub use props::{PropValue, Props};

pub(crate) use props::{CHILDREN, KEY, REF, TEXT_CONTENT};

use std::fmt;
use std::rc::Rc;

use crate::component::ComponentType;
use crate::types::Key;

// =============================================================================
// Kind
// =============================================================================

/// What a virtual node describes.
#[derive(Clone)]
pub enum Kind {
    /// Host element with a tag name.
    Element(Rc<str>),
    /// Text node.
    Text,
    /// Stateless function component.
    Function(FunctionComponent),
    /// Stateful component with a lifecycle.
    Stateful(ComponentType),
}

impl Kind {
    pub fn element(tag: &str) -> Self {
        Kind::Element(Rc::from(tag))
    }

    pub fn is_component(&self) -> bool {
        matches!(self, Kind::Function(_) | Kind::Stateful(_))
    }

    /// Tag name, `"text"`, or the component's name.
    pub fn name(&self) -> &str {
        match self {
            Kind::Element(tag) => &**tag,
            Kind::Text => "text",
            Kind::Function(function) => function.name(),
            Kind::Stateful(component) => component.name(),
        }
    }

    /// Type identity: same tag, both text, same component type, or the
    /// same function component allocation.
    pub fn same(&self, other: &Kind) -> bool {
        match (self, other) {
            (Kind::Element(a), Kind::Element(b)) => a == b,
            (Kind::Text, Kind::Text) => true,
            (Kind::Function(a), Kind::Function(b)) => Rc::ptr_eq(&a.render, &b.render),
            (Kind::Stateful(a), Kind::Stateful(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Element(tag) => write!(f, "Element({tag})"),
            Kind::Text => f.write_str("Text"),
            Kind::Function(function) => write!(f, "Function({})", function.name()),
            Kind::Stateful(component) => write!(f, "Stateful({})", component.name()),
        }
    }
}

impl From<&str> for Kind {
    fn from(tag: &str) -> Self {
        if tag == "text" {
            Kind::Text
        } else {
            Kind::element(tag)
        }
    }
}

impl From<FunctionComponent> for Kind {
    fn from(function: FunctionComponent) -> Self {
        Kind::Function(function)
    }
}

impl From<ComponentType> for Kind {
    fn from(component: ComponentType) -> Self {
        Kind::Stateful(component)
    }
}

// =============================================================================
// Function Components
// =============================================================================

/// A stateless component: a plain mapping from props to a virtual node.
///
/// Create it once and reuse the value; clones share the same render function.
#[derive(Clone)]
pub struct FunctionComponent {
    name: &'static str,
    render: Rc<dyn Fn(&Props) -> VNode>,
}

impl FunctionComponent {
    pub fn new(name: &'static str, render: impl Fn(&Props) -> VNode + 'static) -> Self {
        Self {
            name,
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, props: &Props) -> VNode {
        (self.render)(props)
    }
}

// =============================================================================
// VNode
// =============================================================================

struct VNodeData {
    kind: Kind,
    props: Props,
    children: Rc<[VNode]>,
}

/// Immutable virtual node. Clones share the same node.
#[derive(Clone)]
pub struct VNode(Rc<VNodeData>);

impl VNode {
    pub(crate) fn from_parts(kind: Kind, props: Props, children: Rc<[VNode]>) -> Self {
        Self(Rc::new(VNodeData {
            kind,
            props,
            children,
        }))
    }

    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    pub fn props(&self) -> &Props {
        &self.0.props
    }

    pub fn children(&self) -> &[VNode] {
        &self.0.children
    }

    pub fn key(&self) -> Option<Key> {
        self.0.props.key()
    }

    /// Tag name for element nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.0.kind {
            Kind::Element(tag) => Some(&**tag),
            _ => None,
        }
    }

    /// Literal text for text nodes.
    pub fn text(&self) -> Option<&str> {
        match &self.0.kind {
            Kind::Text => self.0.props.text(TEXT_CONTENT),
            _ => None,
        }
    }

    pub fn is_component(&self) -> bool {
        self.0.kind.is_component()
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(a: &VNode, b: &VNode) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.text() {
            return write!(f, "Text({text:?})");
        }
        let props: Vec<(&str, &PropValue)> = self
            .props()
            .iter()
            .filter(|(name, _)| *name != CHILDREN)
            .collect();
        f.debug_struct("VNode")
            .field("kind", self.kind())
            .field("props", &props)
            .field("children", &self.children())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(Kind::from("div"), Kind::element("div"));
        assert_eq!(Kind::from("text"), Kind::Text);
        assert_ne!(Kind::from("div"), Kind::from("span"));
    }

    #[test]
    fn test_function_kind_identity() {
        let header = FunctionComponent::new("Header", |_| text("hi"));
        let same = header.clone();
        let other = FunctionComponent::new("Header", |_| text("hi"));

        assert!(Kind::from(header.clone()).same(&Kind::from(same)));
        assert!(!Kind::from(header).same(&Kind::from(other)));
    }

    #[test]
    fn test_text_accessors() {
        let node = text("hello");
        assert_eq!(node.text(), Some("hello"));
        assert_eq!(node.tag(), None);
        assert!(node.children().is_empty());
        assert!(!node.is_component());
    }
}
