//! Virtual Node Builder.
//!
//! [`build`] is the single constructor every helper funnels into:
//!
//! 1. Child arguments are flattened into one ordered sequence
//! 2. Absent (`None`) and boolean children are dropped (conditional idioms)
//! 3. Strings and numbers become text nodes
//! 4. The sequence is stored on the node and merged into props as `children`
//!
//! ```ignore
//! let list = element(
//!     "ul",
//!     Props::new().class("todos"),
//!     children![
//!         tasks.iter().map(render_task).collect::<Vec<_>>(),
//!         show_footer.then(|| footer()),
//!         "done",
//!     ],
//! );
//! ```

use std::rc::Rc;

use super::props::{format_number, CHILDREN, TEXT_CONTENT};
use super::{FunctionComponent, Kind, PropValue, Props, VNode};
use crate::component::{Component, ComponentType};

// =============================================================================
// Child Arguments
// =============================================================================

/// One child argument before normalisation.
#[derive(Debug, Clone)]
pub enum Child {
    Node(VNode),
    Text(String),
    Number(f64),
    /// Dropped. Lets `cond && node` style expressions sit in a child list.
    Bool(bool),
    /// Dropped.
    Absent,
    /// Flattened into the surrounding list.
    List(Vec<Child>),
}

impl From<VNode> for Child {
    fn from(node: VNode) -> Self {
        Child::Node(node)
    }
}

impl From<&VNode> for Child {
    fn from(node: &VNode) -> Self {
        Child::Node(node.clone())
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<bool> for Child {
    fn from(value: bool) -> Self {
        Child::Bool(value)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Child::Absent, Into::into)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Child::List(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! child_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Child {
                fn from(value: $ty) -> Self {
                    Child::Number(value as f64)
                }
            }
        )*
    };
}

child_from_number!(f64, f32, i32, i64, u32, u64, usize);

/// Build a `Vec<Child>` from heterogeneous child expressions.
#[macro_export]
macro_rules! children {
    () => { ::std::vec::Vec::<$crate::Child>::new() };
    ($($child:expr),+ $(,)?) => {
        ::std::vec![$($crate::Child::from($child)),+]
    };
}

fn flatten(child: Child, out: &mut Vec<VNode>) {
    match child {
        Child::Node(node) => out.push(node),
        Child::Text(content) => out.push(text(content)),
        Child::Number(n) => out.push(text(format_number(n))),
        Child::Bool(_) | Child::Absent => {}
        Child::List(items) => {
            for item in items {
                flatten(item, out);
            }
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Build a virtual node from a kind, an attribute map and child arguments.
pub fn build(
    kind: impl Into<Kind>,
    attributes: Props,
    children: impl IntoIterator<Item = Child>,
) -> VNode {
    let mut flat = Vec::new();
    for child in children {
        flatten(child, &mut flat);
    }
    let children: Rc<[VNode]> = flat.into();
    let props = attributes.with(CHILDREN, PropValue::Children(children.clone()));
    VNode::from_parts(kind.into(), props, children)
}

/// Text node whose sole prop is the literal text.
pub fn text(content: impl Into<String>) -> VNode {
    let children: Rc<[VNode]> = Rc::from(Vec::new());
    let props = Props::new()
        .with(TEXT_CONTENT, content.into())
        .with(CHILDREN, PropValue::Children(children.clone()));
    VNode::from_parts(Kind::Text, props, children)
}

/// Host element node.
pub fn element(tag: &str, props: Props, children: impl IntoIterator<Item = Child>) -> VNode {
    build(Kind::element(tag), props, children)
}

/// Stateful component node for component type `C`.
pub fn component<C: Component>(props: Props, children: impl IntoIterator<Item = Child>) -> VNode {
    build(ComponentType::of::<C>(), props, children)
}

/// Function component node.
pub fn function(
    component: &FunctionComponent,
    props: Props,
    children: impl IntoIterator<Item = Child>,
) -> VNode {
    build(component.clone(), props, children)
}
