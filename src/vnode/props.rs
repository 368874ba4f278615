//! Prop values and prop maps.
//!
//! Props are an insertion-ordered map from name to [`PropValue`]. The map is
//! `Rc`-backed: cloning a [`Props`] is cheap and preserves identity, which is
//! what the default `should_component_update` compares.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use super::VNode;
use crate::style::Style;
use crate::types::{Event, Handler, Key, RefCallback, RefTarget};

/// Names the Prop Patcher never writes to the display tree.
pub(crate) const CHILDREN: &str = "children";
pub(crate) const KEY: &str = "key";
pub(crate) const REF: &str = "ref";
pub(crate) const TEXT_CONTENT: &str = "textContent";

// =============================================================================
// Prop Value
// =============================================================================

/// A single prop value.
#[derive(Clone)]
pub enum PropValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Structured style; converted to CSS text when written.
    Style(Style),
    /// Event listener (for `on<Event>` props).
    Handler(Handler),
    /// Ref callback (for the `ref` prop).
    Ref(RefCallback),
    /// Child virtual nodes (the `children` prop).
    Children(Rc<[VNode]>),
    /// Arbitrary component data, compared by pointer identity.
    Any(Rc<dyn Any>),
}

impl PropValue {
    pub fn handler(f: impl Fn(&Event) + 'static) -> Self {
        PropValue::Handler(Rc::new(f))
    }

    pub fn reference(f: impl Fn(Option<RefTarget>) + 'static) -> Self {
        PropValue::Ref(Rc::new(f))
    }

    /// Wrap an owned value. Each call creates a new identity.
    pub fn any<T: 'static>(value: T) -> Self {
        PropValue::Any(Rc::new(value))
    }

    /// Share an existing `Rc`, keeping its identity across renders.
    pub fn shared<T: 'static>(value: Rc<T>) -> Self {
        PropValue::Any(value)
    }

    /// Change detection used by the Prop Patcher.
    ///
    /// Scalars and styles compare by value; callbacks, children and opaque
    /// data compare by pointer.
    pub fn same(&self, other: &PropValue) -> bool {
        match (self, other) {
            (PropValue::Text(a), PropValue::Text(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Style(a), PropValue::Style(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => Rc::ptr_eq(a, b),
            (PropValue::Ref(a), PropValue::Ref(b)) => Rc::ptr_eq(a, b),
            (PropValue::Children(a), PropValue::Children(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| VNode::ptr_eq(x, y))
            }
            (PropValue::Any(a), PropValue::Any(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `Bool(false)` is treated like an absent prop.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, PropValue::Bool(false))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            PropValue::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    pub fn as_ref_callback(&self) -> Option<&RefCallback> {
        match self {
            PropValue::Ref(callback) => Some(callback),
            _ => None,
        }
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            PropValue::Any(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Attribute text for this value, if it has one.
    ///
    /// Callbacks, children and opaque data have no attribute form.
    pub fn to_attribute(&self) -> Option<String> {
        match self {
            PropValue::Text(text) => Some(text.clone()),
            PropValue::Number(n) => Some(format_number(*n)),
            PropValue::Bool(b) => Some(b.to_string()),
            PropValue::Style(style) => Some(style.to_css()),
            _ => None,
        }
    }

    /// Key form of this value. Only strings and numbers can be keys.
    pub fn to_key(&self) -> Option<Key> {
        match self {
            PropValue::Text(text) => Some(Key::from(text.as_str())),
            PropValue::Number(n) => Some(Key::from(format_number(*n))),
            _ => None,
        }
    }
}

/// Integral numbers print without a fractional part (`3`, not `3.0`).
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Text(text) => write!(f, "{text:?}"),
            PropValue::Number(n) => write!(f, "{}", format_number(*n)),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Style(style) => write!(f, "Style({:?})", style.to_css()),
            PropValue::Handler(_) => f.write_str("<handler>"),
            PropValue::Ref(_) => f.write_str("<ref>"),
            PropValue::Children(children) => write!(f, "<{} children>", children.len()),
            PropValue::Any(_) => f.write_str("<any>"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<Style> for PropValue {
    fn from(value: Style) -> Self {
        PropValue::Style(value)
    }
}

impl From<Handler> for PropValue {
    fn from(value: Handler) -> Self {
        PropValue::Handler(value)
    }
}

macro_rules! prop_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropValue {
                fn from(value: $ty) -> Self {
                    PropValue::Number(value as f64)
                }
            }
        )*
    };
}

prop_from_number!(f64, f32, i32, i64, u32, u64, usize);

// =============================================================================
// Props
// =============================================================================

/// Insertion-ordered prop map.
#[derive(Clone, Default)]
pub struct Props {
    entries: Rc<Vec<(String, PropValue)>>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Props::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a prop. Replacing keeps the original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        let entries = Rc::make_mut(&mut self.entries);
        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(Rc::make_mut(&mut self.entries).remove(index).1)
    }

    /// Register `f` under `on<Event>`; `event` is the lower-case event name.
    pub fn on(self, event: &str, f: impl Fn(&Event) + 'static) -> Self {
        let mut chars = event.chars();
        let name = match chars.next() {
            Some(first) => format!("on{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => "on".to_string(),
        };
        self.with(name, PropValue::handler(f))
    }

    pub fn with_ref(self, f: impl Fn(Option<RefTarget>) + 'static) -> Self {
        self.with(REF, PropValue::reference(f))
    }

    pub fn with_key(self, key: impl Into<PropValue>) -> Self {
        self.with(KEY, key)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.with("className", class.into())
    }

    pub fn style(self, style: impl Into<PropValue>) -> Self {
        self.with("style", style)
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_text)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(PropValue::as_number)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropValue::as_bool)
    }

    pub fn handler(&self, name: &str) -> Option<&Handler> {
        self.get(name).and_then(PropValue::as_handler)
    }

    /// Borrow opaque data stored with [`PropValue::any`] or [`PropValue::shared`].
    pub fn get_any<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get(name).and_then(PropValue::downcast_ref::<T>)
    }

    /// Clone the `Rc` of opaque data, keeping its identity.
    pub fn get_shared<T: 'static>(&self, name: &str) -> Option<Rc<T>> {
        match self.get(name)? {
            PropValue::Any(value) => value.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<Key> {
        self.get(KEY).and_then(PropValue::to_key)
    }

    pub fn ref_callback(&self) -> Option<&RefCallback> {
        self.get(REF).and_then(PropValue::as_ref_callback)
    }

    pub fn children(&self) -> &[VNode] {
        match self.get(CHILDREN) {
            Some(PropValue::Children(children)) => children,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when both maps are the same allocation.
    pub fn ptr_eq(a: &Props, b: &Props) -> bool {
        Rc::ptr_eq(&a.entries, &b.entries)
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (name, value) in iter {
            props.set(name, value);
        }
        props
    }
}
