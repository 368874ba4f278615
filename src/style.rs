//! Inline style objects and their CSS text form.
//!
//! A `style` prop may be a literal string (passed through untouched) or a
//! [`Style`] map with camel-case keys:
//!
//! ```ignore
//! let style = Style::new()
//!     .with("borderBottom", "1px dashed gray")
//!     .with("color", "red");
//!
//! assert_eq!(style.to_css(), "border-bottom: 1px dashed gray; color: red;");
//! ```

use std::fmt::Display;

/// Ordered style declarations, keyed by camel-case property name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    entries: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a declaration. Replacing keeps the original position.
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// CSS text for the `style` attribute.
    pub fn to_css(&self) -> String {
        style_to_css(self)
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (name, value) in iter {
            style.set(name, value);
        }
        style
    }
}

/// Convert a style map to CSS text: one `key: value;` pair per entry.
pub fn style_to_css(style: &Style) -> String {
    style
        .iter()
        .map(|(name, value)| format!("{}: {};", camel_to_kebab(name), value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `borderTopLeftRadius` -> `border-top-left-radius`.
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
