//! Engine configuration.
//!
//! A [`Config`] is fixed when a [`Root`](crate::Root) is created and applies
//! to every reconciliation pass on that root.
//!
//! ```ignore
//! let root = Root::with_config(
//!     document,
//!     Config::default()
//!         .with_live_property("selected")
//!         .with_isolate_ref_panics(false),
//! );
//! ```

use std::borrow::Cow;

/// Naming conventions and failure policy used by the Prop Patcher and Mounter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix marking a prop as an event listener (`onClick` -> `click`).
    pub event_prefix: Cow<'static, str>,
    /// Prop name written as the `class` attribute.
    pub class_alias: Cow<'static, str>,
    /// Props assigned as live properties rather than attributes.
    pub live_properties: Vec<Cow<'static, str>>,
    /// Catch panics raised by ref callbacks so sibling nodes still mount/unmount.
    pub isolate_ref_panics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_prefix: Cow::Borrowed("on"),
            class_alias: Cow::Borrowed("className"),
            live_properties: vec![Cow::Borrowed("value"), Cow::Borrowed("checked")],
            isolate_ref_panics: true,
        }
    }
}

impl Config {
    pub fn with_event_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.event_prefix = prefix.into();
        self
    }

    pub fn with_class_alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.class_alias = alias.into();
        self
    }

    pub fn with_live_property(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        if !self.live_properties.contains(&name) {
            self.live_properties.push(name);
        }
        self
    }

    pub fn with_isolate_ref_panics(mut self, isolate: bool) -> Self {
        self.isolate_ref_panics = isolate;
        self
    }

    /// Event name for an event-prefixed prop, lower-cased. `None` for other props.
    pub fn event_name(&self, prop: &str) -> Option<String> {
        let suffix = prop.strip_prefix(self.event_prefix.as_ref())?;
        if suffix.is_empty() {
            return None;
        }
        Some(suffix.to_lowercase())
    }

    pub fn is_live_property(&self, prop: &str) -> bool {
        self.live_properties.iter().any(|name| name == prop)
    }

    /// Attribute name a prop is written under.
    pub fn attribute_name<'a>(&self, prop: &'a str) -> &'a str {
        if prop == self.class_alias {
            "class"
        } else {
            prop
        }
    }
}
