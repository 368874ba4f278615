//! # spark-vdom
//!
//! Retained-tree UI reconciler for Rust.
//!
//! Describe the UI as an immutable tree of virtual nodes, hand it to a
//! [`Root`], and the engine applies the smallest set of mutations that makes
//! an externally owned display tree match it. Stateful [`Component`]s call
//! [`Link::set_state`] to re-render, and the engine reconciles again at
//! their anchor, synchronously.
//!
//! ## Architecture
//!
//! ```text
//! build / element / component  ->  VNode tree
//!                                     |
//! Root::render / Link::set_state  ->  diff  ->  DisplayTree mutations
//!                                     |
//!                   snapshot side table (NodeId -> producing VNode)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_vdom::{children, element, Document, Props, Root};
//!
//! let document = Rc::new(Document::new());
//! let root = Root::new(document.clone());
//!
//! let list = element("ul", Props::new().class("todos"), children![
//!     element("li", Props::new().with_key(1), children!["Task 1"]),
//! ]);
//! root.render(&list, document.root())?;
//! assert_eq!(document.inner_html(document.root()), "<ul class=\"todos\"><li>Task 1</li></ul>");
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Node handles, keys, events, callback aliases
//! - [`vnode`] - Virtual nodes, props and the builder
//! - [`style`] - Style objects and CSS text
//! - [`dom`] - The display tree trait and the in-memory [`Document`]
//! - [`engine`] - [`Root`] and the reconciliation passes
//! - [`component`] - The [`Component`] trait, [`Context`] and [`Link`]
//! - [`config`] - Engine [`Config`]
//! - [`error`] - [`Error`] and [`Result`]

pub mod component;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod style;
pub mod types;
pub mod vnode;

pub use types::*;

pub use component::{Component, ComponentRef, ComponentType, Context, Link};
pub use config::Config;
pub use dom::{DisplayTree, Document, Mutation, MutationKind};
pub use engine::Root;
pub use error::{Error, Result};
pub use style::{camel_to_kebab, style_to_css, Style};
pub use vnode::{
    build, component, element, function, text, Child, FunctionComponent, Kind, PropValue, Props,
    VNode,
};
