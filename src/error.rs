//! Error types.
//!
//! Reconciliation itself is total: malformed trees degrade rather than fail.
//! Errors only arise when a component or root is driven outside its lifecycle.

use thiserror::Error;

use crate::types::NodeId;

/// Errors reported by [`Root`](crate::Root) and [`Link`](crate::Link).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("component `{component}` is not mounted to a display node")]
    Unanchored { component: &'static str },

    #[error("display node {node} has no parent container")]
    Detached { node: NodeId },

    #[error("a reconciliation pass is already running on this root")]
    Reentrant,

    #[error("the root that mounted this component has been dropped")]
    RootDropped,

    #[error("the component instance has been released")]
    ComponentDropped,
}

pub type Result<T> = std::result::Result<T, Error>;
