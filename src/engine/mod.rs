//! Reconciliation Engine - Turns VNode trees into display tree mutations.
//!
//! One [`Root`] drives one display tree. It owns the producing-snapshot side
//! table and runs every reconciliation pass to completion before returning.
//!
//! # Architecture
//!
//! ```text
//! Root::render / Link::set_state
//!         |
//!         v
//!      diff ----------------------+
//!       |  \                      |
//!       |   diff_component        |  (same type: lifecycle, else replace)
//!       v                         v
//!   patch_host              mount / unmount
//!       |                         |
//!   patch_props        reconcile_children (positional | keyed)
//! ```
//!
//! # Passes
//!
//! A pass is `render`, `unmount` or one `set_state`. Passes never nest: a
//! hook or render that calls `set_state` gets [`Error::Reentrant`].

mod children;
mod diff;
mod mount;
mod patch;
mod snapshot;
mod unmount;

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::component::{same_instance, Mounted};
use crate::config::Config;
use crate::dom::DisplayTree;
use crate::error::{Error, Result};
use crate::types::{NodeId, RefCallback, RefTarget};
use crate::vnode::VNode;

use snapshot::Snapshots;

// =============================================================================
// Engine
// =============================================================================

/// Shared engine state. Component instances hold a `Weak` to it.
pub(crate) struct Engine {
    tree: Rc<dyn DisplayTree>,
    config: Config,
    snapshots: RefCell<Snapshots>,
    busy: Cell<bool>,
    this: Weak<Engine>,
}

/// Marks a pass as running; cleared on drop, including during unwinding.
struct Pass<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for Pass<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

impl Engine {
    fn new(tree: Rc<dyn DisplayTree>, config: Config) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            tree,
            config,
            snapshots: RefCell::new(Snapshots::default()),
            busy: Cell::new(false),
            this: this.clone(),
        })
    }

    fn begin(&self) -> Result<Pass<'_>> {
        if self.busy.replace(true) {
            return Err(Error::Reentrant);
        }
        Ok(Pass { busy: &self.busy })
    }

    /// Re-render `instance` after `apply` and reconcile at its anchor.
    pub(crate) fn update(&self, instance: &Rc<dyn Mounted>, apply: impl FnOnce()) -> Result<()> {
        let _pass = self.begin()?;
        let name = instance.component_type().name();

        let anchor = instance
            .anchor()
            .ok_or(Error::Unanchored { component: name })?;
        let container = self
            .tree
            .parent(anchor)
            .ok_or(Error::Detached { node: anchor })?;
        let owners = self.snapshots.borrow().owners(anchor);
        let depth = owners
            .iter()
            .position(|owner| same_instance(owner, instance))
            .ok_or(Error::Unanchored { component: name })?;

        apply();
        let prev_props = instance.props();
        let rendered = instance.render();
        let node = self.diff(&rendered, container, Some(anchor), &owners[..=depth]);
        debug!(component = name, %anchor, %node, "state update reconciled");
        instance.did_update(&prev_props);
        Ok(())
    }

    /// Call a ref callback, isolating panics when configured to.
    pub(crate) fn invoke_ref(&self, callback: &RefCallback, target: Option<RefTarget>) {
        if !self.config.isolate_ref_panics {
            callback(target);
            return;
        }
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(target))) {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            warn!(%message, "ref callback panicked");
        }
    }
}

// =============================================================================
// Root
// =============================================================================

/// Entry point: one per display tree.
///
/// ```ignore
/// let document = Rc::new(Document::new());
/// let root = Root::new(document.clone());
///
/// root.render(&component::<TodoApp>(Props::new(), children![]), document.root())?;
/// ```
pub struct Root {
    engine: Rc<Engine>,
}

impl Root {
    pub fn new(tree: Rc<dyn DisplayTree>) -> Self {
        Self::with_config(tree, Config::default())
    }

    pub fn with_config(tree: Rc<dyn DisplayTree>, config: Config) -> Self {
        Self {
            engine: Engine::new(tree, config),
        }
    }

    /// Reconcile `vnode` against the first child of `container`.
    ///
    /// Returns the display node now at that position.
    pub fn render(&self, vnode: &VNode, container: NodeId) -> Result<NodeId> {
        let _pass = self.engine.begin()?;
        let previous = self.engine.tree.first_child(container);
        debug!(%container, ?previous, "render");
        Ok(self.engine.diff(vnode, container, previous, &[]))
    }

    /// Tear down every child of `container`.
    pub fn unmount(&self, container: NodeId) -> Result<()> {
        let _pass = self.engine.begin()?;
        for child in self.engine.tree.children(container) {
            self.engine.unmount(child);
        }
        Ok(())
    }

    /// The VNode that last produced `node`, if this root mounted it.
    pub fn snapshot(&self, node: NodeId) -> Option<VNode> {
        self.engine.snapshots.borrow().vnode(node)
    }

    pub fn is_mounted(&self, node: NodeId) -> bool {
        self.engine.snapshots.borrow().contains(node)
    }

    /// Number of display nodes this root currently tracks.
    pub fn mounted_count(&self) -> usize {
        self.engine.snapshots.borrow().len()
    }

    pub fn config(&self) -> &Config {
        &self.engine.config
    }

    pub fn tree(&self) -> &Rc<dyn DisplayTree> {
        &self.engine.tree
    }
}
