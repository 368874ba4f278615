//! Unmounter - Tear down a display subtree.
//!
//! Order for each node with a snapshot:
//!
//! 1. `component_will_unmount` on every owner, outermost first
//! 2. Children, recursively (they leave with their parent, no detach each)
//! 3. Ref callbacks with `None`: host ref, then owner refs innermost first
//! 4. Listener removal for every `on<Event>` prop
//! 5. Detach (subtree root only)

use tracing::{debug, warn};

use super::Engine;
use crate::types::NodeId;
use crate::vnode::PropValue;

impl Engine {
    pub(crate) fn unmount(&self, node: NodeId) {
        self.unmount_below(node, 0);
    }

    /// Unmount `node`, leaving its first `keep` owners alive.
    pub(crate) fn unmount_below(&self, node: NodeId, keep: usize) {
        if !self.snapshots.borrow().contains(node) {
            warn!(%node, "detaching a node this root did not mount");
        }
        debug!(%node, "unmount");
        self.teardown(node, keep);
        self.tree.remove(node);
    }

    fn teardown(&self, node: NodeId, keep: usize) {
        let Some(snapshot) = self.snapshots.borrow_mut().remove(node) else {
            return;
        };
        let released = snapshot.owners.get(keep..).unwrap_or_default();

        for owner in released {
            owner.will_unmount();
            owner.set_anchor(None);
        }

        for child in self.tree.children(node) {
            self.teardown(child, 0);
        }

        if let Some(callback) = snapshot.vnode.props().ref_callback() {
            self.invoke_ref(callback, None);
        }
        for owner in released.iter().rev() {
            if let Some(callback) = owner.props().ref_callback() {
                self.invoke_ref(callback, None);
            }
        }

        for (name, value) in snapshot.vnode.props().iter() {
            if let (Some(event), PropValue::Handler(handler)) = (self.config.event_name(name), value) {
                self.tree.remove_event_listener(node, &event, handler);
            }
        }
    }
}
