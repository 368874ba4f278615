//! Reconciler - Decide between mount, replace, patch and component update.
//!
//! ```text
//! no previous node              -> mount
//! Stateful, same type at depth  -> lifecycle update, recurse on render output
//! Stateful, otherwise           -> replace
//! Function                      -> call, diff the result in place
//! host, same kind and depth     -> patch props, refresh snapshot, reconcile children
//! host, otherwise               -> replace
//! ```
//!
//! "Depth" is the length of the owner chain: a host node that used to be a
//! component's output is not compatible with a bare host node at the same
//! position, so the component gets torn down.

use std::rc::Rc;

use tracing::trace;

use super::mount::Placement;
use super::patch::patch_props;
use super::Engine;
use crate::component::Mounted;
use crate::types::{NodeId, RefTarget};
use crate::vnode::{Kind, Props, VNode};

impl Engine {
    /// Reconcile `vnode` against `previous` inside `container`.
    pub(crate) fn diff(
        &self,
        vnode: &VNode,
        container: NodeId,
        previous: Option<NodeId>,
        owners: &[Rc<dyn Mounted>],
    ) -> NodeId {
        let Some(old) = previous else {
            return self.mount(vnode, container, Placement::Append, owners);
        };

        match vnode.kind() {
            Kind::Stateful(_) => self.diff_component(vnode, container, old, owners),
            Kind::Function(function) => {
                let rendered = function.call(vnode.props());
                self.diff(&rendered, container, Some(old), owners)
            }
            Kind::Element(_) | Kind::Text => {
                let compatible = {
                    let snapshots = self.snapshots.borrow();
                    snapshots
                        .vnode(old)
                        .is_some_and(|snapshot| snapshot.kind().same(vnode.kind()))
                        && snapshots.owner_count(old) == Some(owners.len())
                };
                if compatible {
                    self.patch_host(vnode, old);
                    old
                } else {
                    self.replace(vnode, container, old, owners)
                }
            }
        }
    }

    fn replace(
        &self,
        vnode: &VNode,
        container: NodeId,
        old: NodeId,
        owners: &[Rc<dyn Mounted>],
    ) -> NodeId {
        let placement = Placement::Replace {
            old,
            keep: owners.len(),
        };
        self.mount(vnode, container, placement, owners)
    }

    fn diff_component(
        &self,
        vnode: &VNode,
        container: NodeId,
        old: NodeId,
        owners: &[Rc<dyn Mounted>],
    ) -> NodeId {
        let Kind::Stateful(component) = vnode.kind() else {
            return self.replace(vnode, container, old, owners);
        };
        let existing = self.snapshots.borrow().owner(old, owners.len());
        match existing {
            Some(instance) if instance.component_type() == *component => {
                self.update_component(&instance, vnode, container, old, owners)
            }
            _ => self.replace(vnode, container, old, owners),
        }
    }

    fn update_component(
        &self,
        instance: &Rc<dyn Mounted>,
        vnode: &VNode,
        container: NodeId,
        old: NodeId,
        owners: &[Rc<dyn Mounted>],
    ) -> NodeId {
        let next = vnode.props().clone();
        let current = instance.props();
        let unchanged = Props::ptr_eq(&current, &next);

        if !unchanged {
            instance.will_receive_props(&next);
        }
        if !instance.should_update(&next) {
            trace!(component = instance.component_type().name(), "update skipped");
            return old;
        }
        instance.will_update(&next);
        let prev_props = instance.commit_props(next);

        let old_ref = prev_props.ref_callback().cloned();
        let new_ref = vnode.props().ref_callback().cloned();
        if !same_ref(old_ref.as_ref(), new_ref.as_ref()) {
            if let Some(callback) = &old_ref {
                self.invoke_ref(callback, None);
            }
            if let Some(callback) = &new_ref {
                let target = instance.component_ref().map(RefTarget::Component);
                self.invoke_ref(callback, target);
            }
        }

        let rendered = instance.render();
        let mut chain = owners.to_vec();
        chain.push(instance.clone());
        let node = self.diff(&rendered, container, Some(old), &chain);

        instance.did_update(&prev_props);
        node
    }

    fn patch_host(&self, vnode: &VNode, node: NodeId) {
        let Some(previous) = self.snapshots.borrow().vnode(node) else {
            return;
        };

        match vnode.kind() {
            Kind::Text => {
                if previous.text() != vnode.text() {
                    trace!(%node, "patch text");
                    self.tree.set_text_content(node, vnode.text().unwrap_or_default());
                }
            }
            _ => patch_props(&*self.tree, &self.config, node, vnode.props(), previous.props()),
        }
        self.snapshots.borrow_mut().set_vnode(node, vnode.clone());

        let old_ref = previous.props().ref_callback();
        let new_ref = vnode.props().ref_callback();
        if !same_ref(old_ref, new_ref) {
            if let Some(callback) = old_ref {
                self.invoke_ref(callback, None);
            }
            if let Some(callback) = new_ref {
                self.invoke_ref(callback, Some(RefTarget::Node(node)));
            }
        }

        self.reconcile_children(node, vnode.children());
    }
}

fn same_ref<T: ?Sized>(a: Option<&Rc<T>>, b: Option<&Rc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
