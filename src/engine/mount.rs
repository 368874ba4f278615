//! Mounter - Build a brand-new display subtree from a VNode tree.

use std::rc::Rc;

use tracing::{debug, trace};

use super::snapshot::Snapshot;
use super::Engine;
use crate::component::Mounted;
use crate::types::{NodeId, RefTarget};
use crate::vnode::{Kind, Props, VNode};

use super::patch::patch_props;

/// Where a freshly mounted node goes in its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Append,
    Before(NodeId),
    /// Take `old`'s position, then unmount it. The first `keep` owners of
    /// `old` survive the swap and are re-anchored at the new node.
    Replace { old: NodeId, keep: usize },
}

impl Placement {
    pub(crate) fn at(reference: Option<NodeId>) -> Self {
        reference.map_or(Placement::Append, Placement::Before)
    }
}

impl Engine {
    /// Mount `vnode` into `container`. `owners` are the component instances
    /// whose output `vnode` is, outermost first.
    pub(crate) fn mount(
        &self,
        vnode: &VNode,
        container: NodeId,
        placement: Placement,
        owners: &[Rc<dyn Mounted>],
    ) -> NodeId {
        match vnode.kind() {
            Kind::Stateful(component) => {
                debug!(component = component.name(), %container, "mount component");
                let instance = (component.instantiate)(vnode.props().clone(), self.this.clone());
                instance.will_mount();
                let rendered = instance.render();

                let mut chain = owners.to_vec();
                chain.push(instance.clone());
                let node = self.mount(&rendered, container, placement, &chain);

                instance.did_mount();
                if let Some(callback) = vnode.props().ref_callback() {
                    let target = instance.component_ref().map(RefTarget::Component);
                    self.invoke_ref(callback, target);
                }
                node
            }
            Kind::Function(function) => {
                let rendered = function.call(vnode.props());
                self.mount(&rendered, container, placement, owners)
            }
            Kind::Element(_) | Kind::Text => self.mount_host(vnode, container, placement, owners),
        }
    }

    fn mount_host(
        &self,
        vnode: &VNode,
        container: NodeId,
        placement: Placement,
        owners: &[Rc<dyn Mounted>],
    ) -> NodeId {
        let node = match vnode.kind() {
            Kind::Element(tag) => {
                let node = self.tree.create_element(tag);
                patch_props(&*self.tree, &self.config, node, vnode.props(), &Props::new());
                node
            }
            _ => self.tree.create_text(vnode.text().unwrap_or_default()),
        };
        trace!(%node, kind = vnode.kind().name(), "mount host node");

        let key = match placement {
            Placement::Replace { old, .. } => self.snapshots.borrow().key(old),
            _ => None,
        };
        self.snapshots.borrow_mut().insert(
            node,
            Snapshot {
                vnode: vnode.clone(),
                owners: owners.to_vec(),
                key,
            },
        );
        for owner in owners {
            owner.set_anchor(Some(node));
        }

        match placement {
            Placement::Append => self.tree.append_child(container, node),
            Placement::Before(reference) => self.tree.insert_before(container, node, Some(reference)),
            Placement::Replace { old, keep } => {
                debug!(%old, %node, "replace node");
                self.tree.insert_before(container, node, Some(old));
                self.unmount_below(old, keep);
            }
        }

        for child in vnode.children() {
            let mounted = self.mount(child, node, Placement::Append, &[]);
            self.snapshots.borrow_mut().set_key(mounted, child.key());
        }

        if let Some(callback) = vnode.props().ref_callback() {
            self.invoke_ref(callback, Some(RefTarget::Node(node)));
        }
        node
    }
}
