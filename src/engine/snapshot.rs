//! Producing Snapshots - Side table from display node to the VNode that made it.
//!
//! The display tree never stores engine data. Instead every node the engine
//! mounts gets an entry here:
//!
//! ```text
//! NodeId -> Snapshot { vnode, owners, key }
//!
//! vnode   host/text VNode that last patched the node (the "old" side of the next diff)
//! owners  component instances whose output is anchored here, outermost first
//! key     key the parent list placed this node under (may come from a component VNode)
//! ```
//!
//! Entries are created by the Mounter, refreshed by the Reconciler and
//! removed by the Unmounter.

use std::collections::HashMap;
use std::rc::Rc;

use crate::component::Mounted;
use crate::types::{Key, NodeId};
use crate::vnode::VNode;

pub(crate) struct Snapshot {
    pub vnode: VNode,
    pub owners: Vec<Rc<dyn Mounted>>,
    pub key: Option<Key>,
}

#[derive(Default)]
pub(crate) struct Snapshots {
    entries: HashMap<NodeId, Snapshot>,
}

impl Snapshots {
    pub fn insert(&mut self, node: NodeId, snapshot: Snapshot) {
        self.entries.insert(node, snapshot);
    }

    pub fn remove(&mut self, node: NodeId) -> Option<Snapshot> {
        self.entries.remove(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn vnode(&self, node: NodeId) -> Option<VNode> {
        self.entries.get(&node).map(|snapshot| snapshot.vnode.clone())
    }

    pub fn key(&self, node: NodeId) -> Option<Key> {
        self.entries.get(&node).and_then(|snapshot| snapshot.key.clone())
    }

    pub fn owners(&self, node: NodeId) -> Vec<Rc<dyn Mounted>> {
        self.entries
            .get(&node)
            .map(|snapshot| snapshot.owners.clone())
            .unwrap_or_default()
    }

    /// Owner at `depth` in the chain anchored at `node`.
    pub fn owner(&self, node: NodeId, depth: usize) -> Option<Rc<dyn Mounted>> {
        self.entries.get(&node)?.owners.get(depth).cloned()
    }

    pub fn owner_count(&self, node: NodeId) -> Option<usize> {
        self.entries.get(&node).map(|snapshot| snapshot.owners.len())
    }

    pub fn set_vnode(&mut self, node: NodeId, vnode: VNode) {
        if let Some(snapshot) = self.entries.get_mut(&node) {
            snapshot.vnode = vnode;
        }
    }

    pub fn set_key(&mut self, node: NodeId, key: Option<Key>) {
        if let Some(snapshot) = self.entries.get_mut(&node) {
            snapshot.key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vnode::text;

    #[test]
    fn test_insert_and_refresh() {
        let mut snapshots = Snapshots::default();
        let node = NodeId::new(3);
        let first = text("a");
        snapshots.insert(
            node,
            Snapshot {
                vnode: first.clone(),
                owners: Vec::new(),
                key: None,
            },
        );
        assert!(snapshots.contains(node));
        assert!(snapshots.vnode(node).is_some_and(|v| VNode::ptr_eq(&v, &first)));

        let second = text("b");
        snapshots.set_vnode(node, second.clone());
        snapshots.set_key(node, Some(Key::from(1)));
        assert!(snapshots.vnode(node).is_some_and(|v| VNode::ptr_eq(&v, &second)));
        assert_eq!(snapshots.key(node), Some(Key::from("1")));
        assert_eq!(snapshots.owner_count(node), Some(0));

        assert!(snapshots.remove(node).is_some());
        assert_eq!(snapshots.len(), 0);
        assert_eq!(snapshots.key(node), None);
    }

    #[test]
    fn test_updates_ignore_unknown_nodes() {
        let mut snapshots = Snapshots::default();
        snapshots.set_key(NodeId::new(9), Some(Key::from("x")));
        snapshots.set_vnode(NodeId::new(9), text("x"));
        assert!(!snapshots.contains(NodeId::new(9)));
        assert!(snapshots.owners(NodeId::new(9)).is_empty());
    }
}
