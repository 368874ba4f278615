//! Child Reconciliation - Positional and keyed sibling lists.
//!
//! Keyed mode is used when any old or new sibling carries a key:
//!
//! ```text
//! old: [A:1] [B:2] [C:3]          new: [C:3] [A:1] [D]
//!
//! index 0  C:3 found   -> move before child 0, diff
//! index 1  A:1 found   -> already at index 1, diff
//! index 2  D   no key  -> no unkeyed old sibling left, mount before child 2
//! leftover B:2         -> unmount
//! ```
//!
//! Existing nodes are moved, never recreated, so focus and component state
//! survive reordering.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use super::mount::Placement;
use super::Engine;
use crate::types::{Key, NodeId};
use crate::vnode::VNode;

impl Engine {
    pub(crate) fn reconcile_children(&self, parent: NodeId, children: &[VNode]) {
        let old = self.tree.children(parent);
        let keyed = children.iter().any(|child| child.key().is_some()) || {
            let snapshots = self.snapshots.borrow();
            old.iter().any(|&node| snapshots.key(node).is_some())
        };

        if keyed {
            self.reconcile_keyed(parent, &old, children);
        } else {
            self.reconcile_positional(parent, &old, children);
        }
    }

    fn reconcile_positional(&self, parent: NodeId, old: &[NodeId], children: &[VNode]) {
        for (index, child) in children.iter().enumerate() {
            self.diff(child, parent, old.get(index).copied(), &[]);
        }
        for &surplus in old.iter().skip(children.len()) {
            self.unmount(surplus);
        }
    }

    fn reconcile_keyed(&self, parent: NodeId, old: &[NodeId], children: &[VNode]) {
        let mut by_key: HashMap<Key, NodeId> = HashMap::new();
        let mut unkeyed: VecDeque<NodeId> = VecDeque::new();
        {
            let snapshots = self.snapshots.borrow();
            for &node in old {
                match snapshots.key(node) {
                    Some(key) => {
                        if by_key.contains_key(&key) {
                            warn!(%key, %node, "duplicate key among previous siblings");
                        } else {
                            by_key.insert(key, node);
                        }
                    }
                    None => unkeyed.push_back(node),
                }
            }
        }

        let mut claimed: HashSet<NodeId> = HashSet::new();
        let mut seen: HashSet<Key> = HashSet::new();
        // Mirror of the parent's child list, kept in step with every move and insert.
        let mut live: Vec<NodeId> = old.to_vec();

        for (index, child) in children.iter().enumerate() {
            let key = child.key();
            let matched = match &key {
                Some(key) => {
                    if !seen.insert(key.clone()) {
                        warn!(%key, "duplicate key among new siblings");
                    }
                    by_key.remove(key)
                }
                None => unkeyed.pop_front(),
            };
            let current = live.get(index).copied();

            let node = match matched {
                Some(existing) => {
                    claimed.insert(existing);
                    if current != Some(existing) {
                        debug!(node = %existing, index, "move keyed child");
                        self.tree.insert_before(parent, existing, current);
                        if let Some(from) = live.iter().position(|&n| n == existing) {
                            live.remove(from);
                        }
                        live.insert(index, existing);
                    }
                    let node = self.diff(child, parent, Some(existing), &[]);
                    if let Some(slot) = live.get_mut(index) {
                        *slot = node;
                    }
                    node
                }
                None => {
                    let node = self.mount(child, parent, Placement::at(current), &[]);
                    live.insert(index, node);
                    node
                }
            };
            self.snapshots.borrow_mut().set_key(node, key);
        }

        for &node in old {
            if !claimed.contains(&node) {
                self.unmount(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::dom::{DisplayTree, Document, MutationKind};
    use crate::engine::Root;
    use crate::types::{Key, NodeId};
    use crate::vnode::{element, Child, Props, VNode};

    fn item(key: Option<i32>, label: &str) -> VNode {
        let props = match key {
            Some(key) => Props::new().with_key(key),
            None => Props::new(),
        };
        element("li", props, [Child::from(label)])
    }

    fn list(items: Vec<VNode>) -> VNode {
        element("ul", Props::new(), items.into_iter().map(Into::into))
    }

    fn setup() -> (Rc<Document>, Root) {
        let document = Rc::new(Document::new());
        let root = Root::new(document.clone());
        (document, root)
    }

    fn items(document: &Document, ul: NodeId) -> Vec<NodeId> {
        document.children(ul)
    }

    #[test]
    fn test_keyed_list_reuses_unkeyed_in_order() {
        let (document, root) = setup();
        let ul = root
            .render(
                &list(vec![item(Some(1), "a"), item(None, "u"), item(Some(2), "b")]),
                document.root(),
            )
            .expect("render");
        let before = items(&document, ul);

        root.render(
            &list(vec![
                item(None, "v"),
                item(Some(2), "b"),
                item(None, "w"),
                item(Some(1), "a"),
            ]),
            document.root(),
        )
        .expect("render");
        let after = items(&document, ul);

        assert_eq!(document.inner_html(ul), "<li>v</li><li>b</li><li>w</li><li>a</li>");
        assert_eq!(after.len(), 4);
        assert_eq!(after[0], before[1], "first unkeyed old node patched to v");
        assert_eq!(after[1], before[2], "B keeps its node");
        assert_eq!(after[3], before[0], "A keeps its node");
        assert!(!before.contains(&after[2]), "w is a fresh mount");
        assert_eq!(root.snapshot(after[0]).and_then(|v| v.key()), None);
        assert_eq!(root.snapshot(after[3]).and_then(|v| v.key()), Some(Key::from(1)));
    }

    #[test]
    fn test_duplicate_old_key_first_occurrence_wins() {
        let (document, root) = setup();
        let ul = root
            .render(
                &list(vec![item(Some(1), "a"), item(Some(1), "b")]),
                document.root(),
            )
            .expect("render");
        let before = items(&document, ul);

        root.render(
            &list(vec![item(Some(1), "x"), item(Some(1), "y")]),
            document.root(),
        )
        .expect("render");
        let after = items(&document, ul);

        assert_eq!(document.inner_html(ul), "<li>x</li><li>y</li>");
        assert_eq!(after[0], before[0]);
        assert_ne!(after[1], before[1]);
        assert_eq!(document.parent(before[1]), None, "later duplicate unmounted");
        assert!(!root.is_mounted(before[1]));
    }

    #[test]
    fn test_keyed_reverse_moves_without_creating() {
        let (document, root) = setup();
        let keys = [1, 2, 3, 4, 5];
        let ul = root
            .render(
                &list(keys.iter().map(|&k| item(Some(k), &k.to_string())).collect()),
                document.root(),
            )
            .expect("render");
        let before = items(&document, ul);
        document.clear_mutations();

        root.render(
            &list(keys.iter().rev().map(|&k| item(Some(k), &k.to_string())).collect()),
            document.root(),
        )
        .expect("render");

        let mut expected = before.clone();
        expected.reverse();
        assert_eq!(items(&document, ul), expected);
        assert_eq!(document.inner_html(ul), "<li>5</li><li>4</li><li>3</li><li>2</li><li>1</li>");
        assert_eq!(document.count(MutationKind::CREATE), 0);
    }
}
