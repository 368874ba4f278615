//! Mutation log entries recorded by [`Document`](super::Document).

use crate::types::NodeId;

bitflags::bitflags! {
    /// Mutation categories, combinable for filtering: `MutationKind::ATTRIBUTE | MutationKind::LISTENER`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MutationKind: u8 {
        const NONE = 0;
        const CREATE = 1 << 0;
        const STRUCTURE = 1 << 1;
        const ATTRIBUTE = 1 << 2;
        const PROPERTY = 1 << 3;
        const LISTENER = 1 << 4;
        const TEXT = 1 << 5;
        /// Everything except node creation.
        const UPDATE = Self::STRUCTURE.bits()
            | Self::ATTRIBUTE.bits()
            | Self::PROPERTY.bits()
            | Self::LISTENER.bits()
            | Self::TEXT.bits();
    }
}

/// One change applied to a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateElement { node: NodeId, tag: String },
    CreateText { node: NodeId, text: String },
    Insert { parent: NodeId, node: NodeId, before: Option<NodeId> },
    Remove { parent: NodeId, node: NodeId },
    SetAttribute { node: NodeId, name: String, value: String },
    RemoveAttribute { node: NodeId, name: String },
    SetProperty { node: NodeId, name: String },
    AddListener { node: NodeId, event: String },
    RemoveListener { node: NodeId, event: String },
    SetText { node: NodeId, text: String },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::CreateElement { .. } | Mutation::CreateText { .. } => MutationKind::CREATE,
            Mutation::Insert { .. } | Mutation::Remove { .. } => MutationKind::STRUCTURE,
            Mutation::SetAttribute { .. } | Mutation::RemoveAttribute { .. } => MutationKind::ATTRIBUTE,
            Mutation::SetProperty { .. } => MutationKind::PROPERTY,
            Mutation::AddListener { .. } | Mutation::RemoveListener { .. } => MutationKind::LISTENER,
            Mutation::SetText { .. } => MutationKind::TEXT,
        }
    }

    /// Node the mutation applies to.
    pub fn node(&self) -> NodeId {
        match self {
            Mutation::CreateElement { node, .. }
            | Mutation::CreateText { node, .. }
            | Mutation::Insert { node, .. }
            | Mutation::Remove { node, .. }
            | Mutation::SetAttribute { node, .. }
            | Mutation::RemoveAttribute { node, .. }
            | Mutation::SetProperty { node, .. }
            | Mutation::AddListener { node, .. }
            | Mutation::RemoveListener { node, .. }
            | Mutation::SetText { node, .. } => *node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_masks() {
        let set = Mutation::SetAttribute {
            node: NodeId::new(1),
            name: "class".into(),
            value: "x".into(),
        };
        assert_eq!(set.kind(), MutationKind::ATTRIBUTE);
        assert!(MutationKind::UPDATE.contains(set.kind()));
        assert!(!MutationKind::UPDATE.contains(MutationKind::CREATE));
        assert_eq!(set.node(), NodeId::new(1));
    }
}
