//! The node arena.
//!
//! A context owns every node of one compilation and is the sole authority
//! on id assignment and id resolution. Contexts are single-threaded
//! islands; two contexts may be used from different threads, but one
//! context is never shared.

use crate::ast::{Node, NodeId};
use crate::error::AstError;
use std::collections::BTreeMap;
use tracing::debug;

/// Arena owning a coherent set of nodes and issuing unique ids.
#[derive(Debug, Default)]
pub struct AstContext {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
}

impl AstContext {
    /// An empty context whose first fresh id is 1.
    pub fn new() -> Self {
        AstContext {
            nodes: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// An empty context whose first fresh id is `first_id`.
    pub fn with_offset(first_id: u32) -> Self {
        AstContext {
            nodes: BTreeMap::new(),
            next_id: first_id.max(1),
        }
    }

    /// Mint the next id. Ids are monotonically increasing and never reused,
    /// even after unregistration.
    pub fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a node under its own id.
    ///
    /// Fails with [`AstError::DuplicateId`] if the id is taken; on success
    /// the fresh-id counter is bumped above the registered id, so
    /// compiler-assigned ids and factory-minted ids never collide.
    pub fn register(&mut self, node: Node) -> Result<NodeId, AstError> {
        let id = node.id;
        if self.nodes.contains_key(&id) {
            return Err(AstError::DuplicateId(id));
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Remove a node, returning it if it was present.
    pub fn unregister(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    /// Resolve an id, if registered.
    pub fn lookup(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable resolve.
    pub fn lookup_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Resolve an id that must exist.
    pub fn require(&self, id: NodeId) -> Result<&Node, AstError> {
        self.nodes.get(&id).ok_or(AstError::MissingNode(id))
    }

    /// Mutable resolve of an id that must exist.
    pub fn require_mut(&mut self, id: NodeId) -> Result<&mut Node, AstError> {
        self.nodes.get_mut(&id).ok_or(AstError::MissingNode(id))
    }

    /// Membership test, O(log n) on the tree map.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// The next id the context would mint.
    pub fn peek_next_id(&self) -> NodeId {
        NodeId(self.next_id)
    }

    /// Merge `other` into `self` under id disjointness.
    ///
    /// Fails with [`AstError::DuplicateId`] on the first colliding id, in
    /// which case neither context has been touched. On success `other` is
    /// drained empty (its id counter is retained).
    pub fn merge(&mut self, other: &mut AstContext) -> Result<(), AstError> {
        if let Some(id) = other.ids().find(|id| self.contains(*id)) {
            return Err(AstError::DuplicateId(id));
        }
        debug!(nodes = other.len(), "merging context");
        self.next_id = self.next_id.max(other.next_id);
        self.nodes.append(&mut other.nodes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::kinds::{EnumValue, NodeKind};
    use crate::ast::SourceLocation;

    fn leaf(id: u32, name: &str) -> Node {
        Node {
            id: NodeId(id),
            src: SourceLocation::default(),
            parent: None,
            raw: None,
            kind: NodeKind::EnumValue(EnumValue {
                name: name.to_string(),
            }),
        }
    }

    #[test]
    fn test_fresh_ids_are_monotonic() {
        let mut ctx = AstContext::new();
        let a = ctx.fresh_id();
        let b = ctx.fresh_id();
        assert!(b > a);
        assert_eq!(a, NodeId(1));
    }

    #[test]
    fn test_register_bumps_counter_past_explicit_ids() {
        let mut ctx = AstContext::new();
        ctx.register(leaf(100, "V")).unwrap();
        assert!(ctx.fresh_id() > NodeId(100));
    }

    #[test]
    fn test_register_rejects_duplicate() {
        let mut ctx = AstContext::new();
        ctx.register(leaf(7, "A")).unwrap();
        let err = ctx.register(leaf(7, "B")).unwrap_err();
        assert!(matches!(err, AstError::DuplicateId(NodeId(7))));
    }

    #[test]
    fn test_require_missing() {
        let ctx = AstContext::new();
        assert!(matches!(
            ctx.require(NodeId(3)),
            Err(AstError::MissingNode(NodeId(3)))
        ));
    }

    #[test]
    fn test_merge_disjoint() {
        let mut a = AstContext::new();
        let mut b = AstContext::new();
        a.register(leaf(1, "A")).unwrap();
        b.register(leaf(2, "B")).unwrap();

        a.merge(&mut b).unwrap();
        assert_eq!(a.len(), 2);
        assert!(b.is_empty());
        assert!(a.contains(NodeId(1)) && a.contains(NodeId(2)));
    }

    #[test]
    fn test_merge_collision_leaves_both_untouched() {
        let mut a = AstContext::new();
        let mut b = AstContext::new();
        a.register(leaf(1, "A")).unwrap();
        b.register(leaf(1, "B")).unwrap();
        b.register(leaf(2, "C")).unwrap();

        let err = a.merge(&mut b).unwrap_err();
        assert!(matches!(err, AstError::DuplicateId(NodeId(1))));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_merged_ids_stay_fresh() {
        let mut a = AstContext::new();
        let mut b = AstContext::new();
        b.register(leaf(50, "B")).unwrap();
        a.merge(&mut b).unwrap();
        assert!(a.fresh_id() > NodeId(50));
    }
}
