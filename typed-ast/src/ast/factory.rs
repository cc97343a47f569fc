//! Node creation and subtree copying.
//!
//! The variant structs of [`NodeKind`] are the typed per-variant
//! constructors; the factory is the single gate that assigns ids, registers
//! nodes and rebinds child parent pointers. Nothing else creates nodes.

use crate::ast::relations::{rewrite_ids, structural_children};
use crate::ast::traverse::descendants;
use crate::ast::{AstContext, Node, NodeId, NodeKind, SourceLocation};
use crate::error::AstError;
use std::collections::HashMap;

/// Factory bound to one context.
pub struct AstFactory<'ctx> {
    ctx: &'ctx mut AstContext,
}

impl<'ctx> AstFactory<'ctx> {
    pub fn new(ctx: &'ctx mut AstContext) -> Self {
        AstFactory { ctx }
    }

    /// The bound context.
    pub fn context(&self) -> &AstContext {
        self.ctx
    }

    /// Create a node with a fresh id.
    ///
    /// All structural children named by `kind` must already be registered
    /// in the bound context; the membership check runs before any state is
    /// touched. On success the children's parent pointers are rebound to
    /// the new node.
    pub fn make(&mut self, src: SourceLocation, kind: NodeKind) -> Result<NodeId, AstError> {
        for child in structural_children(&kind) {
            if !self.ctx.contains(child) {
                return Err(AstError::WrongContext { node: child });
            }
        }
        let id = self.ctx.fresh_id();
        self.ctx.register(Node {
            id,
            src,
            parent: None,
            raw: None,
            kind,
        })?;
        self.accept_children(id)?;
        Ok(id)
    }

    /// Create a node under an explicit id, as read from compiler output.
    ///
    /// Same child validation as [`AstFactory::make`]; fails with
    /// [`AstError::DuplicateId`] if the id is taken.
    pub fn make_with_id(
        &mut self,
        id: NodeId,
        src: SourceLocation,
        raw: Option<serde_json::Value>,
        kind: NodeKind,
    ) -> Result<NodeId, AstError> {
        for child in structural_children(&kind) {
            if !self.ctx.contains(child) {
                return Err(AstError::WrongContext { node: child });
            }
        }
        self.ctx.register(Node {
            id,
            src,
            parent: None,
            raw,
            kind,
        })?;
        self.accept_children(id)?;
        Ok(id)
    }

    /// Rebind every structural child's parent pointer to `id`. Idempotent.
    pub fn accept_children(&mut self, id: NodeId) -> Result<(), AstError> {
        let children = structural_children(&self.ctx.require(id)?.kind);
        for child in children {
            self.ctx.require_mut(child)?.parent = Some(id);
        }
        Ok(())
    }

    /// Deep-copy the subtree rooted at `root`.
    ///
    /// Every copied node gets a fresh id; structural shape is preserved
    /// exactly; referential attributes pointing inside the subtree are
    /// remapped to the new ids, references to nodes outside it are kept
    /// verbatim. The copy is detached (its root has no parent).
    pub fn copy(&mut self, root: NodeId) -> Result<NodeId, AstError> {
        let order = descendants(self.ctx, root, true)?;

        let mut remap = HashMap::with_capacity(order.len());
        for old in &order {
            remap.insert(*old, self.ctx.fresh_id());
        }

        for old in &order {
            let mut node = self.ctx.require(*old)?.clone();
            node.id = remap[old];
            // A parent outside the subtree means `old` is the root: detach.
            node.parent = node.parent.and_then(|p| remap.get(&p).copied());
            rewrite_ids(&mut node.kind, &|id| remap.get(&id).copied().unwrap_or(id));
            self.ctx.register(node)?;
        }

        Ok(remap[&root])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::kinds::{
        EnumDefinition, EnumValue, Identifier, NodeTag, VariableDeclarationStatement,
    };
    use crate::ast::traverse::print;

    fn src() -> SourceLocation {
        SourceLocation::default()
    }

    fn make_enum(f: &mut AstFactory<'_>) -> (NodeId, NodeId) {
        let value = f
            .make(src(), NodeKind::EnumValue(EnumValue { name: "V".to_string() }))
            .unwrap();
        let def = f
            .make(
                src(),
                NodeKind::EnumDefinition(EnumDefinition {
                    name: "E".to_string(),
                    members: vec![value],
                }),
            )
            .unwrap();
        (def, value)
    }

    #[test]
    fn test_make_sets_parent() {
        let mut ctx = AstContext::new();
        let mut f = AstFactory::new(&mut ctx);
        let (def, value) = make_enum(&mut f);

        assert_eq!(ctx.require(value).unwrap().parent, Some(def));
        assert_eq!(ctx.require(def).unwrap().parent, None);
    }

    #[test]
    fn test_make_rejects_unregistered_child() {
        let mut ctx = AstContext::new();
        let mut f = AstFactory::new(&mut ctx);
        let err = f
            .make(
                src(),
                NodeKind::EnumDefinition(EnumDefinition {
                    name: "E".to_string(),
                    members: vec![NodeId(99)],
                }),
            )
            .unwrap_err();
        assert!(matches!(err, AstError::WrongContext { node: NodeId(99) }));
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_copy_allocates_fresh_greater_ids() {
        let mut ctx = AstContext::new();
        let mut f = AstFactory::new(&mut ctx);
        let (def, value) = make_enum(&mut f);

        let clone = f.copy(def).unwrap();
        assert_ne!(clone, def);
        assert!(clone > def && clone > value);

        let cloned_members = match &ctx.require(clone).unwrap().kind {
            NodeKind::EnumDefinition(e) => e.members.clone(),
            other => panic!("unexpected kind: {:?}", other.tag()),
        };
        assert_eq!(cloned_members.len(), 1);
        assert!(cloned_members[0] > value);
        assert_eq!(ctx.require(cloned_members[0]).unwrap().parent, Some(clone));
    }

    #[test]
    fn test_copy_prints_identically() {
        let mut ctx = AstContext::new();
        let mut f = AstFactory::new(&mut ctx);
        let (def, _) = make_enum(&mut f);
        let clone = f.copy(def).unwrap();

        assert_eq!(
            print(&ctx, def, None).unwrap(),
            print(&ctx, clone, None).unwrap()
        );
    }

    #[test]
    fn test_copy_is_shape_idempotent() {
        let mut ctx = AstContext::new();
        let mut f = AstFactory::new(&mut ctx);
        let (def, _) = make_enum(&mut f);

        let once = f.copy(def).unwrap();
        let twice = f.copy(once).unwrap();
        assert_eq!(
            print(&ctx, once, None).unwrap(),
            print(&ctx, twice, None).unwrap()
        );
    }

    #[test]
    fn test_copy_remaps_internal_refs_and_keeps_external() {
        let mut ctx = AstContext::new();
        let mut f = AstFactory::new(&mut ctx);

        // External referent, outside the copied subtree.
        let external = f
            .make(src(), NodeKind::EnumValue(EnumValue { name: "X".to_string() }))
            .unwrap();

        let decl = f
            .make(src(), NodeKind::EnumValue(EnumValue { name: "d".to_string() }))
            .unwrap();
        let init = f
            .make(
                src(),
                NodeKind::Identifier(Identifier {
                    type_string: None,
                    name: "x".to_string(),
                    referenced_declaration: Some(external),
                }),
            )
            .unwrap();
        let stmt = f
            .make(
                src(),
                NodeKind::VariableDeclarationStatement(VariableDeclarationStatement {
                    assignments: vec![Some(decl), None],
                    declarations: vec![decl],
                    initial_value: Some(init),
                }),
            )
            .unwrap();

        let clone = f.copy(stmt).unwrap();
        let cloned = match &ctx.require(clone).unwrap().kind {
            NodeKind::VariableDeclarationStatement(s) => s.clone(),
            other => panic!("unexpected kind: {:?}", other.tag()),
        };

        // Internal reference remapped, null slot preserved.
        assert_eq!(cloned.assignments.len(), 2);
        assert_eq!(cloned.assignments[0], Some(cloned.declarations[0]));
        assert_eq!(cloned.assignments[1], None);
        assert_ne!(cloned.declarations[0], decl);

        // External reference kept verbatim.
        let cloned_init = cloned.initial_value.unwrap();
        match &ctx.require(cloned_init).unwrap().kind {
            NodeKind::Identifier(i) => {
                assert_eq!(i.referenced_declaration, Some(external));
            }
            other => panic!("unexpected kind: {:?}", other.tag()),
        }
        assert_eq!(ctx.require(clone).unwrap().tag(), NodeTag::VariableDeclarationStatement);
    }
}
