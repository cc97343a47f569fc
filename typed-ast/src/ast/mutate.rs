//! Structural mutations on container nodes.
//!
//! Containers are the variants whose children form a private ordered list
//! (source units, contract definitions, blocks, unchecked blocks, parameter
//! lists, extensions). Every mutation updates exactly the parent's child
//! list and the child's parent pointer; ids, source locations and value
//! attributes are untouched. Validation runs before any state changes:
//! membership first, then shape.
//!
//! Nodes whose child set derives from typed attributes (a binary
//! operation's operands, say) are mutated by attribute assignment followed
//! by [`AstFactory::accept_children`] instead.
//!
//! [`AstFactory::accept_children`]: crate::ast::factory::AstFactory::accept_children

use crate::ast::relations::{container_children, container_children_mut};
use crate::ast::traverse::descendants;
use crate::ast::{AstContext, NodeId};
use crate::error::AstError;

enum Position {
    End,
    Beginning,
    Before(NodeId),
    After(NodeId),
}

impl AstContext {
    /// Append `child` to the end of `parent`'s child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        self.insert_child(parent, child, Position::End)
    }

    /// Insert `child` at the front of `parent`'s child list.
    pub fn insert_at_beginning(&mut self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        self.insert_child(parent, child, Position::Beginning)
    }

    /// Insert `child` immediately before `anchor` in `parent`'s child list.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        anchor: NodeId,
    ) -> Result<(), AstError> {
        self.insert_child(parent, child, Position::Before(anchor))
    }

    /// Insert `child` immediately after `anchor` in `parent`'s child list.
    pub fn insert_after(
        &mut self,
        parent: NodeId,
        child: NodeId,
        anchor: NodeId,
    ) -> Result<(), AstError> {
        self.insert_child(parent, child, Position::After(anchor))
    }

    /// Replace `old` with `new` in place. `old` stays registered but is
    /// detached (no parent).
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> Result<(), AstError> {
        self.check_attachable(parent, new)?;
        let position = self
            .child_position(parent, old)?
            .ok_or(AstError::NotAChild { parent, child: old })?;

        let list = container_children_mut(&mut self.require_mut(parent)?.kind)
            .ok_or(AstError::NotAContainer(parent))?;
        list[position] = new;
        self.require_mut(new)?.parent = Some(parent);
        self.require_mut(old)?.parent = None;
        Ok(())
    }

    /// Remove `child` from `parent` and unregister it together with all of
    /// its descendants.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        if !self.contains(child) {
            return Err(AstError::WrongContext { node: child });
        }
        let position = self
            .child_position(parent, child)?
            .ok_or(AstError::NotAChild { parent, child })?;
        let doomed = descendants(self, child, true)?;

        let list = container_children_mut(&mut self.require_mut(parent)?.kind)
            .ok_or(AstError::NotAContainer(parent))?;
        list.remove(position);
        self.require_mut(child)?.parent = None;
        for id in doomed {
            self.unregister(id);
        }
        Ok(())
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        position: Position,
    ) -> Result<(), AstError> {
        self.check_attachable(parent, child)?;
        let index = match position {
            Position::End => None,
            Position::Beginning => Some(0),
            Position::Before(anchor) => Some(
                self.child_position(parent, anchor)?
                    .ok_or(AstError::NotAChild { parent, child: anchor })?,
            ),
            Position::After(anchor) => Some(
                self.child_position(parent, anchor)?
                    .ok_or(AstError::NotAChild { parent, child: anchor })?
                    + 1,
            ),
        };

        let list = container_children_mut(&mut self.require_mut(parent)?.kind)
            .ok_or(AstError::NotAContainer(parent))?;
        match index {
            Some(index) => list.insert(index, child),
            None => list.push(child),
        }
        self.require_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Membership and shape checks shared by all insertions: both ends in
    /// this context, parent a container, child detached.
    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        if !self.contains(parent) {
            return Err(AstError::WrongContext { node: parent });
        }
        if !self.contains(child) {
            return Err(AstError::WrongContext { node: child });
        }
        container_children(&self.require(parent)?.kind).ok_or(AstError::NotAContainer(parent))?;
        let actual = self.require(child)?.parent;
        if actual.is_some() {
            return Err(AstError::ParentageInconsistent {
                child,
                expected: None,
                actual,
            });
        }
        Ok(())
    }

    fn child_position(&self, parent: NodeId, child: NodeId) -> Result<Option<usize>, AstError> {
        if !self.contains(parent) {
            return Err(AstError::WrongContext { node: parent });
        }
        let list = container_children(&self.require(parent)?.kind)
            .ok_or(AstError::NotAContainer(parent))?;
        Ok(list.iter().position(|c| *c == child))
    }
}
