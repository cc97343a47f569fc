//! Structural sanity checking.
//!
//! Proves, on a populated tree, the invariants the readers and the factory
//! promise: context membership, parent/child agreement, reference
//! resolvability, named-relation coverage of direct children, and
//! exported-symbols coherence. A failure here is a programming bug in a
//! reader or a caller, never user input; nothing recovers from it.

use crate::ast::relations::{reference_attrs, structural_children, RefAttr, RefShape};
use crate::ast::traverse::descendants;
use crate::ast::{AstContext, NodeId};
use crate::error::AstError;
use std::collections::{HashMap, HashSet};

/// Verify every structural invariant on the subtree rooted at `unit`.
///
/// Checks, in order per node: membership of each structural child, the
/// child's parent back-pointer, coverage (any node claiming this node as
/// parent must appear among its structural children), and resolvability of
/// every reference attribute. Leaf variants with no children and no
/// references pass trivially. Ownership cycles surface as parentage
/// inconsistencies from the traversal itself.
pub fn check_sanity(ctx: &AstContext, unit: NodeId) -> Result<(), AstError> {
    let reachable = descendants(ctx, unit, true)?;
    let reachable_set: HashSet<NodeId> = reachable.iter().copied().collect();

    // Group registered nodes by the parent they claim, limited to parents
    // inside this subtree.
    let mut claimed: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for node in ctx.iter() {
        if let Some(parent) = node.parent {
            if reachable_set.contains(&parent) {
                claimed.entry(parent).or_default().push(node.id);
            }
        }
    }

    for id in &reachable {
        let node = ctx.require(*id)?;
        let children = structural_children(&node.kind);

        for child_id in &children {
            let child = ctx.require(*child_id)?;
            if child.parent != Some(*id) {
                return Err(AstError::ParentageInconsistent {
                    child: *child_id,
                    expected: Some(*id),
                    actual: child.parent,
                });
            }
        }

        let child_set: HashSet<NodeId> = children.into_iter().collect();
        if let Some(claimants) = claimed.get(id) {
            for claimant in claimants {
                if !child_set.contains(claimant) {
                    return Err(AstError::CoverageViolation {
                        node: *id,
                        child: *claimant,
                    });
                }
            }
        }

        for attr in reference_attrs(&node.kind) {
            check_reference(ctx, *id, &attr)?;
        }
    }

    Ok(())
}

/// Boolean form of [`check_sanity`]: sanity violations become `false`.
pub fn is_sane(ctx: &AstContext, unit: NodeId) -> bool {
    check_sanity(ctx, unit).is_ok()
}

/// Verify one reference attribute against the context.
///
/// Scalar and list forms alike: every present id must resolve when the
/// attribute's view is required; attributes with a nullable view tolerate
/// dangling ids. Name-keyed maps (exported symbols) report the offending
/// symbol by name.
pub fn check_reference(ctx: &AstContext, owner: NodeId, attr: &RefAttr) -> Result<(), AstError> {
    let check = |target: NodeId| -> Result<(), AstError> {
        if ctx.contains(target) || !attr.required {
            Ok(())
        } else {
            Err(AstError::DanglingReference {
                owner,
                attribute: attr.name,
                target,
            })
        }
    };

    match &attr.shape {
        RefShape::Scalar(target) => check(*target),
        RefShape::OptScalar(None) => Ok(()),
        RefShape::OptScalar(Some(target)) => check(*target),
        RefShape::List(targets) => targets.iter().copied().try_for_each(check),
        RefShape::NullableList(targets) => {
            targets.iter().flatten().copied().try_for_each(check)
        }
        RefShape::Map(entries) => {
            for (symbol, target) in entries {
                if !ctx.contains(*target) {
                    return Err(AstError::ExportedSymbolMismatch {
                        unit: owner,
                        symbol: symbol.clone(),
                    });
                }
            }
            Ok(())
        }
    }
}
