//! Traversal and plain-text rendering.

use crate::ast::relations::structural_children;
use crate::ast::{AstContext, Node, NodeId, NodeKind, NodeTag};
use crate::error::AstError;
use std::collections::HashSet;
use std::fmt::Write;

/// Pre-order ids of the subtree rooted at `root`.
///
/// A node reachable twice means two parents claim it; that is reported as
/// a parentage inconsistency rather than looping forever.
pub fn descendants(
    ctx: &AstContext,
    root: NodeId,
    include_self: bool,
) -> Result<Vec<NodeId>, AstError> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let node = ctx.require(id)?;
        if !seen.insert(id) {
            return Err(AstError::ParentageInconsistent {
                child: id,
                expected: None,
                actual: node.parent,
            });
        }
        out.push(id);
        let children = structural_children(&node.kind);
        stack.extend(children.into_iter().rev());
    }

    if !include_self {
        out.retain(|id| *id != root);
    }
    Ok(out)
}

/// Pre-order callback traversal of the subtree rooted at `root`.
pub fn walk(
    ctx: &AstContext,
    root: NodeId,
    visitor: &mut dyn FnMut(&Node),
) -> Result<(), AstError> {
    for id in descendants(ctx, root, true)? {
        visitor(ctx.require(id)?);
    }
    Ok(())
}

/// Descendants of `root` (excluding `root`) whose variant matches `tag`.
/// Linear scan, pre-order preserved.
pub fn children_of_kind(
    ctx: &AstContext,
    root: NodeId,
    tag: NodeTag,
) -> Result<Vec<NodeId>, AstError> {
    Ok(descendants(ctx, root, false)?
        .into_iter()
        .filter(|id| ctx.lookup(*id).is_some_and(|n| n.tag() == tag))
        .collect())
}

/// Render the subtree as an indented text tree, two spaces per level,
/// down to `depth` levels (`None` for the whole subtree).
///
/// Ids are deliberately absent so that a copy prints identically to its
/// original.
pub fn print(ctx: &AstContext, root: NodeId, depth: Option<usize>) -> Result<String, AstError> {
    let mut out = String::new();
    print_into(ctx, root, depth, 0, &mut out)?;
    Ok(out)
}

fn print_into(
    ctx: &AstContext,
    id: NodeId,
    depth: Option<usize>,
    level: usize,
    out: &mut String,
) -> Result<(), AstError> {
    let node = ctx.require(id)?;
    for _ in 0..level {
        out.push_str("  ");
    }
    out.push_str(node.tag().as_str());
    if let Some(summary) = summary(&node.kind) {
        write!(out, " {}", summary).expect("writing to a String cannot fail");
    }
    out.push('\n');

    if depth == Some(level) {
        return Ok(());
    }
    for child in structural_children(&node.kind) {
        print_into(ctx, child, depth, level + 1, out)?;
    }
    Ok(())
}

/// A short, id-free description of a node for tree rendering.
fn summary(kind: &NodeKind) -> Option<String> {
    use NodeKind::*;

    match kind {
        SourceUnit(n) => Some(format!("\"{}\"", n.source_entry_key)),
        PragmaDirective(n) => Some(n.literals.join(" ")),
        ImportDirective(n) => Some(format!("\"{}\"", n.file)),
        ContractDefinition(n) => Some(format!("{} \"{}\"", n.kind, n.name)),
        FunctionDefinition(n) => Some(format!("{} \"{}\"", n.kind, n.name)),
        ModifierDefinition(n) => Some(format!("\"{}\"", n.name)),
        EventDefinition(n) => Some(format!("\"{}\"", n.name)),
        ErrorDefinition(n) => Some(format!("\"{}\"", n.name)),
        StructDefinition(n) => Some(format!("\"{}\"", n.name)),
        EnumDefinition(n) => Some(format!("\"{}\"", n.name)),
        EnumValue(n) => Some(format!("\"{}\"", n.name)),
        UserDefinedValueTypeDefinition(n) => Some(format!("\"{}\"", n.name)),
        VariableDeclaration(n) => Some(format!("\"{}\"", n.name)),
        ElementaryTypeName(n) => Some(n.name.clone()),
        UserDefinedTypeName(n) => n.name.clone(),
        IdentifierPath(n) => Some(n.name.clone()),
        Literal(n) => n.value.clone().map(|v| format!("\"{}\"", v)),
        Identifier(n) => Some(format!("\"{}\"", n.name)),
        MemberAccess(n) => Some(format!(".{}", n.member_name)),
        UnaryOperation(n) => Some(n.operator.clone()),
        BinaryOperation(n) => Some(n.operator.clone()),
        Assignment(n) => Some(n.operator.clone()),
        FunctionCall(n) => Some(n.kind.to_string()),
        TryCatchClause(n) if !n.error_name.is_empty() => Some(n.error_name.clone()),
        TupleExpression(n) if n.is_inline_array => Some("inline-array".to_string()),
        Extension(n) => Some(n.tag.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::factory::AstFactory;
    use crate::ast::kinds::{Block, Break, Continue, NodeKind};
    use crate::ast::SourceLocation;

    fn build_block(ctx: &mut AstContext) -> (NodeId, NodeId, NodeId) {
        let mut f = AstFactory::new(ctx);
        let a = f
            .make(SourceLocation::default(), NodeKind::Break(Break))
            .unwrap();
        let b = f
            .make(SourceLocation::default(), NodeKind::Continue(Continue))
            .unwrap();
        let block = f
            .make(
                SourceLocation::default(),
                NodeKind::Block(Block {
                    statements: vec![a, b],
                }),
            )
            .unwrap();
        (block, a, b)
    }

    #[test]
    fn test_descendants_pre_order() {
        let mut ctx = AstContext::new();
        let (block, a, b) = build_block(&mut ctx);

        assert_eq!(descendants(&ctx, block, true).unwrap(), vec![block, a, b]);
        assert_eq!(descendants(&ctx, block, false).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_walk_visits_every_node() {
        let mut ctx = AstContext::new();
        let (block, _, _) = build_block(&mut ctx);

        let mut tags = Vec::new();
        walk(&ctx, block, &mut |n| tags.push(n.tag())).unwrap();
        assert_eq!(tags, vec![NodeTag::Block, NodeTag::Break, NodeTag::Continue]);
    }

    #[test]
    fn test_children_of_kind() {
        let mut ctx = AstContext::new();
        let (block, a, _) = build_block(&mut ctx);

        assert_eq!(
            children_of_kind(&ctx, block, NodeTag::Break).unwrap(),
            vec![a]
        );
        assert!(children_of_kind(&ctx, block, NodeTag::Throw)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_print_depth_limit() {
        let mut ctx = AstContext::new();
        let (block, _, _) = build_block(&mut ctx);

        let full = print(&ctx, block, None).unwrap();
        assert_eq!(full, "Block\n  Break\n  Continue\n");

        let shallow = print(&ctx, block, Some(0)).unwrap();
        assert_eq!(shallow, "Block\n");
    }
}
