//! Typed errors for the AST core.
//!
//! Every failure mode of the reader, the context, the factory and the
//! sanity checker is a variant here. IO and CLI-level failures stay with
//! `anyhow` in the binary; library code only ever returns `AstError`.

use crate::ast::NodeId;
use thiserror::Error;

/// Errors produced by the AST core.
#[derive(Debug, Error)]
pub enum AstError {
    /// The reader encountered a schema tag that no builder is registered for.
    #[error("unknown node kind `{tag}` at {src}")]
    UnknownNodeKind { tag: String, src: String },

    /// A required JSON field is missing or has the wrong type.
    #[error("schema mismatch at {src}: {reason}")]
    SchemaMismatch { src: String, reason: String },

    /// The link pass could not resolve a required reference.
    #[error("dangling reference: node {owner} attribute `{attribute}` points to missing node {target}")]
    DanglingReference {
        owner: NodeId,
        attribute: &'static str,
        target: NodeId,
    },

    /// An operation received a node that is not registered in this context.
    #[error("node {node} does not belong to this context")]
    WrongContext { node: NodeId },

    /// Registration or context merge encountered a colliding id.
    #[error("duplicate id {0}")]
    DuplicateId(NodeId),

    /// A lookup that must succeed found no node for the id.
    #[error("no node with id {0} in this context")]
    MissingNode(NodeId),

    /// A structural child's parent back-pointer disagrees with its owner.
    #[error("node {child}: parent is {actual:?}, expected {expected:?}")]
    ParentageInconsistent {
        child: NodeId,
        expected: Option<NodeId>,
        actual: Option<NodeId>,
    },

    /// A direct structural child is not reachable through any named relation.
    #[error("node {node}: child {child} is not covered by any named relation")]
    CoverageViolation { node: NodeId, child: NodeId },

    /// A source unit's exported-symbols map names a node that cannot be resolved.
    #[error("source unit {unit}: exported symbol `{symbol}` does not resolve to a node")]
    ExportedSymbolMismatch { unit: NodeId, symbol: String },

    /// The input JSON carried compiler-reported errors.
    #[error("compiler reported {} error(s); first: {}", .0.len(), .0.first().map(String::as_str).unwrap_or(""))]
    CompileErrorsPresent(Vec<String>),

    /// A structural mutation was attempted on a node whose children are not
    /// an ordered list.
    #[error("node {0} is not a container; mutate its attributes instead")]
    NotAContainer(NodeId),

    /// A mutation named an anchor node that is not a child of the parent.
    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}
