//! Typed, version-agnostic AST for Solidity compiler output.
//!
//! The Solidity compiler emits its AST as JSON in two schema families: a
//! legacy one (before 0.4.12) and a modern one (0.4.12 and later), with
//! per-version drift in both. This crate hides that drift behind a single
//! strongly-typed tree: readers consume compiler output, a context arena
//! owns the nodes and resolves id-level cross-references, a factory builds
//! and deep-copies subtrees, and a sanity checker proves the structural
//! invariants on any populated tree.

#![recursion_limit = "256"]

pub mod ast;
pub mod error;
pub mod reader;
pub mod sanity;

pub use ast::{AstContext, AstFactory, Node, NodeId, NodeKind, NodeTag, SourceLocation};
pub use error::AstError;
pub use reader::{detect_schema, read, ReaderConfig, Schema};
pub use sanity::{check_sanity, is_sane};
