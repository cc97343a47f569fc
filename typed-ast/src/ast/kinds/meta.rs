//! Meta nodes: source units, directives and the small glue nodes that hang
//! off declarations.

use crate::ast::{NodeId, SymbolAlias};
use std::collections::BTreeMap;

/// The root node of one Solidity source file.
///
/// A container: `nodes` is the private ordered child list mutated through
/// the context.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    /// Key of this unit in the compiler output's `sources` map.
    pub source_entry_key: String,
    /// Index of this unit in the compiler's source list, from `src`.
    pub source_list_index: Option<u32>,
    /// Resolved absolute path, when the compiler recorded one.
    pub absolute_path: Option<String>,
    /// Top-level symbol name to declaration id. Reference attribute; the
    /// dereferenced view is derived through the context.
    pub exported_symbols: BTreeMap<String, NodeId>,
    /// SPDX license string, when present.
    pub license: Option<String>,
    /// Pragmas, imports and top-level definitions, in source order.
    pub nodes: Vec<NodeId>,
}

/// A `pragma` directive. Leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PragmaDirective {
    /// The raw pragma token list, e.g. `["solidity", "^", "0.8", ".0"]`.
    pub literals: Vec<String>,
}

/// An `import` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    /// The import path as written.
    pub file: String,
    /// Resolved absolute path, when the compiler recorded one.
    pub absolute_path: Option<String>,
    /// The unit alias of `import "..." as alias`, empty when absent.
    pub unit_alias: String,
    /// `import { foreign as local }` aliases. Modern aliases own an
    /// `Identifier` child; legacy aliases keep only the foreign name.
    pub symbol_aliases: Vec<SymbolAlias>,
    /// Reference to the enclosing source unit.
    pub scope: NodeId,
    /// Reference to the imported source unit. Absent in legacy output.
    pub source_unit: Option<NodeId>,
}

/// One base contract in an inheritance list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceSpecifier {
    /// Child: `UserDefinedTypeName` or `IdentifierPath` naming the base.
    pub base_name: NodeId,
    /// Children: constructor arguments passed to the base, if any.
    pub arguments: Vec<NodeId>,
}

/// A modifier (or base-constructor) invocation on a function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierInvocation {
    /// Child: `Identifier` or `IdentifierPath` naming the modifier.
    pub modifier_name: NodeId,
    /// Children: arguments, if any.
    pub arguments: Vec<NodeId>,
    /// `modifierInvocation` or `baseConstructorSpecifier`; newer outputs only.
    pub kind: Option<String>,
}

/// An `override(...)` specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSpecifier {
    /// Children: the overridden contracts, possibly empty.
    pub overrides: Vec<NodeId>,
}

/// A parameter list. A container; all children are `VariableDeclaration`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterList {
    pub parameters: Vec<NodeId>,
}

/// A `using ... for ...` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingForDirective {
    /// Child: the library name, absent for the function-list form.
    pub library_name: Option<NodeId>,
    /// Children: `IdentifierPath`s of `using {f, g} for T`.
    pub function_list: Vec<NodeId>,
    /// Child: the target type, absent for `using L for *`.
    pub type_name: Option<NodeId>,
    /// `using ... for ... global` (0.8.13+).
    pub is_global: bool,
}

/// A natspec documentation node. Leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredDocumentation {
    pub text: String,
}

/// A dotted name path, e.g. `A.B.C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierPath {
    pub name: String,
    /// Reference to the named declaration; absent in some builds.
    pub referenced_declaration: Option<NodeId>,
}
