//! Type name nodes.

use crate::ast::{NodeId, StateMutability, Visibility};

/// A built-in type name such as `uint256` or `address payable`. Leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementaryTypeName {
    pub type_string: Option<String>,
    pub name: String,
    /// Only meaningful for `address payable`.
    pub state_mutability: Option<StateMutability>,
}

/// A reference to a user-defined type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDefinedTypeName {
    pub type_string: Option<String>,
    /// The dotted name, emitted directly by compilers before 0.8.0.
    pub name: Option<String>,
    /// Child: the `IdentifierPath` carrying the name (0.8.0+).
    pub path: Option<NodeId>,
    /// Reference to the type's declaration; absent in some builds.
    pub referenced_declaration: Option<NodeId>,
}

/// An array type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTypeName {
    pub type_string: Option<String>,
    /// Child: the element type.
    pub base_type: NodeId,
    /// Child: the length expression of a fixed-size array.
    pub length: Option<NodeId>,
}

/// A `mapping(K => V)` type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub type_string: Option<String>,
    /// Child: the key type.
    pub key_type: NodeId,
    /// Child: the value type.
    pub value_type: NodeId,
}

/// A function type name, e.g. `function (uint) external returns (bool)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTypeName {
    pub type_string: Option<String>,
    pub visibility: Visibility,
    pub state_mutability: StateMutability,
    /// Child: parameter list.
    pub parameter_types: NodeId,
    /// Child: return parameter list.
    pub return_parameter_types: NodeId,
}
