//! Declaration nodes.

use crate::ast::{
    ContractKind, Documentation, FunctionKind, Mutability, NodeId, StateMutability,
    StorageLocation, Visibility,
};

/// A contract, interface or library definition.
///
/// A container: `nodes` holds the inheritance specifiers followed by the
/// body declarations, in source order. Named views filter that list.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDefinition {
    pub name: String,
    /// Reference to the enclosing source unit.
    pub scope: NodeId,
    pub kind: ContractKind,
    pub is_abstract: bool,
    pub fully_implemented: bool,
    /// References: the C3 linearization, this contract first.
    pub linearized_base_contracts: Vec<NodeId>,
    /// References: errors usable inside this contract.
    pub used_errors: Vec<NodeId>,
    pub documentation: Option<Documentation>,
    /// Inheritance specifiers and body declarations.
    pub nodes: Vec<NodeId>,
}

/// A function definition (including constructors, fallback and receive).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    /// Reference to the enclosing contract or source unit.
    pub scope: NodeId,
    pub kind: FunctionKind,
    pub name: String,
    pub is_virtual: bool,
    pub visibility: Visibility,
    pub state_mutability: StateMutability,
    pub is_constructor: bool,
    pub documentation: Option<Documentation>,
    /// Child: override specifier, if any.
    pub overrides: Option<NodeId>,
    /// Child: parameter list.
    pub parameters: NodeId,
    /// Child: return parameter list.
    pub return_parameters: NodeId,
    /// Children: modifier invocations, in source order.
    pub modifiers: Vec<NodeId>,
    /// Child: the body block; absent for unimplemented functions.
    pub body: Option<NodeId>,
}

/// A modifier definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierDefinition {
    pub name: String,
    pub is_virtual: bool,
    pub visibility: Visibility,
    pub documentation: Option<Documentation>,
    /// Child: override specifier, if any.
    pub overrides: Option<NodeId>,
    /// Child: parameter list.
    pub parameters: NodeId,
    /// Child: the body block; absent for unimplemented modifiers.
    pub body: Option<NodeId>,
}

/// An event definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDefinition {
    pub is_anonymous: bool,
    pub name: String,
    pub documentation: Option<Documentation>,
    /// Child: parameter list.
    pub parameters: NodeId,
}

/// A custom error definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDefinition {
    pub name: String,
    pub documentation: Option<Documentation>,
    /// Child: parameter list.
    pub parameters: NodeId,
}

/// A struct definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDefinition {
    pub name: String,
    /// Reference to the enclosing contract or source unit.
    pub scope: NodeId,
    pub visibility: Visibility,
    /// Children: the member variable declarations.
    pub members: Vec<NodeId>,
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDefinition {
    pub name: String,
    /// Children: the enum values.
    pub members: Vec<NodeId>,
}

/// One value of an enum. Leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
}

/// A `type T is V` definition (0.8.8+).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDefinedValueTypeDefinition {
    pub name: String,
    /// Child: the underlying elementary type.
    pub underlying_type: NodeId,
}

/// A variable declaration: state variables, parameters and locals alike.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub is_constant: bool,
    pub is_indexed: bool,
    pub name: String,
    /// Reference to the declaring scope.
    pub scope: NodeId,
    pub is_state_variable: bool,
    pub storage_location: StorageLocation,
    pub visibility: Visibility,
    pub mutability: Mutability,
    /// The compiler's type string, e.g. `uint256`.
    pub type_string: Option<String>,
    pub documentation: Option<Documentation>,
    /// Child: the declared type; absent in old `var` declarations.
    pub type_name: Option<NodeId>,
    /// Child: override specifier, if any.
    pub overrides: Option<NodeId>,
    /// Child: the initializer of a state variable, if any.
    pub value: Option<NodeId>,
}
