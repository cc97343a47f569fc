//! Expression nodes.
//!
//! `type_string` on every variant is the compiler's `typeDescriptions`
//! rendering, kept verbatim; it is absent when the producing build did not
//! emit one.

use crate::ast::{FunctionCallKind, LiteralKind, NodeId};

/// A literal value. Leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub type_string: Option<String>,
    pub kind: LiteralKind,
    /// Hex encoding of the literal bytes, when emitted.
    pub hex_value: Option<String>,
    /// The literal text; absent for unprintable string literals.
    pub value: Option<String>,
    /// `wei`, `ether`, `seconds`, ... when present.
    pub subdenomination: Option<String>,
}

/// A name referring to a declaration. Leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub type_string: Option<String>,
    pub name: String,
    /// Reference to the named declaration; absent in some builds.
    pub referenced_declaration: Option<NodeId>,
}

/// A `base.member` access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccess {
    pub type_string: Option<String>,
    /// Child: the base expression.
    pub expression: NodeId,
    pub member_name: String,
    /// Reference to the accessed declaration; absent for builtins.
    pub referenced_declaration: Option<NodeId>,
}

/// A `base[index]` access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexAccess {
    pub type_string: Option<String>,
    /// Child: the base expression.
    pub base_expression: NodeId,
    /// Child: the index; absent in abi-decode style `uint[]` usages.
    pub index_expression: Option<NodeId>,
}

/// A `base[start:end]` slice (0.6.0+).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRangeAccess {
    pub type_string: Option<String>,
    /// Child: the base expression.
    pub base_expression: NodeId,
    /// Child: the start expression, if any.
    pub start_expression: Option<NodeId>,
    /// Child: the end expression, if any.
    pub end_expression: Option<NodeId>,
}

/// A unary operation such as `-x`, `!x`, `x++`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOperation {
    pub type_string: Option<String>,
    pub is_prefix: bool,
    pub operator: String,
    /// Child: the operand.
    pub sub_expression: NodeId,
}

/// A binary operation such as `a + b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOperation {
    pub type_string: Option<String>,
    pub operator: String,
    /// Child: the left operand.
    pub left_expression: NodeId,
    /// Child: the right operand.
    pub right_expression: NodeId,
}

/// An assignment, possibly compound (`+=`, `<<=`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub type_string: Option<String>,
    pub operator: String,
    /// Child: the assigned-to expression.
    pub left_hand_side: NodeId,
    /// Child: the value expression.
    pub right_hand_side: NodeId,
}

/// A `cond ? a : b` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    pub type_string: Option<String>,
    /// Child: the condition.
    pub condition: NodeId,
    /// Child: the value when true.
    pub true_expression: NodeId,
    /// Child: the value when false.
    pub false_expression: NodeId,
}

/// A call: plain call, type conversion or struct constructor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub type_string: Option<String>,
    pub kind: FunctionCallKind,
    /// Child: the callee expression.
    pub expression: NodeId,
    /// Children: the arguments, in call order.
    pub arguments: Vec<NodeId>,
    /// Argument names of the `f({a: 1, b: 2})` form, empty otherwise.
    pub names: Vec<String>,
}

/// A call option list, e.g. `f{value: 1 ether}` (0.6.2+).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallOptions {
    pub type_string: Option<String>,
    /// Child: the callee expression.
    pub expression: NodeId,
    /// Option names, parallel to `options`.
    pub names: Vec<String>,
    /// Children: the option values.
    pub options: Vec<NodeId>,
}

/// A `new T` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpression {
    pub type_string: Option<String>,
    /// Child: the instantiated type name.
    pub type_name: NodeId,
}

/// A tuple `(a, b)` or inline array `[a, b]` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleExpression {
    pub type_string: Option<String>,
    pub is_inline_array: bool,
    /// Components with explicit `None` for omitted positions, e.g.
    /// `(a, , c)`. Structural children are the present components.
    pub components: Vec<Option<NodeId>>,
}

/// The type name operand of an expression position, e.g. `uint` in
/// `uint(x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementaryTypeNameExpression {
    pub type_string: Option<String>,
    pub type_name: ElementaryTypeRef,
}

/// Modern compilers emit an owned `ElementaryTypeName` child here; older
/// ones emit the bare type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementaryTypeRef {
    Node(NodeId),
    Raw(String),
}
