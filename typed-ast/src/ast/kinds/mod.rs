//! The node catalog: every AST variant as a closed sum.
//!
//! Variant payload structs are grouped by family (meta, declarations, type
//! names, statements, expressions) and wrapped into [`NodeKind`]. The
//! fieldless [`NodeTag`] mirror exists for dispatch, filtering and display;
//! its spellings are exactly the `nodeType` strings of the modern compiler
//! schema.

pub mod declarations;
pub mod expressions;
pub mod meta;
pub mod statements;
pub mod types;

pub use declarations::*;
pub use expressions::*;
pub use meta::*;
pub use statements::*;
pub use types::*;

use std::fmt;
use std::str::FromStr;

/// A node produced by a custom builder for a schema tag outside the core
/// catalog. Children are an ordered list, so extensions are containers.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    /// The schema tag the builder was registered under.
    pub tag: String,
    /// Whatever the builder chose to keep of the input.
    pub attributes: serde_json::Value,
    /// Structural children, in input order.
    pub children: Vec<crate::ast::NodeId>,
}

macro_rules! node_catalog {
    ($($variant:ident),+ $(,)?) => {
        /// The closed sum of all node variants.
        #[derive(Debug, Clone, PartialEq)]
        pub enum NodeKind {
            $($variant($variant)),+
        }

        /// Fieldless mirror of [`NodeKind`], one tag per variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeTag {
            $($variant),+
        }

        impl NodeKind {
            /// The tag of this variant.
            pub fn tag(&self) -> NodeTag {
                match self {
                    $(NodeKind::$variant(_) => NodeTag::$variant),+
                }
            }
        }

        impl NodeTag {
            /// The `nodeType` spelling of this tag.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(NodeTag::$variant => stringify!($variant)),+
                }
            }
        }

        impl FromStr for NodeTag {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(NodeTag::$variant),)+
                    _ => Err(format!("unknown node tag: {}", s)),
                }
            }
        }
    };
}

node_catalog!(
    // Meta
    SourceUnit,
    PragmaDirective,
    ImportDirective,
    InheritanceSpecifier,
    ModifierInvocation,
    OverrideSpecifier,
    ParameterList,
    UsingForDirective,
    StructuredDocumentation,
    IdentifierPath,
    // Declarations
    ContractDefinition,
    FunctionDefinition,
    ModifierDefinition,
    EventDefinition,
    ErrorDefinition,
    StructDefinition,
    EnumDefinition,
    EnumValue,
    UserDefinedValueTypeDefinition,
    VariableDeclaration,
    // Type names
    ElementaryTypeName,
    UserDefinedTypeName,
    ArrayTypeName,
    Mapping,
    FunctionTypeName,
    // Statements
    Block,
    UncheckedBlock,
    IfStatement,
    ForStatement,
    WhileStatement,
    DoWhileStatement,
    Return,
    Break,
    Continue,
    Throw,
    EmitStatement,
    RevertStatement,
    ExpressionStatement,
    VariableDeclarationStatement,
    TryStatement,
    TryCatchClause,
    InlineAssembly,
    PlaceholderStatement,
    // Expressions
    Literal,
    Identifier,
    MemberAccess,
    IndexAccess,
    IndexRangeAccess,
    UnaryOperation,
    BinaryOperation,
    Assignment,
    Conditional,
    FunctionCall,
    FunctionCallOptions,
    NewExpression,
    TupleExpression,
    ElementaryTypeNameExpression,
    // Extensibility
    Extension,
);

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
