//! The typed AST model.
//!
//! Every node carries the same four header attributes (`id`, `src`,
//! `parent`, `raw`) plus a variant-specific payload from the closed
//! [`NodeKind`] sum. Nodes live in an [`AstContext`] arena and refer to
//! each other by [`NodeId`]; the id-level attribute is always the source
//! of truth, and live references are derived through the context on demand.

pub mod context;
pub mod factory;
pub mod kinds;
pub mod mutate;
pub mod relations;
pub mod traverse;

pub use context::AstContext;
pub use factory::AstFactory;
pub use kinds::{NodeKind, NodeTag};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node within its owning context.
///
/// Ids read from compiler output are preserved verbatim; ids minted by the
/// factory are strictly greater than anything already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A source location triple `offset:length:fileIndex`.
///
/// The compiler emits `-1` components for synthesized nodes, so all three
/// fields are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub offset: i64,
    pub length: i64,
    pub file: i64,
}

impl SourceLocation {
    /// Parse a `offset:length:fileIndex` string.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let offset = parts.next()?.parse().ok()?;
        let length = parts.next()?.parse().ok()?;
        let file = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(SourceLocation { offset, length, file })
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.length, self.file)
    }
}

/// One AST node: the universal header plus the variant payload.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique id within the owning context.
    pub id: NodeId,
    /// Source location this node was produced from.
    pub src: SourceLocation,
    /// Back-reference to the structural parent, none at a root.
    pub parent: Option<NodeId>,
    /// The original JSON fragment, retained only when the reader is
    /// configured to keep it.
    pub raw: Option<serde_json::Value>,
    /// Variant payload.
    pub kind: NodeKind,
}

impl Node {
    /// The fieldless tag of this node's variant.
    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// The ordered direct structural children, derived from the variant's
    /// named relations in declaration order.
    pub fn children(&self) -> Vec<NodeId> {
        relations::structural_children(&self.kind)
    }
}

/// Documentation attached to a definition.
///
/// Modern compilers emit a `StructuredDocumentation` child node; legacy
/// compilers emit plain text in the attributes object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Documentation {
    Text(String),
    Node(NodeId),
}

/// One `import { foreign as local }` alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolAlias {
    pub foreign: SymbolForeign,
    pub local: Option<String>,
}

/// Origin of an imported symbol.
///
/// The modern schema owns an `Identifier` child per alias. The legacy
/// schema exposes a partially-valid `foreign` object in which only the
/// name is trustworthy, so only the name is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolForeign {
    Node(NodeId),
    Name(String),
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The spelling used by compiler JSON.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!(
                        concat!("unknown ", stringify!($name), " value: {}"),
                        s
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// The kind of a contract-like definition.
    ContractKind {
        Contract => "contract",
        Interface => "interface",
        Library => "library",
    }
);

string_enum!(
    /// The kind of a function definition.
    FunctionKind {
        Constructor => "constructor",
        Function => "function",
        Fallback => "fallback",
        Receive => "receive",
        FreeFunction => "freeFunction",
    }
);

string_enum!(
    /// Declaration visibility.
    Visibility {
        External => "external",
        Public => "public",
        Internal => "internal",
        Private => "private",
        Default => "default",
    }
);

string_enum!(
    /// Function state mutability.
    StateMutability {
        Pure => "pure",
        View => "view",
        NonPayable => "nonpayable",
        Payable => "payable",
    }
);

string_enum!(
    /// Variable mutability.
    Mutability {
        Mutable => "mutable",
        Immutable => "immutable",
        Constant => "constant",
    }
);

string_enum!(
    /// Data location of a variable.
    StorageLocation {
        Default => "default",
        Storage => "storage",
        Memory => "memory",
        Calldata => "calldata",
    }
);

string_enum!(
    /// The kind of a literal expression.
    LiteralKind {
        Number => "number",
        String => "string",
        Bool => "bool",
        HexString => "hexString",
        UnicodeString => "unicodeString",
    }
);

string_enum!(
    /// The kind of a function call expression.
    FunctionCallKind {
        FunctionCall => "functionCall",
        TypeConversion => "typeConversion",
        StructConstructorCall => "structConstructorCall",
    }
);
