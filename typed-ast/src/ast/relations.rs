//! Per-variant relation tables.
//!
//! Three queries are answered for every variant of the catalog:
//!
//! - [`structural_children`]: the ordered direct children, derived from the
//!   variant's named relations in declaration order.
//! - [`reference_attrs`]: the non-owning, id-valued attributes, with their
//!   shape and whether a present id must resolve.
//! - [`rewrite_ids`]: application of an id substitution to every id-typed
//!   field, used by subtree copying.
//!
//! Container variants additionally expose their private ordered child list
//! through [`container_children`] / [`container_children_mut`].

use crate::ast::kinds::{ElementaryTypeRef, NodeKind};
use crate::ast::{Documentation, NodeId, SymbolForeign};

/// The shape of one reference attribute's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefShape {
    Scalar(NodeId),
    OptScalar(Option<NodeId>),
    List(Vec<NodeId>),
    /// Ordered list with explicit `None` for omitted positions.
    NullableList(Vec<Option<NodeId>>),
    /// Name-keyed map, e.g. exported symbols.
    Map(Vec<(String, NodeId)>),
}

/// One reference attribute of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefAttr {
    /// Attribute name, as reported in errors.
    pub name: &'static str,
    /// Whether a present id must resolve. Attributes with a nullable view
    /// tolerate dangling ids.
    pub required: bool,
    pub shape: RefShape,
}

impl RefAttr {
    fn scalar(name: &'static str, id: NodeId) -> Self {
        RefAttr { name, required: true, shape: RefShape::Scalar(id) }
    }

    fn opt(name: &'static str, id: Option<NodeId>) -> Self {
        RefAttr { name, required: false, shape: RefShape::OptScalar(id) }
    }

    fn opt_required(name: &'static str, id: Option<NodeId>) -> Self {
        RefAttr { name, required: true, shape: RefShape::OptScalar(id) }
    }

    fn list(name: &'static str, ids: &[NodeId]) -> Self {
        RefAttr { name, required: true, shape: RefShape::List(ids.to_vec()) }
    }
}

fn doc_child(doc: &Option<Documentation>) -> Option<NodeId> {
    match doc {
        Some(Documentation::Node(id)) => Some(*id),
        _ => None,
    }
}

/// The ordered direct structural children of a node.
pub fn structural_children(kind: &NodeKind) -> Vec<NodeId> {
    use NodeKind::*;

    let mut out = Vec::new();
    match kind {
        // Meta
        SourceUnit(n) => out.extend(&n.nodes),
        PragmaDirective(_) => {}
        ImportDirective(n) => {
            for alias in &n.symbol_aliases {
                if let SymbolForeign::Node(id) = alias.foreign {
                    out.push(id);
                }
            }
        }
        InheritanceSpecifier(n) => {
            out.push(n.base_name);
            out.extend(&n.arguments);
        }
        ModifierInvocation(n) => {
            out.push(n.modifier_name);
            out.extend(&n.arguments);
        }
        OverrideSpecifier(n) => out.extend(&n.overrides),
        ParameterList(n) => out.extend(&n.parameters),
        UsingForDirective(n) => {
            out.extend(n.library_name);
            out.extend(&n.function_list);
            out.extend(n.type_name);
        }
        StructuredDocumentation(_) => {}
        IdentifierPath(_) => {}

        // Declarations
        ContractDefinition(n) => {
            out.extend(doc_child(&n.documentation));
            out.extend(&n.nodes);
        }
        FunctionDefinition(n) => {
            out.extend(doc_child(&n.documentation));
            out.extend(n.overrides);
            out.push(n.parameters);
            out.push(n.return_parameters);
            out.extend(&n.modifiers);
            out.extend(n.body);
        }
        ModifierDefinition(n) => {
            out.extend(doc_child(&n.documentation));
            out.extend(n.overrides);
            out.push(n.parameters);
            out.extend(n.body);
        }
        EventDefinition(n) => {
            out.extend(doc_child(&n.documentation));
            out.push(n.parameters);
        }
        ErrorDefinition(n) => {
            out.extend(doc_child(&n.documentation));
            out.push(n.parameters);
        }
        StructDefinition(n) => out.extend(&n.members),
        EnumDefinition(n) => out.extend(&n.members),
        EnumValue(_) => {}
        UserDefinedValueTypeDefinition(n) => out.push(n.underlying_type),
        VariableDeclaration(n) => {
            out.extend(doc_child(&n.documentation));
            out.extend(n.type_name);
            out.extend(n.overrides);
            out.extend(n.value);
        }

        // Type names
        ElementaryTypeName(_) => {}
        UserDefinedTypeName(n) => out.extend(n.path),
        ArrayTypeName(n) => {
            out.push(n.base_type);
            out.extend(n.length);
        }
        Mapping(n) => {
            out.push(n.key_type);
            out.push(n.value_type);
        }
        FunctionTypeName(n) => {
            out.push(n.parameter_types);
            out.push(n.return_parameter_types);
        }

        // Statements
        Block(n) => out.extend(&n.statements),
        UncheckedBlock(n) => out.extend(&n.statements),
        IfStatement(n) => {
            out.push(n.condition);
            out.push(n.true_body);
            out.extend(n.false_body);
        }
        ForStatement(n) => {
            out.extend(n.initialization_expression);
            out.extend(n.condition);
            out.extend(n.loop_expression);
            out.push(n.body);
        }
        WhileStatement(n) => {
            out.push(n.condition);
            out.push(n.body);
        }
        DoWhileStatement(n) => {
            out.push(n.condition);
            out.push(n.body);
        }
        Return(n) => out.extend(n.expression),
        Break(_) | Continue(_) | Throw(_) => {}
        EmitStatement(n) => out.push(n.event_call),
        RevertStatement(n) => out.push(n.error_call),
        ExpressionStatement(n) => out.push(n.expression),
        VariableDeclarationStatement(n) => {
            out.extend(&n.declarations);
            out.extend(n.initial_value);
        }
        TryStatement(n) => {
            out.push(n.external_call);
            out.extend(&n.clauses);
        }
        TryCatchClause(n) => {
            out.extend(n.parameters);
            out.push(n.block);
        }
        InlineAssembly(_) => {}
        PlaceholderStatement(_) => {}

        // Expressions
        Literal(_) | Identifier(_) => {}
        MemberAccess(n) => out.push(n.expression),
        IndexAccess(n) => {
            out.push(n.base_expression);
            out.extend(n.index_expression);
        }
        IndexRangeAccess(n) => {
            out.push(n.base_expression);
            out.extend(n.start_expression);
            out.extend(n.end_expression);
        }
        UnaryOperation(n) => out.push(n.sub_expression),
        BinaryOperation(n) => {
            out.push(n.left_expression);
            out.push(n.right_expression);
        }
        Assignment(n) => {
            out.push(n.left_hand_side);
            out.push(n.right_hand_side);
        }
        Conditional(n) => {
            out.push(n.condition);
            out.push(n.true_expression);
            out.push(n.false_expression);
        }
        FunctionCall(n) => {
            out.push(n.expression);
            out.extend(&n.arguments);
        }
        FunctionCallOptions(n) => {
            out.push(n.expression);
            out.extend(&n.options);
        }
        NewExpression(n) => out.push(n.type_name),
        TupleExpression(n) => out.extend(n.components.iter().flatten()),
        ElementaryTypeNameExpression(n) => {
            if let ElementaryTypeRef::Node(id) = n.type_name {
                out.push(id);
            }
        }

        Extension(n) => out.extend(&n.children),
    }
    out
}

/// The reference attributes of a node.
pub fn reference_attrs(kind: &NodeKind) -> Vec<RefAttr> {
    use NodeKind::*;

    match kind {
        SourceUnit(n) => vec![RefAttr {
            name: "exportedSymbols",
            required: true,
            shape: RefShape::Map(
                n.exported_symbols
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
            ),
        }],
        ImportDirective(n) => vec![
            RefAttr::scalar("scope", n.scope),
            RefAttr::opt_required("sourceUnit", n.source_unit),
        ],
        IdentifierPath(n) => {
            vec![RefAttr::opt("referencedDeclaration", n.referenced_declaration)]
        }
        ContractDefinition(n) => vec![
            RefAttr::scalar("scope", n.scope),
            RefAttr::list("linearizedBaseContracts", &n.linearized_base_contracts),
            RefAttr::list("usedErrors", &n.used_errors),
        ],
        FunctionDefinition(n) => vec![RefAttr::scalar("scope", n.scope)],
        StructDefinition(n) => vec![RefAttr::scalar("scope", n.scope)],
        VariableDeclaration(n) => vec![RefAttr::scalar("scope", n.scope)],
        UserDefinedTypeName(n) => {
            vec![RefAttr::opt("referencedDeclaration", n.referenced_declaration)]
        }
        Return(n) => vec![RefAttr::opt_required(
            "functionReturnParameters",
            n.function_return_parameters,
        )],
        VariableDeclarationStatement(n) => vec![RefAttr {
            name: "assignments",
            required: true,
            shape: RefShape::NullableList(n.assignments.clone()),
        }],
        Identifier(n) => {
            vec![RefAttr::opt("referencedDeclaration", n.referenced_declaration)]
        }
        MemberAccess(n) => {
            vec![RefAttr::opt("referencedDeclaration", n.referenced_declaration)]
        }
        _ => Vec::new(),
    }
}

/// Apply an id substitution to every id-typed field of a variant,
/// structural and referential alike.
pub fn rewrite_ids(kind: &mut NodeKind, f: &dyn Fn(NodeId) -> NodeId) {
    use NodeKind::*;

    fn map_opt(id: &mut Option<NodeId>, f: &dyn Fn(NodeId) -> NodeId) {
        if let Some(id) = id {
            *id = f(*id);
        }
    }

    fn map_vec(ids: &mut [NodeId], f: &dyn Fn(NodeId) -> NodeId) {
        for id in ids {
            *id = f(*id);
        }
    }

    fn map_doc(doc: &mut Option<Documentation>, f: &dyn Fn(NodeId) -> NodeId) {
        if let Some(Documentation::Node(id)) = doc {
            *id = f(*id);
        }
    }

    match kind {
        SourceUnit(n) => {
            map_vec(&mut n.nodes, f);
            for id in n.exported_symbols.values_mut() {
                *id = f(*id);
            }
        }
        PragmaDirective(_) => {}
        ImportDirective(n) => {
            n.scope = f(n.scope);
            map_opt(&mut n.source_unit, f);
            for alias in &mut n.symbol_aliases {
                if let SymbolForeign::Node(id) = &mut alias.foreign {
                    *id = f(*id);
                }
            }
        }
        InheritanceSpecifier(n) => {
            n.base_name = f(n.base_name);
            map_vec(&mut n.arguments, f);
        }
        ModifierInvocation(n) => {
            n.modifier_name = f(n.modifier_name);
            map_vec(&mut n.arguments, f);
        }
        OverrideSpecifier(n) => map_vec(&mut n.overrides, f),
        ParameterList(n) => map_vec(&mut n.parameters, f),
        UsingForDirective(n) => {
            map_opt(&mut n.library_name, f);
            map_vec(&mut n.function_list, f);
            map_opt(&mut n.type_name, f);
        }
        StructuredDocumentation(_) => {}
        IdentifierPath(n) => map_opt(&mut n.referenced_declaration, f),

        ContractDefinition(n) => {
            n.scope = f(n.scope);
            map_vec(&mut n.linearized_base_contracts, f);
            map_vec(&mut n.used_errors, f);
            map_doc(&mut n.documentation, f);
            map_vec(&mut n.nodes, f);
        }
        FunctionDefinition(n) => {
            n.scope = f(n.scope);
            map_doc(&mut n.documentation, f);
            map_opt(&mut n.overrides, f);
            n.parameters = f(n.parameters);
            n.return_parameters = f(n.return_parameters);
            map_vec(&mut n.modifiers, f);
            map_opt(&mut n.body, f);
        }
        ModifierDefinition(n) => {
            map_doc(&mut n.documentation, f);
            map_opt(&mut n.overrides, f);
            n.parameters = f(n.parameters);
            map_opt(&mut n.body, f);
        }
        EventDefinition(n) => {
            map_doc(&mut n.documentation, f);
            n.parameters = f(n.parameters);
        }
        ErrorDefinition(n) => {
            map_doc(&mut n.documentation, f);
            n.parameters = f(n.parameters);
        }
        StructDefinition(n) => {
            n.scope = f(n.scope);
            map_vec(&mut n.members, f);
        }
        EnumDefinition(n) => map_vec(&mut n.members, f),
        EnumValue(_) => {}
        UserDefinedValueTypeDefinition(n) => n.underlying_type = f(n.underlying_type),
        VariableDeclaration(n) => {
            n.scope = f(n.scope);
            map_doc(&mut n.documentation, f);
            map_opt(&mut n.type_name, f);
            map_opt(&mut n.overrides, f);
            map_opt(&mut n.value, f);
        }

        ElementaryTypeName(_) => {}
        UserDefinedTypeName(n) => {
            map_opt(&mut n.path, f);
            map_opt(&mut n.referenced_declaration, f);
        }
        ArrayTypeName(n) => {
            n.base_type = f(n.base_type);
            map_opt(&mut n.length, f);
        }
        Mapping(n) => {
            n.key_type = f(n.key_type);
            n.value_type = f(n.value_type);
        }
        FunctionTypeName(n) => {
            n.parameter_types = f(n.parameter_types);
            n.return_parameter_types = f(n.return_parameter_types);
        }

        Block(n) => map_vec(&mut n.statements, f),
        UncheckedBlock(n) => map_vec(&mut n.statements, f),
        IfStatement(n) => {
            n.condition = f(n.condition);
            n.true_body = f(n.true_body);
            map_opt(&mut n.false_body, f);
        }
        ForStatement(n) => {
            map_opt(&mut n.initialization_expression, f);
            map_opt(&mut n.condition, f);
            map_opt(&mut n.loop_expression, f);
            n.body = f(n.body);
        }
        WhileStatement(n) => {
            n.condition = f(n.condition);
            n.body = f(n.body);
        }
        DoWhileStatement(n) => {
            n.condition = f(n.condition);
            n.body = f(n.body);
        }
        Return(n) => {
            map_opt(&mut n.function_return_parameters, f);
            map_opt(&mut n.expression, f);
        }
        Break(_) | Continue(_) | Throw(_) => {}
        EmitStatement(n) => n.event_call = f(n.event_call),
        RevertStatement(n) => n.error_call = f(n.error_call),
        ExpressionStatement(n) => n.expression = f(n.expression),
        VariableDeclarationStatement(n) => {
            for slot in &mut n.assignments {
                map_opt(slot, f);
            }
            map_vec(&mut n.declarations, f);
            map_opt(&mut n.initial_value, f);
        }
        TryStatement(n) => {
            n.external_call = f(n.external_call);
            map_vec(&mut n.clauses, f);
        }
        TryCatchClause(n) => {
            map_opt(&mut n.parameters, f);
            n.block = f(n.block);
        }
        InlineAssembly(_) => {}
        PlaceholderStatement(_) => {}

        Literal(_) => {}
        Identifier(n) => map_opt(&mut n.referenced_declaration, f),
        MemberAccess(n) => {
            n.expression = f(n.expression);
            map_opt(&mut n.referenced_declaration, f);
        }
        IndexAccess(n) => {
            n.base_expression = f(n.base_expression);
            map_opt(&mut n.index_expression, f);
        }
        IndexRangeAccess(n) => {
            n.base_expression = f(n.base_expression);
            map_opt(&mut n.start_expression, f);
            map_opt(&mut n.end_expression, f);
        }
        UnaryOperation(n) => n.sub_expression = f(n.sub_expression),
        BinaryOperation(n) => {
            n.left_expression = f(n.left_expression);
            n.right_expression = f(n.right_expression);
        }
        Assignment(n) => {
            n.left_hand_side = f(n.left_hand_side);
            n.right_hand_side = f(n.right_hand_side);
        }
        Conditional(n) => {
            n.condition = f(n.condition);
            n.true_expression = f(n.true_expression);
            n.false_expression = f(n.false_expression);
        }
        FunctionCall(n) => {
            n.expression = f(n.expression);
            map_vec(&mut n.arguments, f);
        }
        FunctionCallOptions(n) => {
            n.expression = f(n.expression);
            map_vec(&mut n.options, f);
        }
        NewExpression(n) => n.type_name = f(n.type_name),
        TupleExpression(n) => {
            for slot in &mut n.components {
                map_opt(slot, f);
            }
        }
        ElementaryTypeNameExpression(n) => {
            if let ElementaryTypeRef::Node(id) = &mut n.type_name {
                *id = f(*id);
            }
        }

        Extension(n) => map_vec(&mut n.children, f),
    }
}

/// The private ordered child list of a container variant, if this is one.
pub fn container_children(kind: &NodeKind) -> Option<&Vec<NodeId>> {
    match kind {
        NodeKind::SourceUnit(n) => Some(&n.nodes),
        NodeKind::ContractDefinition(n) => Some(&n.nodes),
        NodeKind::Block(n) => Some(&n.statements),
        NodeKind::UncheckedBlock(n) => Some(&n.statements),
        NodeKind::ParameterList(n) => Some(&n.parameters),
        NodeKind::Extension(n) => Some(&n.children),
        _ => None,
    }
}

/// Mutable access to a container's ordered child list.
pub fn container_children_mut(kind: &mut NodeKind) -> Option<&mut Vec<NodeId>> {
    match kind {
        NodeKind::SourceUnit(n) => Some(&mut n.nodes),
        NodeKind::ContractDefinition(n) => Some(&mut n.nodes),
        NodeKind::Block(n) => Some(&mut n.statements),
        NodeKind::UncheckedBlock(n) => Some(&mut n.statements),
        NodeKind::ParameterList(n) => Some(&mut n.parameters),
        NodeKind::Extension(n) => Some(&mut n.children),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::kinds::{BinaryOperation, EnumDefinition, IfStatement};

    #[test]
    fn test_children_respect_field_order() {
        let stmt = NodeKind::IfStatement(IfStatement {
            condition: NodeId(3),
            true_body: NodeId(4),
            false_body: Some(NodeId(5)),
        });
        assert_eq!(
            structural_children(&stmt),
            vec![NodeId(3), NodeId(4), NodeId(5)]
        );

        let stmt = NodeKind::IfStatement(IfStatement {
            condition: NodeId(3),
            true_body: NodeId(4),
            false_body: None,
        });
        assert_eq!(structural_children(&stmt), vec![NodeId(3), NodeId(4)]);
    }

    #[test]
    fn test_rewrite_ids_touches_every_field() {
        let mut kind = NodeKind::BinaryOperation(BinaryOperation {
            type_string: None,
            operator: "+".to_string(),
            left_expression: NodeId(1),
            right_expression: NodeId(2),
        });
        rewrite_ids(&mut kind, &|id| NodeId(id.0 + 10));
        assert_eq!(
            structural_children(&kind),
            vec![NodeId(11), NodeId(12)]
        );
    }

    #[test]
    fn test_container_detection() {
        let block = NodeKind::Block(crate::ast::kinds::Block { statements: vec![] });
        assert!(container_children(&block).is_some());

        let enum_def = NodeKind::EnumDefinition(EnumDefinition {
            name: "E".to_string(),
            members: vec![],
        });
        assert!(container_children(&enum_def).is_none());
    }
}
