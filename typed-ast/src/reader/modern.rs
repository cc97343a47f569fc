//! Builders for the modern compiler schema (0.4.12 and later).
//!
//! Modern nodes carry a `nodeType` tag and named child fields. Each
//! builder constructs its children first, then registers the node under
//! the compiler-assigned id.

use super::{json, ReadCtx};
use crate::ast::kinds::*;
use crate::ast::{
    ContractKind, Documentation, FunctionCallKind, FunctionKind, Mutability, NodeId,
    SourceLocation, StateMutability, StorageLocation, SymbolAlias, SymbolForeign, Visibility,
};
use crate::error::AstError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Build one node (and its subtree) from a modern JSON object.
pub(super) fn build(rd: &mut ReadCtx<'_>, v: &Value) -> Result<NodeId, AstError> {
    let src = json::node_src(v)?;
    let tag = json::str_field(v, "nodeType", &src)?.to_string();

    let cfg = rd.cfg;
    if let Some(builder) = cfg.custom_builder(&tag) {
        return builder(rd, v);
    }

    match tag.as_str() {
        "SourceUnit" => source_unit(rd, v, src),
        "PragmaDirective" => {
            let kind = NodeKind::PragmaDirective(PragmaDirective {
                literals: json::opt_string_array(v, "literals", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "ImportDirective" => import_directive(rd, v, src),
        "InheritanceSpecifier" => {
            let base_name = child(rd, v, "baseName", &src)?;
            let arguments = opt_child_list(rd, v, "arguments")?;
            rd.finish(
                v,
                src,
                NodeKind::InheritanceSpecifier(InheritanceSpecifier { base_name, arguments }),
            )
        }
        "ModifierInvocation" => {
            let modifier_name = child(rd, v, "modifierName", &src)?;
            let arguments = opt_child_list(rd, v, "arguments")?;
            rd.finish(
                v,
                src,
                NodeKind::ModifierInvocation(ModifierInvocation {
                    modifier_name,
                    arguments,
                    kind: json::opt_string_field(v, "kind"),
                }),
            )
        }
        "OverrideSpecifier" => {
            let overrides = opt_child_list(rd, v, "overrides")?;
            rd.finish(v, src, NodeKind::OverrideSpecifier(OverrideSpecifier { overrides }))
        }
        "ParameterList" => {
            let parameters = opt_child_list(rd, v, "parameters")?;
            rd.finish(v, src, NodeKind::ParameterList(ParameterList { parameters }))
        }
        "UsingForDirective" => using_for(rd, v, src),
        "StructuredDocumentation" => {
            let kind = NodeKind::StructuredDocumentation(StructuredDocumentation {
                text: json::string_field(v, "text", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "IdentifierPath" => {
            let kind = NodeKind::IdentifierPath(IdentifierPath {
                name: json::string_field(v, "name", &src)?,
                referenced_declaration: json::opt_id_field(v, "referencedDeclaration"),
            });
            rd.finish(v, src, kind)
        }

        "ContractDefinition" => contract(rd, v, src),
        "FunctionDefinition" => function(rd, v, src),
        "ModifierDefinition" => modifier(rd, v, src),
        "EventDefinition" => {
            let documentation = documentation(rd, v)?;
            let parameters = child(rd, v, "parameters", &src)?;
            rd.finish(
                v,
                src,
                NodeKind::EventDefinition(EventDefinition {
                    is_anonymous: json::opt_bool_field(v, "anonymous"),
                    name: json::string_field(v, "name", &src)?,
                    documentation,
                    parameters,
                }),
            )
        }
        "ErrorDefinition" => {
            let documentation = documentation(rd, v)?;
            let parameters = child(rd, v, "parameters", &src)?;
            rd.finish(
                v,
                src,
                NodeKind::ErrorDefinition(ErrorDefinition {
                    name: json::string_field(v, "name", &src)?,
                    documentation,
                    parameters,
                }),
            )
        }
        "StructDefinition" => {
            let members = child_list(rd, v, "members", &src)?;
            let kind = NodeKind::StructDefinition(StructDefinition {
                name: json::string_field(v, "name", &src)?,
                scope: rd.scope_of(v, &src)?,
                visibility: json::opt_enum_field(v, "visibility", &src)?
                    .unwrap_or(Visibility::Public),
                members,
            });
            rd.finish(v, src, kind)
        }
        "EnumDefinition" => {
            let members = child_list(rd, v, "members", &src)?;
            let kind = NodeKind::EnumDefinition(EnumDefinition {
                name: json::string_field(v, "name", &src)?,
                members,
            });
            rd.finish(v, src, kind)
        }
        "EnumValue" => {
            let kind = NodeKind::EnumValue(EnumValue {
                name: json::string_field(v, "name", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "UserDefinedValueTypeDefinition" => {
            let underlying_type = child(rd, v, "underlyingType", &src)?;
            let kind = NodeKind::UserDefinedValueTypeDefinition(UserDefinedValueTypeDefinition {
                name: json::string_field(v, "name", &src)?,
                underlying_type,
            });
            rd.finish(v, src, kind)
        }
        "VariableDeclaration" => variable(rd, v, src),

        "ElementaryTypeName" => {
            let kind = NodeKind::ElementaryTypeName(ElementaryTypeName {
                type_string: json::type_string(v),
                name: json::string_field(v, "name", &src)?,
                state_mutability: json::opt_enum_field(v, "stateMutability", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "UserDefinedTypeName" => {
            let path = opt_child(rd, v, "pathNode")?;
            let kind = NodeKind::UserDefinedTypeName(UserDefinedTypeName {
                type_string: json::type_string(v),
                name: json::opt_string_field(v, "name"),
                path,
                referenced_declaration: json::opt_id_field(v, "referencedDeclaration"),
            });
            rd.finish(v, src, kind)
        }
        "ArrayTypeName" => {
            let base_type = child(rd, v, "baseType", &src)?;
            let length = opt_child(rd, v, "length")?;
            let kind = NodeKind::ArrayTypeName(ArrayTypeName {
                type_string: json::type_string(v),
                base_type,
                length,
            });
            rd.finish(v, src, kind)
        }
        "Mapping" => {
            let key_type = child(rd, v, "keyType", &src)?;
            let value_type = child(rd, v, "valueType", &src)?;
            let kind = NodeKind::Mapping(Mapping {
                type_string: json::type_string(v),
                key_type,
                value_type,
            });
            rd.finish(v, src, kind)
        }
        "FunctionTypeName" => {
            let parameter_types = child(rd, v, "parameterTypes", &src)?;
            let return_parameter_types = child(rd, v, "returnParameterTypes", &src)?;
            let kind = NodeKind::FunctionTypeName(FunctionTypeName {
                type_string: json::type_string(v),
                visibility: json::opt_enum_field(v, "visibility", &src)?
                    .unwrap_or(Visibility::Internal),
                state_mutability: state_mutability(v, &src)?,
                parameter_types,
                return_parameter_types,
            });
            rd.finish(v, src, kind)
        }

        "Block" => {
            let statements = opt_child_list(rd, v, "statements")?;
            rd.finish(v, src, NodeKind::Block(Block { statements }))
        }
        "UncheckedBlock" => {
            let statements = opt_child_list(rd, v, "statements")?;
            rd.finish(v, src, NodeKind::UncheckedBlock(UncheckedBlock { statements }))
        }
        "IfStatement" => {
            let condition = child(rd, v, "condition", &src)?;
            let true_body = child(rd, v, "trueBody", &src)?;
            let false_body = opt_child(rd, v, "falseBody")?;
            rd.finish(
                v,
                src,
                NodeKind::IfStatement(IfStatement { condition, true_body, false_body }),
            )
        }
        "ForStatement" => {
            let initialization_expression = opt_child(rd, v, "initializationExpression")?;
            let condition = opt_child(rd, v, "condition")?;
            let loop_expression = opt_child(rd, v, "loopExpression")?;
            let body = child(rd, v, "body", &src)?;
            rd.finish(
                v,
                src,
                NodeKind::ForStatement(ForStatement {
                    initialization_expression,
                    condition,
                    loop_expression,
                    body,
                }),
            )
        }
        "WhileStatement" => {
            let condition = child(rd, v, "condition", &src)?;
            let body = child(rd, v, "body", &src)?;
            rd.finish(v, src, NodeKind::WhileStatement(WhileStatement { condition, body }))
        }
        "DoWhileStatement" => {
            let condition = child(rd, v, "condition", &src)?;
            let body = child(rd, v, "body", &src)?;
            rd.finish(v, src, NodeKind::DoWhileStatement(DoWhileStatement { condition, body }))
        }
        "Return" => {
            let expression = opt_child(rd, v, "expression")?;
            let kind = NodeKind::Return(Return {
                function_return_parameters: json::opt_id_field(v, "functionReturnParameters"),
                expression,
            });
            rd.finish(v, src, kind)
        }
        "Break" => rd.finish(v, src, NodeKind::Break(Break)),
        "Continue" => rd.finish(v, src, NodeKind::Continue(Continue)),
        "Throw" => rd.finish(v, src, NodeKind::Throw(Throw)),
        "EmitStatement" => {
            let event_call = child(rd, v, "eventCall", &src)?;
            rd.finish(v, src, NodeKind::EmitStatement(EmitStatement { event_call }))
        }
        "RevertStatement" => {
            let error_call = child(rd, v, "errorCall", &src)?;
            rd.finish(v, src, NodeKind::RevertStatement(RevertStatement { error_call }))
        }
        "ExpressionStatement" => {
            let expression = child(rd, v, "expression", &src)?;
            rd.finish(v, src, NodeKind::ExpressionStatement(ExpressionStatement { expression }))
        }
        "VariableDeclarationStatement" => {
            let assignments = json::nullable_id_array(v, "assignments", &src)?;
            let declarations = nullable_child_list(rd, v, "declarations")?
                .into_iter()
                .flatten()
                .collect();
            let initial_value = opt_child(rd, v, "initialValue")?;
            rd.finish(
                v,
                src,
                NodeKind::VariableDeclarationStatement(VariableDeclarationStatement {
                    assignments,
                    declarations,
                    initial_value,
                }),
            )
        }
        "TryStatement" => {
            let external_call = child(rd, v, "externalCall", &src)?;
            let clauses = child_list(rd, v, "clauses", &src)?;
            rd.finish(v, src, NodeKind::TryStatement(TryStatement { external_call, clauses }))
        }
        "TryCatchClause" => {
            let parameters = opt_child(rd, v, "parameters")?;
            let block = child(rd, v, "block", &src)?;
            let kind = NodeKind::TryCatchClause(TryCatchClause {
                error_name: json::opt_string_field(v, "errorName").unwrap_or_default(),
                parameters,
                block,
            });
            rd.finish(v, src, kind)
        }
        "InlineAssembly" => {
            let kind = NodeKind::InlineAssembly(InlineAssembly {
                operations: json::opt_string_field(v, "operations"),
            });
            rd.finish(v, src, kind)
        }
        "PlaceholderStatement" => {
            rd.finish(v, src, NodeKind::PlaceholderStatement(PlaceholderStatement))
        }

        "Literal" => {
            // Early modern output spells the kind `token`.
            let literal_kind = json::opt_enum_field(v, "kind", &src)?
                .or(json::opt_enum_field(v, "token", &src)?)
                .unwrap_or(crate::ast::LiteralKind::Number);
            let kind = NodeKind::Literal(Literal {
                type_string: json::type_string(v),
                kind: literal_kind,
                hex_value: json::opt_string_field(v, "hexValue"),
                value: json::opt_string_field(v, "value"),
                subdenomination: json::opt_string_field(v, "subdenomination"),
            });
            rd.finish(v, src, kind)
        }
        "Identifier" => {
            let kind = NodeKind::Identifier(Identifier {
                type_string: json::type_string(v),
                name: json::string_field(v, "name", &src)?,
                referenced_declaration: json::opt_id_field(v, "referencedDeclaration"),
            });
            rd.finish(v, src, kind)
        }
        "MemberAccess" => {
            let expression = child(rd, v, "expression", &src)?;
            let kind = NodeKind::MemberAccess(MemberAccess {
                type_string: json::type_string(v),
                expression,
                member_name: json::string_field(v, "memberName", &src)?,
                referenced_declaration: json::opt_id_field(v, "referencedDeclaration"),
            });
            rd.finish(v, src, kind)
        }
        "IndexAccess" => {
            let base_expression = child(rd, v, "baseExpression", &src)?;
            let index_expression = opt_child(rd, v, "indexExpression")?;
            let kind = NodeKind::IndexAccess(IndexAccess {
                type_string: json::type_string(v),
                base_expression,
                index_expression,
            });
            rd.finish(v, src, kind)
        }
        "IndexRangeAccess" => {
            let base_expression = child(rd, v, "baseExpression", &src)?;
            let start_expression = opt_child(rd, v, "startExpression")?;
            let end_expression = opt_child(rd, v, "endExpression")?;
            let kind = NodeKind::IndexRangeAccess(IndexRangeAccess {
                type_string: json::type_string(v),
                base_expression,
                start_expression,
                end_expression,
            });
            rd.finish(v, src, kind)
        }
        "UnaryOperation" => {
            let sub_expression = child(rd, v, "subExpression", &src)?;
            let kind = NodeKind::UnaryOperation(UnaryOperation {
                type_string: json::type_string(v),
                is_prefix: json::bool_field(v, "prefix", &src)?,
                operator: json::string_field(v, "operator", &src)?,
                sub_expression,
            });
            rd.finish(v, src, kind)
        }
        "BinaryOperation" => {
            let left_expression = child(rd, v, "leftExpression", &src)?;
            let right_expression = child(rd, v, "rightExpression", &src)?;
            let kind = NodeKind::BinaryOperation(BinaryOperation {
                type_string: json::type_string(v),
                operator: json::string_field(v, "operator", &src)?,
                left_expression,
                right_expression,
            });
            rd.finish(v, src, kind)
        }
        "Assignment" => {
            let left_hand_side = child(rd, v, "leftHandSide", &src)?;
            let right_hand_side = child(rd, v, "rightHandSide", &src)?;
            let kind = NodeKind::Assignment(Assignment {
                type_string: json::type_string(v),
                operator: json::string_field(v, "operator", &src)?,
                left_hand_side,
                right_hand_side,
            });
            rd.finish(v, src, kind)
        }
        "Conditional" => {
            let condition = child(rd, v, "condition", &src)?;
            let true_expression = child(rd, v, "trueExpression", &src)?;
            let false_expression = child(rd, v, "falseExpression", &src)?;
            let kind = NodeKind::Conditional(Conditional {
                type_string: json::type_string(v),
                condition,
                true_expression,
                false_expression,
            });
            rd.finish(v, src, kind)
        }
        "FunctionCall" => {
            let expression = child(rd, v, "expression", &src)?;
            let arguments = opt_child_list(rd, v, "arguments")?;
            let kind = NodeKind::FunctionCall(FunctionCall {
                type_string: json::type_string(v),
                kind: call_kind(v, &src)?,
                expression,
                arguments,
                names: json::opt_string_array(v, "names", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "FunctionCallOptions" => {
            let expression = child(rd, v, "expression", &src)?;
            let options = opt_child_list(rd, v, "options")?;
            let kind = NodeKind::FunctionCallOptions(FunctionCallOptions {
                type_string: json::type_string(v),
                expression,
                names: json::opt_string_array(v, "names", &src)?,
                options,
            });
            rd.finish(v, src, kind)
        }
        "NewExpression" => {
            let type_name = child(rd, v, "typeName", &src)?;
            let kind = NodeKind::NewExpression(NewExpression {
                type_string: json::type_string(v),
                type_name,
            });
            rd.finish(v, src, kind)
        }
        "TupleExpression" => {
            let components = nullable_child_list(rd, v, "components")?;
            let kind = NodeKind::TupleExpression(TupleExpression {
                type_string: json::type_string(v),
                is_inline_array: json::opt_bool_field(v, "isInlineArray"),
                components,
            });
            rd.finish(v, src, kind)
        }
        "ElementaryTypeNameExpression" => {
            let type_name = match json::field(v, "typeName", &src)? {
                Value::String(s) => ElementaryTypeRef::Raw(s.clone()),
                nested => ElementaryTypeRef::Node(build(rd, nested)?),
            };
            let kind = NodeKind::ElementaryTypeNameExpression(ElementaryTypeNameExpression {
                type_string: json::type_string(v),
                type_name,
            });
            rd.finish(v, src, kind)
        }

        _ => Err(AstError::UnknownNodeKind {
            tag,
            src: src.to_string(),
        }),
    }
}

fn source_unit(rd: &mut ReadCtx<'_>, v: &Value, src: SourceLocation) -> Result<NodeId, AstError> {
    rd.enclosing_unit = Some(json::node_id(v, &src)?);
    let nodes = opt_child_list(rd, v, "nodes")?;

    let mut exported_symbols = BTreeMap::new();
    if let Some(map) = v.get("exportedSymbols").and_then(Value::as_object) {
        for (name, ids) in map {
            // The compiler records one id per symbol, wrapped in an array.
            let first = match ids {
                Value::Array(a) => a.first().and_then(Value::as_u64),
                other => other.as_u64(),
            };
            if let Some(id) = first.and_then(|id| u32::try_from(id).ok()) {
                exported_symbols.insert(name.clone(), NodeId(id));
            }
        }
    }

    let kind = NodeKind::SourceUnit(SourceUnit {
        source_entry_key: rd.source_key.clone(),
        source_list_index: u32::try_from(src.file).ok(),
        absolute_path: json::opt_string_field(v, "absolutePath"),
        exported_symbols,
        license: json::opt_string_field(v, "license"),
        nodes,
    });
    rd.finish(v, src, kind)
}

fn import_directive(
    rd: &mut ReadCtx<'_>,
    v: &Value,
    src: SourceLocation,
) -> Result<NodeId, AstError> {
    let mut symbol_aliases = Vec::new();
    for item in json::opt_array_field(v, "symbolAliases") {
        let local = json::opt_string_field(item, "local");
        let foreign = match item.get("foreign") {
            Some(nested) if nested.is_object() => SymbolForeign::Node(build(rd, nested)?),
            // Mid-range compilers emit a bare id here; the alias name is
            // all that can be trusted then.
            _ => SymbolForeign::Name(local.clone().unwrap_or_default()),
        };
        symbol_aliases.push(SymbolAlias { foreign, local });
    }

    let kind = NodeKind::ImportDirective(ImportDirective {
        file: json::string_field(v, "file", &src)?,
        absolute_path: json::opt_string_field(v, "absolutePath"),
        unit_alias: json::opt_string_field(v, "unitAlias").unwrap_or_default(),
        symbol_aliases,
        scope: rd.scope_of(v, &src)?,
        source_unit: json::opt_id_field(v, "sourceUnit"),
    });
    rd.finish(v, src, kind)
}

fn using_for(rd: &mut ReadCtx<'_>, v: &Value, src: SourceLocation) -> Result<NodeId, AstError> {
    let library_name = opt_child(rd, v, "libraryName")?;
    let mut function_list = Vec::new();
    for item in json::opt_array_field(v, "functionList") {
        if let Some(nested) = item.get("function").or_else(|| item.get("definition")) {
            function_list.push(build(rd, nested)?);
        }
    }
    let type_name = opt_child(rd, v, "typeName")?;
    let kind = NodeKind::UsingForDirective(UsingForDirective {
        library_name,
        function_list,
        type_name,
        is_global: json::opt_bool_field(v, "global"),
    });
    rd.finish(v, src, kind)
}

fn contract(rd: &mut ReadCtx<'_>, v: &Value, src: SourceLocation) -> Result<NodeId, AstError> {
    let documentation = documentation(rd, v)?;
    // Inheritance specifiers precede the body declarations in the child list.
    let mut nodes = opt_child_list(rd, v, "baseContracts")?;
    nodes.extend(opt_child_list(rd, v, "nodes")?);

    let kind = NodeKind::ContractDefinition(ContractDefinition {
        name: json::string_field(v, "name", &src)?,
        scope: rd.scope_of(v, &src)?,
        kind: json::opt_enum_field(v, "contractKind", &src)?.unwrap_or(ContractKind::Contract),
        is_abstract: json::opt_bool_field(v, "abstract"),
        fully_implemented: v
            .get("fullyImplemented")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        linearized_base_contracts: json::opt_id_array(v, "linearizedBaseContracts", &src)?,
        used_errors: json::opt_id_array(v, "usedErrors", &src)?,
        documentation,
        nodes,
    });
    rd.finish(v, src, kind)
}

fn function(rd: &mut ReadCtx<'_>, v: &Value, src: SourceLocation) -> Result<NodeId, AstError> {
    let documentation = documentation(rd, v)?;
    let overrides = opt_child(rd, v, "overrides")?;
    let parameters = child(rd, v, "parameters", &src)?;
    let return_parameters = child(rd, v, "returnParameters", &src)?;
    let modifiers = opt_child_list(rd, v, "modifiers")?;
    let body = opt_child(rd, v, "body")?;

    let name = json::string_field(v, "name", &src)?;
    let is_constructor = json::opt_bool_field(v, "isConstructor");
    // `kind` appeared in 0.5.0; older modern output marks constructors and
    // fallbacks indirectly.
    let kind = match json::opt_enum_field::<FunctionKind>(v, "kind", &src)? {
        Some(kind) => kind,
        None if is_constructor => FunctionKind::Constructor,
        None if name.is_empty() => FunctionKind::Fallback,
        None => FunctionKind::Function,
    };

    let kind = NodeKind::FunctionDefinition(FunctionDefinition {
        scope: rd.scope_of(v, &src)?,
        is_constructor: is_constructor || kind == FunctionKind::Constructor,
        kind,
        name,
        is_virtual: json::opt_bool_field(v, "virtual"),
        visibility: json::opt_enum_field(v, "visibility", &src)?.unwrap_or(Visibility::Public),
        state_mutability: state_mutability(v, &src)?,
        documentation,
        overrides,
        parameters,
        return_parameters,
        modifiers,
        body,
    });
    rd.finish(v, src, kind)
}

fn modifier(rd: &mut ReadCtx<'_>, v: &Value, src: SourceLocation) -> Result<NodeId, AstError> {
    let documentation = documentation(rd, v)?;
    let overrides = opt_child(rd, v, "overrides")?;
    let parameters = child(rd, v, "parameters", &src)?;
    let body = opt_child(rd, v, "body")?;

    let kind = NodeKind::ModifierDefinition(ModifierDefinition {
        name: json::string_field(v, "name", &src)?,
        is_virtual: json::opt_bool_field(v, "virtual"),
        visibility: json::opt_enum_field(v, "visibility", &src)?.unwrap_or(Visibility::Internal),
        documentation,
        overrides,
        parameters,
        body,
    });
    rd.finish(v, src, kind)
}

fn variable(rd: &mut ReadCtx<'_>, v: &Value, src: SourceLocation) -> Result<NodeId, AstError> {
    let documentation = documentation(rd, v)?;
    let type_name = opt_child(rd, v, "typeName")?;
    let overrides = opt_child(rd, v, "overrides")?;
    let value = opt_child(rd, v, "value")?;

    let is_constant = json::opt_bool_field(v, "constant");
    let mutability = match json::opt_enum_field(v, "mutability", &src)? {
        Some(m) => m,
        None if is_constant => Mutability::Constant,
        None => Mutability::Mutable,
    };

    let kind = NodeKind::VariableDeclaration(VariableDeclaration {
        is_constant,
        is_indexed: json::opt_bool_field(v, "indexed"),
        name: json::string_field(v, "name", &src)?,
        scope: rd.scope_of(v, &src)?,
        is_state_variable: json::opt_bool_field(v, "stateVariable"),
        storage_location: json::opt_enum_field(v, "storageLocation", &src)?
            .unwrap_or(StorageLocation::Default),
        visibility: json::opt_enum_field(v, "visibility", &src)?.unwrap_or(Visibility::Internal),
        mutability,
        type_string: json::type_string(v),
        documentation,
        type_name,
        overrides,
        value,
    });
    rd.finish(v, src, kind)
}

/// A required named child object.
fn child(
    rd: &mut ReadCtx<'_>,
    v: &Value,
    key: &str,
    src: &SourceLocation,
) -> Result<NodeId, AstError> {
    build(rd, json::field(v, key, src)?)
}

/// An optional named child object; absent and `null` read as `None`.
fn opt_child(rd: &mut ReadCtx<'_>, v: &Value, key: &str) -> Result<Option<NodeId>, AstError> {
    match v.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(nested) => build(rd, nested).map(Some),
    }
}

/// A required array of child objects.
fn child_list(
    rd: &mut ReadCtx<'_>,
    v: &Value,
    key: &str,
    src: &SourceLocation,
) -> Result<Vec<NodeId>, AstError> {
    json::array_field(v, key, src)?
        .iter()
        .map(|item| build(rd, item))
        .collect()
}

/// Like [`child_list`], but absent and `null` read as empty.
fn opt_child_list(rd: &mut ReadCtx<'_>, v: &Value, key: &str) -> Result<Vec<NodeId>, AstError> {
    json::opt_array_field(v, key)
        .iter()
        .map(|item| build(rd, item))
        .collect()
}

/// An array of child objects with `null` holes preserved.
fn nullable_child_list(
    rd: &mut ReadCtx<'_>,
    v: &Value,
    key: &str,
) -> Result<Vec<Option<NodeId>>, AstError> {
    json::opt_array_field(v, key)
        .iter()
        .map(|item| match item {
            Value::Null => Ok(None),
            nested => build(rd, nested).map(Some),
        })
        .collect()
}

/// Documentation is a plain string up to 0.6.2 and a structured node after.
fn documentation(rd: &mut ReadCtx<'_>, v: &Value) -> Result<Option<Documentation>, AstError> {
    match v.get("documentation") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(Documentation::Text(text.clone()))),
        Some(nested) => Ok(Some(Documentation::Node(build(rd, nested)?))),
    }
}

/// `stateMutability` appeared in 0.4.16; older modern output carries
/// `payable`/`constant` flags instead.
fn state_mutability(v: &Value, src: &SourceLocation) -> Result<StateMutability, AstError> {
    if let Some(m) = json::opt_enum_field(v, "stateMutability", src)? {
        return Ok(m);
    }
    Ok(if json::opt_bool_field(v, "payable") {
        StateMutability::Payable
    } else if json::opt_bool_field(v, "constant") {
        StateMutability::View
    } else {
        StateMutability::NonPayable
    })
}

/// `kind` appeared on calls in 0.5.0; older modern output carries flags.
fn call_kind(v: &Value, src: &SourceLocation) -> Result<FunctionCallKind, AstError> {
    if let Some(kind) = json::opt_enum_field(v, "kind", src)? {
        return Ok(kind);
    }
    Ok(if json::opt_bool_field(v, "isStructConstructorCall") {
        FunctionCallKind::StructConstructorCall
    } else if json::opt_bool_field(v, "type_conversion") || json::opt_bool_field(v, "typeConversion")
    {
        FunctionCallKind::TypeConversion
    } else {
        FunctionCallKind::FunctionCall
    })
}
