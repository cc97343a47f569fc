//! Builders for the legacy compiler schema (before 0.4.12, and the
//! `legacyAST` output of later compilers).
//!
//! Legacy nodes carry a `name` tag, a flat `attributes` object and a
//! positional `children` array. Children are built first, then interpreted
//! by position and tag per variant. Legacy quirks preserved here:
//! documentation is plain text, `assignments` encodes omitted tuple
//! positions as `null`, and import symbol aliases expose a partial
//! `foreign` object of which only the name is trustworthy.

use super::{json, ReadCtx};
use crate::ast::kinds::*;
use crate::ast::{
    ContractKind, Documentation, FunctionCallKind, FunctionKind, LiteralKind, Mutability, NodeId,
    SourceLocation, StateMutability, StorageLocation, SymbolAlias, SymbolForeign, Visibility,
};
use crate::error::AstError;
use serde_json::Value;
use std::collections::BTreeMap;

fn mismatch(src: &SourceLocation, reason: impl Into<String>) -> AstError {
    AstError::SchemaMismatch {
        src: src.to_string(),
        reason: reason.into(),
    }
}

/// Build one node (and its subtree) from a legacy JSON object.
pub(super) fn build(rd: &mut ReadCtx<'_>, v: &Value) -> Result<NodeId, AstError> {
    let src = json::node_src(v)?;
    let tag = json::str_field(v, "name", &src)?.to_string();

    let cfg = rd.cfg;
    if let Some(builder) = cfg.custom_builder(&tag) {
        return builder(rd, v);
    }

    // The unit's own id is known before its children are built; record it
    // so declarations lacking an explicit scope can fall back to it.
    if tag == "SourceUnit" {
        rd.enclosing_unit = Some(json::node_id(v, &src)?);
    }

    let kids: Vec<NodeId> = json::opt_array_field(v, "children")
        .iter()
        .map(|c| build(rd, c))
        .collect::<Result<_, _>>()?;

    static NO_ATTRS: Value = Value::Null;
    let attrs = v.get("attributes").unwrap_or(&NO_ATTRS);

    match tag.as_str() {
        "SourceUnit" => {
            let mut exported_symbols = BTreeMap::new();
            if let Some(map) = attrs.get("exportedSymbols").and_then(Value::as_object) {
                for (name, ids) in map {
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
                absolute_path: json::opt_string_field(attrs, "absolutePath"),
                exported_symbols,
                license: json::opt_string_field(attrs, "license"),
                nodes: kids,
            });
            rd.finish(v, src, kind)
        }
        "PragmaDirective" => {
            let kind = NodeKind::PragmaDirective(PragmaDirective {
                literals: json::opt_string_array(attrs, "literals", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "ImportDirective" => {
            let mut symbol_aliases = Vec::new();
            for item in json::opt_array_field(attrs, "symbolAliases") {
                let local = json::opt_string_field(item, "local");
                symbol_aliases.push(SymbolAlias {
                    foreign: SymbolForeign::Name(foreign_name(item)),
                    local,
                });
            }
            let kind = NodeKind::ImportDirective(ImportDirective {
                file: json::string_field(attrs, "file", &src)?,
                absolute_path: json::opt_string_field(attrs, "absolutePath"),
                unit_alias: json::opt_string_field(attrs, "unitAlias").unwrap_or_default(),
                symbol_aliases,
                scope: rd.scope_of(attrs, &src)?,
                source_unit: json::opt_id_field(attrs, "SourceUnit"),
            });
            rd.finish(v, src, kind)
        }
        "InheritanceSpecifier" => {
            let (base_name, arguments) = split_first(&kids, &src, "base name")?;
            rd.finish(
                v,
                src,
                NodeKind::InheritanceSpecifier(InheritanceSpecifier {
                    base_name,
                    arguments,
                }),
            )
        }
        "ModifierInvocation" => {
            let (modifier_name, arguments) = split_first(&kids, &src, "modifier name")?;
            rd.finish(
                v,
                src,
                NodeKind::ModifierInvocation(ModifierInvocation {
                    modifier_name,
                    arguments,
                    kind: None,
                }),
            )
        }
        "ParameterList" => {
            rd.finish(v, src, NodeKind::ParameterList(ParameterList { parameters: kids }))
        }
        "UsingForDirective" => {
            let kind = NodeKind::UsingForDirective(UsingForDirective {
                library_name: kids.first().copied(),
                function_list: Vec::new(),
                type_name: kids.get(1).copied(),
                is_global: false,
            });
            rd.finish(v, src, kind)
        }

        "ContractDefinition" => {
            let kind = NodeKind::ContractDefinition(ContractDefinition {
                name: json::string_field(attrs, "name", &src)?,
                scope: rd.scope_of(attrs, &src)?,
                kind: json::opt_enum_field(attrs, "contractKind", &src)?
                    .unwrap_or(ContractKind::Contract),
                is_abstract: false,
                fully_implemented: attrs
                    .get("fullyImplemented")
                    .and_then(Value::as_bool)
                    .unwrap_or(true),
                linearized_base_contracts: json::opt_id_array(
                    attrs,
                    "linearizedBaseContracts",
                    &src,
                )?,
                used_errors: Vec::new(),
                documentation: text_documentation(attrs),
                nodes: kids,
            });
            rd.finish(v, src, kind)
        }
        "FunctionDefinition" => function(rd, v, src, attrs, &kids),
        "ModifierDefinition" => {
            let mut parameters = None;
            let mut body = None;
            for kid in &kids {
                match rd.tag_of(*kid)? {
                    NodeTag::ParameterList => parameters = Some(*kid),
                    NodeTag::Block => body = Some(*kid),
                    other => {
                        return Err(mismatch(
                            &src,
                            format!("unexpected modifier child: {}", other),
                        ))
                    }
                }
            }
            let kind = NodeKind::ModifierDefinition(ModifierDefinition {
                name: json::string_field(attrs, "name", &src)?,
                is_virtual: false,
                visibility: json::opt_enum_field(attrs, "visibility", &src)?
                    .unwrap_or(Visibility::Internal),
                documentation: text_documentation(attrs),
                overrides: None,
                parameters: parameters
                    .ok_or_else(|| mismatch(&src, "modifier without a parameter list"))?,
                body,
            });
            rd.finish(v, src, kind)
        }
        "EventDefinition" => {
            let parameters = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "event without a parameter list"))?;
            let kind = NodeKind::EventDefinition(EventDefinition {
                is_anonymous: json::opt_bool_field(attrs, "anonymous"),
                name: json::string_field(attrs, "name", &src)?,
                documentation: text_documentation(attrs),
                parameters,
            });
            rd.finish(v, src, kind)
        }
        "StructDefinition" => {
            let kind = NodeKind::StructDefinition(StructDefinition {
                name: json::string_field(attrs, "name", &src)?,
                scope: rd.scope_of(attrs, &src)?,
                visibility: json::opt_enum_field(attrs, "visibility", &src)?
                    .unwrap_or(Visibility::Public),
                members: kids,
            });
            rd.finish(v, src, kind)
        }
        "EnumDefinition" => {
            let kind = NodeKind::EnumDefinition(EnumDefinition {
                name: json::string_field(attrs, "name", &src)?,
                members: kids,
            });
            rd.finish(v, src, kind)
        }
        "EnumValue" => {
            let kind = NodeKind::EnumValue(EnumValue {
                name: json::string_field(attrs, "name", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "VariableDeclaration" => variable(rd, v, src, attrs, &kids),

        "ElementaryTypeName" => {
            let kind = NodeKind::ElementaryTypeName(ElementaryTypeName {
                type_string: json::opt_string_field(attrs, "type"),
                name: json::string_field(attrs, "name", &src)?,
                state_mutability: json::opt_enum_field(attrs, "stateMutability", &src)?,
            });
            rd.finish(v, src, kind)
        }
        "UserDefinedTypeName" => {
            let kind = NodeKind::UserDefinedTypeName(UserDefinedTypeName {
                type_string: json::opt_string_field(attrs, "type"),
                name: json::opt_string_field(attrs, "name"),
                path: None,
                referenced_declaration: json::opt_id_field(attrs, "referencedDeclaration"),
            });
            rd.finish(v, src, kind)
        }
        "ArrayTypeName" => {
            let (base_type, rest) = split_first(&kids, &src, "array base type")?;
            let kind = NodeKind::ArrayTypeName(ArrayTypeName {
                type_string: json::opt_string_field(attrs, "type"),
                base_type,
                length: rest.first().copied(),
            });
            rd.finish(v, src, kind)
        }
        "Mapping" => {
            let key_type = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "mapping without a key type"))?;
            let value_type = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "mapping without a value type"))?;
            let kind = NodeKind::Mapping(Mapping {
                type_string: json::opt_string_field(attrs, "type"),
                key_type,
                value_type,
            });
            rd.finish(v, src, kind)
        }
        "FunctionTypeName" => {
            let parameter_types = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "function type without parameter types"))?;
            let return_parameter_types = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "function type without return parameter types"))?;
            let kind = NodeKind::FunctionTypeName(FunctionTypeName {
                type_string: json::opt_string_field(attrs, "type"),
                visibility: json::opt_enum_field(attrs, "visibility", &src)?
                    .unwrap_or(Visibility::Internal),
                state_mutability: legacy_state_mutability(attrs, &src)?,
                parameter_types,
                return_parameter_types,
            });
            rd.finish(v, src, kind)
        }

        "Block" => rd.finish(v, src, NodeKind::Block(Block { statements: kids })),
        "IfStatement" => {
            let condition = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "if without a condition"))?;
            let true_body = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "if without a body"))?;
            let kind = NodeKind::IfStatement(IfStatement {
                condition,
                true_body,
                false_body: kids.get(2).copied(),
            });
            rd.finish(v, src, kind)
        }
        "ForStatement" => for_statement(rd, v, src, &kids),
        "WhileStatement" => {
            let condition = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "while without a condition"))?;
            let body = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "while without a body"))?;
            rd.finish(v, src, NodeKind::WhileStatement(WhileStatement { condition, body }))
        }
        "DoWhileStatement" => {
            let condition = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "do-while without a condition"))?;
            let body = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "do-while without a body"))?;
            rd.finish(v, src, NodeKind::DoWhileStatement(DoWhileStatement { condition, body }))
        }
        "Return" => {
            let kind = NodeKind::Return(Return {
                function_return_parameters: json::opt_id_field(attrs, "functionReturnParameters"),
                expression: kids.first().copied(),
            });
            rd.finish(v, src, kind)
        }
        "Break" => rd.finish(v, src, NodeKind::Break(Break)),
        "Continue" => rd.finish(v, src, NodeKind::Continue(Continue)),
        "Throw" => rd.finish(v, src, NodeKind::Throw(Throw)),
        "EmitStatement" => {
            let event_call = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "emit without a call"))?;
            rd.finish(v, src, NodeKind::EmitStatement(EmitStatement { event_call }))
        }
        "ExpressionStatement" => {
            let expression = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "expression statement without an expression"))?;
            rd.finish(v, src, NodeKind::ExpressionStatement(ExpressionStatement { expression }))
        }
        "VariableDeclarationStatement" => {
            // Leading variable declarations, then an optional initializer.
            let mut declarations = Vec::new();
            let mut initial_value = None;
            for kid in &kids {
                if rd.tag_of(*kid)? == NodeTag::VariableDeclaration && initial_value.is_none() {
                    declarations.push(*kid);
                } else {
                    initial_value = Some(*kid);
                }
            }
            let kind = NodeKind::VariableDeclarationStatement(VariableDeclarationStatement {
                assignments: json::nullable_id_array(attrs, "assignments", &src)?,
                declarations,
                initial_value,
            });
            rd.finish(v, src, kind)
        }
        "TryStatement" => {
            let (external_call, clauses) = split_first(&kids, &src, "tried call")?;
            rd.finish(v, src, NodeKind::TryStatement(TryStatement { external_call, clauses }))
        }
        "TryCatchClause" => {
            let mut parameters = None;
            let mut block = None;
            for kid in &kids {
                match rd.tag_of(*kid)? {
                    NodeTag::ParameterList => parameters = Some(*kid),
                    _ => block = Some(*kid),
                }
            }
            let kind = NodeKind::TryCatchClause(TryCatchClause {
                error_name: json::opt_string_field(attrs, "errorName").unwrap_or_default(),
                parameters,
                block: block.ok_or_else(|| mismatch(&src, "catch clause without a block"))?,
            });
            rd.finish(v, src, kind)
        }
        "InlineAssembly" => {
            let kind = NodeKind::InlineAssembly(InlineAssembly {
                operations: json::opt_string_field(attrs, "operations"),
            });
            rd.finish(v, src, kind)
        }
        "PlaceholderStatement" => {
            rd.finish(v, src, NodeKind::PlaceholderStatement(PlaceholderStatement))
        }

        "Literal" => {
            let kind = json::opt_string_field(attrs, "token")
                .or_else(|| json::opt_string_field(attrs, "kind"))
                .and_then(|t| t.parse::<LiteralKind>().ok())
                .unwrap_or(LiteralKind::Number);
            let kind = NodeKind::Literal(Literal {
                type_string: json::opt_string_field(attrs, "type"),
                kind,
                hex_value: json::opt_string_field(attrs, "hexvalue")
                    .or_else(|| json::opt_string_field(attrs, "hexValue")),
                value: json::opt_string_field(attrs, "value"),
                subdenomination: json::opt_string_field(attrs, "subdenomination"),
            });
            rd.finish(v, src, kind)
        }
        "Identifier" => {
            // Legacy identifiers carry their name in `value`.
            let name = json::opt_string_field(attrs, "value")
                .ok_or_else(|| mismatch(&src, "identifier without a value"))?;
            let kind = NodeKind::Identifier(Identifier {
                type_string: json::opt_string_field(attrs, "type"),
                name,
                referenced_declaration: json::opt_id_field(attrs, "referencedDeclaration"),
            });
            rd.finish(v, src, kind)
        }
        "MemberAccess" => {
            let expression = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "member access without a base"))?;
            let kind = NodeKind::MemberAccess(MemberAccess {
                type_string: json::opt_string_field(attrs, "type"),
                expression,
                member_name: json::string_field(attrs, "member_name", &src)?,
                referenced_declaration: json::opt_id_field(attrs, "referencedDeclaration"),
            });
            rd.finish(v, src, kind)
        }
        "IndexAccess" => {
            let (base_expression, rest) = split_first(&kids, &src, "index base")?;
            let kind = NodeKind::IndexAccess(IndexAccess {
                type_string: json::opt_string_field(attrs, "type"),
                base_expression,
                index_expression: rest.first().copied(),
            });
            rd.finish(v, src, kind)
        }
        "UnaryOperation" => {
            let sub_expression = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "unary operation without an operand"))?;
            let kind = NodeKind::UnaryOperation(UnaryOperation {
                type_string: json::opt_string_field(attrs, "type"),
                is_prefix: json::opt_bool_field(attrs, "prefix"),
                operator: json::string_field(attrs, "operator", &src)?,
                sub_expression,
            });
            rd.finish(v, src, kind)
        }
        "BinaryOperation" => {
            let left_expression = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "binary operation without a left operand"))?;
            let right_expression = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "binary operation without a right operand"))?;
            let kind = NodeKind::BinaryOperation(BinaryOperation {
                type_string: json::opt_string_field(attrs, "type"),
                operator: json::string_field(attrs, "operator", &src)?,
                left_expression,
                right_expression,
            });
            rd.finish(v, src, kind)
        }
        "Assignment" => {
            let left_hand_side = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "assignment without a left-hand side"))?;
            let right_hand_side = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "assignment without a right-hand side"))?;
            let kind = NodeKind::Assignment(Assignment {
                type_string: json::opt_string_field(attrs, "type"),
                operator: json::string_field(attrs, "operator", &src)?,
                left_hand_side,
                right_hand_side,
            });
            rd.finish(v, src, kind)
        }
        "Conditional" => {
            let condition = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "conditional without a condition"))?;
            let true_expression = *kids
                .get(1)
                .ok_or_else(|| mismatch(&src, "conditional without a true branch"))?;
            let false_expression = *kids
                .get(2)
                .ok_or_else(|| mismatch(&src, "conditional without a false branch"))?;
            let kind = NodeKind::Conditional(Conditional {
                type_string: json::opt_string_field(attrs, "type"),
                condition,
                true_expression,
                false_expression,
            });
            rd.finish(v, src, kind)
        }
        "FunctionCall" => {
            let (expression, arguments) = split_first(&kids, &src, "callee")?;
            let call_kind = if json::opt_bool_field(attrs, "isStructConstructorCall") {
                FunctionCallKind::StructConstructorCall
            } else if json::opt_bool_field(attrs, "type_conversion") {
                FunctionCallKind::TypeConversion
            } else {
                FunctionCallKind::FunctionCall
            };
            let kind = NodeKind::FunctionCall(FunctionCall {
                type_string: json::opt_string_field(attrs, "type"),
                kind: call_kind,
                expression,
                arguments,
                names: json::opt_string_array(attrs, "names", &src).unwrap_or_default(),
            });
            rd.finish(v, src, kind)
        }
        "FunctionCallOptions" => {
            let (expression, options) = split_first(&kids, &src, "callee")?;
            let kind = NodeKind::FunctionCallOptions(FunctionCallOptions {
                type_string: json::opt_string_field(attrs, "type"),
                expression,
                names: json::opt_string_array(attrs, "names", &src).unwrap_or_default(),
                options,
            });
            rd.finish(v, src, kind)
        }
        "NewExpression" => {
            let type_name = *kids
                .first()
                .ok_or_else(|| mismatch(&src, "new expression without a type"))?;
            let kind = NodeKind::NewExpression(NewExpression {
                type_string: json::opt_string_field(attrs, "type"),
                type_name,
            });
            rd.finish(v, src, kind)
        }
        "TupleExpression" => {
            let kind = NodeKind::TupleExpression(TupleExpression {
                type_string: json::opt_string_field(attrs, "type"),
                is_inline_array: json::opt_bool_field(attrs, "isInlineArray"),
                components: kids.into_iter().map(Some).collect(),
            });
            rd.finish(v, src, kind)
        }
        "ElementaryTypeNameExpression" => {
            let raw = json::opt_string_field(attrs, "value")
                .or_else(|| json::opt_string_field(attrs, "type"))
                .ok_or_else(|| mismatch(&src, "type expression without a value"))?;
            let kind = NodeKind::ElementaryTypeNameExpression(ElementaryTypeNameExpression {
                type_string: json::opt_string_field(attrs, "type"),
                type_name: ElementaryTypeRef::Raw(raw),
            });
            rd.finish(v, src, kind)
        }

        _ => Err(AstError::UnknownNodeKind {
            tag,
            src: src.to_string(),
        }),
    }
}

fn function(
    rd: &mut ReadCtx<'_>,
    v: &Value,
    src: SourceLocation,
    attrs: &Value,
    kids: &[NodeId],
) -> Result<NodeId, AstError> {
    let mut parameters = None;
    let mut return_parameters = None;
    let mut modifiers = Vec::new();
    let mut body = None;
    for kid in kids {
        match rd.tag_of(*kid)? {
            NodeTag::ParameterList if parameters.is_none() => parameters = Some(*kid),
            NodeTag::ParameterList => return_parameters = Some(*kid),
            NodeTag::ModifierInvocation => modifiers.push(*kid),
            NodeTag::Block => body = Some(*kid),
            other => {
                return Err(mismatch(&src, format!("unexpected function child: {}", other)))
            }
        }
    }

    let name = json::string_field(attrs, "name", &src)?;
    let is_constructor = json::opt_bool_field(attrs, "isConstructor");
    let kind = if is_constructor {
        FunctionKind::Constructor
    } else if name.is_empty() {
        FunctionKind::Fallback
    } else {
        FunctionKind::Function
    };

    let kind = NodeKind::FunctionDefinition(FunctionDefinition {
        scope: rd.scope_of(attrs, &src)?,
        kind,
        name,
        is_virtual: false,
        visibility: json::opt_enum_field(attrs, "visibility", &src)?.unwrap_or(Visibility::Public),
        state_mutability: legacy_state_mutability(attrs, &src)?,
        is_constructor,
        documentation: text_documentation(attrs),
        overrides: None,
        parameters: parameters
            .ok_or_else(|| mismatch(&src, "function without a parameter list"))?,
        return_parameters: return_parameters
            .ok_or_else(|| mismatch(&src, "function without a return parameter list"))?,
        modifiers,
        body,
    });
    rd.finish(v, src, kind)
}

fn variable(
    rd: &mut ReadCtx<'_>,
    v: &Value,
    src: SourceLocation,
    attrs: &Value,
    kids: &[NodeId],
) -> Result<NodeId, AstError> {
    // Children are the optional type name followed by the optional
    // initializer; `var` declarations have neither.
    let mut type_name = None;
    let mut value = None;
    for kid in kids {
        if is_type_name(rd.tag_of(*kid)?) && type_name.is_none() && value.is_none() {
            type_name = Some(*kid);
        } else {
            value = Some(*kid);
        }
    }

    let is_constant = json::opt_bool_field(attrs, "constant");
    let kind = NodeKind::VariableDeclaration(VariableDeclaration {
        is_constant,
        is_indexed: json::opt_bool_field(attrs, "indexed"),
        name: json::string_field(attrs, "name", &src)?,
        scope: rd.scope_of(attrs, &src)?,
        is_state_variable: json::opt_bool_field(attrs, "stateVariable"),
        storage_location: json::opt_enum_field(attrs, "storageLocation", &src)?
            .unwrap_or(StorageLocation::Default),
        visibility: json::opt_enum_field(attrs, "visibility", &src)?
            .unwrap_or(Visibility::Internal),
        mutability: if is_constant {
            Mutability::Constant
        } else {
            Mutability::Mutable
        },
        type_string: json::opt_string_field(attrs, "type"),
        documentation: None,
        type_name,
        overrides: None,
        value,
    });
    rd.finish(v, src, kind)
}

/// The legacy `children` array of a `for` drops omitted header parts
/// without a placeholder, so the remaining shape has to be classified:
/// the body is always last, a `VariableDeclarationStatement` can only be
/// the init part, and a bare expression can only be the condition.
fn for_statement(
    rd: &mut ReadCtx<'_>,
    v: &Value,
    src: SourceLocation,
    kids: &[NodeId],
) -> Result<NodeId, AstError> {
    let body = *kids
        .last()
        .ok_or_else(|| mismatch(&src, "for without a body"))?;
    let head = &kids[..kids.len() - 1];

    let mut initialization_expression = None;
    let mut condition = None;
    let mut loop_expression = None;
    for kid in head {
        match rd.tag_of(*kid)? {
            NodeTag::VariableDeclarationStatement => initialization_expression = Some(*kid),
            NodeTag::ExpressionStatement => {
                // First statement slot is the init, second the post-loop.
                if initialization_expression.is_none() && condition.is_none() {
                    initialization_expression = Some(*kid);
                } else {
                    loop_expression = Some(*kid);
                }
            }
            _ => condition = Some(*kid),
        }
    }
    // `for (;; i++)` has a single trailing statement, which is the
    // post-loop part, not the init.
    if head.len() == 1 && loop_expression.is_none() && condition.is_none() {
        if let Some(only) = initialization_expression {
            if rd.tag_of(only)? == NodeTag::ExpressionStatement {
                initialization_expression = None;
                loop_expression = Some(only);
            }
        }
    }

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

fn split_first(
    kids: &[NodeId],
    src: &SourceLocation,
    what: &str,
) -> Result<(NodeId, Vec<NodeId>), AstError> {
    match kids.split_first() {
        Some((first, rest)) => Ok((*first, rest.to_vec())),
        None => Err(mismatch(src, format!("missing {}", what))),
    }
}

fn is_type_name(tag: NodeTag) -> bool {
    matches!(
        tag,
        NodeTag::ElementaryTypeName
            | NodeTag::UserDefinedTypeName
            | NodeTag::ArrayTypeName
            | NodeTag::Mapping
            | NodeTag::FunctionTypeName
    )
}

/// Legacy documentation is plain text in the attributes object.
fn text_documentation(attrs: &Value) -> Option<Documentation> {
    json::opt_string_field(attrs, "documentation").map(Documentation::Text)
}

fn legacy_state_mutability(
    attrs: &Value,
    src: &SourceLocation,
) -> Result<StateMutability, AstError> {
    if let Some(m) = json::opt_enum_field(attrs, "stateMutability", src)? {
        return Ok(m);
    }
    Ok(if json::opt_bool_field(attrs, "payable") {
        StateMutability::Payable
    } else if json::opt_bool_field(attrs, "constant") {
        StateMutability::View
    } else {
        StateMutability::NonPayable
    })
}

/// The only trustworthy part of a legacy alias is the foreign name; it
/// appears directly, or nested in a partial identifier object.
fn foreign_name(item: &Value) -> String {
    match item.get("foreign") {
        Some(Value::String(s)) => s.clone(),
        Some(obj) => json::opt_string_field(obj, "name")
            .or_else(|| {
                obj.get("attributes")
                    .and_then(|a| json::opt_string_field(a, "value"))
            })
            .unwrap_or_default(),
        None => String::new(),
    }
}
