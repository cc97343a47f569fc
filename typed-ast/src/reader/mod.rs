//! Reading compiler output into a context.
//!
//! The top-level [`read`] accepts the standard compiler output object
//! (`{ "sources": { path: section, ... }, "errors": [...] }`), selects the
//! schema per section, dispatches to the matching front-end, and finishes
//! with the link pass that proves every required reference resolves.
//!
//! Two extension points hang off [`ReaderConfig`]: custom builders keyed by
//! schema tag (consulted before the core catalog) and post-process
//! callbacks invoked after linking on every newly built node.

pub mod compression;
pub mod json;

mod legacy;
mod modern;

pub use compression::{decode_bytes, load, InputEncoding};

use crate::ast::factory::AstFactory;
use crate::ast::relations::reference_attrs;
use crate::ast::{AstContext, NodeId, NodeKind, NodeTag, SourceLocation};
use crate::error::AstError;
use crate::sanity::{check_reference, check_sanity};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The two compiler JSON schema families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `nodeType` plus named child fields, 0.4.12 and later.
    Modern,
    /// `name`, `attributes` and positional `children`, before 0.4.12.
    Legacy,
}

/// Detect the schema of one typed AST root object.
pub fn detect_schema(ast: &Value) -> Schema {
    if ast.get("nodeType").is_some() {
        Schema::Modern
    } else {
        Schema::Legacy
    }
}

/// A builder for one schema tag.
pub type BuilderFn = Box<dyn Fn(&mut ReadCtx<'_>, &Value) -> Result<NodeId, AstError>>;

/// A callback invoked after the link pass on every newly built node.
pub type PostProcessFn = Box<dyn Fn(&mut AstContext, NodeId)>;

/// Reader configuration and extension points.
#[derive(Default)]
pub struct ReaderConfig {
    keep_raw: bool,
    skip_sanity: bool,
    custom: HashMap<String, BuilderFn>,
    post_process: Vec<PostProcessFn>,
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain the original JSON fragment on every node.
    pub fn keep_raw(mut self, keep: bool) -> Self {
        self.keep_raw = keep;
        self
    }

    /// Skip the sanity check normally run on every delivered source unit.
    pub fn skip_sanity(mut self, skip: bool) -> Self {
        self.skip_sanity = skip;
        self
    }

    /// Register a builder for a schema tag. Custom builders are consulted
    /// before the core catalog, so a tag outside the catalog extends the
    /// tree and a known tag overrides its builder.
    pub fn register_builder(mut self, tag: impl Into<String>, builder: BuilderFn) -> Self {
        self.custom.insert(tag.into(), builder);
        self
    }

    /// Add a callback to run after the link pass on each new node.
    pub fn on_node(mut self, callback: PostProcessFn) -> Self {
        self.post_process.push(callback);
        self
    }

    pub(crate) fn custom_builder(&self, tag: &str) -> Option<&BuilderFn> {
        self.custom.get(tag)
    }
}

/// Per-section build state handed to builders, including custom ones.
pub struct ReadCtx<'a> {
    /// The context nodes are registered into.
    pub ctx: &'a mut AstContext,
    cfg: &'a ReaderConfig,
    built: Vec<NodeId>,
    source_key: String,
    enclosing_unit: Option<NodeId>,
}

impl ReadCtx<'_> {
    /// Register a node under the id carried by its JSON object, wiring the
    /// parent pointers of its structural children. Builders call this last.
    pub fn finish(
        &mut self,
        v: &Value,
        src: SourceLocation,
        kind: NodeKind,
    ) -> Result<NodeId, AstError> {
        let id = json::node_id(v, &src)?;
        let raw = self.cfg.keep_raw.then(|| v.clone());
        AstFactory::new(self.ctx).make_with_id(id, src, raw, kind)?;
        self.built.push(id);
        Ok(id)
    }

    /// The `scope` reference of a declaration, falling back to the
    /// enclosing source unit when the output omits it.
    pub fn scope_of(&self, v: &Value, src: &SourceLocation) -> Result<NodeId, AstError> {
        json::opt_id_field(v, "scope")
            .or(self.enclosing_unit)
            .ok_or_else(|| AstError::SchemaMismatch {
                src: src.to_string(),
                reason: "missing `scope`".to_string(),
            })
    }

    /// The tag of an already-built node.
    pub fn tag_of(&self, id: NodeId) -> Result<NodeTag, AstError> {
        Ok(self.ctx.require(id)?.tag())
    }
}

/// Read compiler output into `ctx`, returning the source units in source
/// order (the `sources` map is traversed in key order).
///
/// Sections carrying only raw `source` text are skipped; they are compile
/// requests, not ASTs. Mixed schemas across sections are fine. Compiler
/// errors in the output abort before anything is built.
pub fn read(
    output: &Value,
    ctx: &mut AstContext,
    cfg: &ReaderConfig,
) -> Result<Vec<NodeId>, AstError> {
    check_compile_errors(output)?;

    let sources = output
        .get("sources")
        .and_then(Value::as_object)
        .ok_or_else(|| AstError::SchemaMismatch {
            src: "0:0:0".to_string(),
            reason: "missing `sources` object".to_string(),
        })?;

    let mut units = Vec::new();
    let mut built = Vec::new();
    for (key, section) in sources {
        // Prefer the modern field when a compiler emitted both.
        let ast = section
            .get("ast")
            .or_else(|| section.get("AST"))
            .or_else(|| section.get("legacyAST"));
        let Some(ast) = ast else {
            if section.get("source").is_some() {
                warn!(source = %key, "section has raw source only, skipping");
                continue;
            }
            return Err(AstError::SchemaMismatch {
                src: "0:0:0".to_string(),
                reason: format!("source `{}` carries neither an AST nor source text", key),
            });
        };

        let schema = detect_schema(ast);
        debug!(source = %key, ?schema, "reading source section");

        let mut rd = ReadCtx {
            ctx: &mut *ctx,
            cfg,
            built: Vec::new(),
            source_key: key.clone(),
            enclosing_unit: None,
        };
        let unit = match schema {
            Schema::Modern => modern::build(&mut rd, ast)?,
            Schema::Legacy => legacy::build(&mut rd, ast)?,
        };
        built.extend(rd.built);
        units.push(unit);
    }

    link(ctx, &built)?;

    for id in &built {
        for callback in &cfg.post_process {
            callback(ctx, *id);
        }
    }

    if !cfg.skip_sanity {
        for unit in &units {
            check_sanity(ctx, *unit)?;
        }
    }

    info!(units = units.len(), nodes = built.len(), "read compiler output");
    Ok(units)
}

/// Pass 2: prove that every reference attribute of every new node resolves
/// where its view requires it.
fn link(ctx: &AstContext, built: &[NodeId]) -> Result<(), AstError> {
    for id in built {
        let node = ctx.require(*id)?;
        for attr in reference_attrs(&node.kind) {
            check_reference(ctx, *id, &attr)?;
        }
    }
    Ok(())
}

#[derive(Deserialize)]
struct Diagnostic {
    severity: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
    #[serde(rename = "formattedMessage")]
    formatted_message: Option<String>,
}

/// Fail with [`AstError::CompileErrorsPresent`] if the output's `errors`
/// array carries anything beyond warnings. Modern entries are objects with
/// a `severity`; legacy entries are bare strings where anything that is not
/// a warning is fatal.
fn check_compile_errors(output: &Value) -> Result<(), AstError> {
    let Some(errors) = output.get("errors").and_then(Value::as_array) else {
        return Ok(());
    };

    let mut fatal = Vec::new();
    for entry in errors {
        match entry {
            Value::String(message) => {
                if !message.contains("Warning") {
                    fatal.push(message.clone());
                }
            }
            _ => {
                let Ok(diag) = serde_json::from_value::<Diagnostic>(entry.clone()) else {
                    continue;
                };
                let is_error = match (&diag.severity, &diag.kind) {
                    (Some(severity), _) => severity == "error",
                    (None, Some(kind)) => kind != "Warning",
                    (None, None) => false,
                };
                if is_error {
                    fatal.push(
                        diag.formatted_message
                            .or(diag.message)
                            .unwrap_or_else(|| "unknown compiler error".to_string()),
                    );
                }
            }
        }
    }

    if fatal.is_empty() {
        Ok(())
    } else {
        Err(AstError::CompileErrorsPresent(fatal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::kinds::{Extension, NodeKind};
    use crate::ast::relations::structural_children;
    use crate::ast::traverse::{children_of_kind, print};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// `contract C { function f() public { uint c = 1; } }` as compiled by
    /// 0.4.13 (modern schema, pre-0.5 spellings).
    fn fixture_modern_single_decl() -> Value {
        json!({
            "sources": {
                "c.sol": {
                    "ast": {
                        "id": 15, "nodeType": "SourceUnit", "src": "0:53:0",
                        "absolutePath": "c.sol",
                        "exportedSymbols": { "C": [14] },
                        "nodes": [{
                            "id": 14, "nodeType": "ContractDefinition", "src": "0:53:0",
                            "name": "C", "scope": 15, "contractKind": "contract",
                            "fullyImplemented": true,
                            "linearizedBaseContracts": [14],
                            "baseContracts": [],
                            "nodes": [{
                                "id": 13, "nodeType": "FunctionDefinition", "src": "13:38:0",
                                "name": "f", "scope": 14,
                                "visibility": "public", "payable": false,
                                "constant": false, "isConstructor": false,
                                "implemented": true, "modifiers": [],
                                "parameters": {
                                    "id": 9, "nodeType": "ParameterList",
                                    "src": "23:2:0", "parameters": []
                                },
                                "returnParameters": {
                                    "id": 10, "nodeType": "ParameterList",
                                    "src": "33:0:0", "parameters": []
                                },
                                "body": {
                                    "id": 12, "nodeType": "Block", "src": "33:18:0",
                                    "statements": [{
                                        "id": 11, "nodeType": "VariableDeclarationStatement",
                                        "src": "39:10:0",
                                        "assignments": [8],
                                        "declarations": [{
                                            "id": 8, "nodeType": "VariableDeclaration",
                                            "src": "39:6:0",
                                            "name": "c", "scope": 12,
                                            "constant": false, "stateVariable": false,
                                            "storageLocation": "default",
                                            "visibility": "internal",
                                            "typeDescriptions": { "typeString": "uint256" },
                                            "typeName": {
                                                "id": 7, "nodeType": "ElementaryTypeName",
                                                "src": "39:4:0", "name": "uint",
                                                "typeDescriptions": { "typeString": "uint256" }
                                            }
                                        }],
                                        "initialValue": {
                                            "id": 6, "nodeType": "Literal", "src": "48:1:0",
                                            "kind": "number", "value": "1", "hexValue": "31",
                                            "typeDescriptions": { "typeString": "int_const 1" }
                                        }
                                    }]
                                }
                            }]
                        }]
                    }
                }
            }
        })
    }

    #[test]
    fn test_single_declaration_scenario() {
        let mut ctx = AstContext::new();
        let units = read(&fixture_modern_single_decl(), &mut ctx, &ReaderConfig::new()).unwrap();
        assert_eq!(units.len(), 1);

        let stmts =
            children_of_kind(&ctx, units[0], NodeTag::VariableDeclarationStatement).unwrap();
        assert_eq!(stmts.len(), 1);

        let stmt = ctx.require(stmts[0]).unwrap();
        assert_eq!(stmt.parent, Some(NodeId(12)));
        assert_eq!(stmt.src.to_string(), "39:10:0");

        match &stmt.kind {
            NodeKind::VariableDeclarationStatement(s) => {
                assert_eq!(s.assignments, vec![Some(NodeId(8))]);
            }
            other => panic!("unexpected kind: {:?}", other.tag()),
        }

        let children = structural_children(&stmt.kind);
        assert_eq!(children.len(), 2);
        assert_eq!(ctx.require(children[0]).unwrap().tag(), NodeTag::VariableDeclaration);
        assert_eq!(ctx.require(children[1]).unwrap().tag(), NodeTag::Literal);
    }

    /// The three declaration statements of
    /// `function multiple() { uint x; (uint y, , uint z) = (1,2,3);
    /// function() external f = g; }` under 0.4.13.
    fn fixture_modern_multiple_decls() -> Value {
        json!({
            "sources": {
                "m.sol": {
                    "ast": {
                        "id": 40, "nodeType": "SourceUnit", "src": "0:160:0",
                        "exportedSymbols": { "M": [39] },
                        "nodes": [{
                            "id": 39, "nodeType": "ContractDefinition", "src": "0:160:0",
                            "name": "M", "scope": 40, "contractKind": "contract",
                            "linearizedBaseContracts": [39],
                            "baseContracts": [],
                            "nodes": [{
                                "id": 38, "nodeType": "FunctionDefinition", "src": "13:140:0",
                                "name": "multiple", "scope": 39, "visibility": "public",
                                "isConstructor": false, "modifiers": [],
                                "parameters": { "id": 20, "nodeType": "ParameterList", "src": "30:2:0", "parameters": [] },
                                "returnParameters": { "id": 21, "nodeType": "ParameterList", "src": "40:0:0", "parameters": [] },
                                "body": {
                                    "id": 37, "nodeType": "Block", "src": "40:110:0",
                                    "statements": [
                                        {
                                            "id": 24, "nodeType": "VariableDeclarationStatement", "src": "42:7:0",
                                            "assignments": [23],
                                            "declarations": [{
                                                "id": 23, "nodeType": "VariableDeclaration", "src": "42:6:0",
                                                "name": "x", "scope": 37,
                                                "typeDescriptions": { "typeString": "uint256" },
                                                "typeName": {
                                                    "id": 22, "nodeType": "ElementaryTypeName",
                                                    "src": "42:4:0", "name": "uint"
                                                }
                                            }]
                                        },
                                        {
                                            "id": 32, "nodeType": "VariableDeclarationStatement", "src": "55:24:0",
                                            "assignments": [26, null, 28],
                                            "declarations": [
                                                {
                                                    "id": 26, "nodeType": "VariableDeclaration", "src": "56:6:0",
                                                    "name": "y", "scope": 37,
                                                    "typeName": { "id": 25, "nodeType": "ElementaryTypeName", "src": "56:4:0", "name": "uint" }
                                                },
                                                null,
                                                {
                                                    "id": 28, "nodeType": "VariableDeclaration", "src": "66:6:0",
                                                    "name": "z", "scope": 37,
                                                    "typeName": { "id": 27, "nodeType": "ElementaryTypeName", "src": "66:4:0", "name": "uint" }
                                                }
                                            ],
                                            "initialValue": {
                                                "id": 31, "nodeType": "TupleExpression", "src": "76:7:0",
                                                "components": [
                                                    { "id": 29, "nodeType": "Literal", "src": "77:1:0", "kind": "number", "value": "1" },
                                                    { "id": 30, "nodeType": "Literal", "src": "79:1:0", "kind": "number", "value": "2" },
                                                    { "id": 33, "nodeType": "Literal", "src": "81:1:0", "kind": "number", "value": "3" }
                                                ]
                                            }
                                        },
                                        {
                                            "id": 36, "nodeType": "VariableDeclarationStatement", "src": "90:30:0",
                                            "assignments": [35],
                                            "declarations": [{
                                                "id": 35, "nodeType": "VariableDeclaration", "src": "90:22:0",
                                                "name": "f", "scope": 37,
                                                "typeName": {
                                                    "id": 34, "nodeType": "FunctionTypeName", "src": "90:19:0",
                                                    "visibility": "external", "payable": false, "constant": false,
                                                    "parameterTypes": { "id": 41, "nodeType": "ParameterList", "src": "98:2:0", "parameters": [] },
                                                    "returnParameterTypes": { "id": 42, "nodeType": "ParameterList", "src": "100:0:0", "parameters": [] }
                                                }
                                            }],
                                            "initialValue": {
                                                "id": 43, "nodeType": "Identifier", "src": "115:1:0",
                                                "name": "g"
                                            }
                                        }
                                    ]
                                }
                            }]
                        }]
                    }
                }
            }
        })
    }

    #[test]
    fn test_multiple_declarations_scenario() {
        let mut ctx = AstContext::new();
        let units = read(&fixture_modern_multiple_decls(), &mut ctx, &ReaderConfig::new()).unwrap();

        let stmts =
            children_of_kind(&ctx, units[0], NodeTag::VariableDeclarationStatement).unwrap();
        assert_eq!(stmts.len(), 3);

        // `uint x;` has no initializer and a single child.
        match &ctx.require(stmts[0]).unwrap().kind {
            NodeKind::VariableDeclarationStatement(s) => assert!(s.initial_value.is_none()),
            other => panic!("unexpected kind: {:?}", other.tag()),
        }
        assert_eq!(
            structural_children(&ctx.require(stmts[0]).unwrap().kind).len(),
            1
        );

        // The tuple form keeps the hole and has two declarations plus the
        // tuple initializer as children.
        match &ctx.require(stmts[1]).unwrap().kind {
            NodeKind::VariableDeclarationStatement(s) => {
                assert_eq!(
                    s.assignments,
                    vec![Some(NodeId(26)), None, Some(NodeId(28))]
                );
            }
            other => panic!("unexpected kind: {:?}", other.tag()),
        }
        assert_eq!(
            structural_children(&ctx.require(stmts[1]).unwrap().kind).len(),
            3
        );

        // The function-typed declaration has one declaration plus the
        // identifier initializer.
        assert_eq!(
            structural_children(&ctx.require(stmts[2]).unwrap().kind).len(),
            2
        );
    }

    /// `while (a > 0) a--;` and `while (a > 0) { a--; }` side by side.
    fn fixture_modern_while_bodies() -> Value {
        json!({
            "sources": {
                "w.sol": {
                    "ast": {
                        "id": 70, "nodeType": "SourceUnit", "src": "0:120:0",
                        "exportedSymbols": { "W": [69] },
                        "nodes": [{
                            "id": 69, "nodeType": "ContractDefinition", "src": "0:120:0",
                            "name": "W", "scope": 70, "contractKind": "contract",
                            "linearizedBaseContracts": [69],
                            "baseContracts": [],
                            "nodes": [
                                {
                                    "id": 50, "nodeType": "VariableDeclaration", "src": "13:6:0",
                                    "name": "a", "scope": 69, "stateVariable": true,
                                    "typeName": { "id": 49, "nodeType": "ElementaryTypeName", "src": "13:4:0", "name": "uint" }
                                },
                                {
                                    "id": 68, "nodeType": "FunctionDefinition", "src": "25:90:0",
                                    "name": "g", "scope": 69, "visibility": "public",
                                    "isConstructor": false, "modifiers": [],
                                    "parameters": { "id": 51, "nodeType": "ParameterList", "src": "36:2:0", "parameters": [] },
                                    "returnParameters": { "id": 52, "nodeType": "ParameterList", "src": "46:0:0", "parameters": [] },
                                    "body": {
                                        "id": 67, "nodeType": "Block", "src": "46:69:0",
                                        "statements": [
                                            {
                                                "id": 58, "nodeType": "WhileStatement", "src": "48:18:0",
                                                "condition": {
                                                    "id": 55, "nodeType": "BinaryOperation", "src": "55:5:0",
                                                    "operator": ">",
                                                    "leftExpression": { "id": 53, "nodeType": "Identifier", "src": "55:1:0", "name": "a", "referencedDeclaration": 50 },
                                                    "rightExpression": { "id": 54, "nodeType": "Literal", "src": "59:1:0", "kind": "number", "value": "0" }
                                                },
                                                "body": {
                                                    "id": 57, "nodeType": "ExpressionStatement", "src": "62:4:0",
                                                    "expression": {
                                                        "id": 56, "nodeType": "UnaryOperation", "src": "62:3:0",
                                                        "prefix": false, "operator": "--",
                                                        "subExpression": { "id": 59, "nodeType": "Identifier", "src": "62:1:0", "name": "a", "referencedDeclaration": 50 }
                                                    }
                                                }
                                            },
                                            {
                                                "id": 66, "nodeType": "WhileStatement", "src": "68:22:0",
                                                "condition": {
                                                    "id": 62, "nodeType": "BinaryOperation", "src": "75:5:0",
                                                    "operator": ">",
                                                    "leftExpression": { "id": 60, "nodeType": "Identifier", "src": "75:1:0", "name": "a", "referencedDeclaration": 50 },
                                                    "rightExpression": { "id": 61, "nodeType": "Literal", "src": "79:1:0", "kind": "number", "value": "0" }
                                                },
                                                "body": {
                                                    "id": 65, "nodeType": "Block", "src": "82:8:0",
                                                    "statements": [{
                                                        "id": 64, "nodeType": "ExpressionStatement", "src": "84:4:0",
                                                        "expression": {
                                                            "id": 63, "nodeType": "UnaryOperation", "src": "84:3:0",
                                                            "prefix": false, "operator": "--",
                                                            "subExpression": { "id": 71, "nodeType": "Identifier", "src": "84:1:0", "name": "a", "referencedDeclaration": 50 }
                                                        }
                                                    }]
                                                }
                                            }
                                        ]
                                    }
                                }
                            ]
                        }]
                    }
                }
            }
        })
    }

    #[test]
    fn test_while_body_shapes_scenario() {
        let mut ctx = AstContext::new();
        let units = read(&fixture_modern_while_bodies(), &mut ctx, &ReaderConfig::new()).unwrap();

        let whiles = children_of_kind(&ctx, units[0], NodeTag::WhileStatement).unwrap();
        assert_eq!(whiles.len(), 2);

        let body_tag = |id: NodeId| match &ctx.require(id).unwrap().kind {
            NodeKind::WhileStatement(w) => ctx.require(w.body).unwrap().tag(),
            other => panic!("unexpected kind: {:?}", other.tag()),
        };
        assert_eq!(body_tag(whiles[0]), NodeTag::ExpressionStatement);
        assert_eq!(body_tag(whiles[1]), NodeTag::Block);
    }

    /// A pre-0.4.12 `legacyAST` section exercising positional children,
    /// textual documentation and the null-bearing `assignments` attribute.
    fn fixture_legacy() -> Value {
        json!({
            "sources": {
                "a.sol": {
                    "legacyAST": {
                        "id": 110, "name": "SourceUnit", "src": "0:80:0",
                        "attributes": { "exportedSymbols": { "A": [109] } },
                        "children": [
                            {
                                "id": 101, "name": "PragmaDirective", "src": "0:23:0",
                                "attributes": { "literals": ["solidity", "^", "0.4", ".11"] }
                            },
                            {
                                "id": 109, "name": "ContractDefinition", "src": "24:56:0",
                                "attributes": {
                                    "name": "A", "scope": 110,
                                    "fullyImplemented": true,
                                    "linearizedBaseContracts": [109],
                                    "documentation": "legacy doc"
                                },
                                "children": [{
                                    "id": 108, "name": "FunctionDefinition", "src": "37:41:0",
                                    "attributes": {
                                        "name": "f", "scope": 109, "public": true,
                                        "constant": false, "isConstructor": false
                                    },
                                    "children": [
                                        { "id": 102, "name": "ParameterList", "src": "47:2:0" },
                                        { "id": 103, "name": "ParameterList", "src": "57:0:0" },
                                        {
                                            "id": 107, "name": "Block", "src": "57:21:0",
                                            "children": [{
                                                "id": 106, "name": "VariableDeclarationStatement", "src": "59:10:0",
                                                "attributes": { "assignments": [105, null] },
                                                "children": [
                                                    {
                                                        "id": 105, "name": "VariableDeclaration", "src": "59:6:0",
                                                        "attributes": { "name": "c", "scope": 107, "type": "uint256" },
                                                        "children": [{
                                                            "id": 104, "name": "ElementaryTypeName", "src": "59:4:0",
                                                            "attributes": { "name": "uint", "type": "uint256" }
                                                        }]
                                                    },
                                                    {
                                                        "id": 111, "name": "Literal", "src": "68:1:0",
                                                        "attributes": { "token": "number", "value": "1", "type": "int_const 1" }
                                                    }
                                                ]
                                            }]
                                        }
                                    ]
                                }]
                            }
                        ]
                    }
                }
            }
        })
    }

    #[test]
    fn test_legacy_read() {
        let mut ctx = AstContext::new();
        let units = read(&fixture_legacy(), &mut ctx, &ReaderConfig::new()).unwrap();
        assert_eq!(units.len(), 1);

        // Documentation survives as text, a legacy quirk.
        let contract = ctx.require(NodeId(109)).unwrap();
        match &contract.kind {
            NodeKind::ContractDefinition(c) => {
                assert_eq!(
                    c.documentation,
                    Some(crate::ast::Documentation::Text("legacy doc".to_string()))
                );
            }
            other => panic!("unexpected kind: {:?}", other.tag()),
        }

        // Positional children landed in the right slots.
        match &ctx.require(NodeId(108)).unwrap().kind {
            NodeKind::FunctionDefinition(f) => {
                assert_eq!(f.parameters, NodeId(102));
                assert_eq!(f.return_parameters, NodeId(103));
                assert_eq!(f.body, Some(NodeId(107)));
            }
            other => panic!("unexpected kind: {:?}", other.tag()),
        }

        // Null assignments entries survive.
        match &ctx.require(NodeId(106)).unwrap().kind {
            NodeKind::VariableDeclarationStatement(s) => {
                assert_eq!(s.assignments, vec![Some(NodeId(105)), None]);
                assert_eq!(s.declarations, vec![NodeId(105)]);
                assert_eq!(s.initial_value, Some(NodeId(111)));
            }
            other => panic!("unexpected kind: {:?}", other.tag()),
        }
    }

    #[test]
    fn test_mixed_schemas_across_sources() {
        let mut modern = fixture_modern_single_decl();
        let legacy = fixture_legacy();
        let sources = modern.get_mut("sources").unwrap().as_object_mut().unwrap();
        sources.insert(
            "a.sol".to_string(),
            legacy.get("sources").unwrap().get("a.sol").unwrap().clone(),
        );

        let mut ctx = AstContext::new();
        let units = read(&modern, &mut ctx, &ReaderConfig::new()).unwrap();
        assert_eq!(units.len(), 2);
        // Key order: a.sol before c.sol.
        assert_eq!(units[0], NodeId(110));
        assert_eq!(units[1], NodeId(15));
    }

    #[test]
    fn test_unknown_node_kind_scenario() {
        let output = json!({
            "sources": {
                "u.sol": {
                    "ast": {
                        "id": 2, "nodeType": "SourceUnit", "src": "0:10:0",
                        "nodes": [{
                            "id": 1, "nodeType": "FancyStatement", "src": "0:8:0"
                        }]
                    }
                }
            }
        });

        let mut ctx = AstContext::new();
        let err = read(&output, &mut ctx, &ReaderConfig::new()).unwrap_err();
        match err {
            AstError::UnknownNodeKind { tag, src } => {
                assert_eq!(tag, "FancyStatement");
                assert_eq!(src, "0:8:0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_compile_errors_abort_the_read() {
        let output = json!({
            "errors": [
                { "severity": "warning", "message": "unused variable" },
                { "severity": "error", "formattedMessage": "a.sol:1: expected `;`" }
            ],
            "sources": {}
        });

        let mut ctx = AstContext::new();
        let err = read(&output, &mut ctx, &ReaderConfig::new()).unwrap_err();
        match err {
            AstError::CompileErrorsPresent(messages) => {
                assert_eq!(messages, vec!["a.sol:1: expected `;`".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_legacy_string_warnings_are_tolerated() {
        let output = json!({
            "errors": ["a.sol:3:5: Warning: unused local variable"],
            "sources": {}
        });

        let mut ctx = AstContext::new();
        assert!(read(&output, &mut ctx, &ReaderConfig::new()).unwrap().is_empty());

        let output = json!({
            "errors": ["a.sol:3:5: Error: undeclared identifier"],
            "sources": {}
        });
        assert!(matches!(
            read(&output, &mut ctx, &ReaderConfig::new()),
            Err(AstError::CompileErrorsPresent(_))
        ));
    }

    #[test]
    fn test_source_only_sections_are_skipped() {
        let output = json!({
            "sources": {
                "raw.sol": { "source": "contract R {}" }
            }
        });

        let mut ctx = AstContext::new();
        let units = read(&output, &mut ctx, &ReaderConfig::new()).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn test_custom_builder_and_post_process() {
        let output = json!({
            "sources": {
                "x.sol": {
                    "ast": {
                        "id": 2, "nodeType": "SourceUnit", "src": "0:10:0",
                        "nodes": [{
                            "id": 1, "nodeType": "FancyStatement", "src": "0:8:0",
                            "weight": 9
                        }]
                    }
                }
            }
        });

        let seen = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&seen);
        let cfg = ReaderConfig::new()
            .register_builder(
                "FancyStatement",
                Box::new(|rd: &mut ReadCtx<'_>, v: &Value| {
                    let src = json::node_src(v)?;
                    let kind = NodeKind::Extension(Extension {
                        tag: "FancyStatement".to_string(),
                        attributes: v.clone(),
                        children: Vec::new(),
                    });
                    rd.finish(v, src, kind)
                }),
            )
            .on_node(Box::new(move |_: &mut AstContext, _: NodeId| {
                *counter.borrow_mut() += 1;
            }));

        let mut ctx = AstContext::new();
        let units = read(&output, &mut ctx, &cfg).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(ctx.require(NodeId(1)).unwrap().tag(), NodeTag::Extension);
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_read_is_print_stable() {
        let first = {
            let mut ctx = AstContext::new();
            let units =
                read(&fixture_modern_single_decl(), &mut ctx, &ReaderConfig::new()).unwrap();
            print(&ctx, units[0], None).unwrap()
        };
        let second = {
            let mut ctx = AstContext::new();
            let units =
                read(&fixture_modern_single_decl(), &mut ctx, &ReaderConfig::new()).unwrap();
            print(&ctx, units[0], None).unwrap()
        };
        assert_eq!(first, second);
        assert!(first.starts_with("SourceUnit \"c.sol\"\n"));
    }

    #[test]
    fn test_keep_raw_round_trip() {
        let mut ctx = AstContext::new();
        let cfg = ReaderConfig::new().keep_raw(true);
        let units = read(&fixture_modern_single_decl(), &mut ctx, &cfg).unwrap();

        let raw = ctx.require(units[0]).unwrap().raw.as_ref().unwrap();
        assert_eq!(raw.get("nodeType").and_then(Value::as_str), Some("SourceUnit"));

        // Default configuration keeps nothing.
        let mut ctx2 = AstContext::new();
        let units2 =
            read(&fixture_modern_single_decl(), &mut ctx2, &ReaderConfig::new()).unwrap();
        assert!(ctx2.require(units2[0]).unwrap().raw.is_none());
    }
}
