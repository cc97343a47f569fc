//! Typed extraction of fields from compiler JSON.
//!
//! Every helper fails with [`AstError::SchemaMismatch`] naming the source
//! location and the offending field, so reader errors point at the input
//! rather than at the reader.

use crate::ast::{NodeId, SourceLocation};
use crate::error::AstError;
use serde_json::Value;
use std::str::FromStr;

fn mismatch(src: &SourceLocation, reason: String) -> AstError {
    AstError::SchemaMismatch {
        src: src.to_string(),
        reason,
    }
}

/// The `src` location of a node object. Synthesized nodes without one get
/// the all `-1` location.
pub fn node_src(v: &Value) -> Result<SourceLocation, AstError> {
    match v.get("src") {
        None => Ok(SourceLocation {
            offset: -1,
            length: -1,
            file: -1,
        }),
        Some(Value::String(s)) => SourceLocation::parse(s).ok_or_else(|| {
            mismatch(
                &SourceLocation::default(),
                format!("malformed src `{}`", s),
            )
        }),
        Some(other) => Err(mismatch(
            &SourceLocation::default(),
            format!("src is not a string: {}", other),
        )),
    }
}

/// The `id` of a node object.
pub fn node_id(v: &Value, src: &SourceLocation) -> Result<NodeId, AstError> {
    let id = v
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| mismatch(src, "missing or non-integral `id`".to_string()))?;
    u32::try_from(id)
        .map(NodeId)
        .map_err(|_| mismatch(src, format!("id {} out of range", id)))
}

/// A required field of any type.
pub fn field<'a>(v: &'a Value, key: &str, src: &SourceLocation) -> Result<&'a Value, AstError> {
    v.get(key)
        .ok_or_else(|| mismatch(src, format!("missing field `{}`", key)))
}

/// A required string field.
pub fn str_field<'a>(v: &'a Value, key: &str, src: &SourceLocation) -> Result<&'a str, AstError> {
    field(v, key, src)?
        .as_str()
        .ok_or_else(|| mismatch(src, format!("field `{}` is not a string", key)))
}

/// A required string field, owned.
pub fn string_field(v: &Value, key: &str, src: &SourceLocation) -> Result<String, AstError> {
    str_field(v, key, src).map(str::to_string)
}

/// An optional string field; absent and `null` both read as `None`.
pub fn opt_string_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).map(str::to_string)
}

/// A required boolean field.
pub fn bool_field(v: &Value, key: &str, src: &SourceLocation) -> Result<bool, AstError> {
    field(v, key, src)?
        .as_bool()
        .ok_or_else(|| mismatch(src, format!("field `{}` is not a boolean", key)))
}

/// An optional boolean field, `false` when absent.
pub fn opt_bool_field(v: &Value, key: &str) -> bool {
    v.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// A required id-valued field.
pub fn id_field(v: &Value, key: &str, src: &SourceLocation) -> Result<NodeId, AstError> {
    let raw = field(v, key, src)?;
    as_id(raw)
        .ok_or_else(|| mismatch(src, format!("field `{}` is not a node id: {}", key, raw)))
}

/// An optional id-valued field. Absent, `null` and the negative ids some
/// compilers use for builtins all read as `None`.
pub fn opt_id_field(v: &Value, key: &str) -> Option<NodeId> {
    v.get(key).and_then(as_id)
}

fn as_id(v: &Value) -> Option<NodeId> {
    v.as_u64().and_then(|id| u32::try_from(id).ok()).map(NodeId)
}

/// A required array field.
pub fn array_field<'a>(
    v: &'a Value,
    key: &str,
    src: &SourceLocation,
) -> Result<&'a Vec<Value>, AstError> {
    field(v, key, src)?
        .as_array()
        .ok_or_else(|| mismatch(src, format!("field `{}` is not an array", key)))
}

/// An optional array field; absent and `null` read as an empty slice.
pub fn opt_array_field<'a>(v: &'a Value, key: &str) -> &'a [Value] {
    v.get(key).and_then(Value::as_array).map_or(&[], Vec::as_slice)
}

/// An array of node ids.
pub fn id_array(v: &Value, key: &str, src: &SourceLocation) -> Result<Vec<NodeId>, AstError> {
    array_field(v, key, src)?
        .iter()
        .map(|item| {
            as_id(item)
                .ok_or_else(|| mismatch(src, format!("`{}` entry is not a node id: {}", key, item)))
        })
        .collect()
}

/// Like [`id_array`] but absent fields read as empty.
pub fn opt_id_array(v: &Value, key: &str, src: &SourceLocation) -> Result<Vec<NodeId>, AstError> {
    match v.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(_) => id_array(v, key, src),
    }
}

/// An array of node ids with explicit `null` entries preserved, as used by
/// `assignments` for omitted tuple positions.
pub fn nullable_id_array(
    v: &Value,
    key: &str,
    src: &SourceLocation,
) -> Result<Vec<Option<NodeId>>, AstError> {
    match v.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(raw) => raw
            .as_array()
            .ok_or_else(|| mismatch(src, format!("field `{}` is not an array", key)))?
            .iter()
            .map(|item| match item {
                Value::Null => Ok(None),
                _ => as_id(item)
                    .map(Some)
                    .ok_or_else(|| {
                        mismatch(src, format!("`{}` entry is not a node id: {}", key, item))
                    }),
            })
            .collect(),
    }
}

/// A required enum-spelled string field, parsed through `FromStr`.
pub fn enum_field<T>(v: &Value, key: &str, src: &SourceLocation) -> Result<T, AstError>
where
    T: FromStr<Err = String>,
{
    str_field(v, key, src)?
        .parse()
        .map_err(|e: String| mismatch(src, e))
}

/// Like [`enum_field`] but absent and `null` read as `None`.
pub fn opt_enum_field<T>(v: &Value, key: &str, src: &SourceLocation) -> Result<Option<T>, AstError>
where
    T: FromStr<Err = String>,
{
    match v.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => enum_field(v, key, src).map(Some),
    }
}

/// The `typeDescriptions.typeString` of an expression or type name, when
/// the producing build emitted one.
pub fn type_string(v: &Value) -> Option<String> {
    v.get("typeDescriptions")
        .and_then(|d| d.get("typeString"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// An array of strings; absent reads as empty.
pub fn opt_string_array(v: &Value, key: &str, src: &SourceLocation) -> Result<Vec<String>, AstError> {
    match v.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(raw) => raw
            .as_array()
            .ok_or_else(|| mismatch(src, format!("field `{}` is not an array", key)))?
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    mismatch(src, format!("`{}` entry is not a string: {}", key, item))
                })
            })
            .collect(),
    }
}
