//! Textual default → typed value.
//!
//! Coercion is lenient on purpose: a literal that does not parse, or a kind
//! that has no textual default form, yields `None` and the field keeps its
//! zero value. Nothing here returns an error.

use serde_json::Value;

use crate::defaults::extract_defaults;
use crate::merge::Tree;
use crate::meta::FieldKind;

/// Coerce a default literal into a value of `kind`.
///
/// - integers: base-10 `i64`, rejected when it does not fit the field type
/// - strings: verbatim
/// - bools: `"true"` is true, anything else is false
/// - nested records: the record's own defaults (the literal is ignored)
/// - floats, sequences, maps, untyped values: unsupported, always `None`
pub fn coerce(kind: &FieldKind, literal: &str) -> Option<Value> {
    match kind {
        FieldKind::Int(int) => match literal.parse::<i64>() {
            Ok(v) if int.fits(v) => Some(Value::from(v)),
            Ok(v) => {
                tracing::debug!(literal, value = v, kind = ?int, "default out of range, using zero value");
                None
            }
            Err(e) => {
                tracing::debug!(literal, error = %e, "invalid integer default, using zero value");
                None
            }
        },
        FieldKind::Str => Some(Value::String(literal.to_string())),
        FieldKind::Bool => Some(Value::Bool(literal == "true")),
        FieldKind::Nested(meta) => Some(Value::Object(extract_defaults(meta))),
        FieldKind::Optional(inner) => coerce(inner, literal),
        FieldKind::Float | FieldKind::Seq | FieldKind::Map | FieldKind::Any => {
            tracing::debug!(literal, kind = ?kind, "defaults are not supported for this kind, skipping");
            None
        }
    }
}

/// The value a freshly constructed field of `kind` holds.
pub fn zero_value(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Int(_) => Value::from(0),
        FieldKind::Str => Value::String(String::new()),
        FieldKind::Bool => Value::Bool(false),
        FieldKind::Float => Value::from(0.0),
        FieldKind::Seq => Value::Array(Vec::new()),
        FieldKind::Map => Value::Object(Tree::new()),
        FieldKind::Nested(meta) => Value::Object(extract_defaults(meta)),
        FieldKind::Any | FieldKind::Optional(_) => Value::Null,
    }
}
