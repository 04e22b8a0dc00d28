//! Default extraction: turn a shape's descriptor table into the lowest
//! configuration layer.
//!
//! The result mirrors a freshly constructed instance with every declared
//! default applied: every tagged field is present, either holding its coerced
//! default or its zero value. Nested records recurse, and optional fields are
//! always materialized so that the defaults of an optional record are filled
//! in just like those of a plain one.

use serde_json::Value;

use crate::coerce::{coerce, zero_value};
use crate::merge::Tree;
use crate::meta::{FieldKind, Meta};

/// Build the defaults tree for `meta`, keyed by field key.
pub fn extract_defaults(meta: &Meta) -> Tree {
    let mut tree = Tree::new();
    for field in meta.tagged() {
        let value = materialize(&field.kind, field.default_literal());
        tree.insert(field.key.to_string(), value);
    }
    tree
}

fn materialize(kind: &FieldKind, literal: Option<&str>) -> Value {
    match kind {
        FieldKind::Nested(meta) => Value::Object(extract_defaults(meta)),
        FieldKind::Optional(inner) => materialize(inner, literal),
        _ => literal
            .and_then(|l| coerce(kind, l))
            .unwrap_or_else(|| zero_value(kind)),
    }
}
