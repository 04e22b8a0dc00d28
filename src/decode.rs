//! Decode the merged tree into the target shape.
//!
//! Serde does the actual decoding. Before that, the tree is conformed to the
//! shape's descriptor table so loosely typed sources decode cleanly: keys are
//! matched to field keys ignoring ASCII case, and scalars are converted to the
//! field's kind where the conversion is unambiguous. Environment variables and
//! dotenv files only ever produce strings, so this is what lets `PORT=9090`
//! land in an integer field.
//!
//! | Field kind | Accepted input |
//! |------------|----------------|
//! | integer | number, integral float, bool (`1`/`0`), numeric string, `""` (→ 0) |
//! | float | number, bool, numeric string, `""` (→ 0.0) |
//! | string | string, number, bool (`"1"`/`"0"`) |
//! | bool | bool, number (non-zero), `1 t T TRUE true True 0 f F FALSE false False`, `""` (→ false) |
//! | sequence | array, comma-separated string (`""` → empty) |
//!
//! Anything else is passed through untouched and left for serde to accept or
//! reject.

use serde_json::{Number, Value};

use crate::error::ConfigoError;
use crate::merge::Tree;
use crate::meta::{Config, FieldKind, Meta};

/// Decode `merged` into `C`, optionally selecting the sub-tree at `key` first.
pub fn decode<C: Config>(merged: Tree, key: Option<&str>) -> Result<C, ConfigoError> {
    let tree = match key.filter(|k| !k.is_empty()) {
        Some(key) => select_scope(merged, key)?,
        None => merged,
    };
    let conformed = conform_tree(tree, &C::meta());
    Ok(serde_json::from_value(Value::Object(conformed))?)
}

/// Select the sub-tree at `key`. Sibling entries are dropped.
pub fn select_scope(mut merged: Tree, key: &str) -> Result<Tree, ConfigoError> {
    match take_key(&mut merged, key) {
        Some(Value::Object(sub)) => Ok(sub),
        Some(_) => Err(ConfigoError::ScopeNotTable(key.to_string())),
        None => Err(ConfigoError::ScopeNotFound(key.to_string())),
    }
}

/// Conform `tree` to `meta`: canonical key spelling and weakly typed scalars.
pub fn conform_tree(mut tree: Tree, meta: &Meta) -> Tree {
    for field in meta.tagged() {
        if let Some(value) = take_key(&mut tree, field.key) {
            tree.insert(field.key.to_string(), conform(value, &field.kind));
        }
    }
    tree
}

fn take_key(tree: &mut Tree, key: &str) -> Option<Value> {
    if let Some(value) = tree.remove(key) {
        return Some(value);
    }
    let actual = tree.keys().find(|k| k.eq_ignore_ascii_case(key))?.clone();
    tree.remove(&actual)
}

fn conform(value: Value, kind: &FieldKind) -> Value {
    match (kind, value) {
        (FieldKind::Optional(_), Value::Null) => Value::Null,
        (FieldKind::Optional(inner), value) => conform(value, inner),
        (FieldKind::Nested(meta), Value::Object(sub)) => Value::Object(conform_tree(sub, meta)),

        (FieldKind::Int(_), Value::String(s)) => weak_int(&s).unwrap_or(Value::String(s)),
        (FieldKind::Int(_), Value::Bool(b)) => Value::from(i64::from(b)),
        (FieldKind::Int(_), Value::Number(n)) => integral(&n).unwrap_or(Value::Number(n)),

        (FieldKind::Float, Value::String(s)) if s.trim().is_empty() => Value::from(0.0),
        (FieldKind::Float, Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Value::from(f),
            _ => Value::String(s),
        },
        (FieldKind::Float, Value::Bool(b)) => Value::from(if b { 1.0 } else { 0.0 }),

        (FieldKind::Str, Value::Number(n)) => Value::String(n.to_string()),
        (FieldKind::Str, Value::Bool(b)) => Value::String(if b { "1" } else { "0" }.to_string()),

        (FieldKind::Bool, Value::String(s)) => match parse_bool(&s) {
            Some(b) => Value::Bool(b),
            None => Value::String(s),
        },
        (FieldKind::Bool, Value::Number(n)) => Value::Bool(n.as_f64() != Some(0.0)),

        (FieldKind::Seq, Value::String(s)) if s.is_empty() => Value::Array(Vec::new()),
        (FieldKind::Seq, Value::String(s)) => {
            Value::Array(s.split(',').map(|item| Value::String(item.to_string())).collect())
        }

        (_, value) => value,
    }
}

fn weak_int(s: &str) -> Option<Value> {
    let s = s.trim();
    if s.is_empty() {
        return Some(Value::from(0));
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<u64>().ok().map(Value::from)
}

/// An integral float as an integer value.
fn integral(n: &Number) -> Option<Value> {
    if !n.is_f64() {
        return None;
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| Value::from(f as i64))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "" | "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
