//! Render a typed config as text: the reverse of parsing.
//!
//! The value is serialized into a tree, wrapped under a root key, and written
//! as YAML, JSON (4-space indent), TOML or `KEY=value` lines. Env lines are
//! named exactly as the environment layer looks them up and are sorted by
//! name, so the output is stable across runs. Empty maps produce no line and
//! sequences are joined with commas.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::env::env_var_name;
use crate::error::ConfigoError;
use crate::merge::Tree;
use crate::types::Format;

/// Render `value` under `root_key` in `format`.
///
/// An empty `root_key` renders the value unwrapped. `env_prefix` only applies
/// to [`Format::Env`].
pub fn try_marshal_conf<T: Serialize + ?Sized>(
    format: Format,
    env_prefix: &str,
    root_key: &str,
    value: &T,
) -> Result<String, ConfigoError> {
    let encode_err = |reason: String| ConfigoError::Encode {
        format: format.to_string(),
        reason,
    };

    let raw = serde_json::to_value(value).map_err(|e| encode_err(e.to_string()))?;
    let wrapped = if root_key.is_empty() {
        raw
    } else {
        let mut holder = Tree::new();
        holder.insert(root_key.to_string(), raw);
        Value::Object(holder)
    };

    match format {
        Format::Yaml => serde_yaml::to_string(&wrapped).map_err(|e| encode_err(e.to_string())),
        Format::Json => to_json_pretty(&wrapped).map_err(|e| encode_err(e.to_string())),
        Format::Toml => {
            toml::to_string_pretty(&strip_nulls(wrapped)).map_err(|e| encode_err(e.to_string()))
        }
        Format::Env => Ok(marshal_env(&wrapped, env_prefix)),
    }
}

fn to_json_pretty(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// TOML has no null; drop `None` leaves.
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

/// Flatten nested maps breadth-first into `PREFIX_KEY_SUBKEY=value` lines.
fn marshal_env(value: &Value, env_prefix: &str) -> String {
    let mut queue: std::collections::VecDeque<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        other => [(String::new(), other)].into_iter().collect(),
    };

    let mut lines = Vec::new();
    while let Some((path, value)) = queue.pop_front() {
        match value {
            Value::Object(map) if map.is_empty() => {}
            Value::Object(map) => {
                queue.extend(map.iter().map(|(k, v)| (format!("{path}.{k}"), v)));
            }
            leaf => lines.push((env_var_name(Some(env_prefix), &path), env_value(leaf))),
        }
    }

    lines.sort();
    lines
        .into_iter()
        .map(|(name, value)| format!("{name}={value}\n"))
        .collect()
}

fn env_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(env_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
