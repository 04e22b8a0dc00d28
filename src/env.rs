//! Environment variable layer and key translation.
//!
//! A dotted config path maps to one variable name: the path is upper-cased,
//! dots become underscores, and the prefix (if any) is joined with a single
//! underscore:
//!
//! | Prefix | Path | Variable |
//! |--------|------|----------|
//! | none | `port` | `PORT` |
//! | `app` | `test.env` | `APP_TEST_ENV` |
//!
//! The layer is lookup-driven: only paths already present in the lower layers
//! are consulted, so unrelated variables never leak into the tree. A variable
//! set to the empty string still counts as set.
//!
//! Paths are split on `.` when the overlay is built, so a map entry whose own
//! key contains a dot (`labels: {"app.name": x}`) is overridden at the nested
//! path `labels.app.name` instead of the entry itself. Keep map keys free of
//! dots if they are meant to be set from the environment.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::ConfigoError;
use crate::merge::{Tree, leaf_paths, set_path};

/// Translate a dotted config path into an environment variable name.
pub fn env_var_name(prefix: Option<&str>, path: &str) -> String {
    let key = path.replace('.', "_").to_uppercase();
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}_{key}", prefix.to_uppercase()),
        None => key,
    }
}

/// Translate an environment variable name back into a dotted config path.
///
/// Returns `None` when the name is not under `prefix` or nothing is left after
/// stripping it. Underscores inside a key cannot be told apart from nesting,
/// so every underscore becomes a dot.
pub fn path_from_env_var(prefix: Option<&str>, name: &str) -> Option<String> {
    let upper = name.to_uppercase();
    let rest = match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => upper.strip_prefix(&format!("{}_", prefix.to_uppercase()))?,
        None => upper.as_str(),
    };
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_lowercase().replace('_', "."))
}

/// Build the environment overlay for the leaves of `known`.
///
/// Values are inserted as strings; the decoder converts them to the field
/// types.
pub fn env_to_tree(
    known: &Tree,
    prefix: Option<&str>,
    vars: &HashMap<String, String>,
) -> Result<Tree, ConfigoError> {
    let mut overlay = Tree::new();
    for path in leaf_paths(known) {
        let name = env_var_name(prefix, &path);
        if let Some(value) = vars.get(&name) {
            tracing::debug!(var = %name, key = %path, "environment override");
            set_path(&mut overlay, &path, Value::String(value.clone()))?;
        }
    }
    Ok(overlay)
}

/// Snapshot the process environment. Entries that are not valid UTF-8 are
/// skipped.
pub fn snapshot() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
