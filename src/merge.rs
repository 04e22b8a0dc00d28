use serde_json::{Map, Value};

use crate::error::ConfigoError;

/// The hierarchical value map every layer is converted into before merging.
pub type Tree = Map<String, Value>;

/// Deep-merge `overlay` on top of `base`.
/// If both sides have a map for the same key, recurse.
/// A null overlay on a map leaves the map alone.
/// Otherwise, `overlay`'s value wins.
///
/// Keys are compared ignoring ASCII case; the spelling already in `base` is
/// kept.
pub fn deep_merge(mut base: Tree, overlay: Tree) -> Tree {
    for (key, overlay_val) in overlay {
        let key = canonical_key(&base, key);
        match (base.remove(&key), overlay_val) {
            (Some(Value::Object(base_tbl)), Value::Object(overlay_tbl)) => {
                base.insert(key, Value::Object(deep_merge(base_tbl, overlay_tbl)));
            }
            (Some(Value::Object(base_tbl)), Value::Null) => {
                base.insert(key, Value::Object(base_tbl));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}

fn canonical_key(base: &Tree, key: String) -> String {
    if base.contains_key(&key) {
        return key;
    }
    base.keys()
        .find(|k| k.eq_ignore_ascii_case(&key))
        .cloned()
        .unwrap_or(key)
}

/// Set `value` at a dotted path, creating intermediate maps as needed.
///
/// Fails when an intermediate segment already holds a non-map value.
pub fn set_path(tree: &mut Tree, dotted_key: &str, value: Value) -> Result<(), ConfigoError> {
    let (parents, leaf) = match dotted_key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, dotted_key),
    };

    let mut current = tree;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        current = current
            .entry(segment)
            .or_insert_with(|| Value::Object(Tree::new()))
            .as_object_mut()
            .ok_or_else(|| ConfigoError::Merge {
                key: dotted_key.to_string(),
            })?;
    }

    current.insert(leaf.to_string(), value);
    Ok(())
}

/// All leaf paths of `tree` in dotted form. Empty maps count as leaves.
pub fn leaf_paths(tree: &Tree) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(tree, "", &mut paths);
    paths
}

fn collect_paths(tree: &Tree, prefix: &str, paths: &mut Vec<String>) {
    for (key, value) in tree {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(sub) if !sub.is_empty() => collect_paths(sub, &dotted, paths),
            _ => paths.push(dotted),
        }
    }
}
