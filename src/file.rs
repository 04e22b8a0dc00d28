//! Config file loading.
//!
//! The format is chosen from the file extension, compared case-insensitively:
//! `yaml`/`yml`, `json`, `toml` and `env`. A bare dotfile such as `.env` has
//! no extension in the `Path` sense; the text after the leading dot is used
//! instead.
//!
//! Dotenv files are flat: each `KEY=value` line becomes a string entry under
//! the lower-cased key, and dots in the key nest
//! (`http.port=80` → `{http: {port: "80"}}`).

use std::path::Path;

use serde_json::Value;

use crate::error::ConfigoError;
use crate::merge::{Tree, set_path};
use crate::types::Format;

/// The extension token used to select the format, lower-cased.
pub fn extension_token(path: &Path) -> Option<String> {
    if let Some(ext) = path.extension() {
        return Some(ext.to_string_lossy().to_lowercase());
    }
    let name = path.file_name()?.to_string_lossy();
    let rest = name.strip_prefix('.')?;
    (!rest.is_empty()).then(|| rest.to_lowercase())
}

/// Resolve the format for `path`.
pub fn format_for(path: &Path) -> Result<Format, ConfigoError> {
    let token = extension_token(path).unwrap_or_default();
    Format::from_extension(&token).ok_or_else(|| ConfigoError::UnsupportedFormat {
        path: path.to_path_buf(),
        format: token,
    })
}

/// Read the file at `path` into a string.
pub fn read(path: &Path) -> Result<String, ConfigoError> {
    std::fs::read_to_string(path).map_err(|e| ConfigoError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse file contents into a tree. `path` selects the format and is used in
/// error messages.
pub fn parse(path: &Path, content: &str) -> Result<Tree, ConfigoError> {
    let parse_err = |reason: String| ConfigoError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let value: Value = match format_for(path)? {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Env => return parse_dotenv(path, content),
    };

    match value {
        Value::Object(tree) => Ok(tree),
        // An empty YAML document.
        Value::Null => Ok(Tree::new()),
        other => Err(parse_err(format!(
            "expected a mapping at the top level, found {}",
            kind_name(&other)
        ))),
    }
}

fn parse_dotenv(path: &Path, content: &str) -> Result<Tree, ConfigoError> {
    let mut tree = Tree::new();
    for item in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = item.map_err(|e| ConfigoError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        set_path(&mut tree, &key.to_lowercase(), Value::String(value))?;
    }
    Ok(tree)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
