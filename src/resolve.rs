//! Core resolution pipeline: merge all config layers and produce a typed config.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Extract defaults from the shape's descriptor table, nested under the
//!    scope key when one is set
//! 2. Parse the config file and deep-merge it on top (parse failures are
//!    logged and the file is skipped)
//! 3. Deep-merge environment overrides for every known leaf
//! 4. Select the scope and decode into `C`

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::decode;
use crate::defaults::extract_defaults;
use crate::env;
use crate::error::ConfigoError;
use crate::file;
use crate::merge::{Tree, deep_merge};
use crate::meta::Config;

/// All pre-loaded data needed to resolve a config. No I/O happens here.
#[derive(Debug, Default)]
pub struct ResolveInput {
    /// Scope key: the shape binds to the sub-tree under this key.
    pub key: Option<String>,
    /// Config file path and contents, if one was read.
    pub file: Option<(PathBuf, String)>,
    /// Environment snapshot. `None` means env disabled.
    pub env_vars: Option<HashMap<String, String>>,
    /// Env var prefix (e.g. `"APP"`).
    pub env_prefix: Option<String>,
}

impl ResolveInput {
    fn scope(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Merge defaults, file and environment into one tree, lowest precedence
/// first.
pub fn merge_layers(defaults: Tree, input: &ResolveInput) -> Result<Tree, ConfigoError> {
    // 1: defaults, optionally scoped
    let mut merged = match input.scope() {
        Some(key) => {
            let mut holder = Tree::new();
            holder.insert(key.to_string(), Value::Object(defaults));
            holder
        }
        None => defaults,
    };

    // 2: file on top
    if let Some((path, content)) = &input.file {
        match file::parse(path, content) {
            Ok(tree) => {
                tracing::debug!(path = %path.display(), keys = tree.len(), "merging config file");
                merged = deep_merge(merged, tree);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unable to read config, ignoring file");
            }
        }
    }

    // 3: env vars on top
    if let Some(vars) = &input.env_vars {
        let overlay = env::env_to_tree(&merged, input.env_prefix.as_deref(), vars)?;
        merged = deep_merge(merged, overlay);
    }

    Ok(merged)
}

/// Resolve configuration from pre-loaded inputs.
pub fn resolve<C: Config>(input: ResolveInput) -> Result<C, ConfigoError> {
    let defaults = extract_defaults(&C::meta());
    let merged = merge_layers(defaults, &input)?;
    decode::decode(merged, input.scope())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{EnvConfig, HttpConfig, MixedConfig, OptionalHttpConfig};

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn with_file(name: &str, content: &str) -> ResolveInput {
        ResolveInput {
            file: Some((name.into(), content.into())),
            ..ResolveInput::default()
        }
    }

    #[test]
    fn defaults_only() {
        let config: HttpConfig = resolve(ResolveInput::default()).unwrap();
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 80);
        assert!(config.tls.enabled);
        assert_eq!(config.tls.cert, "");
    }

    #[test]
    fn file_overrides_default() {
        let config: HttpConfig = resolve(with_file("c.yaml", "port: 8080\n")).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.address, "127.0.0.1"); // default preserved
    }

    #[test]
    fn env_overrides_file() {
        let input = ResolveInput {
            env_vars: env(&[("PORT", "9090")]),
            ..with_file("c.yaml", "port: 8080\n")
        };
        let config: HttpConfig = resolve(input).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn env_ignored_when_disabled() {
        let mut input = with_file("c.yaml", "port: 8080\n");
        input.env_vars = None;
        input.env_prefix = Some("APP".into());
        let config: HttpConfig = resolve(input).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn env_overrides_default_without_file() {
        let input = ResolveInput {
            env_vars: env(&[("TLS_ENABLED", "false")]),
            ..ResolveInput::default()
        };
        let config: HttpConfig = resolve(input).unwrap();
        assert!(!config.tls.enabled);
        assert_eq!(config.port, 80);
    }

    #[test]
    fn sparse_merge_across_layers() {
        let input = ResolveInput {
            env_vars: env(&[("SVC_PORT", "4000")]),
            env_prefix: Some("svc".into()),
            ..with_file("c.json", r#"{"address": "filehost", "tls": {"cert": "c.pem"}}"#)
        };
        let config: HttpConfig = resolve(input).unwrap();
        assert_eq!(config.address, "filehost"); // from file
        assert_eq!(config.port, 4000); // from env
        assert_eq!(config.tls.cert, "c.pem"); // from file
        assert!(config.tls.enabled); // default
    }

    #[test]
    fn unparsable_file_is_skipped() {
        let config: HttpConfig = resolve(with_file("c.json", "{broken")).unwrap();
        assert_eq!(config.port, 80);
    }

    #[test]
    fn unsupported_file_format_is_skipped() {
        let config: HttpConfig = resolve(with_file("c.ini", "port=1")).unwrap();
        assert_eq!(config.port, 80);
    }

    #[test]
    fn scoped_defaults_file_and_env() {
        let input = ResolveInput {
            key: Some("svc".into()),
            env_vars: env(&[("APP_SVC_TEST_ENV", "from_env")]),
            env_prefix: Some("APP".into()),
            ..with_file("c.yaml", "svc:\n  test:\n    env: from_file\nother: 1\n")
        };
        let config: EnvConfig = resolve(input).unwrap();
        assert_eq!(config.test.env, "from_env");
    }

    #[test]
    fn scoped_file_without_key_keeps_defaults() {
        let input = ResolveInput {
            key: Some("svc".into()),
            ..with_file("c.yaml", "test:\n  env: unscoped\n")
        };
        let config: EnvConfig = resolve(input).unwrap();
        assert_eq!(config.test.env, "test");
    }

    #[test]
    fn file_replacing_scope_with_scalar_fails() {
        let input = ResolveInput {
            key: Some("svc".into()),
            ..with_file("c.yaml", "svc: nope\n")
        };
        let result: Result<EnvConfig, _> = resolve(input);
        assert!(matches!(result, Err(ConfigoError::ScopeNotTable(_))));
    }

    #[test]
    fn optional_nested_defaults_survive_merge() {
        let config: OptionalHttpConfig =
            resolve(with_file("c.toml", "[http]\naddress = \"h\"\n")).unwrap();
        let http = config.http.unwrap();
        assert_eq!(http.address, "h");
        assert_eq!(http.port, Some(80));
        assert!(http.tls.enabled);
        assert_eq!(config.name.as_deref(), Some("svc"));
        assert_eq!(config.retries, Some(0));
    }

    #[test]
    fn commented_out_section_keeps_defaults() {
        let config: HttpConfig =
            resolve(with_file("c.yaml", "port: 81\ntls:\n  # enabled: false\n")).unwrap();
        assert_eq!(config.port, 81);
        assert!(config.tls.enabled);
    }

    #[test]
    fn env_list_splits_on_commas() {
        let input = ResolveInput {
            env_vars: env(&[("TAGS", "a,b"), ("RATIO", "")]),
            ..ResolveInput::default()
        };
        let config: MixedConfig = resolve(input).unwrap();
        assert_eq!(config.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.ratio, 0.0);
    }

    #[test]
    fn file_type_mismatch_is_a_decode_error() {
        let result: Result<HttpConfig, _> = resolve(with_file("c.yaml", "port: [1, 2]\n"));
        assert!(matches!(result, Err(ConfigoError::Decode(_))));
    }
}
