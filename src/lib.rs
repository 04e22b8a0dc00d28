//! Typed, layered configuration. Declare a struct, point at a file, and go.
//!
//! Configo builds one fully populated value of your config type from three
//! sources: defaults declared on the struct, a config file, and environment
//! variables.
//!
//! ```ignore
//! configo::config! {
//!     #[derive(Debug)]
//!     pub struct Http {
//!         #[conf(key = "address", default = "127.0.0.1")]
//!         pub address: String,
//!         #[conf(key = "port", default = "80")]
//!         pub port: u16,
//!     }
//! }
//!
//! let http: Http = configo::parse(
//!     &Options::new().path("/etc/svc/config.yaml").env_include(true),
//! )?;
//! ```
//!
//! # Declaring a shape
//!
//! The [`config!`] macro takes an ordinary struct definition where each
//! configurable field carries `#[conf(key = "...")]` and, optionally,
//! `default = "..."`. The key is the field's name in files and the basis of
//! its environment variable name. Fields without the annotation, or with
//! `key = "-"`, are not configuration: they are skipped when decoding and
//! keep their `Default` value.
//!
//! Field types can be integers, `String`, `bool`, floats, `Vec`, string-keyed
//! maps, `serde_json::Value`, other `config!` structs, and `Option` of any of
//! those.
//!
//! # Defaults
//!
//! Defaults are text, coerced into the field type:
//!
//! - integers parse as base-10; a literal that does not parse or does not fit
//!   leaves the field at zero
//! - strings are taken verbatim
//! - bools are `true` only for the literal `"true"`
//! - floats, sequences and maps have no textual default; the literal is
//!   ignored
//! - `"-"` means no default
//!
//! None of this produces an error. Nested structs fill in their own
//! defaults, and `Option` fields are always populated so that an optional
//! nested struct receives its defaults too.
//!
//! # Layer precedence
//!
//! ```text
//! Struct defaults      #[conf(default = ...)]
//!        ↑ overridden by
//! Config file          Options::path, format from extension
//!        ↑ overridden by
//! Environment vars     PREFIX_KEY_SUBKEY (only with env_include)
//! ```
//!
//! Maps merge key by key; a null (such as a YAML section holding only
//! comments) leaves a map below it alone; any other value replaces what is
//! below it. A file
//! that is missing or does not parse is logged at `warn` level and skipped.
//!
//! # Scoping
//!
//! [`Options::key`] binds the shape to one section of the configuration.
//! With `key = "http"` a file shaped like
//!
//! ```yaml
//! http:
//!   address: localhost
//!   port: 23
//! db:
//!   url: postgres://
//! ```
//!
//! decodes `http` into the shape and ignores `db`. Defaults are placed under
//! the same key, and environment variable names include it
//! (`PREFIX_HTTP_PORT`).
//!
//! # Environment variables
//!
//! Each known key path maps to one variable: upper-cased, dots replaced by
//! underscores, joined to the prefix with `_`. With prefix `SVC`, the key
//! `tls.enabled` is read from `SVC_TLS_ENABLED`. A variable set to the empty
//! string overrides the value below it. Values are strings; they are
//! converted to the field's type during decoding.
//!
//! # Error handling
//!
//! [`parse`] returns every failure as a [`ConfigoError`]: a value that cannot
//! be converted to its field type, a scope key that is missing or not a map.
//! [`must_parse`] panics instead; use it where a broken configuration should
//! stop the process.
//!
//! # Rendering
//!
//! [`marshal_conf`] goes the other way, writing a config value as YAML, JSON,
//! TOML or `KEY=value` lines, wrapped under a root key so that parsing the
//! output with the same key reproduces the value.

pub mod error;
pub mod types;

mod builder;
mod coerce;
mod decode;
mod defaults;
mod env;
mod file;
mod macros;
mod marshal;
pub(crate) mod merge;
mod meta;
mod resolve;

#[cfg(test)]
mod fixtures;

use serde::Serialize;

pub use builder::Options;
pub use defaults::extract_defaults;
pub use env::{env_var_name, path_from_env_var};
pub use error::ConfigoError;
pub use marshal::try_marshal_conf;
pub use merge::Tree;
pub use meta::{Config, EXCLUDE, Field, FieldKind, FieldType, IntKind, Meta};
pub use types::Format;

/// Load `C` from the sources described by `options`.
pub fn parse<C: Config>(options: &Options) -> Result<C, ConfigoError> {
    options.load()
}

/// Like [`parse`], but panics on error.
pub fn must_parse<C: Config>(options: &Options) -> C {
    match parse(options) {
        Ok(config) => config,
        Err(e) => panic!("configo: {e}"),
    }
}

/// Render `value` under `root_key` in `format`.
///
/// Panics if the value cannot be encoded; see [`try_marshal_conf`] for the
/// fallible form.
pub fn marshal_conf<T: Serialize + ?Sized>(
    format: Format,
    env_prefix: &str,
    root_key: &str,
    value: &T,
) -> String {
    match try_marshal_conf(format, env_prefix, root_key, value) {
        Ok(text) => text,
        Err(e) => panic!("configo: {e}"),
    }
}
