use std::path::PathBuf;

use crate::env;
use crate::error::ConfigoError;
use crate::file;
use crate::meta::Config;
use crate::resolve::{self, ResolveInput};

/// Where to load configuration from and how to bind it.
///
/// All fields are optional; `Options::default()` loads defaults only.
///
/// ```ignore
/// let options = Options::new()
///     .path("/etc/svc/config.yaml")
///     .key("http")
///     .env_prefix("SVC")
///     .env_include(true);
/// let config: HttpConfig = configo::parse(&options)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Config file, e.g. `/usr/share/something/config.json`. The format is
    /// taken from the extension.
    pub path: Option<PathBuf>,
    /// Parent key the shape is bound to. With `key = "http"` the shape is
    /// decoded from the `http:` section of the merged configuration.
    pub key: Option<String>,
    /// Prefix for environment variable names: `SVC` reads `SVC_ADDRESS`
    /// for the `address` key. Case-insensitive.
    pub env_prefix: Option<String>,
    /// Overlay environment variables on top of defaults and file.
    pub env_include: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the config file path.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Bind the shape to the sub-tree under `key`.
    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Set the environment variable prefix. Has no effect unless
    /// [`env_include`](Self::env_include) is on.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Enable or disable the environment layer (default: off).
    pub fn env_include(mut self, include: bool) -> Self {
        self.env_include = include;
        self
    }

    /// Read the file and snapshot the environment into a `ResolveInput`.
    ///
    /// A file that cannot be read is logged and skipped.
    fn build_input(&self) -> ResolveInput {
        let file = self.path.as_ref().and_then(|path| match file::read(path) {
            Ok(content) => Some((path.clone(), content)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unable to read config, ignoring file");
                None
            }
        });

        ResolveInput {
            key: self.key.clone(),
            file,
            env_vars: self.env_include.then(env::snapshot),
            env_prefix: self.env_prefix.clone(),
        }
    }

    /// Load and resolve the configuration through all layers.
    pub fn load<C: Config>(&self) -> Result<C, ConfigoError> {
        resolve::resolve(self.build_input())
    }
}
