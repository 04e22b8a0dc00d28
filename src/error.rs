use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigoError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Unsupported config format '{format}' for {path}")]
    UnsupportedFormat { path: PathBuf, format: String },

    #[error("Cannot merge value at '{key}': an intermediate key is not a table")]
    Merge { key: String },

    #[error("Key '{0}' not found in merged configuration")]
    ScopeNotFound(String),

    #[error("Value at key '{0}' is not a table")]
    ScopeNotTable(String),

    #[error("Failed to decode configuration: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to encode configuration as {format}: {reason}")]
    Encode { format: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_path() {
        let err = ConfigoError::Read {
            path: "/etc/svc/config.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("config.yaml"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn unsupported_format_names_format() {
        let err = ConfigoError::UnsupportedFormat {
            path: "conf.ini".into(),
            format: "ini".into(),
        };
        assert!(err.to_string().contains("'ini'"));
    }

    #[test]
    fn scope_errors_name_key() {
        assert!(ConfigoError::ScopeNotFound("http".into()).to_string().contains("http"));
        assert!(ConfigoError::ScopeNotTable("http".into()).to_string().contains("http"));
    }
}
