//! Configuration loading from disk.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::FileConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    let mut out = String::new();
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{err}");
    }
    out
}

/// Read and deserialize a TOML config file without validating it.
pub fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogFormat, RedirectorConfig};
    use crate::config::validation::validate_config;
    use std::io::Write;

    fn load_config(path: &Path) -> Result<RedirectorConfig, ConfigError> {
        let raw = read_file_config(path)?;
        validate_config(&raw).map_err(ConfigError::Validation)
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
import = "rsc.io/*"
repo = "https://github.com/rsc/*"
addr = "127.0.0.1:8080"
vcs = "hg"
request_timeout_secs = 5

[log]
level = "debug"
format = "json"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.mapping.import_root(), "rsc.io");
        assert_eq!(config.mapping.wildcard_depth(), 1);
        assert_eq!(config.vcs, "hg");
        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.request_timeout.as_secs(), 5);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let file = write_config("import = \"rsc.io\"\nrepos = \"https://github.com/rsc\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let file = write_config("import = \"rsc.io/*\"\nrepo = \"github.com/rsc\"\n");
        let err = load_config(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("must have /* or neither"), "{msg}");
        assert!(msg.contains("must be full URL"), "{msg}");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/redirector.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
