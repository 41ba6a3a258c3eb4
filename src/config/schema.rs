//! Configuration schema definitions.
//!
//! [`FileConfig`] is the raw, optional-everywhere shape shared by the TOML
//! file and the command line. [`RedirectorConfig`] is what validation
//! produces and what the server runs with.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::net::tls::TlsPaths;
use crate::routing::ImportMapping;

/// Default version control system token.
pub const DEFAULT_VCS: &str = "git";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raw configuration as read from a file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Import path root, optionally ending in one or more `/*`.
    pub import: Option<String>,

    /// Repository root URL, with the same number of `/*` as `import`.
    pub repo: Option<String>,

    /// Listen address (`host:port`, `:port`, `:http` or `:https`).
    pub addr: Option<String>,

    /// Version control system named in the go-import meta tag.
    pub vcs: Option<String>,

    /// Serve HTTPS using `<host>.crt` and `<host>.key`.
    pub tls: Option<bool>,

    /// Directory holding the certificate pair.
    pub cert_dir: Option<PathBuf>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,

    /// Logging settings.
    pub log: LogConfig,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `import_redirector=debug`.
    pub level: Option<String>,

    /// Output format.
    pub format: Option<LogFormat>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Validated configuration the server runs with.
#[derive(Debug, Clone)]
pub struct RedirectorConfig {
    /// Import root to repository root mapping.
    pub mapping: ImportMapping,

    /// VCS token, used verbatim in the meta tag.
    pub vcs: String,

    /// Address to listen on.
    pub listen_addr: SocketAddr,

    /// Certificate and key locations when serving HTTPS.
    pub tls: Option<TlsPaths>,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Log filter directive.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl RedirectorConfig {
    /// Build a plain-HTTP configuration with default settings around `mapping`.
    pub fn new(mapping: ImportMapping, listen_addr: SocketAddr) -> Self {
        Self {
            mapping,
            vcs: DEFAULT_VCS.to_string(),
            listen_addr,
            tls: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
