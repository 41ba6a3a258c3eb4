//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{read_file_config, ConfigError};
use crate::config::schema::{FileConfig, LogConfig, LogFormat, RedirectorConfig};
use crate::config::validation::validate_config;

const EXAMPLES: &str = "\
Examples:
  import-redirector 'rsc.io/*' 'https://github.com/rsc/*'
  import-redirector 9fans.net/go https://github.com/9fans/go";

/// HTTP server for a custom Go import path root.
///
/// Answers requests under <IMPORT> with a go-import meta tag pointing at
/// <REPO> and an HTML redirect to the repository. If both end in /*, the
/// matching path element of each request is substituted into both.
#[derive(Debug, Parser)]
#[command(name = "import-redirector", version, after_help = EXAMPLES)]
pub struct Args {
    /// Import path root, e.g. `9fans.net/go` or `rsc.io/*`.
    #[arg(value_name = "IMPORT")]
    pub import: Option<String>,

    /// Repository root URL, e.g. `https://github.com/rsc/*`.
    #[arg(value_name = "REPO")]
    pub repo: Option<String>,

    /// Serve on this address (default `:http`, or `:https` with --tls).
    #[arg(long, value_name = "ADDRESS")]
    pub addr: Option<String>,

    /// Version control system named in the meta tag (default `git`).
    #[arg(long, value_name = "SYSTEM")]
    pub vcs: Option<String>,

    /// Serve HTTPS using `<host>.crt` and `<host>.key` from --cert-dir.
    #[arg(long)]
    pub tls: bool,

    /// Directory holding the TLS certificate and key (default `.`).
    #[arg(long, value_name = "DIR")]
    pub cert_dir: Option<PathBuf>,

    /// Per-request timeout in seconds (default 30).
    #[arg(long, value_name = "SECS")]
    pub request_timeout_secs: Option<u64>,

    /// TOML file supplying any of the settings above.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter directive; RUST_LOG takes precedence (default `info`).
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log output format.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Args {
    /// Overlay command-line values on top of `base`.
    pub fn merge_into(self, base: FileConfig) -> FileConfig {
        FileConfig {
            import: self.import.or(base.import),
            repo: self.repo.or(base.repo),
            addr: self.addr.or(base.addr),
            vcs: self.vcs.or(base.vcs),
            tls: if self.tls { Some(true) } else { base.tls },
            cert_dir: self.cert_dir.or(base.cert_dir),
            request_timeout_secs: self.request_timeout_secs.or(base.request_timeout_secs),
            log: LogConfig {
                level: self.log_level.or(base.log.level),
                format: self.log_format.or(base.log.format),
            },
        }
    }

    /// Read the optional config file, apply command-line overrides and validate.
    pub fn into_config(self) -> Result<RedirectorConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };
        let raw = self.merge_into(base);
        validate_config(&raw).map_err(ConfigError::Validation)
    }
}
