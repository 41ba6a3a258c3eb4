//! Configuration validation.
//!
//! # Responsibilities
//! - Strip and count `/*` wildcard segments on both roots
//! - Check the repository root is a full URL
//! - Resolve the listen address and TLS file locations
//! - Validate value ranges (timeout > 0, usable VCS token)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: FileConfig → Result<RedirectorConfig, Vec<ValidationError>>
//! - Runs once at startup; any error is fatal

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::config::schema::{
    FileConfig, RedirectorConfig, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_VCS,
};
use crate::net::tls::TlsPaths;
use crate::routing::ImportMapping;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing <{0}> argument")]
    Missing(&'static str),

    #[error("import path root is empty")]
    EmptyImportRoot,

    #[error("import path {0:?} must not include a URL scheme")]
    ImportHasScheme(String),

    #[error("repo path {0:?} must be full URL")]
    RepoNotUrl(String),

    #[error("repo URL {url:?} is invalid: {reason}")]
    InvalidRepoUrl { url: String, reason: String },

    #[error("either both import and repo must have /* or neither (import has {import}, repo has {repo})")]
    WildcardMismatch { import: usize, repo: usize },

    #[error("vcs {0:?} must be a single non-empty word")]
    InvalidVcs(String),

    #[error("listen address {addr:?} is invalid: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("log level {level:?} is invalid: {reason}")]
    InvalidLogLevel { level: String, reason: String },
}

/// Validate a merged raw configuration.
pub fn validate_config(raw: &FileConfig) -> Result<RedirectorConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mapping = match (raw.import.as_deref(), raw.repo.as_deref()) {
        (Some(import), Some(repo)) => match parse_mapping(import, repo) {
            Ok(mapping) => Some(mapping),
            Err(mut errs) => {
                errors.append(&mut errs);
                None
            }
        },
        (import, repo) => {
            if import.is_none() {
                errors.push(ValidationError::Missing("import"));
            }
            if repo.is_none() {
                errors.push(ValidationError::Missing("repo"));
            }
            None
        }
    };

    let vcs = raw.vcs.clone().unwrap_or_else(|| DEFAULT_VCS.to_string());
    if let Err(e) = validate_vcs(&vcs) {
        errors.push(e);
    }

    let tls_enabled = raw.tls.unwrap_or(false);
    let default_addr = if tls_enabled { ":https" } else { ":http" };
    let listen_addr = match parse_listen_addr(raw.addr.as_deref().unwrap_or(default_addr)) {
        Ok(addr) => Some(addr),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let timeout_secs = raw.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    if timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let log_level = raw.log.level.clone().unwrap_or_else(|| "info".to_string());
    if let Err(e) = EnvFilter::try_new(&log_level) {
        errors.push(ValidationError::InvalidLogLevel {
            level: log_level.clone(),
            reason: e.to_string(),
        });
    }

    match (mapping, listen_addr) {
        (Some(mapping), Some(listen_addr)) if errors.is_empty() => {
            let tls = tls_enabled.then(|| {
                let dir = raw.cert_dir.clone().unwrap_or_else(|| PathBuf::from("."));
                TlsPaths::for_host(&dir, mapping.host())
            });
            Ok(RedirectorConfig {
                mapping,
                vcs,
                listen_addr,
                tls,
                request_timeout: Duration::from_secs(timeout_secs),
                log_level,
                log_format: raw.log.format.unwrap_or_default(),
            })
        }
        _ => Err(errors),
    }
}

/// Build an [`ImportMapping`] from the `<import>` and `<repo>` arguments.
pub fn parse_mapping(import: &str, repo: &str) -> Result<ImportMapping, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let (import_root, import_depth) = strip_wildcards(import);
    let (repo_root, repo_depth) = strip_wildcards(repo);
    if import_depth != repo_depth {
        errors.push(ValidationError::WildcardMismatch {
            import: import_depth,
            repo: repo_depth,
        });
    }

    let import_root = import_root.trim_end_matches('/');
    let repo_root = repo_root.trim_end_matches('/');

    if import_root.is_empty() {
        errors.push(ValidationError::EmptyImportRoot);
    } else if import_root.contains("://") {
        errors.push(ValidationError::ImportHasScheme(import.to_string()));
    }

    if !repo_root.contains("://") {
        errors.push(ValidationError::RepoNotUrl(repo.to_string()));
    } else if let Err(e) = url::Url::parse(repo_root) {
        errors.push(ValidationError::InvalidRepoUrl {
            url: repo.to_string(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(ImportMapping::new(import_root, repo_root, import_depth))
    } else {
        Err(errors)
    }
}

/// Remove trailing `/*` segments, returning the rest and how many were removed.
fn strip_wildcards(mut s: &str) -> (&str, usize) {
    let mut depth = 0;
    while let Some(rest) = s.strip_suffix("/*") {
        s = rest;
        depth += 1;
    }
    (s, depth)
}

/// The token is a space-separated field of the go-import meta tag.
pub fn validate_vcs(vcs: &str) -> Result<(), ValidationError> {
    if vcs.is_empty() || vcs.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidVcs(vcs.to_string()));
    }
    Ok(())
}

/// Parse a listen address.
///
/// A leading `:` means all interfaces; the port may be a number or one of
/// the service names `http` and `https`. Anything else is resolved as
/// `host:port`.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidAddress {
        addr: addr.to_string(),
        reason,
    };

    if let Some(port) = addr.strip_prefix(':') {
        let port = match port {
            "http" => 80,
            "https" => 443,
            p => p.parse::<u16>().map_err(|e| invalid(e.to_string()))?,
        };
        return Ok(SocketAddr::from(([0, 0, 0, 0], port)));
    }

    addr.to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses resolved".to_string()))
}
