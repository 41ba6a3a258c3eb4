//! TLS configuration and certificate loading.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;

/// Certificate and private key locations.
///
/// The certificate file should hold the server certificate followed by the
/// issuing CA's certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    /// PEM certificate chain.
    pub cert_path: PathBuf,
    /// PEM private key.
    pub key_path: PathBuf,
}

impl TlsPaths {
    /// `<dir>/<host>.crt` and `<dir>/<host>.key`.
    pub fn for_host(dir: &Path, host: &str) -> Self {
        Self {
            cert_path: dir.join(format!("{host}.crt")),
            key_path: dir.join(format!("{host}.key")),
        }
    }
}

/// Load TLS configuration from certificate and key files.
pub async fn load_tls_config(paths: &TlsPaths) -> Result<RustlsConfig, std::io::Error> {
    for (kind, path) in [("certificate", &paths.cert_path), ("private key", &paths.key_path)] {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{kind} file not found: {}", path.display()),
            ));
        }
    }

    RustlsConfig::from_pem_file(&paths.cert_path, &paths.key_path).await
}
