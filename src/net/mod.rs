//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → [plain] axum::serve on a tokio TcpListener
//!     → [--tls] tls.rs (rustls config from <host>.crt / <host>.key)
//!               → axum-server rustls acceptor
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Certificates are loaded once at startup; a missing file is fatal
//! - TLS is optional and handled transparently to the handler

pub mod tls;

pub use tls::{load_tls_config, TlsPaths};
