//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → percent-decoded path
//!     → host + path, one trailing '/' removed
//!     → resolver.rs (match against the configured ImportMapping)
//!     → Return: Render(Resolved) | RedirectToRepo | NoMatch
//!
//! Mapping Compilation (at startup):
//!     <import> <repo> arguments
//!     → strip matching "/*" wildcard segments
//!     → Freeze as immutable ImportMapping
//! ```
//!
//! # Design Decisions
//! - Mapping built at startup, immutable at runtime
//! - Resolution is a pure function: no locks, no shared mutable state
//! - Deterministic: same input always resolves the same way

pub mod resolver;

pub use resolver::{
    decode_request_path, normalize_request_path, resolve, ImportMapping, Resolution, Resolved,
};
