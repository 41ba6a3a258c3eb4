//! Observability subsystem.
//!
//! Structured log events via `tracing`, plus per-request spans from
//! tower-http's `TraceLayer` in the HTTP server.

pub mod logging;

pub use logging::init_logging;
