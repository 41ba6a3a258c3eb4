//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, handler)
//!     → [diagnostic path] pong
//!     → routing::resolver (match host + path against the mapping)
//!     → response.rs (render page, redirect, or not found)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::{RenderError, Renderer};
pub use server::{AppState, HttpServer, ServerError};
