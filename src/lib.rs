//! Go import path redirector.
//!
//! Answers `go get` discovery requests for a custom import path root with a
//! `go-import` meta tag naming the source repository and an HTML redirect to
//! it. With a wildcard mapping (`rsc.io/*` → `https://github.com/rsc/*`)
//! the matching request path element is substituted into both roots.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::ImportMapping;
