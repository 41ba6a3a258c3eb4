//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (clap)            optional TOML file
//!     → args.rs                      → loader.rs (read & deserialize)
//!     └──────────── merged FileConfig ───────────┘
//!     → validation.rs (semantic checks, wildcard stripping)
//!     → RedirectorConfig (validated, immutable)
//!     → shared via Arc with request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - Command-line values override file values, which override defaults
//! - Validation separates syntactic (serde/clap) from semantic checks

pub mod args;
pub mod loader;
pub mod schema;
pub mod validation;

pub use args::Args;
pub use loader::{read_file_config, ConfigError};
pub use schema::{FileConfig, LogConfig, LogFormat, RedirectorConfig};
pub use validation::{validate_config, ValidationError};
