//! # lade-config
//!
//! Build configuration types for the lade asset pipeline: the declarative
//! rule and plugin schema, profile merging, file-based discovery
//! (lade.toml or the `lade` field of package.json), and pluggable
//! validation.

pub mod build;
pub mod config;
pub mod discovery;
pub mod error;
pub mod settings;
pub mod validation;

// Re-export main types
pub use build::*;
pub use config::*;
pub use error::*;
pub use settings::*;

// Re-export discovery and validation
pub use discovery::{discover, discover_with_profile, ConfigDiscovery};
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
