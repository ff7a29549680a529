//! # lade-pipeline
//!
//! The lade build pipeline: rule compilation, two-pass transformation
//! dispatch, and output emission.
//!
//! Every asset discovered under the context directory is matched against two
//! ordered rule lists. The pre pass runs first; the first rule whose `test`
//! matches the asset specifier (and whose `exclude`, if present, does not)
//! invokes its transformer chain, and the output replaces the asset content.
//! The main pass then runs identically against the replaced content. Within
//! a pass only one rule applies; an asset matching no rule passes through
//! unchanged.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lade_config::{BuildOptions, RuleOptions};
//! use lade_pipeline::build;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = BuildOptions::default()
//!     .with_entry("app.js")
//!     .with_rule(RuleOptions::new(r"\.css$", "style!css"));
//!
//! let summary = build(&options, Path::new("."))?;
//! println!("bundled {} modules", summary.modules);
//! # Ok(()) }
//! ```

pub mod asset;
pub mod build;
pub mod dispatch;
pub mod emit;
pub mod html;
pub mod plugins;
pub mod registry;
pub mod rules;
pub mod transformers;
pub mod walk;

pub use asset::{Asset, EmittedFile};
pub use build::{build, build_with_registry, BuildSummary};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use plugins::{instantiate_plugins, BuildPlugin, EmitContext, PluginRegistry};
pub use registry::{TransformContext, Transformer, TransformerRegistry};
pub use rules::{Pass, Rule, RuleSet, TransformStep};

/// Error types for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration handed to the pipeline.
    #[error("configuration error: {0}")]
    Config(#[from] lade_config::ConfigError),

    /// A rule names a transformer the registry does not know.
    #[error("unknown transformer: '{name}'")]
    UnknownTransformer { name: String },

    /// The configuration names a plugin the registry does not know.
    #[error("unknown plugin: '{name}'")]
    UnknownPlugin { name: String },

    /// A transformer rejected its options value.
    #[error("invalid options for transformer '{transformer}': {message}")]
    InvalidOptions {
        transformer: String,
        message: String,
    },

    /// A transformer failed while processing an asset.
    #[error("transformer '{transformer}' failed on '{specifier}': {source}")]
    Transform {
        specifier: String,
        transformer: String,
        #[source]
        source: Box<Error>,
    },

    /// HTML shell rendering failed.
    #[error("template error: {0}")]
    Template(String),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("invalid output path: {0}")]
    InvalidOutputPath(String),

    /// Output file already exists and overwrite is disabled.
    #[error("output exists: {0}")]
    OutputExists(String),

    /// File write operation failed.
    #[error("write failure: {0}")]
    WriteFailure(String),

    /// I/O error with context message.
    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Config(_) => "INVALID_CONFIG",
            Error::UnknownTransformer { .. } => "UNKNOWN_TRANSFORMER",
            Error::UnknownPlugin { .. } => "UNKNOWN_PLUGIN",
            Error::InvalidOptions { .. } => "INVALID_OPTIONS",
            Error::Transform { .. } => "TRANSFORM_FAILED",
            Error::Template(_) => "TEMPLATE_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::OutputExists(_) => "OUTPUT_EXISTS",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::IoError { .. } | Error::Io(_) => "IO_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::UnknownTransformer { name } => Some(Box::new(format!(
                "No transformer named '{}' is registered. Built-ins are 'css', 'style', 'url' and 'file'; others must be registered before the build starts.",
                name
            ))),
            Error::UnknownPlugin { name } => Some(Box::new(format!(
                "No plugin named '{}' is available. Built-ins are 'html' and 'provide'.",
                name
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Ensure it stays within the output directory and contains no '..' components.",
                path
            ))),
            Error::OutputExists(path) => Some(Box::new(format!(
                "Output file already exists: {}. Enable overwrite to replace existing files.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            _ => None,
        }
    }
}
