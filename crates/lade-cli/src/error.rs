//! CLI error types and miette conversion.
//!
//! Domain errors from `lade-config` and `lade-pipeline` convert
//! automatically via `#[from]`; the conversion to miette at the top of
//! `main` keeps their diagnostic codes and help text.

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("configuration error: {0}")]
    Config(#[from] lade_config::ConfigError),

    /// The build pipeline failed
    #[error(transparent)]
    Pipeline(#[from] lade_pipeline::Error),

    /// Invalid command-line arguments or options
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Convert a CliError into a miette Report for terminal rendering.
///
/// Pipeline errors carry their own Diagnostic implementation (codes and
/// help text), so they are wrapped directly.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Pipeline(e) => Report::new(e),
        CliError::Config(e) => miette::miette!("configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_errors_keep_their_diagnostic_code() {
        let err = CliError::Pipeline(lade_pipeline::Error::UnknownTransformer {
            name: "babel".to_string(),
        });
        let report = cli_error_to_miette(err);
        assert!(report.to_string().contains("babel"));
    }

    #[test]
    fn config_errors_are_prefixed() {
        let err = CliError::Config(lade_config::ConfigError::NoEntries);
        let report = cli_error_to_miette(err);
        assert!(report.to_string().starts_with("configuration error"));
    }
}
