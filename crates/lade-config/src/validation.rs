//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation
//! (for library use).

use std::path::Path;

use crate::build::{BuildOptions, HtmlOptions, RuleOptions};
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate build options
    fn validate(&self, config: &BuildOptions) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// Use this for library use cases where files are in-memory or virtual.
///
/// # Example
///
/// ```
/// use lade_config::{BuildOptions, SchemaValidator, ConfigValidator};
///
/// let mut config = BuildOptions::default();
/// config.entries = vec!["app.js".into()];
///
/// let validator = SchemaValidator;
/// validator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildOptions) -> Result<()> {
        // Entry validation
        if config.entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        if config.output.filename.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "output filename cannot be empty".to_string(),
                hint: Some("Set output.filename, e.g. \"app.js\"".to_string()),
            });
        }

        for rule in config.pre_rules.iter().chain(config.rules.iter()) {
            validate_rule(rule)?;
        }

        // Validate plugin configurations
        for plugin in &config.plugins {
            if plugin.name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "plugin name cannot be empty".to_string(),
                    hint: Some("Name each plugin, e.g. \"html\" or \"provide\"".to_string()),
                });
            }

            // Validate order is reasonable
            if plugin.order < -1000 || plugin.order > 1000 {
                return Err(ConfigError::SchemaValidation {
                    message: format!(
                        "plugin order {} is out of reasonable range (-1000 to 1000)",
                        plugin.order
                    ),
                    hint: Some("Use an order value between -1000 and 1000".to_string()),
                });
            }
        }

        Ok(())
    }
}

fn validate_rule(rule: &RuleOptions) -> Result<()> {
    compile_pattern(&rule.test)?;
    if let Some(exclude) = &rule.exclude {
        compile_pattern(exclude)?;
    }

    if rule.transformer_chain().iter().any(|name| name.is_empty()) {
        return Err(ConfigError::SchemaValidation {
            message: format!("rule '{}' has an empty transformer name", rule.test),
            hint: Some("Chained transformers are written like \"style!css\"".to_string()),
        });
    }

    Ok(())
}

fn compile_pattern(pattern: &str) -> Result<()> {
    regex::Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ConfigError::BadPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Filesystem validator (for CLI use)
///
/// Validates that the context directory, entry points, and HTML templates
/// exist on disk.
///
/// # Example
///
/// ```no_run
/// use lade_config::{BuildOptions, FsValidator, ConfigValidator};
///
/// let mut config = BuildOptions::default();
/// config.entries = vec!["app.js".into()];
///
/// let validator = FsValidator::new(".");
/// validator.validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: std::path::PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildOptions) -> Result<()> {
        // First run schema validation
        SchemaValidator.validate(config)?;

        // Then validate filesystem references
        let context = self.root.join(&config.context);
        if !context.is_dir() {
            return Err(ConfigError::ContextNotFound { path: context });
        }

        for entry in &config.entries {
            let path = context.join(entry);
            if !path.exists() {
                return Err(ConfigError::EntryNotFound { path });
            }
        }

        for plugin in &config.plugins {
            if plugin.name != "html" || !plugin.enabled || plugin.options.is_null() {
                continue;
            }
            let html: HtmlOptions = serde_json::from_value(plugin.options.clone())
                .map_err(|e| ConfigError::InvalidValue {
                    field: "plugins.html".to_string(),
                    hint: Some(e.to_string()),
                })?;
            if let Some(template) = &html.template {
                let path = context.join(template);
                if !path.exists() {
                    return Err(ConfigError::TemplateNotFound { path });
                }
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
///
/// # Example
///
/// ```
/// use lade_config::{BuildOptions, validate_schema};
///
/// let mut config = BuildOptions::default();
/// config.entries = vec!["app.js".into()];
///
/// validate_schema(&config).unwrap();
/// ```
pub fn validate_schema(config: &BuildOptions) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildOptions, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
