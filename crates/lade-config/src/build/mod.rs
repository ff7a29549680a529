//! Core build configuration types shared across lade crates.

mod helpers;
mod html;
mod plugin;
mod rule;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

pub use html::{HtmlOptions, InjectTarget};
pub use plugin::PluginOptions;
pub use rule::RuleOptions;

use helpers::{default_context, default_output_dir, default_output_filename, default_public_path};

/// Output destination for the emitted bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Filename of the emitted script bundle (default: "app.js")
    #[serde(default = "default_output_filename")]
    pub filename: String,

    /// Directory the bundle and emitted assets are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Base URL path prefixed onto emitted asset references (default: "/")
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            filename: "app.js".to_string(),
            dir: PathBuf::from("dist"),
            public_path: "/".to_string(),
        }
    }
}

/// Main build configuration.
///
/// Constructed once at build-invocation time and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Base directory for resolving entries and discovering assets
    #[serde(default = "default_context")]
    pub context: PathBuf,

    /// Entry points, relative to `context` (must be non-empty)
    #[serde(default)]
    pub entries: Vec<PathBuf>,

    /// Bundle destination
    #[serde(default)]
    pub output: OutputOptions,

    /// Configured plugins, run in `order` after the bundle is assembled
    #[serde(default)]
    pub plugins: Vec<PluginOptions>,

    /// Rules evaluated in the pre pass; the first match per asset wins
    /// and its output replaces the asset content before the main pass
    #[serde(default)]
    pub pre_rules: Vec<RuleOptions>,

    /// Rules evaluated in the main pass against the (possibly
    /// pre-transformed) asset; first match wins, no fallthrough
    #[serde(default)]
    pub rules: Vec<RuleOptions>,
}

impl BuildOptions {
    /// Create from serde_json::Value (for programmatic config).
    ///
    /// # Example
    ///
    /// ```
    /// use lade_config::BuildOptions;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let value = json!({
    ///     "entries": ["app.js"],
    ///     "output": { "filename": "bundle.js" }
    /// });
    ///
    /// let options = BuildOptions::from_value(value).unwrap();
    /// assert_eq!(options.entries, vec![PathBuf::from("app.js")]);
    /// assert_eq!(options.output.filename, "bundle.js");
    /// ```
    pub fn from_value(value: Value) -> Result<Self, crate::error::ConfigError> {
        serde_json::from_value(value).map_err(|e| crate::error::ConfigError::InvalidValue {
            field: "build".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value.
    pub fn to_value(&self) -> Result<Value, crate::error::ConfigError> {
        serde_json::to_value(self).map_err(|e| crate::error::ConfigError::InvalidValue {
            field: "build".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Add an entry point.
    pub fn with_entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entries.push(entry.into());
        self
    }

    /// Append a main-pass rule.
    pub fn with_rule(mut self, rule: RuleOptions) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a pre-pass rule.
    pub fn with_pre_rule(mut self, rule: RuleOptions) -> Self {
        self.pre_rules.push(rule);
        self
    }

    /// Append a plugin.
    pub fn with_plugin(mut self, plugin: PluginOptions) -> Self {
        self.plugins.push(plugin);
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            context: PathBuf::from("src"),
            entries: vec![],
            output: OutputOptions::default(),
            plugins: Vec::new(),
            pre_rules: Vec::new(),
            rules: Vec::new(),
        }
    }
}
