use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::build::helpers::default_true;

/// Configuration for a named build plugin.
///
/// Plugins are side-effecting hooks that run after the bundle is assembled.
/// The built-in names are `html` (emit an HTML shell referencing the bundle)
/// and `provide` (prepend global bindings to the bundle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginOptions {
    /// Plugin name, resolved against the plugin registry
    pub name: String,

    /// Plugin-specific configuration
    #[serde(default)]
    pub options: Value,

    /// Execution order (lower values run earlier)
    #[serde(default)]
    pub order: i32,

    /// Whether the plugin should run
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Environment-specific overrides, merged when a profile is selected
    #[serde(default)]
    pub profiles: HashMap<String, Value>,
}

impl PluginOptions {
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
            order: 0,
            enabled: true,
            profiles: HashMap::new(),
        }
    }
}
