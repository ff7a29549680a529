use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A declarative transformation rule.
///
/// Assets whose specifier matches `test` (and does not match `exclude`)
/// are handed to the named transformer. Rule order determines precedence:
/// within a pass, the first matching rule wins and no later rule applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOptions {
    /// Regular expression matched against the asset specifier
    pub test: String,

    /// Optional veto pattern; a specifier matching this never matches
    /// the rule, even when `test` matches
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Transformer name, or a `!`-separated chain applied right-to-left
    /// (e.g. `"style!css"` runs `css` first, then `style`)
    pub transformer: String,

    /// Transformer-specific configuration forwarded on every invocation
    #[serde(default)]
    pub options: Value,
}

impl RuleOptions {
    /// Create a rule matching `test` with a single transformer and no options.
    pub fn new(test: impl Into<String>, transformer: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            exclude: None,
            transformer: transformer.into(),
            options: Value::Null,
        }
    }

    /// Set the exclusion pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    /// Set the transformer options.
    pub fn options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    /// Transformer names in execution order.
    ///
    /// The chain is written left-to-right but applied right-to-left,
    /// so `"style!css"` yields `["css", "style"]`.
    pub fn transformer_chain(&self) -> Vec<&str> {
        self.transformer.split('!').rev().map(str::trim).collect()
    }
}
