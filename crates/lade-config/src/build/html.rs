use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::build::helpers::{default_html_filename, default_lang};

/// Where the bundle script tag is injected into the HTML shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectTarget {
    /// Before the closing `</body>` tag (default)
    #[default]
    Body,
    /// Before the closing `</head>` tag
    Head,
}

/// Options for the built-in `html` plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlOptions {
    /// Path to a custom HTML template, relative to the context directory.
    /// If not provided, a built-in shell is rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Output filename for the generated HTML (default: "index.html")
    #[serde(default = "default_html_filename")]
    pub filename: String,

    /// Injection point for the bundle script tag
    #[serde(default)]
    pub inject: InjectTarget,

    /// Page title (built-in shell only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Language attribute for the `<html>` tag (default: "en")
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Additional template variables (forwarded to the template context)
    #[serde(default)]
    pub variables: HashMap<String, Value>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            template: None,
            filename: "index.html".to_string(),
            inject: InjectTarget::Body,
            title: None,
            lang: "en".to_string(),
            variables: HashMap::new(),
        }
    }
}
