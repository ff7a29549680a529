//! The built-in `html` plugin: renders the HTML shell and injects the
//! bundle script tag.

use std::fs;

use minijinja::{context, Environment};
use tracing::debug;

use lade_config::{HtmlOptions, InjectTarget};

use crate::asset::EmittedFile;
use crate::plugins::{BuildPlugin, EmitContext};
use crate::{Error, Result};

/// Shell rendered when no custom template is configured.
const DEFAULT_SHELL: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title }}</title>
  </head>
  <body>
    <div id="app"></div>
  </body>
</html>
"#;

/// Renders an HTML page referencing the emitted bundle.
///
/// With no template configured, a minimal built-in shell is used. A custom
/// template is rendered with minijinja against the configured variables,
/// then the script tag is injected before the closing tag of the configured
/// target (`</body>` by default).
pub struct HtmlPlugin {
    options: HtmlOptions,
}

impl HtmlPlugin {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    pub fn from_options(options: &serde_json::Value) -> Result<Self> {
        let options: HtmlOptions = match options {
            serde_json::Value::Null => HtmlOptions::default(),
            other => {
                serde_json::from_value(other.clone()).map_err(|e| Error::InvalidOptions {
                    transformer: "html".to_string(),
                    message: e.to_string(),
                })?
            }
        };
        Ok(Self::new(options))
    }

    fn render(&self, ctx: &EmitContext) -> Result<String> {
        let template_source = match &self.options.template {
            Some(path) => {
                let full = ctx.context_dir.join(path);
                debug!(template = %full.display(), "rendering custom HTML template");
                fs::read_to_string(&full).map_err(|source| Error::IoError {
                    message: format!("failed to read HTML template '{}'", full.display()),
                    source,
                })?
            }
            None => DEFAULT_SHELL.to_string(),
        };

        let mut env = Environment::new();
        env.add_template("shell", &template_source)
            .map_err(|e| Error::Template(e.to_string()))?;
        let template = env
            .get_template("shell")
            .map_err(|e| Error::Template(e.to_string()))?;

        let rendered = template
            .render(context! {
                title => self.options.title.clone().unwrap_or_else(|| "lade app".to_string()),
                lang => self.options.lang.clone(),
                bundle_url => ctx.bundle_url.clone(),
                vars => self.options.variables.clone(),
            })
            .map_err(|e| Error::Template(e.to_string()))?;

        Ok(inject_script(&rendered, &ctx.bundle_url, self.options.inject))
    }
}

impl BuildPlugin for HtmlPlugin {
    fn name(&self) -> &str {
        "html"
    }

    fn emit(&self, ctx: &EmitContext) -> Result<Vec<EmittedFile>> {
        let page = self.render(ctx)?;
        Ok(vec![EmittedFile {
            filename: self.options.filename.clone(),
            content: page.into_bytes(),
        }])
    }
}

/// Insert the bundle script tag before the closing tag of the inject
/// target. Falls back to appending when the closing tag is missing.
fn inject_script(page: &str, bundle_url: &str, inject: InjectTarget) -> String {
    let tag = format!("<script type=\"module\" src=\"{bundle_url}\"></script>");
    let closing = match inject {
        InjectTarget::Body => "</body>",
        InjectTarget::Head => "</head>",
    };

    match page.find(closing) {
        Some(at) => {
            let mut out = String::with_capacity(page.len() + tag.len() + 1);
            out.push_str(&page[..at]);
            out.push_str(&tag);
            out.push('\n');
            out.push_str(&page[at..]);
            out
        }
        None => format!("{page}{tag}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn emit_ctx() -> EmitContext {
        EmitContext {
            context_dir: PathBuf::from("."),
            bundle_url: "/app.js".to_string(),
        }
    }

    #[test]
    fn default_shell_injects_into_body() {
        let plugin = HtmlPlugin::new(HtmlOptions::default());
        let files = plugin.emit(&emit_ctx()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "index.html");

        let page = String::from_utf8(files[0].content.clone()).unwrap();
        let script_at = page.find("<script type=\"module\" src=\"/app.js\">").unwrap();
        let body_close_at = page.find("</body>").unwrap();
        assert!(script_at < body_close_at);
        assert!(page.contains("<html lang=\"en\">"));
    }

    #[test]
    fn head_injection_lands_before_head_close() {
        let options = HtmlOptions {
            inject: InjectTarget::Head,
            ..HtmlOptions::default()
        };
        let plugin = HtmlPlugin::new(options);
        let files = plugin.emit(&emit_ctx()).unwrap();
        let page = String::from_utf8(files[0].content.clone()).unwrap();

        let script_at = page.find("<script").unwrap();
        let head_close_at = page.find("</head>").unwrap();
        assert!(script_at < head_close_at);
    }

    #[test]
    fn title_and_lang_are_rendered() {
        let plugin = HtmlPlugin::from_options(&json!({
            "title": "My App",
            "lang": "de"
        }))
        .unwrap();
        let files = plugin.emit(&emit_ctx()).unwrap();
        let page = String::from_utf8(files[0].content.clone()).unwrap();
        assert!(page.contains("<title>My App</title>"));
        assert!(page.contains("<html lang=\"de\">"));
    }

    #[test]
    fn custom_template_is_rendered_from_context_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("index.template.html"),
            "<html><head><title>{{ title }}</title></head><body><p>{{ vars.greeting }}</p></body></html>",
        )
        .unwrap();

        let plugin = HtmlPlugin::from_options(&json!({
            "template": "index.template.html",
            "title": "Custom",
            "variables": { "greeting": "hello" }
        }))
        .unwrap();

        let ctx = EmitContext {
            context_dir: dir.path().to_path_buf(),
            bundle_url: "/app.js".to_string(),
        };
        let files = plugin.emit(&ctx).unwrap();
        let page = String::from_utf8(files[0].content.clone()).unwrap();

        assert!(page.contains("<title>Custom</title>"));
        assert!(page.contains("<p>hello</p>"));
        assert!(page.contains("<script type=\"module\" src=\"/app.js\"></script>\n</body>"));
    }

    #[test]
    fn missing_template_is_an_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let plugin = HtmlPlugin::from_options(&json!({ "template": "nope.html" })).unwrap();
        let ctx = EmitContext {
            context_dir: dir.path().to_path_buf(),
            bundle_url: "/app.js".to_string(),
        };
        let err = plugin.emit(&ctx).unwrap_err();
        assert!(matches!(err, Error::IoError { .. }));
    }

    #[test]
    fn missing_closing_tag_appends_script() {
        let page = inject_script("<p>fragment</p>", "/app.js", InjectTarget::Body);
        assert!(page.ends_with("<script type=\"module\" src=\"/app.js\"></script>\n"));
    }
}
