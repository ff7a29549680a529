//! Built-in transformers.
//!
//! These cover the stylesheet and asset handling a single-page app build
//! needs out of the box. Template compilers and script transpilers are
//! external concerns registered through [`TransformerRegistry::register`].
//!
//! [`TransformerRegistry::register`]: crate::registry::TransformerRegistry::register

mod css;
mod file;
mod style;
mod url;

pub use css::CssTransformer;
pub use file::FileTransformer;
pub use style::StyleTransformer;
pub use url::UrlTransformer;

pub(crate) use file::emit_file_module;

/// Build a JS module whose default export is the given string value.
pub(crate) fn string_export_module(value: &str) -> String {
    // serde_json string escaping is valid JS string literal escaping
    format!(
        "export default {};\n",
        serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
    )
}
