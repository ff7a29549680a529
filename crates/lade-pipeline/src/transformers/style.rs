use serde_json::Value;

use crate::asset::Asset;
use crate::registry::{TransformContext, Transformer};
use crate::Result;

const EXPORT_PREFIX: &str = "export default ";

/// Wraps a stylesheet module so the stylesheet is appended to
/// `document.head` when the bundle runs.
///
/// Accepts either the module produced by [`CssTransformer`] or raw
/// stylesheet text (when used without the `css` step in the chain).
///
/// [`CssTransformer`]: crate::transformers::CssTransformer
pub struct StyleTransformer;

impl Transformer for StyleTransformer {
    fn transform(
        &self,
        _ctx: &mut TransformContext,
        _asset: &Asset,
        content: Vec<u8>,
        _options: &Value,
    ) -> Result<Vec<u8>> {
        let text = String::from_utf8_lossy(&content);

        // A css-produced module exports the stylesheet as a string literal;
        // anything else is treated as raw stylesheet text.
        let literal = match text.strip_prefix(EXPORT_PREFIX) {
            Some(rest) => rest.trim_end().trim_end_matches(';').to_string(),
            None => serde_json::to_string(text.as_ref()).unwrap_or_else(|_| "\"\"".to_string()),
        };

        let module = format!(
            "const __lade_style_text = {literal};\n\
             const __lade_style_el = document.createElement(\"style\");\n\
             __lade_style_el.textContent = __lade_style_text;\n\
             document.head.appendChild(__lade_style_el);\n\
             export default __lade_style_text;\n"
        );
        Ok(module.into_bytes())
    }
}
