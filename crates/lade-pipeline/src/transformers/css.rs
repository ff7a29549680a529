use serde_json::Value;

use crate::asset::Asset;
use crate::registry::{TransformContext, Transformer};
use crate::transformers::string_export_module;
use crate::Result;

/// Turns a stylesheet into a JS module exporting the stylesheet text.
///
/// Usually chained as `style!css`, where [`StyleTransformer`] wraps the
/// module so the stylesheet is applied at runtime.
///
/// [`StyleTransformer`]: crate::transformers::StyleTransformer
pub struct CssTransformer;

impl Transformer for CssTransformer {
    fn transform(
        &self,
        _ctx: &mut TransformContext,
        _asset: &Asset,
        content: Vec<u8>,
        _options: &Value,
    ) -> Result<Vec<u8>> {
        let css = String::from_utf8_lossy(&content);
        Ok(string_export_module(&css).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn exports_stylesheet_as_js_string() {
        let asset = Asset::new(PathBuf::from("main.css"), "main.css".into(), vec![]);
        let mut ctx = TransformContext::new("/");
        let out = CssTransformer
            .transform(&mut ctx, &asset, b"body { color: red; }".to_vec(), &Value::Null)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "export default \"body { color: red; }\";\n");
    }

    #[test]
    fn escapes_quotes_and_newlines() {
        let asset = Asset::new(PathBuf::from("main.css"), "main.css".into(), vec![]);
        let mut ctx = TransformContext::new("/");
        let out = CssTransformer
            .transform(
                &mut ctx,
                &asset,
                b"a::before { content: \"x\"; }\n".to_vec(),
                &Value::Null,
            )
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(r#"\"x\""#));
        assert!(out.contains(r"\n"));
    }
}
