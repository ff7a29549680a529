use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;

use crate::asset::Asset;
use crate::registry::{TransformContext, Transformer};
use crate::transformers::{emit_file_module, string_export_module};
use crate::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct UrlOptions {
    /// Maximum size in bytes to inline as a data URI. Zero means always
    /// inline.
    limit: u64,
}

/// Inlines small assets as base64 data URIs; larger assets fall back to
/// hashed-file emission like the `file` transformer.
///
/// An asset whose size is at or below `limit` is inlined.
pub struct UrlTransformer;

impl Transformer for UrlTransformer {
    fn transform(
        &self,
        ctx: &mut TransformContext,
        asset: &Asset,
        content: Vec<u8>,
        options: &Value,
    ) -> Result<Vec<u8>> {
        let opts: UrlOptions = match options {
            Value::Null => UrlOptions::default(),
            other => {
                serde_json::from_value(other.clone()).map_err(|e| Error::InvalidOptions {
                    transformer: "url".to_string(),
                    message: e.to_string(),
                })?
            }
        };

        if opts.limit == 0 || content.len() as u64 <= opts.limit {
            let uri = data_uri(&asset.specifier, &content);
            Ok(string_export_module(&uri).into_bytes())
        } else {
            emit_file_module(ctx, asset, content)
        }
    }
}

fn data_uri(specifier: &str, content: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_for(specifier),
        STANDARD.encode(content)
    )
}

fn mime_for(specifier: &str) -> &'static str {
    let ext = std::path::Path::new(specifier)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}
