use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::asset::Asset;
use crate::registry::{TransformContext, Transformer};
use crate::transformers::string_export_module;
use crate::{Error, Result};

/// Emits the asset under a content-hashed filename and produces a module
/// exporting its public URL.
///
/// Filename format: `[stem]-[hash8].[ext]`.
pub struct FileTransformer;

impl Transformer for FileTransformer {
    fn transform(
        &self,
        ctx: &mut TransformContext,
        asset: &Asset,
        content: Vec<u8>,
        _options: &Value,
    ) -> Result<Vec<u8>> {
        emit_file_module(ctx, asset, content)
    }
}

/// Shared emission logic, also used by the `url` transformer above its
/// inline limit.
pub(crate) fn emit_file_module(
    ctx: &mut TransformContext,
    asset: &Asset,
    content: Vec<u8>,
) -> Result<Vec<u8>> {
    let hash = hash_content(&content);
    let filename = hashed_filename(&asset.specifier, &hash)?;
    let url = ctx.public_url(&filename);
    ctx.emit_file(filename, content);
    Ok(string_export_module(&url).into_bytes())
}

/// Hash asset content using SHA-256, hex-encoded.
fn hash_content(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Generate the emitted filename: `[stem]-[hash8].[ext]`.
///
/// Example: `img/photo.jpg` with hash `abcd1234...` becomes
/// `photo-abcd1234.jpg`.
fn hashed_filename(specifier: &str, hash: &str) -> Result<String> {
    let path = std::path::Path::new(specifier);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidOptions {
            transformer: "file".to_string(),
            message: format!("invalid asset filename: {}", specifier),
        })?;

    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let hash_short = &hash[..8.min(hash.len())];

    if ext.is_empty() {
        Ok(format!("{}-{}", stem, hash_short))
    } else {
        Ok(format!("{}-{}.{}", stem, hash_short, ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn asset(specifier: &str) -> Asset {
        Asset::new(PathBuf::from(specifier), specifier.to_string(), vec![])
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        let a = hash_content(b"hello");
        let b = hash_content(b"hello");
        let c = hash_content(b"other");
        assert_eq!(a.len(), 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn filename_keeps_stem_and_extension() {
        let name = hashed_filename("img/photo.jpg", "abcd1234567890").unwrap();
        assert_eq!(name, "photo-abcd1234.jpg");
    }

    #[test]
    fn filename_without_extension() {
        let name = hashed_filename("LICENSE", "abcd1234567890").unwrap();
        assert_eq!(name, "LICENSE-abcd1234");
    }

    #[test]
    fn emits_file_and_exports_public_url() {
        let mut ctx = TransformContext::new("/");
        let out = FileTransformer
            .transform(&mut ctx, &asset("photo.jpg"), b"jpeg bytes".to_vec(), &Value::Null)
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        let emitted = ctx.take_emitted();
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].filename.starts_with("photo-"));
        assert!(emitted[0].filename.ends_with(".jpg"));
        assert_eq!(emitted[0].content, b"jpeg bytes");
        assert!(out.contains(&format!("/{}", emitted[0].filename)));
    }
}
