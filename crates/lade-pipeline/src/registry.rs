//! Transformer trait and name-based registry.

use std::collections::HashMap;

use serde_json::Value;

use crate::asset::{Asset, EmittedFile};
use crate::{Error, Result};

/// Shared state a transformer may touch while processing an asset.
///
/// Holds the public path used to build asset URLs and collects files the
/// transformers decide to emit alongside the bundle.
pub struct TransformContext {
    public_path: String,
    emitted: Vec<EmittedFile>,
}

impl TransformContext {
    pub fn new(public_path: impl Into<String>) -> Self {
        Self {
            public_path: public_path.into(),
            emitted: Vec::new(),
        }
    }

    /// Queue a file for emission into the output directory.
    pub fn emit_file(&mut self, filename: impl Into<String>, content: Vec<u8>) {
        self.emitted.push(EmittedFile {
            filename: filename.into(),
            content,
        });
    }

    /// Public URL for a file emitted into the output directory.
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_path.trim_end_matches('/'), filename)
    }

    /// Files emitted so far, consumed by the output emitter.
    pub fn take_emitted(&mut self) -> Vec<EmittedFile> {
        std::mem::take(&mut self.emitted)
    }
}

/// A named content transformer.
///
/// Transformers receive the asset's current content (possibly the output of
/// an earlier pass or chain step) and return the replacement content. Any
/// error is a fatal build failure; there is no retry or partial output.
pub trait Transformer: Send + Sync {
    fn transform(
        &self,
        ctx: &mut TransformContext,
        asset: &Asset,
        content: Vec<u8>,
        options: &Value,
    ) -> Result<Vec<u8>>;
}

impl std::fmt::Debug for dyn Transformer + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Transformer")
    }
}

/// Name-keyed transformer registry.
///
/// Rules reference transformers by name; dispatching to a name that was
/// never registered is a fatal build failure.
#[derive(Default)]
pub struct TransformerRegistry {
    transformers: HashMap<String, Box<dyn Transformer>>,
}

impl TransformerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in transformers registered:
    /// `css`, `style`, `url` and `file`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("css", crate::transformers::CssTransformer);
        registry.register("style", crate::transformers::StyleTransformer);
        registry.register("url", crate::transformers::UrlTransformer);
        registry.register("file", crate::transformers::FileTransformer);
        registry
    }

    /// Register a transformer under a name, replacing any previous one.
    pub fn register<T: Transformer + 'static>(&mut self, name: impl Into<String>, transformer: T) {
        self.transformers.insert(name.into(), Box::new(transformer));
    }

    /// Look up a transformer, failing with `UnknownTransformer`.
    pub fn get(&self, name: &str) -> Result<&dyn Transformer> {
        self.transformers
            .get(name)
            .map(|boxed| boxed.as_ref())
            .ok_or_else(|| Error::UnknownTransformer {
                name: name.to_string(),
            })
    }

    /// Whether a transformer is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.transformers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Upper;

    impl Transformer for Upper {
        fn transform(
            &self,
            _ctx: &mut TransformContext,
            _asset: &Asset,
            content: Vec<u8>,
            _options: &Value,
        ) -> Result<Vec<u8>> {
            Ok(String::from_utf8_lossy(&content).to_uppercase().into_bytes())
        }
    }

    #[test]
    fn builtins_are_registered() {
        let registry = TransformerRegistry::with_builtins();
        for name in ["css", "style", "url", "file"] {
            assert!(registry.contains(name), "missing builtin: {name}");
        }
    }

    #[test]
    fn unknown_transformer_is_an_error() {
        let registry = TransformerRegistry::new();
        let err = registry.get("tag").unwrap_err();
        assert!(matches!(err, Error::UnknownTransformer { name } if name == "tag"));
    }

    #[test]
    fn registered_transformer_runs() {
        let mut registry = TransformerRegistry::new();
        registry.register("upper", Upper);

        let asset = Asset::new(PathBuf::from("app.js"), "app.js".to_string(), vec![]);
        let mut ctx = TransformContext::new("/");
        let out = registry
            .get("upper")
            .unwrap()
            .transform(&mut ctx, &asset, b"hello".to_vec(), &Value::Null)
            .unwrap();
        assert_eq!(out, b"HELLO");
    }

    #[test]
    fn public_url_joins_with_single_slash() {
        let ctx = TransformContext::new("/static/");
        assert_eq!(ctx.public_url("a.png"), "/static/a.png");

        let ctx = TransformContext::new("/");
        assert_eq!(ctx.public_url("a.png"), "/a.png");
    }
}
