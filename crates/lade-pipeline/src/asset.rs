//! Assets flowing through the pipeline.

use std::path::{Path, PathBuf};

/// A single file discovered under the context directory.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Absolute path to the source file
    pub source_path: PathBuf,

    /// Path relative to the context directory, with forward slashes.
    /// Rules match against this string.
    pub specifier: String,

    /// Current content; replaced by transformer output as passes run
    pub content: Vec<u8>,
}

impl Asset {
    pub fn new(source_path: PathBuf, specifier: String, content: Vec<u8>) -> Self {
        Self {
            source_path,
            specifier,
            content,
        }
    }

    /// Current content interpreted as UTF-8, lossily.
    pub fn content_as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// A file produced by a transformer or plugin, written alongside the bundle.
#[derive(Debug, Clone)]
pub struct EmittedFile {
    /// Filename relative to the output directory
    pub filename: String,

    /// File content
    pub content: Vec<u8>,
}

/// Normalize a relative path into a specifier string.
///
/// Strips a leading `./` and uses forward slashes on every platform, so
/// rule patterns behave identically everywhere.
pub fn specifier_for(relative: &Path) -> String {
    let mut parts = Vec::new();
    for component in relative.components() {
        use std::path::Component;
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    parts.join("/")
}
