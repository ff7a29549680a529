use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_context() -> PathBuf {
    PathBuf::from("src")
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_output_filename() -> String {
    "app.js".to_string()
}

pub(crate) fn default_public_path() -> String {
    "/".to_string()
}

pub(crate) fn default_html_filename() -> String {
    "index.html".to_string()
}

pub(crate) fn default_lang() -> String {
    "en".to_string()
}
