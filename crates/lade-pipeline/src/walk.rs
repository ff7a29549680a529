//! Source tree discovery.

use std::fs;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use crate::asset::{specifier_for, Asset};
use crate::{Error, Result};

/// Collect every file under the context directory as an [`Asset`].
///
/// Results are sorted by specifier so a build always sees assets in the same
/// order. Hidden entries and `node_modules` contents are kept; rules decide
/// what to do with them. The output directory is skipped when it lives
/// inside the context.
pub fn collect_assets(context_dir: &Path, output_dir: &Path) -> Result<Vec<Asset>> {
    let mut assets = Vec::new();

    for entry in WalkDir::new(context_dir)
        .into_iter()
        .filter_entry(|e| e.path() != output_dir)
    {
        let entry = entry.map_err(|e| Error::IoError {
            message: format!("failed to read source tree under '{}'", context_dir.display()),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(context_dir).unwrap_or(path);
        let specifier = specifier_for(relative);
        trace!(%specifier, "collected asset");

        let content = fs::read(path).map_err(|source| Error::IoError {
            message: format!("failed to read asset '{}'", path.display()),
            source,
        })?;
        assets.push(Asset::new(path.to_path_buf(), specifier, content));
    }

    assets.sort_by(|a, b| a.specifier.cmp(&b.specifier));
    Ok(assets)
}
