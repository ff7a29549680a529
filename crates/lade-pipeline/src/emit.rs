//! Output emission: atomic, traversal-safe writes into the output
//! directory.
//!
//! Emission is all-or-nothing. Files are written to `.tmp` siblings first,
//! then renamed into place; if any step fails the temp files are removed
//! and nothing is left half-written. Every filename is validated so it
//! cannot escape the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::debug;

use crate::asset::EmittedFile;
use crate::{Error, Result};

/// Write the emitted files into `dir`.
///
/// With `overwrite` disabled, an existing target file is an error and
/// nothing is written.
pub fn write_output(files: &[EmittedFile], dir: &Path, overwrite: bool) -> Result<()> {
    let dir = normalize_dir(dir)?;

    fs::create_dir_all(&dir).map_err(|e| {
        Error::WriteFailure(format!(
            "failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut operations = Vec::new();
    for file in files {
        let target = validate_output_path(&dir, &file.filename)?;
        if !overwrite && target.exists() {
            return Err(Error::OutputExists(target.display().to_string()));
        }
        operations.push((target, file.content.as_slice()));
    }

    write_files_atomic(&operations)?;
    debug!(count = files.len(), dir = %dir.display(), "output written");
    Ok(())
}

/// Resolve the output directory to a cleaned absolute path.
fn normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }
    let cwd = std::env::current_dir()
        .map_err(|e| Error::InvalidOutputPath(format!("failed to get current directory: {e}")))?;
    Ok(cwd.join(cleaned).clean())
}

/// Reject filenames that would land outside the output directory.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "filename contains null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();
    if !full_path.starts_with(base_dir) {
        return Err(Error::InvalidOutputPath(format!(
            "'{}' escapes output directory '{}'",
            filename,
            base_dir.display()
        )));
    }

    Ok(full_path)
}

/// Two-phase write: everything to `.tmp` files first, then rename into
/// place. Rename is atomic on the filesystems we care about.
fn write_files_atomic(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut temp_files = Vec::new();

    for (target, content) in operations {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp = temp_sibling(target);
        fs::write(&temp, content).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!("failed to write '{}': {}", temp.display(), e))
        })?;
        temp_files.push((temp, target.clone()));
    }

    for (temp, target) in &temp_files {
        fs::rename(temp, target).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "failed to rename '{}' to '{}': {}",
                temp.display(),
                target.display(),
                e
            ))
        })?;
    }

    Ok(())
}

/// Temp path alongside the target. The suffix is appended to the full
/// filename rather than swapped for the extension, so `icon-abc.jpg` and
/// `icon-abc.jpeg` get distinct temp siblings.
fn temp_sibling(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Best-effort removal of leftover temp files after a failed write.
fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp, _) in temp_files {
        if temp.exists() {
            if let Err(e) = fs::remove_file(temp) {
                tracing::warn!(path = %temp.display(), error = %e, "failed to remove temp file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(filename: &str, content: &str) -> EmittedFile {
        EmittedFile {
            filename: filename.to_string(),
            content: content.as_bytes().to_vec(),
        }
    }

    #[test]
    fn writes_files_and_creates_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("dist");
        write_output(
            &[emitted("app.js", "bundle"), emitted("img/a.png", "png")],
            &out,
            false,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(out.join("app.js")).unwrap(), "bundle");
        assert_eq!(fs::read_to_string(out.join("img/a.png")).unwrap(), "png");
    }

    #[test]
    fn refuses_existing_file_without_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "old").unwrap();

        let err = write_output(&[emitted("app.js", "new")], dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::OutputExists(_)));
        assert_eq!(fs::read_to_string(dir.path().join("app.js")).unwrap(), "old");
    }

    #[test]
    fn overwrite_replaces_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "old").unwrap();

        write_output(&[emitted("app.js", "new")], dir.path(), true).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("app.js")).unwrap(), "new");
    }

    #[test]
    fn rejects_traversal_filenames() {
        let base = Path::new("/tmp/output");
        assert!(validate_output_path(base, "../etc/passwd").is_err());
        assert!(validate_output_path(base, "safe/../../../../etc/passwd").is_err());
        assert!(validate_output_path(base, "file\0name.js").is_err());
    }

    #[test]
    fn accepts_normal_and_nested_filenames() {
        let base = Path::new("/tmp/output");
        assert_eq!(
            validate_output_path(base, "./index.html").unwrap(),
            Path::new("/tmp/output/index.html")
        );
        assert_eq!(
            validate_output_path(base, "img/logo.png").unwrap(),
            Path::new("/tmp/output/img/logo.png")
        );
    }

    #[test]
    fn same_stem_different_extensions_do_not_collide() {
        let dir = tempfile::TempDir::new().unwrap();
        write_output(
            &[
                emitted("icon-8c0cc17a.jpg", "img"),
                emitted("icon-8c0cc17a.jpeg", "img"),
            ],
            dir.path(),
            false,
        )
        .unwrap();

        assert!(dir.path().join("icon-8c0cc17a.jpg").exists());
        assert!(dir.path().join("icon-8c0cc17a.jpeg").exists());
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::TempDir::new().unwrap();
        write_output(&[emitted("app.js", "bundle")], dir.path(), false).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
