//! Locating and loading configuration files.
//!
//! A project configures lade either through a `lade.toml` at the project
//! root or through a `lade` field in its `package.json`. `lade.toml` wins
//! when both exist. Library users building a config programmatically can
//! skip this module and call `LadeConfig::from_value` directly.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::config::LadeConfig;
use crate::error::{ConfigError, Result};

/// Finds and loads the project configuration under a root directory.
///
/// ```no_run
/// use lade_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the config file that would be loaded, if any.
    ///
    /// `lade.toml` takes priority; a `package.json` only counts when it
    /// carries a non-null `lade` field.
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("lade.toml");
        if toml_path.exists() {
            debug!(path = %toml_path.display(), "found TOML config");
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if package_json_has_config(&pkg_path) {
            debug!(path = %pkg_path.display(), "found package.json config");
            return Some(pkg_path);
        }

        None
    }

    /// Load the discovered configuration.
    ///
    /// Returns `ConfigError::NotFound` when neither config source exists.
    pub fn load(&self) -> Result<LadeConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load and materialize the named profile in one step.
    pub fn load_with_profile(&self, profile: &str) -> Result<LadeConfig> {
        self.load()?.materialize_profile(Some(profile))
    }

    /// Load a specific file, bypassing discovery (the `--config` flag).
    pub fn load_from(&self, path: &Path) -> Result<LadeConfig> {
        if path.file_name() == Some(OsStr::new("package.json")) {
            return load_package_json(path);
        }

        let content = fs::read_to_string(path)?;
        let toml_val: toml::Value =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "toml".to_string(),
                hint: Some(format!("Invalid TOML syntax: {}", e)),
            })?;

        // Route through JSON so TOML and package.json configs share one
        // deserialization path.
        let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("TOML to JSON conversion failed: {}", e)),
        })?;

        LadeConfig::from_value(value)
    }
}

fn package_json_has_config(path: &Path) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(parsed) = serde_json::from_str::<Value>(&content) else {
        return false;
    };
    parsed.get("lade").is_some_and(|v| !v.is_null())
}

fn load_package_json(path: &Path) -> Result<LadeConfig> {
    let content = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {}", e)),
    })?;

    match parsed.get("lade") {
        None => Err(ConfigError::InvalidValue {
            field: "lade".to_string(),
            hint: Some("Add a 'lade' field to your package.json".to_string()),
        }),
        Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: "lade".to_string(),
            hint: Some("The 'lade' field cannot be null".to_string()),
        }),
        Some(value) => LadeConfig::from_value(value.clone()),
    }
}

/// Load the configuration from the current directory.
pub fn discover() -> Result<LadeConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Load the configuration from the current directory with a profile applied.
pub fn discover_with_profile(profile: &str) -> Result<LadeConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_toml(dir: &TempDir, body: &str) {
        fs::write(dir.path().join("lade.toml"), body).unwrap();
    }

    #[test]
    fn empty_directory_discovers_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
        assert!(matches!(
            ConfigDiscovery::new(dir.path()).load().unwrap_err(),
            ConfigError::NotFound
        ));
    }

    #[test]
    fn toml_config_loads_with_output_options() {
        let dir = TempDir::new().unwrap();
        write_toml(
            &dir,
            "[build]\nentries = [\"app.js\"]\n\n[build.output]\nfilename = \"bundle.js\"\n",
        );

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.build.entries, vec![PathBuf::from("app.js")]);
        assert_eq!(config.build.output.filename, "bundle.js");
    }

    #[test]
    fn package_json_lade_field_is_discovered() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "demo", "lade": { "build": { "entries": ["app.js"] } } }"#,
        )
        .unwrap();

        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config.build.entries, vec![PathBuf::from("app.js")]);
    }

    #[test]
    fn unreadable_package_json_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "not json at all").unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }
}
