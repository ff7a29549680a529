//! Integration tests for config file discovery.

use lade_config::{ConfigDiscovery, ConfigError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn toml_takes_precedence_over_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lade.toml"),
        r#"
[build]
entries = ["from-toml.js"]
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "lade": { "build": { "entries": ["from-pkg.js"] } } }"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(config.build.entries, vec![PathBuf::from("from-toml.js")]);
}

#[test]
fn package_json_without_lade_field_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    assert!(discovery.find().is_none());
}

#[test]
fn package_json_with_null_lade_field_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "app", "lade": null }"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    assert!(discovery.find().is_none());
}

#[test]
fn malformed_toml_is_fatal_with_hint() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lade.toml"),
        r#"
[build
entries = ["app.js"]
"#,
    )
    .unwrap();

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    match err {
        ConfigError::InvalidValue { field, hint } => {
            assert_eq!(field, "toml");
            assert!(hint.unwrap().contains("Invalid TOML syntax"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn full_config_round_trips_from_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lade.toml"),
        r#"
[build]
context = "src"
entries = ["app.js"]

[build.output]
filename = "app.js"
dir = "dist"

[[build.pre_rules]]
test = "\\.js$|\\.tag$"
exclude = "node_modules"
transformer = "tag"

[build.pre_rules.options]
type = "none"

[[build.rules]]
test = "\\.js$|\\.tag$"
exclude = "node_modules"
transformer = "es2015"

[[build.rules]]
test = "\\.css$"
transformer = "style!css"

[[build.rules]]
test = "\\.png$"
transformer = "url"

[build.rules.options]
limit = 100000

[[build.rules]]
test = "\\.jpg$"
transformer = "file"

[[build.plugins]]
name = "html"

[build.plugins.options]
template = "index.template.html"
inject = "body"

[[build.plugins]]
name = "provide"

[build.plugins.options]
riot = "riot"
"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    let build = &config.build;

    assert_eq!(build.entries, vec![PathBuf::from("app.js")]);
    assert_eq!(build.pre_rules.len(), 1);
    assert_eq!(build.pre_rules[0].transformer, "tag");
    assert_eq!(build.rules.len(), 4);
    assert_eq!(build.rules[1].transformer_chain(), vec!["css", "style"]);
    assert_eq!(build.rules[2].options["limit"], 100000);
    assert_eq!(build.plugins.len(), 2);
    assert_eq!(build.plugins[0].name, "html");
    assert_eq!(build.plugins[1].name, "provide");
}
