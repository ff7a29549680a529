//! CLI command implementations.

mod build;
mod check;

pub use build::execute as build_execute;
pub use check::execute as check_execute;

use std::path::Path;

use lade_config::{ConfigDiscovery, GlobalSettings, LadeConfig};

use crate::cli::{Cli, Command};
use crate::error::Result;

/// Read `[settings]` from the configuration before logging starts.
///
/// Load failures are ignored here; the command itself reports them once the
/// logger and colors are set up.
pub fn preflight_settings(args: &Cli) -> GlobalSettings {
    let (root, config, profile) = match &args.command {
        Command::Build(a) => (&a.root, a.config.as_deref(), a.profile.as_deref()),
        Command::Check(a) => (&a.root, a.config.as_deref(), a.profile.as_deref()),
    };
    load_config(root, config, profile)
        .map(|c| c.settings)
        .unwrap_or_default()
}

/// Load the project configuration, honoring --config and --profile.
pub(crate) fn load_config(
    root: &Path,
    config_path: Option<&Path>,
    profile: Option<&str>,
) -> Result<LadeConfig> {
    let discovery = ConfigDiscovery::new(root);
    let mut config = match config_path {
        Some(path) => discovery.load_from(path)?,
        None => discovery.load()?,
    };
    if let Some(profile) = profile {
        config = config.materialize_profile(Some(profile))?;
    }
    Ok(config)
}
