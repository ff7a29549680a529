//! Global configuration settings shared across profiles.

use serde::{Deserialize, Serialize};

/// Process-wide settings from the `[settings]` table.
///
/// These seed the CLI defaults: `log_level` feeds the tracing filter when
/// neither a verbosity flag nor `RUST_LOG` is given, and `no_color`
/// disables colored status output like the `--no-color` flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub no_color: bool,
}
