//! Check command implementation.
//!
//! Validates the configuration without building: schema checks, rule
//! pattern compilation, and filesystem references.

use lade_config::validate_fs;
use lade_pipeline::{RuleSet, TransformerRegistry};

use crate::cli::CheckArgs;
use crate::commands::load_config;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the configuration (lade.toml or package.json "lade" field)
/// 2. Schema validation and rule pattern compilation
/// 3. Context directory, entry points, and HTML templates exist on disk
/// 4. Warn about rules naming transformers outside the built-in set
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let config = load_config(&args.root, args.config.as_deref(), args.profile.as_deref())?;
    validate_fs(&config.build, &args.root)?;

    // Compiling the rule set surfaces pattern errors the same way a build
    // would.
    let rules = RuleSet::compile(&config.build)?;

    let registry = TransformerRegistry::with_builtins();
    for rule in rules.all() {
        for step in rule.steps() {
            if !registry.contains(&step.transformer) {
                ui::warning(&format!(
                    "transformer '{}' is not built in; it must be registered before building",
                    step.transformer
                ));
            }
        }
    }

    for entry in &config.build.entries {
        ui::success(&format!("  entry {} exists", entry.display()));
    }

    ui::success("Configuration is valid");
    Ok(())
}
