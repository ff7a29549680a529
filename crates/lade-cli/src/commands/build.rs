//! Build command implementation.

use std::time::Instant;

use tracing::info;

use lade_config::validate_fs;
use lade_pipeline::build;

use crate::cli::BuildArgs;
use crate::commands::load_config;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// Loads and validates the configuration, runs both rule passes over the
/// source tree, and writes the bundle and emitted files to the output
/// directory.
pub fn execute(args: BuildArgs) -> Result<()> {
    let started = Instant::now();

    let mut config = load_config(&args.root, args.config.as_deref(), args.profile.as_deref())?;
    if let Some(out_dir) = args.out_dir {
        config.build.output.dir = out_dir;
    }
    validate_fs(&config.build, &args.root)?;
    info!(
        entries = config.build.entries.len(),
        rules = config.build.pre_rules.len() + config.build.rules.len(),
        plugins = config.build.plugins.len(),
        "configuration loaded"
    );

    let summary = build(&config.build, &args.root)?;

    ui::success(&format!(
        "Bundled {} modules into {} ({} files, {})",
        summary.modules,
        summary.bundle_path.display(),
        summary.files,
        ui::format_duration(started.elapsed())
    ));
    if let Some(html) = &summary.html_path {
        ui::info(&format!("HTML page written to {}", html.display()));
    }

    Ok(())
}
