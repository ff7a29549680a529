//! lade CLI - declarative asset pipeline for single-page apps.
//!
//! Entry point: parses command-line arguments, initializes logging, and
//! dispatches to the command implementations.

use clap::Parser;
use lade_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Config [settings] seed the logger/color defaults; flags win.
    let settings = commands::preflight_settings(&args);
    logger::init_logger(
        args.verbose,
        args.quiet,
        args.no_color || settings.no_color,
        settings.log_level.as_deref(),
    );
    ui::init_colors(args.no_color || settings.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
    };

    result.map_err(error::cli_error_to_miette)
}
