//! Command-line interface definition.
//!
//! Defines the CLI structure with clap v4 derive macros.
//!
//! # Command Structure
//!
//! - `lade build` - run the asset pipeline and write the output directory
//! - `lade check` - validate the configuration without building

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// lade - a declarative asset pipeline for single-page apps
#[derive(Parser, Debug)]
#[command(
    name = "lade",
    version,
    about = "A declarative asset pipeline for single-page apps",
    long_about = "lade bundles a single-page app from a declarative rule configuration.\n\
                  Assets under the context directory are matched against two ordered\n\
                  rule lists; the first matching rule per pass transforms the asset,\n\
                  and the results are assembled into a script bundle plus emitted files."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available lade subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the app
    ///
    /// Loads the configuration (lade.toml, or the "lade" field of
    /// package.json), runs both rule passes over the source tree, and writes
    /// the bundle and emitted assets to the output directory.
    Build(BuildArgs),

    /// Validate configuration without building
    ///
    /// Checks the configuration schema, compiles every rule pattern, and
    /// verifies that the context directory, entry points, and HTML templates
    /// exist on disk.
    Check(CheckArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project root directory to build in
    ///
    /// Configuration discovery, the context directory, and the output
    /// directory are all resolved relative to this path.
    #[arg(default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Explicit config file path
    ///
    /// Skips discovery and loads this file directly. Accepts lade.toml or a
    /// package.json with a "lade" field.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration profile to apply
    ///
    /// Merges the named profile's overrides into the base configuration
    /// before building (e.g. --profile production).
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Override the configured output directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project root directory to check
    #[arg(default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Explicit config file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration profile to apply before checking
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults_to_current_directory() {
        let cli = Cli::parse_from(["lade", "build"]);
        match cli.command {
            Command::Build(args) => assert_eq!(args.root, PathBuf::from(".")),
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["lade", "--verbose", "--quiet", "build"]);
        assert!(result.is_err());
    }

    #[test]
    fn profile_flag_is_parsed() {
        let cli = Cli::parse_from(["lade", "build", "--profile", "production"]);
        match cli.command {
            Command::Build(args) => assert_eq!(args.profile.as_deref(), Some("production")),
            _ => panic!("expected build command"),
        }
    }
}
