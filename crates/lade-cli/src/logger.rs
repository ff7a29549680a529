//! Logging infrastructure for the lade CLI.
//!
//! Structured logging built on the `tracing` ecosystem, with verbosity
//! controlled by the global `--verbose` and `--quiet` flags and the
//! `RUST_LOG` environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Call once at program start, before any logging occurs.
///
/// # Verbosity Levels
///
/// 1. `--verbose`: DEBUG for lade crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. `log_level` from config `[settings]`, when present
/// 5. Default: INFO for lade crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, settings_level: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new(lade_directives("debug"))
    } else if quiet {
        EnvFilter::new(lade_directives("error"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(lade_directives(settings_level.unwrap_or("info"))))
    };

    // Log lines share stderr with status messages; stdout stays pipeable.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// A filter directive string covering every lade crate at one level.
fn lade_directives(level: &str) -> String {
    format!("lade={level},lade_pipeline={level},lade_config={level},lade_cli={level}")
}

/// Whether colored output should be enabled.
///
/// Respects the `NO_COLOR` and `FORCE_COLOR` conventions, then falls back
/// to terminal capability detection.
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::Term::stdout().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    // tracing is global and initializes once per process, so these only
    // verify filter construction.

    #[test]
    fn verbose_filter_parses() {
        assert!(EnvFilter::try_new(lade_directives("debug")).is_ok());
    }

    #[test]
    fn quiet_filter_parses() {
        assert!(EnvFilter::try_new(lade_directives("error")).is_ok());
    }

    #[test]
    fn settings_level_builds_valid_directives() {
        assert_eq!(
            lade_directives("trace"),
            "lade=trace,lade_pipeline=trace,lade_config=trace,lade_cli=trace"
        );
        assert!(EnvFilter::try_new(lade_directives("trace")).is_ok());
    }
}
