//! Terminal status messages and formatting.
//!
//! Status messages go to stderr so command output stays pipeable. Color
//! handling degrades gracefully for CI and piped output: each glyph is
//! colorized only when the stream supports it and no override disables it.

use owo_colors::{OwoColorize, Stream::Stderr, Style};

/// Configure global color behavior for the process.
///
/// With `no_color` set (or a non-color terminal per [`should_use_colors`]),
/// both owo-colors and console output stay plain.
///
/// [`should_use_colors`]: crate::logger::should_use_colors
pub fn init_colors(no_color: bool) {
    if no_color || !crate::logger::should_use_colors() {
        owo_colors::set_override(false);
        console::set_colors_enabled(false);
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!(
        "{} {}",
        "✓".if_supports_color(Stderr, |g| g.style(Style::new().green().bold())),
        message
    );
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!(
        "{} {}",
        "ℹ".if_supports_color(Stderr, |g| g.style(Style::new().blue().bold())),
        message
    );
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stderr, |g| g.style(Style::new().yellow().bold())),
        message.if_supports_color(Stderr, |m| m.yellow())
    );
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        "✗".if_supports_color(Stderr, |g| g.style(Style::new().red().bold())),
        message.if_supports_color(Stderr, |m| m.red())
    );
}

/// Human-readable duration, e.g. "215ms" or "1.32s".
pub fn format_duration(duration: std::time::Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_messages_do_not_panic() {
        success("ok");
        info("note");
        warning("careful");
        error("failed");
    }

    #[test]
    fn durations_format_compactly() {
        assert_eq!(format_duration(Duration::from_millis(215)), "215ms");
        assert_eq!(format_duration(Duration::from_millis(1320)), "1.32s");
    }
}
