//! Logging initialization.
//!
//! The tool logs through its own handler: diagnostics go to stderr as
//! colorized JSON lines, filtered by `RUST_LOG` when it is set.

use colorjson_core::{ColorJsonLayer, Handler, HandlerOptions, Palette, Severity};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `verbose` - If true, enables DEBUG level logging; otherwise INFO level.
/// * `color` - If false, lines are written without ANSI codes.
///
/// # Notes
///
/// - Log output goes to stderr (stdout is reserved for data output)
/// - The RUST_LOG environment variable can override the log level
pub fn init(verbose: bool, color: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let mut options = HandlerOptions::new().level(Severity::Debug);
    if !color {
        options = options.palette(Palette::PLAIN);
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(ColorJsonLayer::new(Handler::stderr(options)))
        .init();
}

/// Initialize logging with settings from the config file.
pub fn init_from_config(config: &colorjson_core::Config, verbose_override: bool) {
    let verbose = verbose_override
        || matches!(
            config.handler.level.parse::<Severity>(),
            Ok(Severity::Debug)
        );
    init(verbose, color_enabled(console::Term::stderr().is_term()));
}

/// Whether ANSI colors should be written to a stream.
///
/// `NO_COLOR` (any non-empty value) wins over terminal detection.
pub fn color_enabled(is_term: bool) -> bool {
    no_color_unset(std::env::var_os("NO_COLOR").as_deref()) && is_term
}

fn no_color_unset(value: Option<&std::ffi::OsStr>) -> bool {
    value.map_or(true, |v| v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_no_color_unset() {
        assert!(no_color_unset(None));
        assert!(no_color_unset(Some(OsStr::new(""))));
        assert!(!no_color_unset(Some(OsStr::new("1"))));
    }

    #[test]
    fn test_color_disabled_off_terminal() {
        assert!(!color_enabled(false));
    }
}
