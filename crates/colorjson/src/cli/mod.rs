//! Subcommand implementations.

pub mod colorize;
pub mod config;
pub mod demo;

use colorjson_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// The config file in use: `--config` when given, else the default location.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
        .unwrap_or_else(Config::default_path)
}

/// Load the config named by `--config`, or the default one.
///
/// An explicit path must exist; a missing default file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(_) => Config::load_from(&config_path(explicit)),
        None => Config::load(),
    }
}
