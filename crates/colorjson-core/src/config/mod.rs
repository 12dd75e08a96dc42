//! Configuration management for colorjson.
//!
//! Configuration is loaded from a TOML file with sensible defaults; every
//! section and field may be omitted.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::options::{HandlerOptions, Renderer, SourceMode, TimeFormat};
use crate::palette::{Color, ColorScheme, Palette};
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Handler settings
    pub handler: HandlerConfig,

    /// Color settings
    pub colors: ColorsConfig,

    /// Output settings
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.colorjson.colorjson/config.toml
    /// - Linux: ~/.config/colorjson/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\colorjson\config\config.toml
    ///
    /// Falls back to ~/.colorjson/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "colorjson", "colorjson")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".colorjson").join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Resolved output file (with ~ expansion), if one is configured.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }

    /// The palette named by `colors.scheme` with overrides applied.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let scheme = ColorScheme::parse(&self.colors.scheme).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "colors.scheme: unknown scheme '{}'",
                self.colors.scheme
            ))
        })?;
        let mut palette = scheme.palette();

        for (name, spec) in self.colors.overrides() {
            let Some(spec) = spec else { continue };
            let color = Color::parse(spec).ok_or_else(|| {
                ConfigError::ValidationError(format!("colors.{name}: unknown color '{spec}'"))
            })?;
            let slot = match name {
                "string" => &mut palette.string,
                "number" => &mut palette.number,
                "boolean" => &mut palette.boolean,
                "null" => &mut palette.null,
                "key" => &mut palette.key,
                "brace" => &mut palette.brace,
                "level_debug" => &mut palette.level_debug,
                "level_info" => &mut palette.level_info,
                "level_warn" => &mut palette.level_warn,
                "level_error" => &mut palette.level_error,
                other => {
                    return Err(ConfigError::ValidationError(format!(
                        "colors.{other}: no such palette slot"
                    )));
                }
            };
            *slot = color;
        }
        Ok(palette)
    }

    /// Build handler options from the `[handler]` and `[colors]` sections.
    pub fn handler_options(&self) -> Result<HandlerOptions, ConfigError> {
        let level: Severity = self
            .handler
            .level
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("handler.level: {e}")))?;
        let source = SourceMode::parse(&self.handler.source).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "handler.source: unknown mode '{}'",
                self.handler.source
            ))
        })?;
        let renderer = Renderer::parse(&self.handler.renderer).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "handler.renderer: unknown renderer '{}'",
                self.handler.renderer
            ))
        })?;

        Ok(HandlerOptions::new()
            .level(level)
            .time_format(TimeFormat::parse(&self.handler.time_format))
            .source(source)
            .renderer(renderer)
            .palette(self.palette()?))
    }
}
