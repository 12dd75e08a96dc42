//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};

/// Handler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Minimum severity: debug, info, warn, error
    pub level: String,

    /// Time format: rfc3339, rfc3339-millis, date, time, datetime, kitchen,
    /// or a strftime pattern
    pub time_format: String,

    /// Source location: off, full, short-file, long-file
    pub source: String,

    /// Renderer: structural or retokenize
    pub renderer: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            time_format: "time".to_string(),
            source: "off".to_string(),
            renderer: "structural".to_string(),
        }
    }
}

/// Color settings: a preset plus optional per-category overrides.
///
/// Overrides accept color names (`gray`), `+`-joined names
/// (`bg_red+bright_white`) or raw SGR parameters (`38;5;208`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Preset: default, dim, vivid, plain
    pub scheme: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_debug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_warn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_error: Option<String>,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            scheme: "default".to_string(),
            string: None,
            number: None,
            boolean: None,
            null: None,
            key: None,
            brace: None,
            level_debug: None,
            level_info: None,
            level_warn: None,
            level_error: None,
        }
    }
}

impl ColorsConfig {
    /// Overrides as `(name, value)` pairs, in palette field order.
    pub(crate) fn overrides(&self) -> [(&'static str, Option<&str>); 10] {
        [
            ("string", self.string.as_deref()),
            ("number", self.number.as_deref()),
            ("boolean", self.boolean.as_deref()),
            ("null", self.null.as_deref()),
            ("key", self.key.as_deref()),
            ("brace", self.brace.as_deref()),
            ("level_debug", self.level_debug.as_deref()),
            ("level_info", self.level_info.as_deref()),
            ("level_warn", self.level_warn.as_deref()),
            ("level_error", self.level_error.as_deref()),
        ]
    }
}

/// Output destination settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File to append log lines to; stderr when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
