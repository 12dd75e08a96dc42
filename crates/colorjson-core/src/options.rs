//! Construction options for a [`Handler`](crate::Handler).

use crate::palette::Palette;
use crate::types::{Attribute, Severity};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Attribute rewrite hook.
///
/// Called with the group path enclosing the attribute (outermost first) and
/// the attribute itself. Returning `None`, or an attribute with an empty key,
/// drops it from the output.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attribute) -> Option<Attribute> + Send + Sync>;

/// How the `time` field is formatted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeFormat {
    /// `2024-05-28T12:34:56Z`
    Rfc3339,
    /// `2024-05-28T12:34:56.789Z`
    Rfc3339Millis,
    /// `2024-05-28`
    DateOnly,
    /// `12:34:56`
    #[default]
    TimeOnly,
    /// `2024-05-28 12:34:56`
    DateTime,
    /// `12:34PM`
    Kitchen,
    /// A chrono strftime pattern
    Custom(String),
}

impl TimeFormat {
    /// Parse a format name; anything unrecognized is taken as a strftime pattern.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "rfc3339" => Self::Rfc3339,
            "rfc3339-millis" | "rfc3339_millis" | "rfc3339millis" => Self::Rfc3339Millis,
            "date" | "date-only" | "date_only" => Self::DateOnly,
            "time" | "time-only" | "time_only" => Self::TimeOnly,
            "datetime" => Self::DateTime,
            "kitchen" => Self::Kitchen,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Render `time` in this format.
    pub fn format(&self, time: &DateTime<FixedOffset>) -> String {
        match self {
            Self::Rfc3339 => time.to_rfc3339_opts(SecondsFormat::Secs, true),
            Self::Rfc3339Millis => time.to_rfc3339_opts(SecondsFormat::Millis, true),
            Self::DateOnly => time.format("%Y-%m-%d").to_string(),
            Self::TimeOnly => time.format("%H:%M:%S").to_string(),
            Self::DateTime => time.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Kitchen => time.format("%-I:%M%p").to_string(),
            Self::Custom(pattern) => format_custom(time, pattern),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Rfc3339 => "rfc3339",
            Self::Rfc3339Millis => "rfc3339-millis",
            Self::DateOnly => "date",
            Self::TimeOnly => "time",
            Self::DateTime => "datetime",
            Self::Kitchen => "kitchen",
            Self::Custom(pattern) => pattern,
        }
    }
}

/// chrono reports a bad pattern only when the formatted value is written, as
/// `fmt::Error`; fall back to RFC 3339 rather than panicking in `to_string`.
fn format_custom(time: &DateTime<FixedOffset>, pattern: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    match write!(out, "{}", time.format(pattern)) {
        Ok(()) => out,
        Err(_) => time.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

impl From<String> for TimeFormat {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TimeFormat> for String {
    fn from(f: TimeFormat) -> Self {
        f.name().to_string()
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether and how the call site is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceMode {
    #[default]
    Off,
    /// `"source":{"function":..,"file":..,"line":..}`
    Full,
    /// `"file":"main.rs:12"`
    ShortFile,
    /// `"file":"/abs/path/main.rs:12"`
    LongFile,
}

impl SourceMode {
    /// Parse mode from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(Self::Off),
            "full" => Some(Self::Full),
            "short" | "short-file" | "short_file" => Some(Self::ShortFile),
            "long" | "long-file" | "long_file" => Some(Self::LongFile),
            _ => None,
        }
    }
}

/// Which rendering strategy produces the colored line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// Colors are applied while walking the event.
    #[default]
    Structural,
    /// Plain JSON is rendered first, then re-tokenized and colored.
    Retokenize,
}

impl Renderer {
    /// Parse renderer from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "structural" => Some(Self::Structural),
            "retokenize" | "colorize" => Some(Self::Retokenize),
            _ => None,
        }
    }
}

/// Options fixed at handler construction.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Minimum severity that is emitted
    pub level: Severity,
    pub time_format: TimeFormat,
    pub source: SourceMode,
    pub palette: Palette,
    pub renderer: Renderer,
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn source(mut self, source: SourceMode) -> Self {
        self.source = source;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn replace_attr<F>(mut self, hook: F) -> Self
    where
        F: Fn(&[String], Attribute) -> Option<Attribute> + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("time_format", &self.time_format)
            .field("source", &self.source)
            .field("palette", &self.palette)
            .field("renderer", &self.renderer)
            .field("replace_attr", &self.replace_attr.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_time() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 5, 28, 12, 34, 56)
            .unwrap()
            .fixed_offset()
    }

    #[test]
    fn test_time_formats() {
        let t = test_time();
        assert_eq!(TimeFormat::Rfc3339.format(&t), "2024-05-28T12:34:56Z");
        assert_eq!(
            TimeFormat::Rfc3339Millis.format(&t),
            "2024-05-28T12:34:56.000Z"
        );
        assert_eq!(TimeFormat::DateOnly.format(&t), "2024-05-28");
        assert_eq!(TimeFormat::TimeOnly.format(&t), "12:34:56");
        assert_eq!(TimeFormat::DateTime.format(&t), "2024-05-28 12:34:56");
        assert_eq!(TimeFormat::Kitchen.format(&t), "12:34PM");
        assert_eq!(TimeFormat::parse("%d/%m").format(&t), "28/05");
    }

    #[test]
    fn test_time_format_offset() {
        let t = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 28, 14, 34, 56)
            .unwrap();
        assert_eq!(TimeFormat::Rfc3339.format(&t), "2024-05-28T14:34:56+02:00");
    }

    #[test]
    fn test_invalid_custom_pattern_falls_back() {
        let t = test_time();
        assert_eq!(
            TimeFormat::Custom("%Q".into()).format(&t),
            "2024-05-28T12:34:56Z"
        );
    }

    #[test]
    fn test_time_format_parse_round_trips_names() {
        for name in ["rfc3339", "rfc3339-millis", "date", "time", "datetime", "kitchen"] {
            assert_eq!(TimeFormat::parse(name).to_string(), name);
        }
        assert_eq!(TimeFormat::default(), TimeFormat::TimeOnly);
    }

    #[test]
    fn test_source_mode_parse() {
        assert_eq!(SourceMode::parse("short"), Some(SourceMode::ShortFile));
        assert_eq!(SourceMode::parse("LONG-FILE"), Some(SourceMode::LongFile));
        assert_eq!(SourceMode::parse("off"), Some(SourceMode::Off));
        assert_eq!(SourceMode::parse("sideways"), None);
    }

    #[test]
    fn test_renderer_parse() {
        assert_eq!(Renderer::parse("Retokenize"), Some(Renderer::Retokenize));
        assert_eq!(Renderer::parse("structural"), Some(Renderer::Structural));
        assert_eq!(Renderer::parse("other"), None);
    }

    #[test]
    fn test_options_builder() {
        let opts = HandlerOptions::new()
            .level(Severity::Warn)
            .source(SourceMode::Full)
            .replace_attr(|_, a| Some(a));
        assert_eq!(opts.level, Severity::Warn);
        assert_eq!(opts.source, SourceMode::Full);
        assert!(opts.replace_attr.is_some());
        assert!(format!("{opts:?}").contains("replace_attr: true"));
    }
}
