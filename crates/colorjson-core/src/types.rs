//! Core data types for structured log events.
//!
//! These types are what the logging front-end hands to a [`Handler`](crate::Handler):
//! a severity, a message, optional source location and an ordered list of
//! key/value attributes that may nest into named groups.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Log event priority tier.
///
/// Ordering follows severity (`Debug < Info < Warn < Error`), never the
/// names' string order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Canonical upper-case name as it appears in the `level` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Whether an event at `self` passes a handler configured with `minimum`.
    pub fn passes(self, minimum: Severity) -> bool {
        self >= minimum
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity '{0}'")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            // No separate trace tier; it folds into debug.
            "trace" | "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

/// The value half of an [`Attribute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Rendered as an RFC 3339 string with millisecond precision
    Time(DateTime<FixedOffset>),
    /// Rendered as integer nanoseconds
    Duration(Duration),
    /// Arbitrary JSON, rendered recursively
    Json(serde_json::Value),
    /// A named nesting level; renders as its own object
    Group(Vec<Attribute>),
}

impl Value {
    /// Stringify fallback for anything without a dedicated variant.
    pub fn display(value: impl fmt::Display) -> Self {
        Value::String(value.to_string())
    }

    /// Debug-format fallback, used for values only known through `Debug`.
    pub fn debug(value: impl fmt::Debug) -> Self {
        Value::String(format!("{value:?}"))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Value::Group(_))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Uint(u64::from(v))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Uint(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::Time(v.fixed_offset())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<Vec<Attribute>> for Value {
    fn from(v: Vec<Attribute>) -> Self {
        Value::Group(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A key/value pair. Keys are not deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A nested group attribute holding `attrs` in order.
    pub fn group(key: impl Into<String>, attrs: impl IntoIterator<Item = Attribute>) -> Self {
        Self {
            key: key.into(),
            value: Value::Group(attrs.into_iter().collect()),
        }
    }
}

/// Call-site location of a log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub file: String,
    pub line: u32,
}

impl Source {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            function: None,
            file: file.into(),
            line,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Final path component of `file`.
    pub fn short_file(&self) -> &str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file.as_str())
    }
}

/// One log event, produced by the front-end and rendered exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub time: DateTime<FixedOffset>,
    pub severity: Severity,
    pub message: String,
    pub source: Option<Source>,
    pub attrs: Vec<Attribute>,
}

impl LogEvent {
    /// Create an event stamped with the current local time.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            time: Local::now().fixed_offset(),
            severity,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    /// Override the timestamp.
    pub fn at<Tz: chrono::TimeZone>(mut self, time: DateTime<Tz>) -> Self {
        self.time = time.fixed_offset();
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Append one attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push(Attribute::new(key, value));
        self
    }

    /// Append several attributes in order.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attribute>) -> Self {
        self.attrs.extend(attrs);
        self
    }
}
