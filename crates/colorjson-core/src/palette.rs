//! Terminal colors and the palettes that map JSON token categories to them.
//!
//! Palettes are plain data. The named presets are `const` values and are
//! copied into each handler, so customizing one handler's colors never
//! affects another.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// An ANSI escape sequence. The empty color wraps text unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Color(Cow<'static, str>);

impl Color {
    /// No color; wrapping is the identity.
    pub const NONE: Color = Color::from_static("");

    pub const RESET: Color = Color::from_static("\x1b[0m");
    pub const CYAN: Color = Color::from_static("\x1b[36m");
    pub const GREEN: Color = Color::from_static("\x1b[32m");
    pub const YELLOW: Color = Color::from_static("\x1b[33m");
    pub const MAGENTA: Color = Color::from_static("\x1b[35m");
    pub const BRIGHT_WHITE: Color = Color::from_static("\x1b[37;1m");
    pub const BRIGHT_BLUE: Color = Color::from_static("\x1b[34;1m");
    pub const BRIGHT_CYAN: Color = Color::from_static("\x1b[36;1m");
    pub const RED: Color = Color::from_static("\x1b[31m");
    pub const BLUE: Color = Color::from_static("\x1b[34m");
    pub const GRAY: Color = Color::from_static("\x1b[90m");
    pub const BOLD: Color = Color::from_static("\x1b[1m");
    pub const ITALIC: Color = Color::from_static("\x1b[3m");
    pub const UNDERLINE: Color = Color::from_static("\x1b[4m");
    pub const BLACK: Color = Color::from_static("\x1b[30m");
    pub const BG_RED: Color = Color::from_static("\x1b[41m");
    pub const BG_GREEN: Color = Color::from_static("\x1b[42m");
    pub const BG_YELLOW: Color = Color::from_static("\x1b[43m");
    pub const BG_BLUE: Color = Color::from_static("\x1b[44m");
    pub const BG_MAGENTA: Color = Color::from_static("\x1b[45m");
    pub const BG_CYAN: Color = Color::from_static("\x1b[46m");
    pub const BG_WHITE: Color = Color::from_static("\x1b[47m");
    // 256-color mode
    pub const ORANGE: Color = Color::from_static("\x1b[38;5;208m");
    pub const PURPLE: Color = Color::from_static("\x1b[38;5;129m");
    pub const PINK: Color = Color::from_static("\x1b[38;5;213m");
    pub const TEAL: Color = Color::from_static("\x1b[38;5;23m");

    pub const fn from_static(code: &'static str) -> Self {
        Color(Cow::Borrowed(code))
    }

    /// Build from SGR parameters, e.g. `"38;5;208"` becomes `ESC[38;5;208m`.
    pub fn sgr(params: &str) -> Self {
        Color(Cow::Owned(format!("\x1b[{params}m")))
    }

    /// Parse a color name, a `+`-joined list of names, or raw SGR parameters.
    ///
    /// ```
    /// use colorjson_core::Color;
    /// assert_eq!(Color::parse("gray").unwrap(), Color::GRAY);
    /// assert_eq!(Color::parse("bg_red+bright_white").unwrap(), Color::BG_RED + Color::BRIGHT_WHITE);
    /// assert_eq!(Color::parse("38;5;208").unwrap(), Color::ORANGE);
    /// ```
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Some(Color::NONE);
        }
        if spec.contains('+') {
            return spec
                .split('+')
                .try_fold(Color::NONE, |acc, part| Some(acc + Color::parse(part)?));
        }
        if let Some(color) = Self::named(&spec.to_lowercase()) {
            return Some(color);
        }
        if spec.chars().all(|c| c.is_ascii_digit() || c == ';') {
            return Some(Color::sgr(spec));
        }
        None
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "none" => Color::NONE,
            "reset" => Color::RESET,
            "cyan" => Color::CYAN,
            "green" => Color::GREEN,
            "yellow" => Color::YELLOW,
            "magenta" => Color::MAGENTA,
            "bright_white" => Color::BRIGHT_WHITE,
            "bright_blue" => Color::BRIGHT_BLUE,
            "bright_cyan" => Color::BRIGHT_CYAN,
            "red" => Color::RED,
            "blue" => Color::BLUE,
            "gray" | "grey" => Color::GRAY,
            "bold" => Color::BOLD,
            "italic" => Color::ITALIC,
            "underline" => Color::UNDERLINE,
            "black" => Color::BLACK,
            "bg_red" => Color::BG_RED,
            "bg_green" => Color::BG_GREEN,
            "bg_yellow" => Color::BG_YELLOW,
            "bg_blue" => Color::BG_BLUE,
            "bg_magenta" => Color::BG_MAGENTA,
            "bg_cyan" => Color::BG_CYAN,
            "bg_white" => Color::BG_WHITE,
            "orange" => Color::ORANGE,
            "purple" => Color::PURPLE,
            "pink" => Color::PINK,
            "teal" => Color::TEAL,
            _ => return None,
        };
        Some(color)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Append `text` to `out`, wrapped in this color and a trailing reset.
    pub fn paint_into(&self, out: &mut String, text: &str) {
        if self.is_none() {
            out.push_str(text);
            return;
        }
        out.push_str(&self.0);
        out.push_str(text);
        out.push_str(Color::RESET.as_str());
    }

    pub fn paint(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.0.len() + 4);
        self.paint_into(&mut out, text);
        out
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        if self.is_none() {
            return rhs;
        }
        if rhs.is_none() {
            return self;
        }
        Color(Cow::Owned(format!("{}{}", self.0, rhs.0)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from token category to terminal color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub string: Color,
    pub number: Color,
    pub boolean: Color,
    pub null: Color,
    pub key: Color,
    pub brace: Color,
    pub level_debug: Color,
    pub level_info: Color,
    pub level_warn: Color,
    pub level_error: Color,
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        string: Color::GREEN,
        number: Color::YELLOW,
        boolean: Color::MAGENTA,
        null: Color::BRIGHT_WHITE,
        key: Color::CYAN,
        brace: Color::BRIGHT_BLUE,
        level_debug: Color::BRIGHT_CYAN,
        level_info: Color::BRIGHT_CYAN,
        level_warn: Color::YELLOW,
        level_error: Color::RED,
    };

    /// Muted colors for light-on-dark terminals with busy output.
    pub const DIM: Palette = Palette {
        string: Color::TEAL,
        number: Color::GRAY,
        boolean: Color::GRAY,
        null: Color::GRAY,
        key: Color::BLUE,
        brace: Color::GRAY,
        level_debug: Color::GRAY,
        level_info: Color::BLUE,
        level_warn: Color::ORANGE,
        level_error: Color::RED,
    };

    /// 256-color palette with loud severities.
    pub const VIVID: Palette = Palette {
        string: Color::PINK,
        number: Color::ORANGE,
        boolean: Color::PURPLE,
        null: Color::BRIGHT_WHITE,
        key: Color::BRIGHT_CYAN,
        brace: Color::BRIGHT_WHITE,
        level_debug: Color::from_static("\x1b[45m\x1b[37;1m"),
        level_info: Color::from_static("\x1b[44m\x1b[37;1m"),
        level_warn: Color::from_static("\x1b[43m\x1b[30m"),
        level_error: Color::from_static("\x1b[41m\x1b[37;1m"),
    };

    /// No colors at all; output is plain JSON.
    pub const PLAIN: Palette = Palette {
        string: Color::NONE,
        number: Color::NONE,
        boolean: Color::NONE,
        null: Color::NONE,
        key: Color::NONE,
        brace: Color::NONE,
        level_debug: Color::NONE,
        level_info: Color::NONE,
        level_warn: Color::NONE,
        level_error: Color::NONE,
    };

    /// Color for the `level` value of an event at `severity`.
    pub fn level(&self, severity: Severity) -> &Color {
        match severity {
            Severity::Debug => &self.level_debug,
            Severity::Info => &self.level_info,
            Severity::Warn => &self.level_warn,
            Severity::Error => &self.level_error,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::DEFAULT
    }
}

/// Named palette presets, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Default,
    Dim,
    Vivid,
    Plain,
}

impl ColorScheme {
    pub fn palette(self) -> Palette {
        match self {
            ColorScheme::Default => Palette::DEFAULT,
            ColorScheme::Dim => Palette::DIM,
            ColorScheme::Vivid => Palette::VIVID,
            ColorScheme::Plain => Palette::PLAIN,
        }
    }

    /// Parse scheme from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "dim" => Some(Self::Dim),
            "vivid" => Some(Self::Vivid),
            "plain" | "none" | "off" => Some(Self::Plain),
            _ => None,
        }
    }
}

/// Error returned when a color scheme name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color scheme '{0}'")]
pub struct ParseColorSchemeError(pub String);

impl FromStr for ColorScheme {
    type Err = ParseColorSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseColorSchemeError(s.to_string()))
    }
}
