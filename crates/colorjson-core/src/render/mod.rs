//! Rendering of log events into colorized JSON lines.
//!
//! Two strategies are available:
//!
//! ```text
//! Structural:  LogEvent ──walk──▶ colored JSON
//! Retokenize:  LogEvent ──walk──▶ plain JSON ──colorize──▶ colored JSON
//! ```
//!
//! Both produce the same text for records this crate renders. The colorizer
//! takes the first top-level `level` key as the severity, which is always the
//! built-in field since it is written before any attribute.

pub mod colorize;
pub mod value;

pub use colorize::{colorize, Token, TokenKind, Tokenizer};
pub use value::{quote, render_value};

use crate::handler::Context;
use crate::options::{HandlerOptions, Renderer, SourceMode};
use crate::palette::{Color, Palette};
use crate::types::{Attribute, LogEvent, Value};

/// Incremental writer for one JSON line with deferred separators.
///
/// A comma is written lazily in front of the next key, so nothing ever has to
/// be trimmed back out of the buffer.
pub struct LineBuilder<'p> {
    out: String,
    palette: &'p Palette,
    needs_separator: bool,
}

impl<'p> LineBuilder<'p> {
    pub fn new(palette: &'p Palette) -> Self {
        Self {
            out: String::with_capacity(256),
            palette,
            needs_separator: false,
        }
    }

    /// Write `{`.
    pub fn open(&mut self) {
        self.palette.brace.paint_into(&mut self.out, "{");
        self.needs_separator = false;
    }

    /// Write `}`; the enclosing object now needs a separator before its next field.
    pub fn close(&mut self) {
        self.palette.brace.paint_into(&mut self.out, "}");
        self.needs_separator = true;
    }

    /// Write `"key":`, preceded by a comma when needed.
    pub fn key(&mut self, key: &str) {
        if self.needs_separator {
            self.out.push(',');
        }
        value::write_key(&mut self.out, key, self.palette);
        self.out.push(':');
    }

    /// Write a complete non-group field.
    pub fn field(&mut self, key: &str, value: &Value) {
        self.key(key);
        value::write_value(&mut self.out, value, self.palette);
        self.needs_separator = true;
    }

    /// Write a string field with an explicit color.
    pub fn string_field(&mut self, key: &str, text: &str, color: &Color) {
        self.key(key);
        color.paint_into(&mut self.out, &quote(text));
        self.needs_separator = true;
    }

    /// Terminate the line and return it.
    pub fn finish(mut self) -> String {
        self.out.push('\n');
        self.out
    }
}

/// Render `event` through `context` with the configured strategy.
pub fn render(event: &LogEvent, context: &Context, options: &HandlerOptions) -> String {
    match options.renderer {
        Renderer::Structural => render_structural(event, context, options, &options.palette),
        Renderer::Retokenize => {
            let plain = render_structural(event, context, options, &Palette::PLAIN);
            colorize(&plain, &options.palette)
        }
    }
}

/// Walk the event and emit colored JSON directly.
///
/// Field order: `time`, `level`, `msg`, source, persisted attributes, then the
/// event's own attributes nested inside the context's group path.
pub fn render_structural(
    event: &LogEvent,
    context: &Context,
    options: &HandlerOptions,
    palette: &Palette,
) -> String {
    let mut line = LineBuilder::new(palette);
    let walker = AttrWalker { options };

    line.open();
    line.string_field(
        "time",
        &options.time_format.format(&event.time),
        &palette.string,
    );
    line.string_field("level", event.severity.as_str(), palette.level(event.severity));
    line.string_field("msg", &event.message, &palette.string);

    if let Some(source) = &event.source {
        match options.source {
            SourceMode::Off => {}
            SourceMode::Full => {
                line.key("source");
                line.open();
                if let Some(function) = &source.function {
                    line.string_field("function", function, &palette.string);
                }
                line.string_field("file", &source.file, &palette.string);
                line.field("line", &Value::Uint(u64::from(source.line)));
                line.close();
            }
            SourceMode::ShortFile => {
                let text = format!("{}:{}", source.short_file(), source.line);
                line.string_field("file", &text, &palette.string);
            }
            SourceMode::LongFile => {
                let text = format!("{}:{}", source.file, source.line);
                line.string_field("file", &text, &palette.string);
            }
        }
    }

    // Persisted attributes sit at the top level regardless of the group path.
    let mut path = Vec::new();
    for attr in context.attrs() {
        walker.attr(&mut line, &mut path, attr);
    }

    for group in context.groups() {
        line.key(group);
        line.open();
        path.push(group.clone());
    }
    for attr in &event.attrs {
        walker.attr(&mut line, &mut path, attr);
    }
    for _ in context.groups() {
        line.close();
    }

    line.close();
    line.finish()
}

struct AttrWalker<'o> {
    options: &'o HandlerOptions,
}

impl AttrWalker<'_> {
    fn attr(&self, line: &mut LineBuilder<'_>, path: &mut Vec<String>, attr: &Attribute) {
        if let Value::Group(members) = &attr.value {
            self.group(line, path, &attr.key, members);
            return;
        }

        let Some(hook) = &self.options.replace_attr else {
            line.field(&attr.key, &attr.value);
            return;
        };
        let Some(replaced) = hook(path.as_slice(), attr.clone()) else {
            return;
        };
        if replaced.key.is_empty() {
            return;
        }
        match &replaced.value {
            Value::Group(members) => self.group(line, path, &replaced.key, members),
            value => line.field(&replaced.key, value),
        }
    }

    fn group(
        &self,
        line: &mut LineBuilder<'_>,
        path: &mut Vec<String>,
        key: &str,
        members: &[Attribute],
    ) {
        // An unnamed group contributes its members to the enclosing object.
        if key.is_empty() {
            for member in members {
                self.attr(line, path, member);
            }
            return;
        }

        line.key(key);
        line.open();
        path.push(key.to_string());
        for member in members {
            self.attr(line, path, member);
        }
        path.pop();
        line.close();
    }
}
