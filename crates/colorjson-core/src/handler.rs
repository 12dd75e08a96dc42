//! The process-facing log sink.
//!
//! A [`Handler`] owns immutable options, a shared output destination and an
//! immutable [`Context`]. Deriving a handler with [`Handler::with_fields`] or
//! [`Handler::with_group`] builds a new context; the parent is untouched, so a
//! base handler can be cloned into many threads and derived freely.

use crate::config::Config;
use crate::options::HandlerOptions;
use crate::palette::Palette;
use crate::render;
use crate::types::{Attribute, LogEvent, Severity};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Accumulated attributes and group path carried by a derived handler.
///
/// Both sequences are immutable once built. Derivation allocates fresh
/// storage holding the parent's items plus the additions.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    attrs: Arc<[Attribute]>,
    groups: Arc<[String]>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            attrs: Arc::from(Vec::new()),
            groups: Arc::from(Vec::new()),
        }
    }
}

impl Context {
    /// Persisted attributes, in the order they were added.
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Group path, outermost first.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// A new context with `attrs` appended to the persisted attributes.
    pub fn with_fields(&self, attrs: impl IntoIterator<Item = Attribute>) -> Context {
        let mut added = attrs.into_iter().peekable();
        if added.peek().is_none() {
            return self.clone();
        }
        let combined: Vec<Attribute> = self.attrs.iter().cloned().chain(added).collect();
        Context {
            attrs: combined.into(),
            groups: Arc::clone(&self.groups),
        }
    }

    /// A new context with `name` appended to the group path.
    ///
    /// An empty name leaves the path unchanged.
    pub fn with_group(&self, name: impl Into<String>) -> Context {
        let name = name.into();
        if name.is_empty() {
            return self.clone();
        }
        let combined: Vec<String> = self.groups.iter().cloned().chain([name]).collect();
        Context {
            attrs: Arc::clone(&self.attrs),
            groups: combined.into(),
        }
    }
}

/// Output destination shared by a handler and everything derived from it.
///
/// Lines are written whole under the lock so concurrent renders never
/// interleave within a line.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedWriter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write one complete line and flush.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedWriter").finish_non_exhaustive()
    }
}

/// Colorized JSON log handler.
#[derive(Debug, Clone)]
pub struct Handler {
    options: Arc<HandlerOptions>,
    writer: SharedWriter,
    context: Context,
}

impl Handler {
    /// Create a handler writing to `writer`.
    pub fn new<W: Write + Send + 'static>(writer: W, options: HandlerOptions) -> Self {
        Self::with_writer(SharedWriter::new(writer), options)
    }

    /// Create a handler over an existing shared destination.
    pub fn with_writer(writer: SharedWriter, options: HandlerOptions) -> Self {
        Self {
            options: Arc::new(options),
            writer,
            context: Context::default(),
        }
    }

    /// Create a handler writing to stderr.
    pub fn stderr(options: HandlerOptions) -> Self {
        Self::new(io::stderr(), options)
    }

    /// Create a handler from configuration.
    ///
    /// Output is appended to `[output] path` when one is set, otherwise it
    /// goes to stderr. Files are always written without colors; `color`
    /// only applies to stderr.
    pub fn from_config(config: &Config, color: bool) -> crate::Result<Self> {
        let options = config.handler_options()?;
        match config.output_path() {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(&path)?;
                tracing::debug!("Logging to {}", path.display());
                Ok(Self::new(file, options.palette(Palette::PLAIN)))
            }
            None if color => Ok(Self::stderr(options)),
            None => Ok(Self::stderr(options.palette(Palette::PLAIN))),
        }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Whether an event at `severity` would be emitted.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.passes(self.options.level)
    }

    /// Render `event` without writing it.
    pub fn render(&self, event: &LogEvent) -> String {
        render::render(event, &self.context, &self.options)
    }

    /// Render `event` and write it as one line.
    ///
    /// Severity gating is the caller's job (see [`Handler::is_enabled`]).
    /// A failed write is returned unchanged and never retried.
    pub fn handle(&self, event: &LogEvent) -> io::Result<()> {
        let line = self.render(event);
        self.writer.write_line(&line)
    }

    /// A handler whose output additionally carries `attrs` at the top level.
    pub fn with_fields(&self, attrs: impl IntoIterator<Item = Attribute>) -> Handler {
        Handler {
            options: Arc::clone(&self.options),
            writer: self.writer.clone(),
            context: self.context.with_fields(attrs),
        }
    }

    /// A handler whose event attributes nest under one more group.
    pub fn with_group(&self, name: impl Into<String>) -> Handler {
        Handler {
            options: Arc::clone(&self.options),
            writer: self.writer.clone(),
            context: self.context.with_group(name),
        }
    }
}
