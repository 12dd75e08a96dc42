//! colorjson core - syntax-highlighted JSON log lines for terminals.
//!
//! A [`Handler`] takes structured log events (time, severity, message,
//! key/value attributes with nested groups) and writes each one as a single
//! line of colorized JSON. Stripping the ANSI color codes leaves valid,
//! compact JSON, so the output stays readable by ordinary JSON log tooling.
//!
//! # Architecture
//!
//! ```text
//! LogEvent → Handler (level gate, context) → render (palette) → one line → writer
//! ```
//!
//! # Usage
//!
//! ```rust
//! use colorjson_core::{Handler, HandlerOptions, LogEvent, Severity};
//!
//! let handler = Handler::new(std::io::sink(), HandlerOptions::default());
//! let http = handler.with_group("http");
//! if http.is_enabled(Severity::Info) {
//!     let event = LogEvent::new(Severity::Info, "request served")
//!         .attr("method", "POST")
//!         .attr("status", 200);
//!     http.handle(&event).unwrap();
//! }
//! ```
//!
//! Through `tracing`:
//!
//! ```rust,ignore
//! use colorjson_core::{ColorJsonLayer, Handler, HandlerOptions};
//! use tracing_subscriber::prelude::*;
//!
//! let layer = ColorJsonLayer::new(Handler::stderr(HandlerOptions::default()));
//! tracing_subscriber::registry().with(layer).init();
//! tracing::info!(addr = ":8080", "server started");
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod handler;
pub mod layer;
pub mod options;
pub mod palette;
pub mod render;
pub mod types;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ColorJsonError, ConfigError, Result};
pub use handler::{Context, Handler, SharedWriter};
pub use layer::ColorJsonLayer;
pub use options::{HandlerOptions, ReplaceAttr, Renderer, SourceMode, TimeFormat};
pub use palette::{Color, ColorScheme, Palette, ParseColorSchemeError};
pub use render::colorize;
pub use types::{Attribute, LogEvent, ParseSeverityError, Severity, Source, Value};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
