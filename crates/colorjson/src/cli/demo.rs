//! The `colorjson demo` command.

use clap::Args;
use colorjson_core::{Attribute, ColorJsonLayer, Config, Handler, LogEvent, Severity, Value};
use std::io;
use tracing_subscriber::prelude::*;

/// Arguments for the `demo` command.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Minimum level to emit (debug, info, warn, error)
    #[arg(short, long)]
    pub level: Option<String>,

    /// Color scheme (default, dim, vivid, plain)
    #[arg(long)]
    pub scheme: Option<String>,

    /// Source location mode (off, full, short-file, long-file)
    #[arg(long)]
    pub source: Option<String>,

    /// Time format name or strftime pattern
    #[arg(long)]
    pub time_format: Option<String>,

    /// Renderer (structural, retokenize)
    #[arg(long)]
    pub renderer: Option<String>,

    /// Write plain JSON without ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

impl DemoArgs {
    /// Layer the command-line flags over the loaded config.
    fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        let handler = &mut config.handler;
        for (flag, slot) in [
            (&self.level, &mut handler.level),
            (&self.source, &mut handler.source),
            (&self.time_format, &mut handler.time_format),
            (&self.renderer, &mut handler.renderer),
        ] {
            if let Some(value) = flag {
                *slot = value.clone();
            }
        }
        if let Some(scheme) = &self.scheme {
            config.colors.scheme = scheme.clone();
        }
        config
    }
}

/// Execute the demo command.
pub fn execute(args: DemoArgs, config: &Config) -> anyhow::Result<()> {
    let config = args.apply(config);
    let color =
        !args.no_color && crate::logging::color_enabled(console::Term::stderr().is_term());
    let handler = Handler::from_config(&config, color)?;

    emit(&handler)?;
    emit_traced(&handler);
    Ok(())
}

/// Log through `handler` if its level admits `severity`.
fn log(handler: &Handler, event: LogEvent) -> io::Result<()> {
    if handler.is_enabled(event.severity) {
        handler.handle(&event)?;
    }
    Ok(())
}

/// Emit the sample events directly through the handler API.
pub fn emit(handler: &Handler) -> io::Result<()> {
    log(
        handler,
        LogEvent::new(Severity::Info, "Server started").attr("addr", ":8080"),
    )?;
    log(
        handler,
        LogEvent::new(Severity::Debug, "Detailed debug message").attr("value", 123),
    )?;
    log(
        handler,
        LogEvent::new(Severity::Debug, r#"Testing null & escaped quotes: ""#)
            .attr("value", Value::Null),
    )?;
    log(
        handler,
        LogEvent::new(Severity::Warn, "Something might be wrong")
            .attr("error", "connection timeout"),
    )?;
    log(
        handler,
        LogEvent::new(Severity::Error, "Critical error occurred")
            .attr("error", "file not found")
            .attr(
                "details",
                Value::Json(serde_json::json!({
                    "path": "/var/log/app.log",
                    "code": 404,
                    "permissions": false,
                })),
            ),
    )?;

    let request = handler
        .with_fields([Attribute::new("request_id", "req-42")])
        .with_group("http");
    log(
        &request,
        LogEvent::new(Severity::Info, "request served")
            .attr("method", "GET")
            .attr("status", 200)
            .attrs([Attribute::group(
                "timing",
                [
                    Attribute::new("total_ms", 12.5),
                    Attribute::new("cached", true),
                ],
            )]),
    )
}

/// Emit a couple of events through `tracing` macros into the same handler.
fn emit_traced(handler: &Handler) {
    let subscriber = tracing_subscriber::registry().with(ColorJsonLayer::new(handler.clone()));
    tracing::subscriber::with_default(subscriber, || {
        let span = tracing::info_span!("job", name = "reindex");
        let _guard = span.enter();
        tracing::info!(items = 3u64, "job started");
        tracing::warn!(skipped = 1u64, "job finished with warnings");
    });
}
