//! `tracing` integration.
//!
//! [`ColorJsonLayer`] turns `tracing` events into [`LogEvent`]s and hands
//! them to a [`Handler`]. Fields recorded on enclosing spans are carried as
//! persisted attributes, root span first.

use crate::handler::Handler;
use crate::types::{Attribute, LogEvent, Severity, Source, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Layer that writes every enabled event through a [`Handler`].
pub struct ColorJsonLayer {
    handler: Handler,
    write_failed: AtomicBool,
}

impl ColorJsonLayer {
    pub fn new(handler: Handler) -> Self {
        Self {
            handler,
            write_failed: AtomicBool::new(false),
        }
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// `tracing` offers no way to return a write error, so the first one is
    /// reported on stderr and the rest are dropped.
    fn report_write_error(&self, err: &std::io::Error) {
        if !self.write_failed.swap(true, Ordering::Relaxed) {
            eprintln!("colorjson: failed to write log line: {err}");
        }
    }
}

/// Span fields stored in the registry's span extensions.
struct SpanFields(Vec<Attribute>);

impl SpanFields {
    /// Record `attrs`, replacing any earlier value under the same key.
    fn merge(&mut self, attrs: Vec<Attribute>) {
        for attr in attrs {
            match self.0.iter_mut().find(|existing| existing.key == attr.key) {
                Some(existing) => *existing = attr,
                None => self.0.push(attr),
            }
        }
    }
}

/// Collects event or span fields as attributes.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    attrs: Vec<Attribute>,
    /// Spans have no message; their `message` field is an ordinary attribute.
    span: bool,
}

impl FieldVisitor {
    fn for_span() -> Self {
        Self {
            span: true,
            ..Self::default()
        }
    }

    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" && !self.span {
            let text = match value {
                Value::String(s) => s,
                other => format!("{other:?}"),
            };
            self.message = Some(text);
        } else {
            self.attrs.push(Attribute::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push(field, Value::debug(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::Uint(value));
    }

    fn record_i128(&mut self, field: &Field, value: i128) {
        self.push(field, Value::display(value));
    }

    fn record_u128(&mut self, field: &Field, value: u128) {
        self.push(field, Value::display(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::Float(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::display(value));
    }
}

impl<S> Layer<S> for ColorJsonLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // Interest is never cached so several handlers with different levels can
    // coexist across dispatchers.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    /// Spans always pass so their fields reach events recorded inside them.
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        !metadata.is_event() || self.handler.is_enabled(Severity::from(*metadata.level()))
    }

    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut visitor = FieldVisitor::for_span();
        attrs.record(&mut visitor);
        span.extensions_mut().insert(SpanFields(visitor.attrs));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut visitor = FieldVisitor::for_span();
        values.record(&mut visitor);

        let mut extensions = span.extensions_mut();
        match extensions.get_mut::<SpanFields>() {
            Some(fields) => fields.merge(visitor.attrs),
            None => extensions.insert(SpanFields(visitor.attrs)),
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Severity::from(*metadata.level());
        if !self.handler.is_enabled(severity) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut persisted = Vec::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(fields) = span.extensions().get::<SpanFields>() {
                    persisted.extend(fields.0.iter().cloned());
                }
            }
        }

        let mut log_event =
            LogEvent::new(severity, visitor.message.unwrap_or_default()).attrs(visitor.attrs);
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            let function = metadata.module_path().unwrap_or(metadata.target());
            log_event = log_event.with_source(Source::new(file, line).with_function(function));
        }

        let handler = self.handler.with_fields(persisted);
        if let Err(err) = handler.handle(&log_event) {
            self.report_write_error(&err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{HandlerOptions, SourceMode};
    use crate::palette::Palette;
    use crate::testing::Capture;
    use tracing_subscriber::prelude::*;

    fn capture_lines(options: HandlerOptions, f: impl FnOnce()) -> Vec<String> {
        let capture = Capture::default();
        let layer = ColorJsonLayer::new(Handler::new(capture.clone(), options));
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);

        capture.stripped().lines().map(str::to_string).collect()
    }

    fn capture_with(options: HandlerOptions, f: impl FnOnce()) -> Vec<serde_json::Value> {
        capture_lines(options, f)
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_event_fields_and_message() {
        let lines = capture_with(HandlerOptions::new(), || {
            tracing::info!(user = "ann", attempts = 3u64, ok = true, ratio = 0.5, "logged in");
        });
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["msg"], "logged in");
        assert_eq!(line["user"], "ann");
        assert_eq!(line["attempts"], 3);
        assert_eq!(line["ok"], true);
        assert_eq!(line["ratio"], 0.5);
    }

    #[test]
    fn test_events_below_level_are_dropped() {
        let lines = capture_with(HandlerOptions::new().level(Severity::Warn), || {
            tracing::debug!("nope");
            tracing::info!("nope");
            tracing::warn!("yes");
            tracing::error!("yes");
        });
        let levels: Vec<&str> = lines.iter().filter_map(|l| l["level"].as_str()).collect();
        assert_eq!(levels, ["WARN", "ERROR"]);
    }

    #[test]
    fn test_trace_folds_into_debug() {
        let lines = capture_with(HandlerOptions::new().level(Severity::Debug), || {
            tracing::trace!("fine-grained");
        });
        assert_eq!(lines[0]["level"], "DEBUG");
    }

    #[test]
    fn test_span_fields_are_persisted_root_first() {
        let lines = capture_lines(HandlerOptions::new(), || {
            let outer = tracing::info_span!("request", request_id = "r-1");
            let _outer = outer.enter();
            let inner = tracing::info_span!("db", table = tracing::field::Empty);
            inner.record("table", "users");
            let _inner = inner.enter();
            tracing::info!(rows = 2u64, "query done");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(
            ",\"request_id\":\"r-1\",\"table\":\"users\",\"rows\":2}"
        ));
    }

    #[test]
    fn test_source_from_metadata() {
        let lines = capture_with(HandlerOptions::new().source(SourceMode::ShortFile), || {
            tracing::info!("here");
        });
        let file = lines[0]["file"].as_str().unwrap();
        assert!(file.starts_with("layer.rs:"));
    }

    #[test]
    fn test_debug_fields_fall_back_to_strings() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Point {
            x: i32,
        }
        let lines = capture_with(HandlerOptions::new().palette(Palette::PLAIN), || {
            tracing::info!(point = ?Point { x: 1 }, "moved");
        });
        assert_eq!(lines[0]["point"], "Point { x: 1 }");
    }

    #[test]
    fn test_span_message_field_is_kept_as_attribute() {
        let lines = capture_lines(HandlerOptions::new(), || {
            let span = tracing::info_span!("s", message = "from span", k = 1u64);
            let _guard = span.enter();
            tracing::info!("evt");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("\"msg\":\"evt\""));
        assert!(lines[0].ends_with(",\"message\":\"from span\",\"k\":1}"));
    }

    #[test]
    fn test_rerecorded_span_field_replaces_value() {
        let lines = capture_lines(HandlerOptions::new(), || {
            let span =
                tracing::info_span!("job", state = "queued", attempt = tracing::field::Empty);
            span.record("state", "running");
            span.record("attempt", 1u64);
            span.record("attempt", 2u64);
            let _guard = span.enter();
            tracing::info!("tick");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(",\"state\":\"running\",\"attempt\":2}"));
        assert_eq!(lines[0].matches("\"attempt\"").count(), 1);
    }
}
