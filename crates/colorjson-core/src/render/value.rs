//! Scalar and JSON value rendering.
//!
//! Every value produces some JSON literal; there is no unrenderable input.

use crate::palette::{Color, Palette};
use crate::types::Value;
use chrono::SecondsFormat;

/// JSON-quote `s`, escaping quotes, backslashes and control characters.
pub fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Canonical JSON text for a float. Non-finite values have no JSON number
/// form and are quoted instead.
pub fn float_literal(v: f64) -> (String, bool) {
    match serde_json::Number::from_f64(v) {
        Some(n) => (n.to_string(), true),
        None if v.is_nan() => (quote("NaN"), false),
        None if v > 0.0 => (quote("+Inf"), false),
        None => (quote("-Inf"), false),
    }
}

/// The JSON literal for a non-group value together with the color it takes.
///
/// Group values are structural and handled by the caller; here they fall back
/// to `null` so that a stray group never yields invalid JSON.
fn scalar<'p>(value: &Value, palette: &'p Palette) -> (String, &'p Color) {
    match value {
        Value::String(s) => (quote(s), &palette.string),
        Value::Int(n) => (n.to_string(), &palette.number),
        Value::Uint(n) => (n.to_string(), &palette.number),
        Value::Float(f) => match float_literal(*f) {
            (text, true) => (text, &palette.number),
            (text, false) => (text, &palette.string),
        },
        Value::Bool(b) => (b.to_string(), &palette.boolean),
        Value::Null => ("null".to_string(), &palette.null),
        Value::Time(t) => (
            quote(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            &palette.string,
        ),
        Value::Duration(d) => (d.as_nanos().to_string(), &palette.number),
        Value::Json(_) | Value::Group(_) => ("null".to_string(), &palette.null),
    }
}

/// Append the colored rendering of `value` to `out`.
///
/// Groups are not handled here; see [`LineBuilder`](super::LineBuilder).
pub fn write_value(out: &mut String, value: &Value, palette: &Palette) {
    match value {
        Value::Json(json) => write_json(out, json, palette),
        other => {
            let (text, color) = scalar(other, palette);
            color.paint_into(out, &text);
        }
    }
}

/// Render `value` to a fresh colored string.
pub fn render_value(value: &Value, palette: &Palette) -> String {
    let mut out = String::new();
    write_value(&mut out, value, palette);
    out
}

/// Append a colored, quoted object key (without the colon).
pub fn write_key(out: &mut String, key: &str, palette: &Palette) {
    palette.key.paint_into(out, &quote(key));
}

fn write_json(out: &mut String, json: &serde_json::Value, palette: &Palette) {
    match json {
        serde_json::Value::Null => palette.null.paint_into(out, "null"),
        serde_json::Value::Bool(b) => palette.boolean.paint_into(out, if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => palette.number.paint_into(out, &n.to_string()),
        serde_json::Value::String(s) => palette.string.paint_into(out, &quote(s)),
        serde_json::Value::Array(items) => {
            palette.brace.paint_into(out, "[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(out, item, palette);
            }
            palette.brace.paint_into(out, "]");
        }
        serde_json::Value::Object(map) => {
            palette.brace.paint_into(out, "{");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_key(out, key, palette);
                out.push(':');
                write_json(out, item, palette);
            }
            palette.brace.paint_into(out, "}");
        }
    }
}
