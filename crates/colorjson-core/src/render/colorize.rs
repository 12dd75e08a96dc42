//! Re-tokenizing colorizer for already-serialized JSON lines.
//!
//! The input is scanned into tokens and each token is re-emitted wrapped in
//! its palette color; the text itself is never changed.
//!
//! A quoted token is a key when the next non-whitespace character is `:`.
//! The string value following the record's top-level `level` key is colored
//! by severity. Nested fields named `level` are ordinary strings.

use crate::palette::Palette;
use crate::types::Severity;

/// Category of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    /// `{`, `}`, `[` or `]`
    Brace,
    Colon,
    Comma,
    Key,
    String,
    Number,
    Boolean,
    Null,
    /// The value of the top-level `level` key
    Level(Severity),
    /// Anything else, one character at a time
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Iterator over the tokens of a JSON text.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    after_level_key: bool,
    /// Only the first top-level `level` key of a record is the severity.
    level_seen: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
            after_level_key: false,
            level_seen: false,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// End index of the quoted string starting at `start`, closing quote included.
    fn string_end(&self, start: usize) -> usize {
        let bytes = self.bytes();
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if i + 1 < bytes.len() => i += 2,
                b'"' => return i + 1,
                _ => i += 1,
            }
        }
        // Unterminated, or an escape split a multi-byte character.
        let mut end = i.min(bytes.len());
        while !self.src.is_char_boundary(end) {
            end += 1;
        }
        end
    }

    fn followed_by_colon(&self, from: usize) -> bool {
        self.bytes()[from..]
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b':')
    }

    fn quoted(&mut self, start: usize) -> TokenKind {
        let end = self.string_end(start);
        self.pos = end;
        let text = &self.src[start..end];
        let inner = text
            .strip_prefix('"')
            .map(|t| t.strip_suffix('"').unwrap_or(t))
            .unwrap_or(text);

        if self.followed_by_colon(end) {
            self.after_level_key = self.depth == 1 && inner == "level" && !self.level_seen;
            self.level_seen |= self.after_level_key;
            return TokenKind::Key;
        }

        let level = if self.after_level_key {
            severity_name(inner)
        } else {
            None
        };
        self.after_level_key = false;
        level.map_or(TokenKind::String, TokenKind::Level)
    }

    fn run_while(&mut self, start: usize, pred: impl Fn(u8) -> bool) {
        let bytes = self.bytes();
        let mut i = start;
        while i < bytes.len() && pred(bytes[i]) {
            i += 1;
        }
        self.pos = i;
    }
}

/// Exact, case-sensitive severity names as written in the `level` field.
fn severity_name(s: &str) -> Option<Severity> {
    Severity::ALL.into_iter().find(|sev| sev.as_str() == s)
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let start = self.pos;
        let rest = &self.src[start..];
        let first = *rest.as_bytes().first()?;

        let kind = match first {
            b' ' | b'\t' | b'\n' | b'\r' => {
                self.run_while(start, |b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
                TokenKind::Whitespace
            }
            b'{' | b'[' => {
                if self.depth == 0 {
                    self.level_seen = false;
                }
                self.depth += 1;
                self.pos += 1;
                TokenKind::Brace
            }
            b'}' | b']' => {
                self.depth = self.depth.saturating_sub(1);
                self.pos += 1;
                TokenKind::Brace
            }
            b':' => {
                self.pos += 1;
                TokenKind::Colon
            }
            b',' => {
                self.pos += 1;
                TokenKind::Comma
            }
            b'"' => self.quoted(start),
            b'0'..=b'9' | b'-' => {
                self.run_while(start, |b| {
                    b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')
                });
                TokenKind::Number
            }
            _ if rest.starts_with("true") => {
                self.pos += 4;
                TokenKind::Boolean
            }
            _ if rest.starts_with("false") => {
                self.pos += 5;
                TokenKind::Boolean
            }
            _ if rest.starts_with("null") => {
                self.pos += 4;
                TokenKind::Null
            }
            _ => {
                let width = rest.chars().next().map_or(1, char::len_utf8);
                self.pos += width;
                TokenKind::Other
            }
        };

        Some(Token {
            kind,
            text: &self.src[start..self.pos],
        })
    }
}

/// Inject palette colors around every token of `json`.
///
/// ```
/// use colorjson_core::{colorize, Palette};
/// let plain = "{\"level\":\"INFO\",\"n\":1}\n";
/// assert_eq!(colorize(plain, &Palette::PLAIN), plain);
/// ```
pub fn colorize(json: &str, palette: &Palette) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    for token in Tokenizer::new(json) {
        let color = match token.kind {
            TokenKind::Brace => &palette.brace,
            TokenKind::Key => &palette.key,
            TokenKind::String => &palette.string,
            TokenKind::Number => &palette.number,
            TokenKind::Boolean => &palette.boolean,
            TokenKind::Null => &palette.null,
            TokenKind::Level(severity) => palette.level(severity),
            TokenKind::Whitespace | TokenKind::Colon | TokenKind::Comma | TokenKind::Other => {
                out.push_str(token.text);
                continue;
            }
        };
        color.paint_into(&mut out, token.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use crate::testing::strip_ansi;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        Tokenizer::new(src).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_tokenize_simple_object() {
        let tokens = kinds(r#"{"a": 1, "b": [true, null]}"#);
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Brace, "{"),
                (TokenKind::Key, "\"a\""),
                (TokenKind::Colon, ":"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "1"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Key, "\"b\""),
                (TokenKind::Colon, ":"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Brace, "["),
                (TokenKind::Boolean, "true"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Null, "null"),
                (TokenKind::Brace, "]"),
                (TokenKind::Brace, "}"),
            ]
        );
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let tokens = kinds(r#"{"msg":"say \"hi\"","x":-1.5e3}"#);
        assert_eq!(tokens[3], (TokenKind::String, r#""say \"hi\"""#));
        assert_eq!(tokens[7], (TokenKind::Number, "-1.5e3"));
    }

    #[test]
    fn test_key_detection_skips_whitespace() {
        let tokens = kinds("{\"k\" \t: \"v\"}");
        assert_eq!(tokens[1], (TokenKind::Key, "\"k\""));
        assert_eq!(tokens[5], (TokenKind::String, "\"v\""));
    }

    #[test]
    fn test_level_value_detected_at_top_level() {
        let tokens = kinds(r#"{"level":"WARN","msg":"WARN"}"#);
        assert_eq!(tokens[3], (TokenKind::Level(Severity::Warn), "\"WARN\""));
        assert_eq!(tokens[7], (TokenKind::String, "\"WARN\""));
    }

    #[test]
    fn test_only_first_top_level_level_is_severity() {
        let tokens = kinds(r#"{"level":"INFO","level":"ERROR"}"#);
        assert_eq!(tokens[3], (TokenKind::Level(Severity::Info), "\"INFO\""));
        assert_eq!(tokens[7], (TokenKind::String, "\"ERROR\""));
    }

    #[test]
    fn test_level_tracking_resets_per_record() {
        let tokens = kinds("{\"level\":\"INFO\"}\n{\"level\":\"WARN\"}");
        assert_eq!(tokens[3].0, TokenKind::Level(Severity::Info));
        assert_eq!(tokens[9], (TokenKind::Level(Severity::Warn), "\"WARN\""));
    }

    #[test]
    fn test_level_is_case_sensitive() {
        let tokens = kinds(r#"{"level":"warn"}"#);
        assert_eq!(tokens[3].0, TokenKind::String);
    }

    #[test]
    fn test_nested_level_is_not_severity() {
        let tokens = kinds(r#"{"job":{"level":"ERROR"}}"#);
        assert_eq!(tokens[6], (TokenKind::String, "\"ERROR\""));
    }

    #[test]
    fn test_unterminated_and_multibyte_input() {
        let tokens = kinds("\"é\\");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].1, "\"é\\");

        let text: String = kinds("\"\\é\"").iter().map(|(_, t)| *t).collect();
        assert_eq!(text, "\"\\é\"");

        let tokens = kinds("~ü");
        assert_eq!(tokens, vec![(TokenKind::Other, "~"), (TokenKind::Other, "ü")]);
    }

    #[test]
    fn test_colorize_preserves_text() {
        let src = "{\"time\":\"12:00:00\",\"level\":\"INFO\",\"n\":[1,2],\"ok\":false,\"z\":null}\n";
        let colored = colorize(src, &Palette::DEFAULT);
        assert_ne!(colored, src);
        let stripped = strip_ansi(&colored);
        assert_eq!(stripped, src);
    }

    #[test]
    fn test_colorize_level_color() {
        let colored = colorize(r#"{"level":"ERROR"}"#, &Palette::DEFAULT);
        assert!(colored.contains(&format!("{}\"ERROR\"{}", Color::RED, Color::RESET)));
    }
}
