//! Pretty-printing of stored JSON values.
//!
//! The printer walks the parsed document and emits typed tokens, so colored
//! output never depends on pattern matching over serialized text. Joined
//! together the tokens give the same text as `serde_json`'s pretty printer
//! with a four-space indent.

use std::ops::Range;

use serde::Deserialize;
use serde_json::Value;

use crate::ExplorerError;

const INDENT: &str = "    ";

/// Deepest array/object nesting accepted by [`render_json`].
const MAX_NESTING: usize = 1000;

/// Lexical class of a rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Object key, quotes included.
    Key,
    /// String literal, quotes included.
    String,
    Number,
    /// `true`, `false` or `null`.
    Literal,
    /// Brackets, braces and item separators.
    Punctuation,
    /// The `:` between a key and its value.
    Colon,
    /// Indentation, newlines and the space after a colon.
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// A value ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValue {
    text: String,
    tokens: Vec<Token>,
}

impl RenderedValue {
    /// The plain pretty-printed document.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Byte ranges of every token inside [`Self::text`].
    pub fn spans(&self) -> impl Iterator<Item = (Range<usize>, TokenKind)> + '_ {
        let mut offset = 0;
        self.tokens.iter().map(move |token| {
            let start = offset;
            offset += token.text.len();
            (start..offset, token.kind)
        })
    }

    /// Rich-text markup for viewers that understand a small HTML subset.
    ///
    /// Keys and strings are wrapped in the palette's string color, colons in
    /// its punctuation color. Runs of two spaces become `&nbsp;&nbsp;` and
    /// newlines become `<br>`.
    pub fn to_markup(&self, palette: &MarkupPalette) -> String {
        let mut out = String::with_capacity(self.text.len() * 2);

        for token in &self.tokens {
            let escaped = escape_markup(&token.text);
            match token.kind {
                TokenKind::Key | TokenKind::String => {
                    push_colored(&mut out, palette.string, &escaped)
                }
                TokenKind::Colon => push_colored(&mut out, palette.punctuation, &escaped),
                _ => out.push_str(&escaped),
            }
        }

        out
    }
}

/// Colors used by [`RenderedValue::to_markup`], as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupPalette {
    pub string: u32,
    pub punctuation: u32,
}

impl Default for MarkupPalette {
    fn default() -> Self {
        Self {
            string: 0x22C55E,
            punctuation: 0xF59E0B,
        }
    }
}

/// Decode, parse and pretty-print raw value bytes.
pub fn render_json(raw: &[u8]) -> Result<RenderedValue, ExplorerError> {
    let text = std::str::from_utf8(raw).map_err(|e| ExplorerError::Decode(e.to_string()))?;

    if nesting_depth(text) > MAX_NESTING {
        return Err(ExplorerError::Parse(format!(
            "nested deeper than {} levels",
            MAX_NESTING
        )));
    }

    let value = parse_document(text).map_err(|e| ExplorerError::Parse(e.to_string()))?;
    render_value(&value)
}

// serde_json stops at 128 levels by default; lift that and grow the stack on
// demand instead.
fn parse_document(text: &str) -> Result<Value, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();

    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Deepest bracket nesting outside string literals.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

/// Pretty-print an already parsed document.
pub fn render_value(value: &Value) -> Result<RenderedValue, ExplorerError> {
    let mut printer = Printer::default();
    printer.value(value, 0)?;

    let text = printer.tokens.iter().map(|t| t.text.as_str()).collect();
    Ok(RenderedValue {
        text,
        tokens: printer.tokens,
    })
}

#[derive(Default)]
struct Printer {
    tokens: Vec<Token>,
}

impl Printer {
    fn push(&mut self, kind: TokenKind, text: impl Into<String>) {
        self.tokens.push(Token {
            kind,
            text: text.into(),
        });
    }

    fn newline(&mut self, depth: usize) {
        self.push(TokenKind::Whitespace, format!("\n{}", INDENT.repeat(depth)));
    }

    fn value(&mut self, value: &Value, depth: usize) -> Result<(), ExplorerError> {
        match value {
            Value::Null => self.push(TokenKind::Literal, "null"),
            Value::Bool(b) => self.push(TokenKind::Literal, b.to_string()),
            Value::Number(n) => self.push(TokenKind::Number, n.to_string()),
            Value::String(s) => self.push(TokenKind::String, quote(s)?),
            Value::Array(items) => {
                if items.is_empty() {
                    self.push(TokenKind::Punctuation, "[]");
                    return Ok(());
                }

                self.push(TokenKind::Punctuation, "[");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.push(TokenKind::Punctuation, ",");
                    }
                    self.newline(depth + 1);
                    self.value(item, depth + 1)?;
                }
                self.newline(depth);
                self.push(TokenKind::Punctuation, "]");
            }
            Value::Object(map) => {
                if map.is_empty() {
                    self.push(TokenKind::Punctuation, "{}");
                    return Ok(());
                }

                self.push(TokenKind::Punctuation, "{");
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        self.push(TokenKind::Punctuation, ",");
                    }
                    self.newline(depth + 1);
                    self.push(TokenKind::Key, quote(key)?);
                    self.push(TokenKind::Colon, ":");
                    self.push(TokenKind::Whitespace, " ");
                    self.value(item, depth + 1)?;
                }
                self.newline(depth);
                self.push(TokenKind::Punctuation, "}");
            }
        }

        Ok(())
    }
}

// serde_json escapes quotes, backslashes and control characters only; other
// non-ASCII text is written as is.
fn quote(s: &str) -> Result<String, ExplorerError> {
    serde_json::to_string(s).map_err(|e| ExplorerError::Parse(e.to_string()))
}

fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(ch),
        }
    }
    out.replace("  ", "&nbsp;&nbsp;")
}

fn push_colored(out: &mut String, color: u32, text: &str) {
    out.push_str(&format!("<span style=\"color:#{:06x}\">", color));
    out.push_str(text);
    out.push_str("</span>");
}
