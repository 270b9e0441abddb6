//! Output format mini-language.
//!
//! A format string mixes literal text, backslash escapes and `{component}`
//! references; `{:component}` skips percent-decoding for that lookup. The
//! string is parsed into tokens once per render, left to right, with no
//! backtracking.

use crate::component::Component;
use crate::diag;

/// One parsed unit of a format string.
#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Verbatim text.
    Literal(&'a str),
    /// Control character from a `\r`, `\n` or `\t` escape.
    Escape(char),
    /// `{name}` or `{:name}` component reference.
    Reference { name: &'a str, decode: bool },
}

/// How a component reference resolved.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    Value(String),
    Absent,
    Failed(String),
}

/// Source of component values for rendering.
pub trait ComponentSource {
    fn resolve(&self, component: Component, decode: bool) -> Resolved;
}

/// Parse `format` into tokens.
///
/// `{{` yields a literal `{` and nothing else: the characters after it are
/// parsed normally, so `{{id}}` comes out as `{`, `id`, `}`, `}`. A `{`
/// with no closing `}` ends parsing; the remainder yields no tokens.
pub fn tokenize(format: &str) -> Vec<Token<'_>> {
    let bytes = format.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                tokens.push(Token::Literal(&format[i..i + 1]));
                i += 2;
            }
            b'{' => {
                let Some(off) = format[i + 1..].find('}') else {
                    break;
                };
                let end = i + 1 + off;
                let mut name = &format[i + 1..end];
                let mut decode = true;
                if let Some(rest) = name.strip_prefix(':') {
                    name = rest;
                    decode = false;
                }
                tokens.push(Token::Reference { name, decode });
                i = end + 1;
            }
            b'\\' if i + 1 < bytes.len() => {
                match bytes[i + 1] {
                    b'r' => tokens.push(Token::Escape('\r')),
                    b'n' => tokens.push(Token::Escape('\n')),
                    b't' => tokens.push(Token::Escape('\t')),
                    // unknown escape: both characters go out verbatim
                    _ => tokens.push(Token::Literal(&format[i..i + 2])),
                }
                i += 2;
            }
            _ => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i] != b'{' && bytes[i] != b'\\' {
                    i += 1;
                }
                tokens.push(Token::Literal(&format[start..i]));
            }
        }
    }
    tokens
}

/// Render `format` against `source`. Always ends with a newline.
///
/// Unknown reference names and absent components render as nothing; any
/// other resolution failure is reported on stderr and rendering continues.
pub fn render(format: &str, source: &dyn ComponentSource) -> String {
    let mut out = String::new();
    for token in tokenize(format) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Escape(c) => out.push(c),
            Token::Reference { name, decode } => {
                let Some(component) = Component::from_name(name) else {
                    continue;
                };
                match source.resolve(component, decode) {
                    Resolved::Value(value) => out.push_str(&value),
                    Resolved::Absent => {}
                    Resolved::Failed(msg) => diag::note(&format!("{msg} ({component})")),
                }
            }
        }
    }
    out.push('\n');
    out
}
