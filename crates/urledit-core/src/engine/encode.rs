//! Percent-coding helpers shared by the engine and the append paths.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

/// Full escape: every byte outside the URI unreserved set is encoded.
/// Used for data appended to a component, which is encoded at insertion.
const FULL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Set for encode-on-set values: control bytes, whitespace and characters
/// that can never appear raw in a component. Separators (`=`, `&`, `/`)
/// and existing `%XX` sequences pass through untouched, so a value keeps
/// its structure.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Fully escape `input` (appended path segments and query pairs).
pub fn escape(input: &str) -> String {
    utf8_percent_encode(input, FULL).to_string()
}

/// Escape `input` as a component value with encoding enabled.
pub fn escape_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Percent-decode `input`, replacing invalid UTF-8 with U+FFFD.
pub fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_is_full() {
        assert_eq!(escape("a b/c"), "a%20b%2Fc");
        assert_eq!(escape("ok-._~"), "ok-._~");
        assert_eq!(escape("100%"), "100%25");
    }

    #[test]
    fn escape_component_keeps_separators() {
        assert_eq!(escape_component("a=b&c=d"), "a=b&c=d");
        assert_eq!(escape_component("a b"), "a%20b");
        assert_eq!(escape_component("/already%20done"), "/already%20done");
    }

    #[test]
    fn decode_roundtrip() {
        assert_eq!(decode("a%20b%2Fc"), "a b/c");
        assert_eq!(decode("plain"), "plain");
    }
}
