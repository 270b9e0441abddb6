//! Ordered query pair store with tombstoned removal.
//!
//! A query string is decomposed into `name=value` (or bare `name`) pairs
//! that keep their positions for the whole pass. Trim directives blank out
//! matching pairs in place instead of deleting them, so repeated passes see
//! stable indices; the rebuild step drops the blanks.

use crate::diag;
use crate::engine;
use crate::error::Error;

/// Soft cap on stored pairs per URL; extra pairs are dropped with a note.
pub const MAX_QPAIRS: usize = 1000;

/// Ordered collection of query pairs from one query string.
///
/// An empty string is a tombstone: the pair was removed but its slot stays.
#[derive(Debug, Default)]
pub struct QueryPairs {
    pairs: Vec<String>,
    warned: bool,
}

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `query` on `&`; every substring (even an empty one, as in
    /// `a&&b` or a trailing `&`) becomes one stored pair, verbatim.
    pub fn extract(query: &str) -> Self {
        let mut store = Self::new();
        for piece in query.split('&') {
            store.push(piece);
        }
        store
    }

    /// Append one raw (already encoded) pair, honoring the soft cap.
    pub fn push(&mut self, pair: &str) {
        if self.pairs.len() < MAX_QPAIRS {
            self.pairs.push(pair.to_string());
        } else if !self.warned {
            self.warned = true;
            diag::note("too many query pairs");
        }
    }

    /// Number of stored pairs, tombstones included.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Apply one `query=pattern` trim directive.
    ///
    /// The pattern is matched case-insensitively against each pair's name
    /// (the text before the first `=`, or the whole pair without one). A
    /// trailing `*` turns it into a prefix match. Matching pairs are
    /// tombstoned in place.
    pub fn trim(&mut self, directive: &str) -> Result<(), Error> {
        let (target, pattern) = directive
            .split_once('=')
            .filter(|(target, _)| !target.is_empty())
            .ok_or_else(|| Error::Trim(format!("invalid --trim syntax: {directive}")))?;
        if !target.eq_ignore_ascii_case("query") {
            return Err(Error::Trim(format!(
                "Unsupported trim component: {directive}"
            )));
        }
        let (is_prefix, pattern) = match pattern.strip_suffix('*') {
            Some(stem) => (true, stem),
            None => (false, pattern),
        };
        for pair in self.pairs.iter_mut() {
            let hit = {
                let name = pair.split_once('=').map(|(n, _)| n).unwrap_or(pair.as_str());
                if is_prefix {
                    name.get(..pattern.len())
                        .is_some_and(|head| head.eq_ignore_ascii_case(pattern))
                } else {
                    name.eq_ignore_ascii_case(pattern)
                }
            };
            if hit {
                pair.clear();
            }
        }
        Ok(())
    }

    /// Join surviving pairs with `&`, skipping tombstones so no leading,
    /// trailing or doubled separator appears. `None` when nothing survives.
    pub fn rebuild(&self) -> Option<String> {
        let mut out = String::new();
        for pair in self.pairs.iter().filter(|p| !p.is_empty()) {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(pair);
        }
        (!out.is_empty()).then_some(out)
    }

    /// Encode one `query` append argument: when the raw text contains `=`,
    /// name and value are escaped independently around the first one.
    pub fn encode_pair(raw: &str) -> String {
        match raw.split_once('=') {
            Some((name, value)) => format!("{}={}", engine::escape(name), engine::escape(value)),
            None => engine::escape(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_keeps_order_and_empties() {
        let q = QueryPairs::extract("a=1&&b=2&");
        assert_eq!(q.len(), 4);
        assert_eq!(q.rebuild().as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn rebuild_roundtrips_nonempty_pairs() {
        for query in ["a=1", "a=1&b=2&c", "a=&b=2", "name=va%20lue"] {
            assert_eq!(QueryPairs::extract(query).rebuild().as_deref(), Some(query));
        }
    }

    #[test]
    fn trim_exact_match() {
        let mut q = QueryPairs::extract("utm_source=x&keep=1&UTM_SOURCE=y");
        q.trim("query=utm_source").unwrap();
        assert_eq!(q.rebuild().as_deref(), Some("keep=1"));
        // slots stay addressable
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn trim_exact_does_not_touch_longer_names() {
        let mut q = QueryPairs::extract("utm_source=x&utm_sourcey=z");
        q.trim("query=utm_source").unwrap();
        assert_eq!(q.rebuild().as_deref(), Some("utm_sourcey=z"));
    }

    #[test]
    fn trim_prefix_match() {
        let mut q = QueryPairs::extract("utm_a=1&UTM_b=2&other=3&utm=4");
        q.trim("query=utm_*").unwrap();
        assert_eq!(q.rebuild().as_deref(), Some("other=3&utm=4"));
    }

    #[test]
    fn trim_matches_bare_names() {
        let mut q = QueryPairs::extract("flag&keep=1");
        q.trim("query=flag").unwrap();
        assert_eq!(q.rebuild().as_deref(), Some("keep=1"));
    }

    #[test]
    fn trim_is_idempotent() {
        let mut once = QueryPairs::extract("utm_a=1&b=2&utm_c=3");
        once.trim("query=utm_*").unwrap();
        let mut twice = QueryPairs::extract("utm_a=1&b=2&utm_c=3");
        twice.trim("query=utm_*").unwrap();
        twice.trim("query=utm_*").unwrap();
        assert_eq!(once.rebuild(), twice.rebuild());
    }

    #[test]
    fn trim_directives_accumulate() {
        let mut q = QueryPairs::extract("a=1&b=2&c=3");
        q.trim("query=a").unwrap();
        q.trim("query=c").unwrap();
        assert_eq!(q.rebuild().as_deref(), Some("b=2"));
    }

    #[test]
    fn trim_rejects_other_targets() {
        let mut q = QueryPairs::extract("a=1");
        let err = q.trim("path=a").unwrap_err();
        assert!(matches!(err, Error::Trim(_)));
        assert_eq!(err.to_string(), "Unsupported trim component: path=a");
    }

    #[test]
    fn trim_rejects_missing_separator() {
        let mut q = QueryPairs::extract("a=1");
        assert!(matches!(q.trim("query"), Err(Error::Trim(_))));
        assert!(matches!(q.trim("=x"), Err(Error::Trim(_))));
    }

    #[test]
    fn rebuild_none_when_everything_is_tombstoned() {
        let mut q = QueryPairs::extract("utm_a=1&utm_b=2");
        q.trim("query=utm_*").unwrap();
        assert_eq!(q.rebuild(), None);
        assert!(!q.is_empty());
    }

    #[test]
    fn capacity_is_soft_capped() {
        let query: String = (0..MAX_QPAIRS + 50)
            .map(|i| format!("k{i}=v"))
            .collect::<Vec<_>>()
            .join("&");
        let q = QueryPairs::extract(&query);
        assert_eq!(q.len(), MAX_QPAIRS);
        let rebuilt = q.rebuild().unwrap();
        assert_eq!(rebuilt.split('&').count(), MAX_QPAIRS);
        assert!(rebuilt.ends_with(&format!("k{}=v", MAX_QPAIRS - 1)));
    }

    #[test]
    fn encode_pair_splits_at_first_equals() {
        assert_eq!(QueryPairs::encode_pair("n=a b"), "n=a%20b");
        assert_eq!(QueryPairs::encode_pair("n=a=b"), "n=a%3Db");
        assert_eq!(QueryPairs::encode_pair("just name"), "just%20name");
    }
}
