//! URL query string codec.

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Characters escaped when serializing a component value: everything except
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A parsed query string: key to value, keys unique.
///
/// A value of `None` marks a key that appeared without `=`; `Some("")` is a
/// present-but-empty value, which is also what a value that failed to decode
/// collapses to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: IndexMap<String, Option<String>>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key to a value, replacing any existing entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), Some(value.into()));
        self
    }

    /// Set a key with no value (the bare-key marker).
    pub fn set_bare(&mut self, key: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), None);
        self
    }

    /// Look up a key. Outer `None` means the key is absent; inner `None`
    /// means it was present without a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `source` into `self`. Keys already present are
    /// kept unless `overwrite` is set.
    pub fn merge_from(&mut self, source: &QueryMap, overwrite: bool) -> &mut Self {
        for (key, value) in &source.entries {
            if !overwrite && self.entries.contains_key(key) {
                continue;
            }
            self.entries.insert(key.clone(), value.clone());
        }
        self
    }
}

/// Malformed percent-escape, or an escape decoding to invalid UTF-8.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("malformed percent-escape")]
pub struct InvalidEscape;

/// Strict component decode: every `%` must introduce two hex digits and the
/// decoded bytes must be valid UTF-8.
pub fn decode_component(input: &str) -> Result<String, InvalidEscape> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return Err(InvalidEscape);
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| InvalidEscape)
}

/// Component encode with values-only escaping semantics.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Parse the query portion of a URL into a [`QueryMap`].
///
/// Takes the substring after the last `?`; a URL without `?` parses to an
/// empty map. Keys are never decoded. Values are component-decoded, with a
/// decode failure collapsing to the empty string rather than an error.
///
/// Segments are inserted back-to-front, so when a key repeats the
/// first-occurring segment's value is the one that survives — deliberate,
/// and not the usual last-wins convention.
pub fn parse_url_query(url: &str) -> QueryMap {
    let mut map = QueryMap::new();

    let Some(pos) = url.rfind('?') else {
        return map;
    };
    let query = &url[pos + 1..];

    let segments: Vec<&str> = query.split('&').collect();
    for segment in segments.iter().rev() {
        match segment.split_once('=') {
            Some((key, value)) => {
                let decoded = decode_component(value).unwrap_or_default();
                map.entries.insert(key.to_string(), Some(decoded));
            }
            None => {
                map.entries.insert(segment.to_string(), None);
            }
        }
    }

    map
}

/// Input to [`build_url_query`]: an already-built raw string, passed through
/// unchanged, or a parameter map to serialize.
#[derive(Clone, Debug)]
pub enum QuerySource {
    Raw(String),
    Params(QueryMap),
}

impl QuerySource {
    pub fn is_raw(&self) -> bool {
        matches!(self, QuerySource::Raw(_))
    }

    pub fn is_params(&self) -> bool {
        matches!(self, QuerySource::Params(_))
    }
}

impl From<&str> for QuerySource {
    fn from(raw: &str) -> Self {
        QuerySource::Raw(raw.to_string())
    }
}

impl From<String> for QuerySource {
    fn from(raw: String) -> Self {
        QuerySource::Raw(raw)
    }
}

impl From<QueryMap> for QuerySource {
    fn from(map: QueryMap) -> Self {
        QuerySource::Params(map)
    }
}

impl From<&QueryMap> for QuerySource {
    fn from(map: &QueryMap) -> Self {
        QuerySource::Params(map.clone())
    }
}

/// Serialize a query source to `key=value&key=value` form.
///
/// A raw string comes back unchanged. A map is emitted in its iteration
/// order, values component-encoded, keys untouched; a bare key is emitted
/// without `=`. An empty map yields an empty string. Callers wanting a
/// canonical ordering sort before building.
pub fn build_url_query(source: impl Into<QuerySource>) -> String {
    match source.into() {
        QuerySource::Raw(raw) => raw,
        QuerySource::Params(map) => {
            let mut parts = Vec::with_capacity(map.len());
            for (key, value) in map.entries() {
                match value {
                    Some(value) => parts.push(format!("{}={}", key, encode_component(value))),
                    None => parts.push(key.to_string()),
                }
            }
            parts.join("&")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_question_mark_is_empty() {
        assert!(parse_url_query("https://example.com/page").is_empty());
        assert!(parse_url_query("").is_empty());
    }

    #[test]
    fn test_parse_basic() {
        let map = parse_url_query("https://example.com/page?a=1&b=two");
        assert_eq!(map.get("a"), Some(Some("1")));
        assert_eq!(map.get("b"), Some(Some("two")));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn test_substring_after_last_question_mark() {
        let map = parse_url_query("https://example.com/x?discard=me?a=1");
        assert_eq!(map.get("a"), Some(Some("1")));
        assert_eq!(map.get("discard"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let map = parse_url_query("?a=1&a=2");
        assert_eq!(map.get("a"), Some(Some("1")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_invalid_escape_collapses_to_empty() {
        let map = parse_url_query("?a=%");
        assert_eq!(map.get("a"), Some(Some("")));

        let map = parse_url_query("?a=%ZZ&b=ok");
        assert_eq!(map.get("a"), Some(Some("")));
        assert_eq!(map.get("b"), Some(Some("ok")));
    }

    #[test]
    fn test_invalid_utf8_collapses_to_empty() {
        // %FF is a valid escape but not valid UTF-8 on its own.
        let map = parse_url_query("?a=%FF");
        assert_eq!(map.get("a"), Some(Some("")));
    }

    #[test]
    fn test_bare_key_has_no_value() {
        let map = parse_url_query("?flag&a=1");
        assert_eq!(map.get("flag"), Some(None));
        assert_eq!(map.get("a"), Some(Some("1")));
    }

    #[test]
    fn test_empty_segment_preserved() {
        // `a=1&&b=2` carries an empty segment, which parses as an
        // empty-string key with no value.
        let map = parse_url_query("?a=1&&b=2");
        assert_eq!(map.get(""), Some(None));
        assert_eq!(map.get("a"), Some(Some("1")));
        assert_eq!(map.get("b"), Some(Some("2")));
    }

    #[test]
    fn test_percent_decoding() {
        let map = parse_url_query("?msg=hello%20world&sym=%E2%9C%93");
        assert_eq!(map.get("msg"), Some(Some("hello world")));
        assert_eq!(map.get("sym"), Some(Some("\u{2713}")));
    }

    #[test]
    fn test_keys_are_not_decoded() {
        let map = parse_url_query("?a%20b=1");
        assert_eq!(map.get("a%20b"), Some(Some("1")));
    }

    #[test]
    fn test_build_raw_passthrough() {
        assert_eq!(build_url_query("raw=string"), "raw=string");
        assert!(QuerySource::from("raw=string").is_raw());
    }

    #[test]
    fn test_build_empty_map() {
        assert_eq!(build_url_query(QueryMap::new()), "");
    }

    #[test]
    fn test_build_encodes_values_only() {
        let mut map = QueryMap::new();
        map.set("msg", "hello world").set("plain", "ok");
        assert_eq!(build_url_query(&map), "msg=hello%20world&plain=ok");
    }

    #[test]
    fn test_build_bare_key() {
        let mut map = QueryMap::new();
        map.set_bare("flag").set("a", "1");
        assert_eq!(build_url_query(&map), "flag&a=1");
    }

    #[test]
    fn test_roundtrip_at_mapping_level() {
        let mut map = QueryMap::new();
        map.set("name", "John Doe")
            .set("city", "S\u{e3}o Paulo")
            .set("empty", "")
            .set_bare("flag");

        let rebuilt = parse_url_query(&format!("?{}", build_url_query(&map)));
        assert_eq!(rebuilt, map);
    }

    #[test]
    fn test_merge_keeps_existing_by_default() {
        let mut target = QueryMap::new();
        target.set("a", "1").set("b", "2");
        let mut source = QueryMap::new();
        source.set("b", "overridden").set("c", "3");

        target.merge_from(&source, false);
        assert_eq!(target.get("b"), Some(Some("2")));
        assert_eq!(target.get("c"), Some(Some("3")));
    }

    #[test]
    fn test_merge_overwrite() {
        let mut target = QueryMap::new();
        target.set("a", "1");
        let mut source = QueryMap::new();
        source.set("a", "2");

        target.merge_from(&source, true);
        assert_eq!(target.get("a"), Some(Some("2")));
    }

    #[test]
    fn test_decode_component_strictness() {
        assert_eq!(decode_component("a%3Db"), Ok("a=b".to_string()));
        assert_eq!(decode_component("%"), Err(InvalidEscape));
        assert_eq!(decode_component("%2"), Err(InvalidEscape));
        assert_eq!(decode_component("%G1"), Err(InvalidEscape));
    }
}
