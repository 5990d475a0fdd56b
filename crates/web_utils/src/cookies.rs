//! Cookie store over an ambient cookie string.
//!
//! The system of record is the environment's cookie string, the analogue of
//! `document.cookie`: every operation is a read-modify-write against that
//! string. The store seam is the [`CookieStore`] trait; [`DocumentCookies`]
//! is the real-environment adapter and [`MemoryCookieStore`] the in-memory
//! fake for tests.

use indexmap::IndexMap;
use parking_lot::RwLock;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;
use std::time::Duration;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

/// Fixed time-to-live applied by the adapter surface: 30 days.
pub const DEFAULT_COOKIE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// `expires` attribute format: RFC-1123 with the literal GMT zone.
const EXPIRES_FORMAT: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Characters escaped in cookie values: everything except alphanumerics
/// and `@ * _ + - . /`.
const COOKIE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'*')
    .remove(b'_')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/');

fn escape_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

fn unescape_value(value: &str) -> String {
    // Lenient on malformed escapes: they pass through unchanged.
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

fn format_expires(at: OffsetDateTime) -> String {
    at.format(EXPIRES_FORMAT).unwrap_or_default()
}

fn parse_expires(value: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(value.trim(), EXPIRES_FORMAT)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Injected store seam so codec logic is testable without a real environment.
pub trait CookieStore {
    /// The stored value, or `None` when the cookie is absent. Distinct from
    /// an empty string, which is a present cookie with an empty value.
    fn get(&self, name: &str) -> Option<String>;

    fn set(&mut self, name: &str, value: &str, ttl: Duration);

    fn remove(&mut self, name: &str);

    /// Best-effort removal of every cookie visible to this store.
    fn clear(&mut self);
}

/// In-memory fake for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryCookieStore {
    entries: IndexMap<String, (String, OffsetDateTime)>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        let (value, expires) = self.entries.get(name)?;
        if *expires <= OffsetDateTime::now_utc() {
            return None;
        }
        Some(value.clone())
    }

    fn set(&mut self, name: &str, value: &str, ttl: Duration) {
        let expires = OffsetDateTime::now_utc() + ttl;
        self.entries.insert(name.to_string(), (value.to_string(), expires));
    }

    fn remove(&mut self, name: &str) {
        self.entries.shift_remove(name);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Clone, Debug)]
struct StoredCookie {
    value: String,
    expires: Option<OffsetDateTime>,
}

/// The ambient cookie string: what the environment itself holds.
///
/// Accepts attribute strings of the form `name=value;expires=<date>` and
/// renders the live entries as a `name=value; name=value` header. An applied
/// expiry at or before now evicts the entry.
#[derive(Clone, Debug, Default)]
pub struct CookieString {
    entries: IndexMap<String, StoredCookie>,
}

impl CookieString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the live cookies, oldest first.
    pub fn header(&self) -> String {
        let now = OffsetDateTime::now_utc();
        self.entries
            .iter()
            .filter(|(_, cookie)| cookie.expires.map_or(true, |at| at > now))
            .map(|(name, cookie)| format!("{}={}", name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Apply a cookie attribute string, inserting, overwriting, or evicting.
    pub fn apply(&mut self, attribute_string: &str) {
        let mut parts = attribute_string.split(';');

        let Some((name, value)) = parts.next().and_then(|nv| nv.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let mut expires = None;
        for attr in parts {
            let (attr_name, attr_value) = match attr.split_once('=') {
                Some((n, v)) => (n.trim().to_ascii_lowercase(), v),
                None => (attr.trim().to_ascii_lowercase(), ""),
            };
            if attr_name == "expires" {
                expires = parse_expires(attr_value);
            }
        }

        if let Some(at) = expires {
            if at <= OffsetDateTime::now_utc() {
                debug!(name, "cookie expired on apply, evicting");
                self.entries.shift_remove(name);
                return;
            }
        }

        self.entries.insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires,
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Real-environment adapter: read/write/clear against a shared ambient
/// cookie string, fixed 30-day expiry on writes.
#[derive(Clone, Default)]
pub struct DocumentCookies {
    ambient: Arc<RwLock<CookieString>>,
}

impl DocumentCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter over an existing ambient string, shared with other holders.
    pub fn shared(ambient: Arc<RwLock<CookieString>>) -> Self {
        Self { ambient }
    }

    pub fn ambient(&self) -> Arc<RwLock<CookieString>> {
        self.ambient.clone()
    }

    /// Write a cookie with the fixed 30-day expiry.
    pub fn set_cookie(&self, name: &str, value: &str) {
        self.apply_with_ttl(name, value, DEFAULT_COOKIE_TTL);
    }

    /// Read a cookie by pattern-matching the ambient string: the name
    /// anchored at the start or after a space, the value bounded by a
    /// semicolon or the end.
    pub fn get_cookie(&self, name: &str) -> Option<String> {
        let header = self.ambient.read().header();
        match_cookie(&header, name).map(|raw| unescape_value(&raw))
    }

    /// Expire one cookie, or every visible cookie when `name` is `None`.
    pub fn clear_cookie(&self, name: Option<&str>) {
        match name {
            Some(name) => self.expire(name),
            None => {
                let header = self.ambient.read().header();
                for name in cookie_names(&header) {
                    self.expire(&name);
                }
            }
        }
    }

    fn apply_with_ttl(&self, name: &str, value: &str, ttl: Duration) {
        let expires = OffsetDateTime::now_utc() + ttl;
        let attribute_string =
            format!("{}={};expires={}", name, escape_value(value), format_expires(expires));
        self.ambient.write().apply(&attribute_string);
    }

    /// Set the cookie's expiry to the epoch, forcing eviction.
    fn expire(&self, name: &str) {
        let attribute_string = format!(
            "{}=0;expires={}",
            name,
            format_expires(OffsetDateTime::UNIX_EPOCH)
        );
        self.ambient.write().apply(&attribute_string);
    }
}

impl CookieStore for DocumentCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.get_cookie(name)
    }

    fn set(&mut self, name: &str, value: &str, ttl: Duration) {
        self.apply_with_ttl(name, value, ttl);
    }

    fn remove(&mut self, name: &str) {
        self.clear_cookie(Some(name));
    }

    fn clear(&mut self) {
        self.clear_cookie(None);
    }
}

/// Find `name=` anchored at the start or after a space, returning the raw
/// value up to the next semicolon or the end of the string.
fn match_cookie(header: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    let bytes = header.as_bytes();
    let mut search = 0;
    while let Some(found) = header[search..].find(name) {
        let start = search + found;
        let after = start + name.len();
        let anchored = start == 0 || bytes[start - 1] == b' ';
        if anchored && bytes.get(after) == Some(&b'=') {
            let rest = &header[after + 1..];
            let end = rest.find(';').unwrap_or(rest.len());
            return Some(rest[..end].to_string());
        }
        search = start + 1;
    }
    None
}

/// Every name token in the header: a maximal run of characters other than
/// space, `;`, and `=`, immediately followed by `=`.
fn cookie_names(header: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut start: Option<usize> = None;

    for (i, b) in header.bytes().enumerate() {
        match b {
            b' ' | b';' => start = None,
            b'=' => {
                if let Some(s) = start.take() {
                    names.push(header[s..i].to_string());
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }

    names
}
