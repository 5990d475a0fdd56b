//! Page utilities: URL query codec, cookie store, environment probing,
//! frame scheduling, and nonce generation.
//!
//! The query codec and cookie store operate on plain strings and an
//! injected ambient store, so they are usable and testable without a full
//! page; the probe modules read their environment through the `dom` crate's
//! surface.

pub mod cookies;
pub mod environment;
pub mod frame;
pub mod navigator;
pub mod nonce;
pub mod prefix;
pub mod query;

pub use cookies::{
    CookieStore, CookieString, DocumentCookies, MemoryCookieStore, DEFAULT_COOKIE_TTL,
};
pub use environment::Environment;
pub use frame::{
    FrameHandle, FrameScheduler, FrameSource, TimerFrames, WindowFrames, FRAME_INTERVAL,
};
pub use navigator::{BrowserFlags, Navigator};
pub use nonce::{gen_nonce, gen_nonce_default, DEFAULT_NONCE_LEN};
pub use prefix::VendorPrefix;
pub use query::{build_url_query, parse_url_query, QueryMap, QuerySource};
