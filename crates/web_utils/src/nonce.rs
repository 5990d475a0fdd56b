//! Random nonce strings.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Default nonce length.
pub const DEFAULT_NONCE_LEN: usize = 16;

/// A random string over `0-9a-zA-Z` of the given length.
pub fn gen_nonce(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// A random string of the default length.
pub fn gen_nonce_default() -> String {
    gen_nonce(DEFAULT_NONCE_LEN)
}
