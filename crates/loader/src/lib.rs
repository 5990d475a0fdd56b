//! Async resource loading for page content.

pub mod fetcher;
pub mod load;

pub use fetcher::{HttpFetcher, ResourceFetcher, StaticFetcher};
pub use load::{load_image, load_script};
