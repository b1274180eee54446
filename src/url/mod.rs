//! URL handling module for spindle
//!
//! Resolves raw hrefs against their source page into canonical absolute
//! URLs, and provides the host extraction and query stripping used by the
//! filter pipeline.

mod host;
mod normalize;

pub use host::extract_host;
pub use normalize::{resolve, strip_query};
