//! Shared crawl state

mod frontier;

pub use frontier::Frontier;
