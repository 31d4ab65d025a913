//! CLI command implementations.

pub(crate) mod pairs;
pub(crate) mod scrape;
