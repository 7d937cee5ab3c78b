pub mod bluesky;
pub mod compose;
pub mod config;
pub mod error;
pub mod facet;
pub mod pipeline;
pub mod scraper;
pub mod sitemap;

pub use pipeline::{Outcome, RunOptions, run};
pub use sitemap::SelectionMode;
