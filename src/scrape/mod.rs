// src/scrape/mod.rs
mod crawl;

pub use crawl::crawl;
pub use crawl::select_events;
pub use crawl::{CrawlReport, EventFailure};
