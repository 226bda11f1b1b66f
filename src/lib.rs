// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod specs;

pub use crate::core::{Fetch, HttpClient};
pub use data::{Dataset, EventRef, FightRecord, SeenKey};
pub use error::{CrawlError, FetchError, FormatError};
pub use scrape::{crawl, CrawlReport};
pub use specs::event_index::resolve_index;
pub use specs::fight_card::extract;
