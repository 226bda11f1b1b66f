// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications for ufcstats.com. Each spec covers a
//! single page kind and encodes *where the ground truth lives in the HTML* and
//! *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** (`parse_*`), testable offline against saved pages.
//! - **One fetch wrapper per page** (`resolve_index`, `extract`) that pulls the
//!   body through a `core::Fetch` and hands it to the parser.
//! - **Fallback decisions** for missing markup: sentinel event name, absent
//!   date, dropped rows. These are logged, never raised.
//!
//! ## What does **not** live here
//! - Filtering, ordering policy, retries, concurrency (`scrape::crawl`).
//! - Export formatting (`csv`, `file`).
//!
//! ## Typical call chain
//! ```text
//! CLI → scrape::crawl → specs::event_index::resolve_index_from   (once)
//!                     → specs::fight_card::extract               (per event)
//!                     ↘ Dataset
//! ```
//!
//! ## Current specs
//! - `event_index` – completed-events listing → `Vec<EventRef>`, newest first.
//! - `fight_card` – one event's results table → `Vec<FightRecord>`.
pub mod event_index;
pub mod fight_card;
