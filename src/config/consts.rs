// src/config/consts.rs

// Net config
pub const INDEX_URL: &str = "http://ufcstats.com/statistics/events/completed?page=all";
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Markup
pub const INDEX_HEADER_ROWS: usize = 2;
pub const MIN_FIGHT_CELLS: usize = 10;
pub const UNKNOWN_EVENT: &str = "Unknown Event";
pub const DATE_FORMAT: &str = "%B %d, %Y"; // "April 13, 2024"

// Stat cells
pub const STAT_SEP: char = '-';

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "fights";

// Concurrency
pub const WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
pub const POLL_MS: u64 = 100; // cancel/deadline check interval

// Failures
pub const MAX_CONSECUTIVE_FAILURES: usize = 3;
