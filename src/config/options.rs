// src/config/options.rs
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::NaiveDate;

use super::consts::*;
use crate::data::SeenKey;

/* ---------------- Crawl ---------------- */

/// Where the event listing lives and how much header markup precedes the rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexSource {
    pub url: String,
    pub header_rows: usize,
}

impl Default for IndexSource {
    fn default() -> Self {
        Self {
            url: s!(INDEX_URL),
            header_rows: INDEX_HEADER_ROWS,
        }
    }
}

/// What to do when a single event page cannot be fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// First failure ends the crawl.
    Abort,
    /// Log, record and move on; more than `max_consecutive` failures in a row ends the crawl.
    Skip { max_consecutive: usize },
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Skip { max_consecutive: MAX_CONSECUTIVE_FAILURES }
    }
}

/// Cooperative stop flag shared between the caller, the controller and its workers.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug)]
pub struct CrawlOptions {
    pub index: IndexSource,
    /// Keep at most this many events, applied last.
    pub limit: Option<usize>,
    /// Keep only events dated on or after this day; dateless events are dropped.
    pub since: Option<NaiveDate>,
    /// Stop before the first listed event already in this set.
    pub stop_at_seen: HashSet<SeenKey>,
    pub on_event_failure: FailurePolicy,
    pub workers: usize,
    pub request_pause: Duration,
    pub deadline: Option<Duration>,
    pub cancel: CancelToken,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            index: IndexSource::default(),
            limit: None,
            since: None,
            stop_at_seen: HashSet::new(),
            on_event_failure: FailurePolicy::default(),
            workers: WORKERS,
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
            deadline: None,
            cancel: CancelToken::new(),
        }
    }
}

impl CrawlOptions {
    /// Worker count actually used for `pending` events.
    pub fn effective_workers(&self, pending: usize) -> usize {
        self.workers.clamp(1, MAX_WORKERS).min(pending).max(1)
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputPath {
    Stdout,
    File {
        dir: PathBuf,
        file_stem: OsString, // without extension
        ext: Option<OsString>, // user-typed extension; None → format decides
    },
}

impl Default for OutputPath {
    fn default() -> Self {
        OutputPath::File {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// Resolved destination; `None` means stdout.
    pub fn out_path(&self) -> Option<PathBuf> {
        match &self.out_path {
            OutputPath::Stdout => None,
            OutputPath::File { dir, file_stem, ext } => {
                let mut name = file_stem.clone();
                name.push(".");
                match ext {
                    Some(e) => name.push(e),
                    None => name.push(self.format.ext()),
                }
                Some(dir.join(name))
            }
        }
    }

    /// Parse user text into dir + stem (+ extension if one was typed).
    /// `-` selects stdout; a trailing separator means "default file in this dir".
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s == "-" {
            self.out_path = OutputPath::Stdout;
            return;
        }
        if s.is_empty() {
            self.out_path = OutputPath::default();
            return;
        }

        let p = Path::new(s);
        if s.ends_with('/') || s.ends_with('\\') {
            self.out_path = OutputPath::File {
                dir: p.to_path_buf(),
                file_stem: OsString::from(DEFAULT_FILE),
                ext: None,
            };
            return;
        }

        let dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        let file_stem = p.file_stem().map(|f| f.to_os_string()).unwrap_or_else(|| OsString::from(DEFAULT_FILE));
        let ext = p.extension().map(|e| e.to_os_string());
        self.out_path = OutputPath::File { dir, file_stem, ext };
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }
}
