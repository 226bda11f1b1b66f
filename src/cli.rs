// src/cli.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, bail};

use crate::config::options::{CrawlOptions, ExportFormat, ExportOptions, FailurePolicy, IndexSource};
use crate::config::consts::{INDEX_HEADER_ROWS, INDEX_URL, MAX_CONSECUTIVE_FAILURES, REQUEST_PAUSE_MS, WORKERS};
use crate::core::HttpClient;
use crate::data::{Column, seen_keys_from_rows};
use crate::progress::{Progress, StderrProgress};
use crate::{file, log, scrape};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f { Format::Csv => ExportFormat::Csv, Format::Tsv => ExportFormat::Tsv }
    }
}

/// Scrape completed UFC events from ufcstats.com into one fights table.
#[derive(Debug, Parser)]
#[command(name = "ufcstats_scrape", version, about)]
pub struct Args {
    /// Only fetch the newest N events (after the other filters)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Only fetch events dated on/after this day (YYYY-MM-DD)
    #[arg(long, env = "UFCSTATS_SINCE")]
    pub since: Option<NaiveDate>,

    /// Previous export; stop at the first event already in it
    #[arg(long, value_name = "FILE")]
    pub seen: Option<PathBuf>,

    /// Parallel event fetches (1..=4)
    #[arg(short = 'w', long, default_value_t = WORKERS, env = "UFCSTATS_WORKERS")]
    pub workers: usize,

    /// Pause after each request, per worker
    #[arg(long, default_value_t = REQUEST_PAUSE_MS, value_name = "MS")]
    pub pause_ms: u64,

    /// Stop after this many seconds and keep what was fetched
    #[arg(long, value_name = "SECS")]
    pub deadline_secs: Option<u64>,

    /// Fail on the first event that can't be fetched
    #[arg(long)]
    pub strict: bool,

    /// Give up after this many failed events in a row
    #[arg(long, default_value_t = MAX_CONSECUTIVE_FAILURES, conflicts_with = "strict")]
    pub max_consecutive_failures: usize,

    /// Event listing URL
    #[arg(long, default_value = INDEX_URL, env = "UFCSTATS_INDEX_URL")]
    pub index_url: String,

    /// Leading listing rows that aren't events
    #[arg(long, default_value_t = INDEX_HEADER_ROWS)]
    pub header_rows: usize,

    /// Output file, directory (trailing slash) or '-' for stdout
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Omit the header line
    #[arg(long)]
    pub no_headers: bool,

    /// Print fight counts per method to stdout
    #[arg(long)]
    pub summary: bool,

    /// Don't print per-event progress
    #[arg(short, long)]
    pub quiet: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Append logs to a file instead of stderr
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = log::LOG_FILE)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn crawl_options(&self) -> Result<CrawlOptions> {
        let mut opts = CrawlOptions {
            index: IndexSource { url: self.index_url.clone(), header_rows: self.header_rows },
            limit: self.limit,
            since: self.since,
            on_event_failure: if self.strict {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Skip { max_consecutive: self.max_consecutive_failures }
            },
            workers: self.workers,
            request_pause: Duration::from_millis(self.pause_ms),
            deadline: self.deadline_secs.map(Duration::from_secs),
            ..CrawlOptions::default()
        };

        if let Some(path) = &self.seen {
            let rows = file::read_rows(path)
                .wrap_err_with(|| format!("reading previous export {}", path.display()))?;
            opts.stop_at_seen = seen_keys_from_rows(&rows);
            logf!("Seen: {} events from {}", opts.stop_at_seen.len(), path.display());
        }
        Ok(opts)
    }

    pub fn export_options(&self) -> ExportOptions {
        let mut export = ExportOptions::default();
        export.format = self.format.into();
        export.include_headers = !self.no_headers;
        if let Some(out) = &self.out {
            export.set_path(out);
        }
        export
    }

    /// Refuse to export over the file `--seen` reads from; that run would keep only the new rows.
    pub fn check_outputs(&self, export: &ExportOptions) -> Result<()> {
        if let (Some(seen), Some(out)) = (&self.seen, export.out_path()) {
            if same_file(seen, &out) {
                bail!(
                    "--seen {} is also the output file; pass -o with another path",
                    seen.display()
                );
            }
        }
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    log::init(args.verbose, args.log_file.as_deref()).wrap_err("setting up logging")?;

    let opts = args.crawl_options()?;
    let export = args.export_options();
    args.check_outputs(&export)?;

    let client = HttpClient::new()?;
    let mut progress = StderrProgress::new();
    let progress: Option<&mut dyn Progress> = if args.quiet { None } else { Some(&mut progress) };

    let report = scrape::crawl(Arc::new(client), &opts, progress)?;
    if report.partial {
        eprintln!("Stopped early: {}/{} events fetched", report.completed, report.total);
    }
    for f in &report.failures {
        eprintln!("Skipped {} ({}): {}", f.event.name, f.event.location, f.error);
    }

    let written = file::export_dataset(&export, &report.dataset).wrap_err("writing export")?;
    if let Some(path) = written {
        eprintln!("Wrote {} fights to {}", report.dataset.len(), path.display());
    }

    if args.summary {
        println!("Method,Fights");
        for (method, n) in report.dataset.count_by(Column::Method) {
            println!("{method},{n}");
        }
    }
    Ok(())
}
