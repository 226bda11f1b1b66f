// src/scrape/crawl.rs
use std::{
    collections::BTreeMap,
    panic::{self, AssertUnwindSafe},
    thread,
    time::{Duration, Instant},
    sync::{ mpsc::{self, RecvTimeoutError}, Arc, atomic::{ AtomicUsize, Ordering }},
};

use crate::{
    config::consts::{ JITTER_MS, POLL_MS },
    config::options::{ CancelToken, CrawlOptions, FailurePolicy },
    core::Fetch,
    data::{ Dataset, EventRef, FightRecord },
    error::{ CrawlError, FetchError },
    progress::Progress,
    specs::{ event_index, fight_card },
};

/// One event that was skipped under `FailurePolicy::Skip`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventFailure {
    pub event: EventRef,
    pub error: FetchError,
}

/// Everything a crawl produced.
#[derive(Clone, Debug, Default)]
pub struct CrawlReport {
    pub dataset: Dataset,
    /// Events selected after filtering.
    pub total: usize,
    /// Events resolved (added or skipped), always a prefix of the selection.
    pub completed: usize,
    pub failures: Vec<EventFailure>,
    /// Deadline or cancellation stopped the crawl before `total` was reached.
    pub partial: bool,
}

/// Apply `since`, then stop-at-seen, then `limit`, keeping listing order.
/// The order of these steps matters for resumability; don't rearrange.
pub fn select_events(index: Vec<EventRef>, opts: &CrawlOptions) -> Vec<EventRef> {
    let mut events: Vec<EventRef> = match opts.since {
        Some(since) => index
            .into_iter()
            .filter(|e| e.date.is_some_and(|d| d >= since))
            .collect(),
        None => index,
    };

    if !opts.stop_at_seen.is_empty() {
        let cut = events
            .iter()
            .position(|e| e.seen_key().is_some_and(|k| opts.stop_at_seen.contains(&k)))
            .unwrap_or(events.len());
        events.truncate(cut);
    }

    if let Some(limit) = opts.limit {
        events.truncate(limit);
    }
    events
}

/// Resolve the index once, pick events, and collect their fight records in index order.
///
/// Index failure is fatal. Event failures follow `opts.on_event_failure`.
/// `progress` (if any) sees each event exactly once, in index order.
pub fn crawl(
    client: Arc<dyn Fetch>,
    opts: &CrawlOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<CrawlReport, CrawlError> {
    let started = Instant::now();
    let deadline = opts.deadline.map(|d| started + d);

    if let Some(p) = progress.as_deref_mut() {
        p.log("Resolving event index…");
    }
    let index = event_index::resolve_index_from(client.as_ref(), &opts.index).map_err(CrawlError::Index)?;
    let listed = index.len();
    let events = select_events(index, opts);
    logf!("Index: {listed} events listed, {} selected", events.len());

    let total = events.len();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let result = collect(client, events, opts, deadline, progress.as_deref_mut());

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let report = result?;
    logf!(
        "Crawl: {} fights from {}/{} events in {:?}{}",
        report.dataset.len(),
        report.completed,
        report.total,
        started.elapsed(),
        if report.partial { " (partial)" } else { "" }
    );
    Ok(report)
}

type FetchResult = Result<Vec<FightRecord>, FetchError>;

fn collect<'p>(
    client: Arc<dyn Fetch>,
    events: Vec<EventRef>,
    opts: &CrawlOptions,
    deadline: Option<Instant>,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<CrawlReport, CrawlError> {
    let total = events.len();
    let mut report = CrawlReport { total, ..CrawlReport::default() };
    if total == 0 {
        return Ok(report);
    }

    // Workers stop on this; it is also flipped when we stop listening early.
    let stop = CancelToken::new();
    let events = Arc::new(events);
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, FetchResult)>();

    let workers = opts.effective_workers(total);
    logd!("Crawl: {workers} worker(s) for {total} events");

    // Spawn workers
    for _ in 0..workers {
        let client = Arc::clone(&client);
        let events = Arc::clone(&events);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let stop = stop.clone();
        let cancel = opts.cancel.clone();
        let pause = opts.request_pause;

        thread::spawn(
            move || {
                loop {
                    if stop.is_cancelled() || cancel.is_cancelled() {
                        break;
                    }
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= events.len() {
                        break;
                    }
                    let location = &events[i].location;
                    // A panicking transport or parser fails this event only.
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        fight_card::extract(client.as_ref(), location)
                    }))
                    .unwrap_or_else(|payload| {
                        Err(FetchError::Panicked { url: location.clone(), message: panic_message(payload.as_ref()) })
                    });
                    if tx.send((i, result)).is_err() {
                        break; // nobody listening any more
                    }
                    if !pause.is_zero() {
                        let jitter = (i as u64 * 17) % JITTER_MS;
                        thread::sleep(pause + Duration::from_millis(jitter)); // be polite
                    }
                }
            }
        );
    }
    drop(res_tx); // this thread is sole receiver now

    // Results arrive in completion order; hand them out in index order.
    let mut pending: BTreeMap<usize, FetchResult> = BTreeMap::new();
    let mut consecutive_failures = 0usize;
    let poll = Duration::from_millis(POLL_MS);

    let outcome = loop {
        if report.completed == total {
            break Ok(());
        }
        if opts.cancel.is_cancelled() {
            logw!("Crawl: cancelled after {}/{total} events", report.completed);
            report.partial = true;
            break Ok(());
        }
        let wait = match deadline {
            Some(d) => {
                let now = Instant::now();
                if now >= d {
                    logw!("Crawl: deadline reached after {}/{total} events", report.completed);
                    report.partial = true;
                    break Ok(());
                }
                poll.min(d - now)
            }
            None => poll,
        };

        match res_rx.recv_timeout(wait) {
            Ok((i, res)) => { pending.insert(i, res); }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                if opts.cancel.is_cancelled() {
                    report.partial = true;
                    break Ok(());
                }
                // Every claimed event sends a result, so a gap here means a worker died.
                let location = events[report.completed].location.clone();
                loge!("Crawl: workers gone before {location} was resolved");
                break Err(CrawlError::Event {
                    source: FetchError::Panicked { url: location.clone(), message: s!("worker exited without a result") },
                    location,
                });
            }
        }

        let mut fatal = None;
        while let Some(res) = pending.remove(&report.completed) {
            let event = &events[report.completed];
            report.completed += 1;
            match res {
                Ok(records) => {
                    consecutive_failures = 0;
                    report.dataset.extend(records);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(report.completed, total, event);
                    }
                }
                Err(error) => {
                    consecutive_failures += 1;
                    match on_failure(opts.on_event_failure, event, error, consecutive_failures) {
                        Ok(failure) => {
                            report.failures.push(failure);
                            if let Some(p) = progress.as_deref_mut() {
                                p.item_failed(report.completed, total, event);
                            }
                        }
                        Err(e) => {
                            fatal = Some(e);
                            break;
                        }
                    }
                }
            }
        }
        if let Some(e) = fatal {
            break Err(e);
        }
    };

    stop.cancel();
    outcome.map(|_| report)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        s!(*msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        s!("panic")
    }
}

fn on_failure(
    policy: FailurePolicy,
    event: &EventRef,
    error: FetchError,
    consecutive: usize,
) -> Result<EventFailure, CrawlError> {
    match policy {
        FailurePolicy::Abort => {
            loge!("Event {:?} ({}): {error}", event.name, event.location);
            Err(CrawlError::Event { location: event.location.clone(), source: error })
        }
        FailurePolicy::Skip { max_consecutive } if consecutive > max_consecutive => {
            loge!("Event {:?}: {error}; {consecutive} failures in a row, giving up", event.name);
            Err(CrawlError::TooManyFailures { consecutive, last: error })
        }
        FailurePolicy::Skip { .. } => {
            logw!("Event {:?} skipped: {error}", event.name);
            Ok(EventFailure { event: event.clone(), error })
        }
    }
}
