// src/specs/fight_card.rs
//! Scraping *spec* for one event's results page (`/event-details/<id>`).
//!
//! Purpose:
//! - Turn the fight table into `FightRecord`s, one per bout, in table order.
//! - Stamp every record with the page's event name and date text.
//!
//! Markup assumptions:
//! - Title in `h2.b-content__title`; date in the first `li.b-list__box-list-item`
//!   after its `Date:` label.
//! - Bouts are `tr.b-fight-details__table-row` in `table.b-fight-details__table`;
//!   the first row is the column header.
//! - Cells: flag, fighters (two `<a>`), KD, Str, Td, Sub, weight class, method,
//!   round, time. Only the row's direct `<td>` children count.
//! - Stat cells hold one `<p>` per fighter; whitespace between them becomes `-`.
//! - The method cell is trimmed, nothing more. A method with a detail line
//!   keeps its inner newlines.
//!
//! Tolerance:
//! - No title: `"Unknown Event"`. No date item: empty date. No table: no records.
//! - Rows with < 10 cells, or without two distinct non-empty names, are dropped
//!   and logged at debug.
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{MIN_FIGHT_CELLS, STAT_SEP, UNKNOWN_EVENT};
use crate::core::html::{child_elements, first_text, raw_text, selector, trimmed_text};
use crate::core::sanitize::{collapse_ws, normalize_ws};
use crate::core::Fetch;
use crate::data::FightRecord;
use crate::error::FetchError;

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h2.b-content__title"));
static INFO_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li.b-list__box-list-item"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.b-fight-details__table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr.b-fight-details__table-row"));
static FLAG: LazyLock<Selector> = LazyLock::new(|| selector("i.b-flag__inner"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// Scrape one event's results page (`/event-details/<id>`).
/// - Columns: see `Dataset::COLUMNS`.
/// - An event without a results table yields no records.
pub fn extract(client: &dyn Fetch, location: &str) -> Result<Vec<FightRecord>, FetchError> {
    let html_doc = client.get(location)?;
    let t = std::time::Instant::now();
    let out = parse_event_page(&html_doc);
    logd!("Event: parsed {} fights from {location} in {:?}", out.len(), t.elapsed());
    Ok(out)
}

/// Split out for unit tests. Pure: same input, same records.
pub fn parse_event_page(html_doc: &str) -> Vec<FightRecord> {
    let doc = Html::parse_document(html_doc);

    let event_name = first_text(&doc, &TITLE).unwrap_or_else(|| {
        logw!("Event: no title block, using {UNKNOWN_EVENT:?}");
        s!(UNKNOWN_EVENT)
    });
    let event_date = doc
        .select(&INFO_ITEM)
        .next()
        .map(|li| date_from_info_item(&raw_text(li)))
        .unwrap_or_default();

    let Some(table) = doc.select(&TABLE).next() else {
        logd!("Event: {event_name:?} has no results table");
        return Vec::new();
    };

    let mut out = Vec::new();
    // First row is the column header.
    for (i, row) in table.select(&ROW).enumerate().skip(1) {
        match parse_row(row, &event_name, &event_date) {
            Ok(rec) => out.push(rec),
            Err(reason) => logd!("Event: {event_name:?} row {i} skipped: {reason}"),
        }
    }
    out
}

/// "Date:\n   April 13, 2024" → "April 13, 2024"
fn date_from_info_item(text: &str) -> String {
    let last = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or("");
    s!(last.strip_prefix("Date:").unwrap_or(last).trim())
}

fn parse_row(row: ElementRef<'_>, event_name: &str, event_date: &str) -> Result<FightRecord, String> {
    let cols = child_elements(row, "td");
    if cols.len() < MIN_FIGHT_CELLS {
        return Err(format!("{} cells, need {MIN_FIGHT_CELLS}", cols.len()));
    }

    let fighters: Vec<String> = cols[1].select(&LINK).map(trimmed_text).collect();
    let [fighter1, fighter2] = <[String; 2]>::try_from(fighters)
        .map_err(|v| format!("{} fighter names, need 2", v.len()))?;
    if fighter1.is_empty() || fighter2.is_empty() || fighter1 == fighter2 {
        return Err(format!("unusable fighter pair {fighter1:?} / {fighter2:?}"));
    }

    let flag = cols[0]
        .select(&FLAG)
        .next()
        .map(|f| normalize_ws(&raw_text(f)))
        .unwrap_or_default();
    let winner = match flag.as_str() {
        "win" => fighter1.clone(),
        "draw" => s!("Draw"),
        _ => s!("NC"),
    };

    let stat = |i: usize| collapse_ws(&raw_text(cols[i]), STAT_SEP);
    let plain = |i: usize| trimmed_text(cols[i]);

    Ok(FightRecord {
        event_name: s!(event_name),
        event_date: s!(event_date),
        winner,
        fighter1,
        fighter2,
        kd: stat(2),
        strikes: stat(3),
        td: stat(4),
        sub: stat(5),
        weight_class: plain(6),
        method: plain(7),
        round: plain(8),
        time: plain(9),
    })
}
