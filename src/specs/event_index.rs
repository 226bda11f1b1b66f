// src/specs/event_index.rs
//! Scraping *spec* for the completed-events listing.
//!
//! Purpose:
//! - Parse `/statistics/events/completed?page=all` into `EventRef`s, newest first.
//! - `page=all` puts every event on one page, so there is no pagination loop.
//!
//! Markup assumptions:
//! - Every listing row is `tr.b-statistics__table-row`; the first
//!   `IndexSource::header_rows` of them are header/spacer rows.
//! - The event link is the row's first `<a href>`; its text is the event name.
//! - The date sits in `span.b-statistics__date` (falling back to the last cell).
//!
//! Tolerance:
//! - Rows without a link or with an unusable href are spacer rows: skipped quietly.
//! - An unparsable date becomes `None`; the event is still listed.
//! - Order is the listing's order. Nothing is re-sorted here.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::config::options::IndexSource;
use crate::core::html::{selector, trimmed_text};
use crate::core::Fetch;
use crate::data::{EventRef, parse_event_date};
use crate::error::FetchError;

static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr.b-statistics__table-row"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static DATE: LazyLock<Selector> = LazyLock::new(|| selector("span.b-statistics__date"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

/// Fetch and parse the default listing.
pub fn resolve_index(client: &dyn Fetch) -> Result<Vec<EventRef>, FetchError> {
    resolve_index_from(client, &IndexSource::default())
}

pub fn resolve_index_from(client: &dyn Fetch, source: &IndexSource) -> Result<Vec<EventRef>, FetchError> {
    let html_doc = client.get(&source.url)?;
    let t = std::time::Instant::now();
    let out = parse_index(&html_doc, source);
    logd!("Index: parsed {} events in {:?}", out.len(), t.elapsed());
    Ok(out)
}

/// Split out for unit tests.
pub fn parse_index(html_doc: &str, source: &IndexSource) -> Vec<EventRef> {
    let base = Url::parse(&source.url).ok();
    let doc = Html::parse_document(html_doc);

    let mut out = Vec::new();
    for row in doc.select(&ROW).skip(source.header_rows) {
        let Some(a) = row.select(&LINK).next() else { continue };
        let Some(href) = a.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            continue;
        };
        let Some(location) = resolve_href(base.as_ref(), href) else {
            logd!("Index: unresolvable href {href:?}, row skipped");
            continue;
        };

        let name = trimmed_text(a);
        let date_txt = row
            .select(&DATE)
            .next()
            .or_else(|| row.select(&CELL).last())
            .map(trimmed_text)
            .unwrap_or_default();
        let date = parse_event_date(&date_txt);
        if date.is_none() {
            logd!("Index: no date for {name:?} (got {date_txt:?})");
        }

        out.push(EventRef { location, name, date });
    }
    out
}

fn resolve_href(base: Option<&Url>, href: &str) -> Option<String> {
    let url = match base {
        Some(b) => b.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then(|| url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn src() -> IndexSource {
        IndexSource { url: s!("http://ufcstats.com/statistics/events/completed?page=all"), header_rows: 2 }
    }

    fn event_row(href: &str, name: &str, date: &str) -> String {
        format!(
            r#"<tr class="b-statistics__table-row">
                 <td class="b-statistics__table-col">
                   <i class="b-statistics__table-content">
                     <a href="{href}" class="b-link b-link_style_black">
                       {name}
                     </a>
                     <span class="b-statistics__date">
                       {date}
                     </span>
                   </i>
                 </td>
                 <td class="b-statistics__table-col b-statistics__table-col_style_big-top-padding">
                   Las Vegas, Nevada, USA
                 </td>
               </tr>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="b-statistics__table-events">
                 <thead class="b-statistics__table-caption">
                   <tr class="b-statistics__table-row"><th>Name/date</th><th>Location</th></tr>
                 </thead>
                 <tbody>
                   <tr class="b-statistics__table-row"><td class="b-statistics__table-col_type_clear"></td></tr>
                   {}
                 </tbody>
               </table></body></html>"#,
            rows.join("\n")
        )
    }

    const SPACER: &str = r#"<tr class="b-statistics__table-row"><td class="b-statistics__table-col_type_clear"></td></tr>"#;

    #[test]
    fn three_events_from_header_spacer_and_rows() {
        let doc = page(&[
            event_row("http://ufcstats.com/event-details/c", "UFC 300: Pereira vs. Hill", "April 13, 2024"),
            event_row("http://ufcstats.com/event-details/b", "UFC Fight Night: Allen vs. Curtis 2", "April 06, 2024"),
            event_row("http://ufcstats.com/event-details/a", "UFC 299: O'Malley vs. Vera 2", "March 09, 2024"),
        ]);
        let idx = parse_index(&doc, &src());
        assert_eq!(idx.len(), 3);
        assert_eq!(idx[0].name, "UFC 300: Pereira vs. Hill");
        assert_eq!(idx[0].location, "http://ufcstats.com/event-details/c");
        assert_eq!(idx[0].date, NaiveDate::from_ymd_opt(2024, 4, 13));
        assert_eq!(idx[2].name, "UFC 299: O'Malley vs. Vera 2");
    }

    #[test]
    fn linkless_rows_in_the_middle_are_skipped() {
        let doc = page(&[
            event_row("http://ufcstats.com/event-details/c", "C", "April 13, 2024"),
            s!(SPACER),
            event_row("", "Blank href", "April 10, 2024"),
            event_row("http://ufcstats.com/event-details/a", "A", "March 09, 2024"),
        ]);
        let names: Vec<String> = parse_index(&doc, &src()).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn bad_date_is_kept_as_none() {
        let doc = page(&[event_row("http://ufcstats.com/event-details/x", "UFC 1", "TBD")]);
        let idx = parse_index(&doc, &src());
        assert_eq!(idx.len(), 1);
        assert_eq!(idx[0].date, None);
    }

    #[test]
    fn relative_hrefs_resolve_against_listing() {
        let doc = page(&[event_row("/event-details/rel", "Rel", "April 13, 2024")]);
        let idx = parse_index(&doc, &src());
        assert_eq!(idx[0].location, "http://ufcstats.com/event-details/rel");
    }

    #[test]
    fn non_http_links_are_spacers() {
        let doc = page(&[event_row("javascript:void(0)", "Nope", "April 13, 2024")]);
        assert!(parse_index(&doc, &src()).is_empty());
    }

    #[test]
    fn date_falls_back_to_last_cell() {
        let doc = page(&[s!(
            r#"<tr class="b-statistics__table-row">
                 <td><a href="http://ufcstats.com/event-details/z">Old Layout</a></td>
                 <td> November 12, 1993 </td>
               </tr>"#
        )]);
        let idx = parse_index(&doc, &src());
        assert_eq!(idx[0].date, NaiveDate::from_ymd_opt(1993, 11, 12));
    }

    #[test]
    fn header_row_count_is_configurable() {
        let doc = page(&[event_row("http://ufcstats.com/event-details/c", "C", "April 13, 2024")]);
        let none_skipped = IndexSource { header_rows: 0, ..src() };
        assert_eq!(parse_index(&doc, &none_skipped).len(), 1);
        let too_many = IndexSource { header_rows: 3, ..src() };
        assert!(parse_index(&doc, &too_many).is_empty());
    }
}
