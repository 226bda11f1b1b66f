// tests/common/mod.rs
//
// In-memory stand-in for ufcstats.com.
//
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use ufcstats_scrape::{Fetch, FetchError};

pub const INDEX: &str = "http://ufcstats.com/statistics/events/completed?page=all";

pub fn event_url(id: &str) -> String {
    format!("http://ufcstats.com/event-details/{id}")
}

enum Page {
    Body(String),
    Status(u16),
    Panic,
}

#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, Page>,
    delays: HashMap<String, Duration>,
    hits: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: String) -> Self {
        self.pages.insert(url.to_string(), Page::Body(body));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Page::Status(status));
        self
    }

    pub fn panics(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Page::Panic);
        self
    }

    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

impl Fetch for FakeSite {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        self.hits.lock().unwrap().push(url.to_string());
        if let Some(d) = self.delays.get(url) {
            thread::sleep(*d);
        }
        match self.pages.get(url) {
            Some(Page::Body(b)) => Ok(b.clone()),
            Some(Page::Status(s)) => Err(FetchError::Status { url: url.to_string(), status: *s }),
            Some(Page::Panic) => panic!("transport blew up on {url}"),
            None => Err(FetchError::transport(url, "connection refused")),
        }
    }
}

/// Listing page: header row, spacer row, then one row per (id, name, date).
pub fn listing(events: &[(&str, &str, &str)]) -> String {
    let rows: Vec<String> = events
        .iter()
        .map(|(id, name, date)| {
            format!(
                r#"<tr class="b-statistics__table-row">
                     <td class="b-statistics__table-col">
                       <i class="b-statistics__table-content">
                         <a href="{}" class="b-link b-link_style_black">{name}</a>
                         <span class="b-statistics__date">{date}</span>
                       </i>
                     </td>
                     <td class="b-statistics__table-col">Las Vegas, Nevada, USA</td>
                   </tr>"#,
                event_url(id)
            )
        })
        .collect();
    format!(
        r#"<html><body><table class="b-statistics__table-events">
             <thead><tr class="b-statistics__table-row"><th>Name/date</th><th>Location</th></tr></thead>
             <tbody>
               <tr class="b-statistics__table-row"><td class="b-statistics__table-col_type_clear"></td></tr>
               {}
             </tbody>
           </table></body></html>"#,
        rows.join("\n")
    )
}

/// Event page with one bout row per (flag, fighter1, fighter2).
pub fn event_page(name: &str, date: &str, bouts: &[(&str, &str, &str)]) -> String {
    let rows: Vec<String> = bouts
        .iter()
        .map(|(flag, f1, f2)| {
            format!(
                r#"<tr class="b-fight-details__table-row">
                     <td><i class="b-flag__inner"><i class="b-flag__text">{flag}</i></i></td>
                     <td><p><a href="/fighter-details/x">{f1}</a></p><p><a href="/fighter-details/x">{f2}</a></p></td>
                     <td><p>0</p> <p>0</p></td>
                     <td><p>10</p>
                       <p>20</p></td>
                     <td><p>1</p> <p>0</p></td>
                     <td><p>0</p> <p>0</p></td>
                     <td>Lightweight</td>
                     <td>U-DEC</td>
                     <td>3</td>
                     <td>5:00</td>
                   </tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
             <h2 class="b-content__title"><span>{name}</span></h2>
             <ul><li class="b-list__box-list-item"><i>Date:</i>
               {date}
             </li></ul>
             <table class="b-fight-details__table">
               <thead><tr class="b-fight-details__table-row"><th>W/L</th><th>Fighter</th></tr></thead>
               <tbody>{}</tbody>
             </table>
           </body></html>"#,
        rows.join("\n")
    )
}
