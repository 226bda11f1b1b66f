// src/data.rs
//
// Canonical crawl data.
//
// - EventRef:    one entry of the event listing (newest first).
// - FightRecord: one bout, fixed 13-column shape.
// - Dataset:     ordered FightRecords; what the crawl returns and export consumes.
// - SeenKey:     (name, date) used by stop-at-seen.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::config::consts::{DATE_FORMAT, STAT_SEP};
use crate::core::sanitize::split_pair;
use crate::error::FormatError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRef {
    /// Absolute URL of the event's result page.
    pub location: String,
    pub name: String,
    /// `None` when the listing's date text did not parse.
    pub date: Option<NaiveDate>,
}

impl EventRef {
    /// Dateless events have no key and can never be "seen".
    pub fn seen_key(&self) -> Option<SeenKey> {
        self.date.map(|d| SeenKey::new(&self.name, d))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SeenKey {
    pub name: String,
    pub date: NaiveDate,
}

impl SeenKey {
    pub fn new(name: &str, date: NaiveDate) -> Self {
        Self { name: s!(name), date }
    }
}

/// Parse a listing/event-page date ("April 13, 2024").
pub fn parse_event_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Build a stop-at-seen set from previously exported rows.
/// Rows too short or with an unparsable date contribute nothing; a header row
/// falls out the same way.
pub fn seen_keys_from_rows(rows: &[Vec<String>]) -> HashSet<SeenKey> {
    let name_ix = Column::EventName.index();
    let date_ix = Column::EventDate.index();
    rows.iter()
        .filter_map(|r| {
            let name = r.get(name_ix)?;
            let date = parse_event_date(r.get(date_ix)?)?;
            Some(SeenKey::new(name.trim(), date))
        })
        .collect()
}

/* ---------------- Fight records ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    EventName,
    EventDate,
    Result,
    Fighter1,
    Fighter2,
    Kd,
    Strikes,
    Td,
    Sub,
    WeightClass,
    Method,
    Round,
    Time,
}

impl Column {
    pub const ALL: [Column; 13] = [
        Column::EventName, Column::EventDate, Column::Result,
        Column::Fighter1, Column::Fighter2,
        Column::Kd, Column::Strikes, Column::Td, Column::Sub,
        Column::WeightClass, Column::Method, Column::Round, Column::Time,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn header(self) -> &'static str {
        Dataset::COLUMNS[self.index()]
    }
}

/// Per-fighter stat columns that hold an "A-B" pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stat {
    Kd,
    Strikes,
    Td,
    Sub,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FightRecord {
    pub event_name: String,
    pub event_date: String,
    /// Fighter1's name, "Draw" or "NC".
    pub winner: String,
    pub fighter1: String,
    pub fighter2: String,
    pub kd: String,
    pub strikes: String,
    pub td: String,
    pub sub: String,
    pub weight_class: String,
    /// Cell text trimmed at the ends only. Live pages put the method and its
    /// detail in separate `<p>`s, so this can hold inner newlines
    /// ("KO/TKO\n\n   Punch"); exports quote it and `count_by` groups on the full text.
    pub method: String,
    pub round: String,
    pub time: String,
}

impl FightRecord {
    pub fn get(&self, col: Column) -> &str {
        match col {
            Column::EventName => &self.event_name,
            Column::EventDate => &self.event_date,
            Column::Result => &self.winner,
            Column::Fighter1 => &self.fighter1,
            Column::Fighter2 => &self.fighter2,
            Column::Kd => &self.kd,
            Column::Strikes => &self.strikes,
            Column::Td => &self.td,
            Column::Sub => &self.sub,
            Column::WeightClass => &self.weight_class,
            Column::Method => &self.method,
            Column::Round => &self.round,
            Column::Time => &self.time,
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| s!(self.get(*c))).collect()
    }

    /// Split a stat cell like "37-13" into (fighter1, fighter2).
    pub fn stat_pair(&self, stat: Stat) -> Result<(u32, u32), FormatError> {
        let cell = match stat {
            Stat::Kd => &self.kd,
            Stat::Strikes => &self.strikes,
            Stat::Td => &self.td,
            Stat::Sub => &self.sub,
        };
        split_pair(cell, STAT_SEP)
    }
}

/* ---------------- Dataset ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    pub records: Vec<FightRecord>,
}

impl Dataset {
    pub const COLUMNS: [&'static str; 13] = [
        "Event Name", "Event Date", "Result", "Fighter1", "Fighter2",
        "KD", "Strikes", "TD", "Sub", "Weight Class", "Method", "Round", "Time",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn extend(&mut self, records: Vec<FightRecord>) {
        self.records.extend(records);
    }

    /// Data rows only, in record order (no header line).
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.records.iter().map(FightRecord::to_row).collect()
    }

    /// Event names in first-appearance order.
    pub fn event_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.event_name.as_str())
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Value counts for one column, most frequent first (ties by value).
    pub fn count_by(&self, col: Column) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in &self.records {
            *counts.entry(r.get(col)).or_insert(0) += 1;
        }
        let mut out: Vec<(String, usize)> = counts.into_iter().map(|(k, v)| (s!(k), v)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }
}
