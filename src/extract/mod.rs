// src/extract/mod.rs
//! Field extraction engine.
//!
//! Turns one chart page's markup into raw entry records using layered
//! per-field heuristics (see [`row`]) plus page-level metadata parsing
//! (see [`page`]). Everything produced here is plain serializable data;
//! domain-model assembly happens later in `assemble`.

pub mod page;
pub mod row;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::model::ChartKind;

/// Kind tag carried on each raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Track,
    Collection,
}

impl From<ChartKind> for EntryKind {
    fn from(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Single => EntryKind::Track,
            ChartKind::Collection => EntryKind::Collection,
        }
    }
}

/// Unvalidated field values extracted from one chart row.
///
/// `artist` is the primary artist; `artists` keeps display order.
/// `peak_inferred` is true when no explicit peak marker was found and the
/// peak defaulted to the row's own rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub rank: u32,
    pub title: String,
    pub artist: String,
    pub artists: Vec<String>,
    pub image: String,
    pub weeks_on_chart: u32,
    pub last_week: u32,
    pub peak_position: u32,
    pub peak_inferred: bool,
    pub entry_kind: EntryKind,
}

/// Page-level metadata extracted alongside the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub published_date: NaiveDate,
    pub description: String,
    pub url: String,
}

static ROW_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"ul[class*="o-chart-results-list-row"]"#).expect("valid row selector")
});

/// Lazily scan a parsed page for chart rows.
///
/// The iterator is finite and non-restartable; malformed rows are skipped,
/// never aborting the scan. At most `max_entries` records are yielded when
/// the cap is set.
pub fn scan_rows<'a>(
    doc: &'a Html,
    kind: ChartKind,
    include_images: bool,
    max_entries: Option<usize>,
) -> RowScan<'a> {
    RowScan {
        rows: doc.select(&ROW_SEL),
        kind,
        include_images,
        remaining: max_entries,
    }
}

pub struct RowScan<'a> {
    rows: scraper::html::Select<'a, 'static>,
    kind: ChartKind,
    include_images: bool,
    remaining: Option<usize>,
}

impl<'a> Iterator for RowScan<'a> {
    type Item = RawEntry;

    fn next(&mut self) -> Option<RawEntry> {
        if self.remaining == Some(0) {
            return None;
        }
        for row in self.rows.by_ref() {
            if let Some(record) = row::parse_row(row, self.kind, self.include_images) {
                if let Some(n) = self.remaining.as_mut() {
                    *n -= 1;
                }
                return Some(record);
            }
        }
        None
    }
}
