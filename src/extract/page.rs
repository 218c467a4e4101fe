// src/extract/page.rs
//! Page-level extraction: publication date, description, and the full
//! row scan for one chart page.

use chrono::NaiveDate;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use scraper::{Html, Selector};

use crate::charts::ChartSpec;
use crate::extract::{scan_rows, PageMeta, RawEntry};

static META_DESC_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("valid meta selector")
});

fn month_from_name(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "january" => Some(1),
        "february" => Some(2),
        "march" => Some(3),
        "april" => Some(4),
        "may" => Some(5),
        "june" => Some(6),
        "july" => Some(7),
        "august" => Some(8),
        "september" => Some(9),
        "october" => Some(10),
        "november" => Some(11),
        "december" => Some(12),
        _ => None,
    }
}

/// Publication date from the "Week of ..." marker.
///
/// Recognizes "Week of January 10, 2026" and "Week of 1/10/2026"; anything
/// else defaults to today.
pub fn parse_published_date(body: &str) -> NaiveDate {
    static RE_LONG: OnceCell<Regex> = OnceCell::new();
    let re_long = RE_LONG
        .get_or_init(|| Regex::new(r"(?i)Week of\s+([A-Za-z]+)\s+(\d{1,2}),\s+(\d{4})").unwrap());
    if let Some(c) = re_long.captures(body) {
        let date = month_from_name(&c[1]).and_then(|month| {
            let day: u32 = c[2].parse().ok()?;
            let year: i32 = c[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        });
        if let Some(d) = date {
            return d;
        }
    }

    static RE_SLASH: OnceCell<Regex> = OnceCell::new();
    let re_slash = RE_SLASH
        .get_or_init(|| Regex::new(r"(?i)Week of\s+(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());
    if let Some(c) = re_slash.captures(body) {
        let date = (|| {
            let month: u32 = c[1].parse().ok()?;
            let day: u32 = c[2].parse().ok()?;
            let year: i32 = c[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })();
        if let Some(d) = date {
            return d;
        }
    }

    chrono::Utc::now().date_naive()
}

/// Page description from the meta tag, else the chart's static fallback.
pub fn parse_description(doc: &Html, chart: &ChartSpec) -> String {
    if let Some(meta) = doc.select(&META_DESC_SEL).next() {
        if let Some(content) = meta.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                return content.to_string();
            }
        }
    }
    chart.description.to_string()
}

/// Scan one chart page: rows into raw records plus page-level metadata.
/// Never fails; an unusable page simply yields zero records.
pub fn scan_page(
    body: &str,
    url: &str,
    chart: &ChartSpec,
    include_images: bool,
    max_entries: Option<usize>,
) -> (PageMeta, Vec<RawEntry>) {
    let doc = Html::parse_document(body);
    let records: Vec<RawEntry> =
        scan_rows(&doc, chart.kind, include_images, max_entries).collect();
    let meta = PageMeta {
        published_date: parse_published_date(body),
        description: parse_description(&doc, chart),
        url: url.to_string(),
    };
    (meta, records)
}
