// src/extract/row.rs
//! Per-row field heuristics.
//!
//! Each field has an ordered list of strategies tried until one succeeds.
//! Rank, title, and artist are mandatory; a row missing any of them is
//! dropped. Everything else defaults (0, empty string, or the row's own
//! rank for the peak).

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::extract::RawEntry;
use crate::model::ChartKind;

static LABEL_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"span[class*="c-label"]"#).expect("valid label selector"));
static TITLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h3[class*="c-title"]"#).expect("valid title selector"));
static LINK_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid link selector"));
static IMG_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid img selector"));

/// Path marker identifying artist links.
const ARTIST_HREF_MARKER: &str = "/artist/";

/// Status markers that must never be mistaken for an artist name.
const ARTIST_EXCLUDED: &[&str] = &["NEW", "RE-ENTRY", "-"];

/// Image attributes in priority order.
const IMAGE_ATTRS: &[&str] = &["data-lazy-src", "data-src", "data-original", "src"];

/// Substring marking a lazy-load placeholder rather than a real cover.
const IMAGE_PLACEHOLDER_MARKER: &str = "lazyload-fallback";

fn collapse_ws(s: &str) -> String {
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    re.replace_all(s, " ").trim().to_string()
}

/// Concatenated text of an element's descendants, whitespace-collapsed.
fn element_text(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<String>())
}

/// Whole-row text with node boundaries kept as spaces, for regex scans.
fn row_text(row: ElementRef<'_>) -> String {
    collapse_ws(&row.text().collect::<Vec<_>>().join(" "))
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Parse one row into a raw record, or `None` if the row is unusable.
pub(crate) fn parse_row(
    row: ElementRef<'_>,
    kind: ChartKind,
    include_images: bool,
) -> Option<RawEntry> {
    let rank = extract_rank(row)?;
    let title = extract_title(row)?;
    let artist = extract_artist(row, &title, kind)?;

    let artists = split_artists(&artist);
    let primary = artists.first().cloned().unwrap_or_else(|| artist.clone());

    let image = if include_images {
        extract_image(row)
    } else {
        String::new()
    };
    let (peak_position, peak_inferred) = extract_peak(row, rank);

    Some(RawEntry {
        rank,
        title,
        artist: primary,
        artists,
        image,
        weeks_on_chart: extract_weeks(row),
        last_week: extract_last_week(row),
        peak_position,
        peak_inferred,
        entry_kind: kind.into(),
    })
}

/// First pure-digit label span is the rank. Rank 0 is not a valid output.
fn extract_rank(row: ElementRef<'_>) -> Option<u32> {
    let rank = row.select(&LABEL_SEL).find_map(|span| {
        let text = element_text(span);
        if is_all_digits(&text) {
            text.parse::<u32>().ok()
        } else {
            None
        }
    })?;
    if rank == 0 {
        return None;
    }
    Some(rank)
}

fn extract_title(row: ElementRef<'_>) -> Option<String> {
    let title = element_text(row.select(&TITLE_SEL).next()?);
    if title.is_empty() {
        return None;
    }
    Some(title)
}

/// Two-tier artist heuristic.
///
/// Tier 1: text of artist links (`href` containing `/artist/`), joined with
/// " & ". Single-kind rows skip link text equal to the title (that link is
/// the song itself); collection-kind rows take any artist-link text.
///
/// Tier 2: label spans, filtered down to plausible names; a span nested in
/// a link wins immediately, otherwise the first candidate that looks like a
/// name ("&"/"," present, longer than 8 chars, or uppercase-initial) is kept.
fn extract_artist(row: ElementRef<'_>, title: &str, kind: ChartKind) -> Option<String> {
    let mut artist = String::new();

    for link in row.select(&LINK_SEL) {
        let href = link.value().attr("href").unwrap_or_default();
        if !href.contains(ARTIST_HREF_MARKER) {
            continue;
        }
        let text = element_text(link);
        if text.is_empty() {
            continue;
        }
        if kind == ChartKind::Single && text == title {
            continue;
        }
        if artist.is_empty() {
            artist = text;
        } else {
            artist.push_str(" & ");
            artist.push_str(&text);
        }
    }

    if artist.is_empty() {
        artist = label_span_artist(row, title).unwrap_or_default();
    }

    if artist.is_empty() {
        None
    } else {
        Some(artist)
    }
}

fn label_span_artist(row: ElementRef<'_>, title: &str) -> Option<String> {
    let mut fallback: Option<String> = None;

    for span in row.select(&LABEL_SEL) {
        let text = element_text(span);
        let len = text.chars().count();
        if text.is_empty() || is_all_digits(&text) || text == title || len <= 2 || len >= 150 {
            continue;
        }
        if ARTIST_EXCLUDED.contains(&text.to_uppercase().trim()) {
            continue;
        }

        let inside_link = span
            .ancestors()
            .filter_map(|n| n.value().as_element())
            .any(|e| e.name() == "a");
        if inside_link {
            return Some(text);
        }

        let looks_like_name = text.contains('&')
            || text.contains(',')
            || len > 8
            || text.chars().next().is_some_and(|c| c.is_uppercase());
        if looks_like_name && fallback.is_none() {
            fallback = Some(text);
        }
    }

    fallback
}

/// Split an artist string into display-ordered names: on "&" if present,
/// else on ",", else a single-element list.
pub(crate) fn split_artists(artist: &str) -> Vec<String> {
    let sep = if artist.contains('&') {
        '&'
    } else if artist.contains(',') {
        ','
    } else {
        return vec![artist.to_string()];
    };
    artist.split(sep).map(|a| a.trim().to_string()).collect()
}

/// First image attribute (in priority order) that is an absolute URL and
/// not a lazy-load placeholder; empty string otherwise.
fn extract_image(row: ElementRef<'_>) -> String {
    if let Some(img) = row.select(&IMG_SEL).next() {
        for attr in IMAGE_ATTRS {
            if let Some(url) = img.value().attr(attr) {
                if url.starts_with("http") && !url.contains(IMAGE_PLACEHOLDER_MARKER) {
                    return url.to_string();
                }
            }
        }
    }
    String::new()
}

fn extract_weeks(row: ElementRef<'_>) -> u32 {
    static RE_WEEKS: OnceCell<Regex> = OnceCell::new();
    let re = RE_WEEKS.get_or_init(|| Regex::new(r"(?i)(\d+)\s+weeks?").unwrap());
    re.captures(&row.html())
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

/// "LW"-labeled number: label spans first, then a whole-row scan.
fn extract_last_week(row: ElementRef<'_>) -> u32 {
    static RE_LW: OnceCell<Regex> = OnceCell::new();
    let re = RE_LW.get_or_init(|| Regex::new(r"(?i)LW[:\s]*(\d+)").unwrap());

    for span in row.select(&LABEL_SEL) {
        if let Some(c) = re.captures(&element_text(span)) {
            if let Ok(n) = c[1].parse() {
                return n;
            }
        }
    }
    re.captures(&row_text(row))
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

/// "Peak"-labeled number, whole-row fallback. When nothing is found the
/// peak defaults to the current rank and is flagged as inferred.
fn extract_peak(row: ElementRef<'_>, rank: u32) -> (u32, bool) {
    static RE_PEAK: OnceCell<Regex> = OnceCell::new();
    let re = RE_PEAK.get_or_init(|| Regex::new(r"(?i)Peak[:\s]*(\d+)").unwrap());

    for span in row.select(&LABEL_SEL) {
        if let Some(c) = re.captures(&element_text(span)) {
            if let Ok(n) = c[1].parse() {
                return (n, false);
            }
        }
    }
    if let Some(n) = re.captures(&row_text(row)).and_then(|c| c[1].parse().ok()) {
        return (n, false);
    }
    (rank, true)
}
