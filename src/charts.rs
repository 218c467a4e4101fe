// src/charts.rs
//! Canonical chart table and chart-name resolution.
//!
//! Resolution is pure: lowercase + trim, exact match, hyphenated retry,
//! colloquial aliases, then either fallback to the default chart (with a
//! warning) or `InvalidChart`.

use crate::error::ChartError;
use crate::model::ChartKind;

pub const BASE_URL: &str = "https://www.billboard.com";

/// Canonical identifier substituted when fallback is enabled and the
/// requested name cannot be resolved.
pub const DEFAULT_CHART: &str = "hot-100";

/// One row of the static chart table. Pure data, no logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    /// Canonical identifier, the lookup key.
    pub id: &'static str,
    /// URL path under [`BASE_URL`].
    pub path: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    /// Description used for listings and as the page-level fallback.
    pub description: &'static str,
}

impl ChartSpec {
    pub fn url(&self) -> String {
        format!("{BASE_URL}{}", self.path)
    }
}

static CHART_TABLE: &[ChartSpec] = &[
    ChartSpec {
        id: "hot-100",
        path: "/charts/hot-100",
        title: "Billboard Hot 100",
        kind: ChartKind::Single,
        description: "The week's most popular songs across all genres, \
                      ranked by radio airplay, sales data, and streaming activity.",
    },
    ChartSpec {
        id: "billboard-200",
        path: "/charts/billboard-200",
        title: "Billboard 200",
        kind: ChartKind::Collection,
        description: "The week's most popular albums across all genres, \
                      ranked by album sales and audio streaming.",
    },
    ChartSpec {
        id: "global-200",
        path: "/charts/global-200",
        title: "Global 200",
        kind: ChartKind::Single,
        description: "The week's most popular songs globally, \
                      ranked by streaming and sales activity.",
    },
    ChartSpec {
        id: "artist-100",
        path: "/charts/artist-100",
        title: "Artist 100",
        kind: ChartKind::Single,
        description: "The week's most popular artists.",
    },
    ChartSpec {
        id: "streaming-songs",
        path: "/charts/streaming-songs",
        title: "Streaming Songs",
        kind: ChartKind::Single,
        description: "The most-streamed songs of the week.",
    },
    ChartSpec {
        id: "radio-songs",
        path: "/charts/radio-songs",
        title: "Radio Songs",
        kind: ChartKind::Single,
        description: "The most-played songs on radio.",
    },
    ChartSpec {
        id: "digital-song-sales",
        path: "/charts/digital-song-sales",
        title: "Digital Song Sales",
        kind: ChartKind::Single,
        description: "The best-selling digital songs.",
    },
];

/// Colloquial names accepted on top of the canonical identifiers.
static ALIASES: &[(&str, &str)] = &[
    ("hot 100", "hot-100"),
    ("billboard hot 100", "hot-100"),
    ("200", "billboard-200"),
    ("billboard 200", "billboard-200"),
    ("global", "global-200"),
    ("artist", "artist-100"),
];

pub fn all() -> &'static [ChartSpec] {
    CHART_TABLE
}

pub fn lookup(id: &str) -> Option<&'static ChartSpec> {
    CHART_TABLE.iter().find(|c| c.id == id)
}

/// Canonical identifiers, for listings and error messages.
pub fn available() -> Vec<String> {
    CHART_TABLE.iter().map(|c| c.id.to_string()).collect()
}

/// Resolve a free-form chart name to its canonical table row.
///
/// With `fallback_to_default` set, an unresolvable name logs a warning and
/// resolves to [`DEFAULT_CHART`]; otherwise it is an `InvalidChart` error
/// naming the input and listing the valid identifiers.
pub fn resolve(name: &str, fallback_to_default: bool) -> Result<&'static ChartSpec, ChartError> {
    let lower = name.trim().to_lowercase();

    if let Some(spec) = lookup(&lower) {
        return Ok(spec);
    }

    let hyphenated = lower.replace([' ', '_'], "-");
    if let Some(spec) = lookup(&hyphenated) {
        return Ok(spec);
    }

    if let Some((_, canonical)) = ALIASES.iter().find(|(alias, _)| *alias == lower) {
        if let Some(spec) = lookup(canonical) {
            return Ok(spec);
        }
    }

    if fallback_to_default {
        tracing::warn!(chart = %name, fallback = DEFAULT_CHART, "unknown chart, falling back");
        return Ok(lookup(DEFAULT_CHART).expect("default chart present in table"));
    }

    Err(ChartError::InvalidChart {
        name: name.to_string(),
        available: available(),
    })
}
