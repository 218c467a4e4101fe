// src/model.rs
//! Domain model: immutable value objects produced by assembly.
//!
//! `Entry` holds exactly one of `Track` / `Collection`; the invariant is
//! enforced at construction and again by `Chart::validate`. Serialized form
//! omits the absent side entirely (no `null`), and the publication date goes
//! out as an ISO-8601 date string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Whether a chart (or an entry) concerns individual tracks or
/// album-like collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Single,
    Collection,
}

/// A single track on a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    /// Primary artist (first of `artists` in display order).
    pub artist: String,
    #[serde(default)]
    pub artists: Vec<String>,
    /// Cover image URL; empty string when absent or images were disabled.
    #[serde(default)]
    pub image: String,
    /// Album name; empty string outside single-context.
    #[serde(default)]
    pub album: String,
}

/// An album-like collection on a chart. Structurally parallel to `Track`,
/// semantically distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub image: String,
}

/// One ranked position on a chart.
///
/// Exactly one of `track` / `collection` is set. `last_week == 0` means
/// "new or unknown". `peak_inferred` marks a peak position that was not
/// scraped but defaulted to the current rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    pub rank: u32,
    #[serde(default)]
    pub weeks_on_chart: u32,
    #[serde(default)]
    pub last_week: u32,
    #[serde(default)]
    pub peak_position: u32,
    #[serde(default)]
    pub peak_inferred: bool,
}

impl Entry {
    /// Construct an entry, enforcing the one-of invariant. A violation here
    /// is a bug in the extraction path, never bad user input.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        track: Option<Track>,
        collection: Option<Collection>,
        rank: u32,
        weeks_on_chart: u32,
        last_week: u32,
        peak_position: u32,
        peak_inferred: bool,
    ) -> Result<Self, ChartError> {
        let entry = Entry {
            track,
            collection,
            rank,
            weeks_on_chart,
            last_week,
            peak_position,
            peak_inferred,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Re-check the invariants (useful after deserialization).
    pub fn validate(&self) -> Result<(), ChartError> {
        match (&self.track, &self.collection) {
            (Some(_), Some(_)) => Err(ChartError::validation(
                "entry has both track and collection set",
            )),
            (None, None) => Err(ChartError::validation(
                "entry has neither track nor collection set",
            )),
            _ => {
                if self.rank == 0 {
                    return Err(ChartError::validation("entry rank must be positive"));
                }
                Ok(())
            }
        }
    }

    pub fn kind(&self) -> ChartKind {
        if self.track.is_some() {
            ChartKind::Single
        } else {
            ChartKind::Collection
        }
    }

    /// Title of whichever side is set.
    pub fn title(&self) -> &str {
        match (&self.track, &self.collection) {
            (Some(t), _) => &t.title,
            (_, Some(c)) => &c.title,
            _ => "",
        }
    }

    fn artist_matches(&self, needle_lower: &str) -> bool {
        let (artist, artists) = match (&self.track, &self.collection) {
            (Some(t), _) => (&t.artist, &t.artists),
            (_, Some(c)) => (&c.artist, &c.artists),
            _ => return false,
        };
        artist.to_lowercase().contains(needle_lower)
            || artists
                .iter()
                .any(|a| a.to_lowercase().contains(needle_lower))
    }
}

/// Metadata identifying one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    /// Source name, e.g. "billboard".
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    pub kind: ChartKind,
}

/// A complete, validated chart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub descriptor: ChartDescriptor,
    pub published_date: NaiveDate,
    pub kind: ChartKind,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Chart {
    /// Check chart-wide invariants: descriptor/document kind agreement,
    /// every entry well-formed and of the document's kind, ranks
    /// non-decreasing.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.descriptor.kind != self.kind {
            return Err(ChartError::validation(format!(
                "descriptor kind {:?} disagrees with document kind {:?}",
                self.descriptor.kind, self.kind
            )));
        }
        let mut prev_rank = 0u32;
        for entry in &self.entries {
            entry.validate()?;
            if entry.kind() != self.kind {
                return Err(ChartError::validation(format!(
                    "entry at rank {} has kind {:?}, chart is {:?}",
                    entry.rank,
                    entry.kind(),
                    self.kind
                )));
            }
            if entry.rank < prev_rank {
                return Err(ChartError::validation(format!(
                    "entries not sorted by rank: {} follows {}",
                    entry.rank, prev_rank
                )));
            }
            prev_rank = entry.rank;
        }
        Ok(())
    }

    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Top `n` entries in rank order.
    pub fn top(&self, n: usize) -> &[Entry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Entries whose artist (or any listed artist) contains `artist`,
    /// case-insensitive.
    pub fn find_by_artist(&self, artist: &str) -> Vec<&Entry> {
        let needle = artist.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.artist_matches(&needle))
            .collect()
    }

    /// Entries whose title contains `title`, case-insensitive partial match.
    pub fn find_by_title(&self, title: &str) -> Vec<&Entry> {
        let needle = title.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.title().to_lowercase().contains(&needle))
            .collect()
    }
}
