// src/assemble.rs
//! Assembly & normalization: raw records + page metadata into a validated
//! [`Chart`]. Pure, no I/O.
//!
//! Equal ranks are kept in discovery order (stable sort, no dedup).

use crate::charts::ChartSpec;
use crate::error::ChartError;
use crate::extract::{EntryKind, RawEntry};
use crate::fetch::WorkerOutput;
use crate::model::{Chart, ChartDescriptor, Collection, Entry, Track};

/// Build the final chart document from one worker's output.
pub fn build_chart(
    provider: &str,
    chart: &ChartSpec,
    output: WorkerOutput,
) -> Result<Chart, ChartError> {
    let WorkerOutput { records, meta } = output;

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        entries.push(entry_from_raw(record)?);
    }
    entries.sort_by_key(|e| e.rank);

    let descriptor = ChartDescriptor {
        source: provider.to_string(),
        title: chart.title.to_string(),
        description: meta.description,
        url: meta.url,
        kind: chart.kind,
    };

    let document = Chart {
        descriptor,
        published_date: meta.published_date,
        kind: chart.kind,
        entries,
    };
    document.validate()?;
    Ok(document)
}

fn entry_from_raw(record: RawEntry) -> Result<Entry, ChartError> {
    let RawEntry {
        rank,
        title,
        artist,
        artists,
        image,
        weeks_on_chart,
        last_week,
        peak_position,
        peak_inferred,
        entry_kind,
    } = record;

    let (track, collection) = match entry_kind {
        EntryKind::Track => (
            Some(Track {
                title,
                artist,
                artists,
                image,
                album: String::new(),
            }),
            None,
        ),
        EntryKind::Collection => (
            None,
            Some(Collection {
                title,
                artist,
                artists,
                image,
            }),
        ),
    };

    Entry::from_parts(
        track,
        collection,
        rank,
        weeks_on_chart,
        last_week,
        peak_position,
        peak_inferred,
    )
}
