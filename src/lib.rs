// src/lib.rs
// Public library surface for integration tests (and embedding).
//
// mchart fetches a music chart page, extracts ranked entries out of its
// loosely structured markup with layered heuristics, and assembles the
// result into a validated, typed chart document.

pub mod assemble;
pub mod charts;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod provider;

// ---- Re-exports for stable public API ----
pub use crate::config::FetchOptions;
pub use crate::error::ChartError;
pub use crate::model::{Chart, ChartDescriptor, ChartKind, Collection, Entry, Track};
pub use crate::provider::billboard::BillboardProvider;
pub use crate::provider::{Capabilities, ChartProvider};

/// Fetch the latest edition of a chart by (free-form) name.
///
/// One-call convenience over [`BillboardProvider`]: resolves the name,
/// runs the fetch-and-extract cycle in an isolated worker, and returns the
/// assembled document.
///
/// ```no_run
/// let options = mchart::FetchOptions::default();
/// let chart = mchart::fetch_chart("hot-100", options)?;
/// println!("{} entries", chart.total_entries());
/// # Ok::<(), mchart::ChartError>(())
/// ```
pub fn fetch_chart(chart_name: &str, options: FetchOptions) -> Result<Chart, ChartError> {
    BillboardProvider::with_options(options).latest(chart_name)
}
