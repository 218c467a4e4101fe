// src/provider/billboard.rs
//! Billboard chart provider.
//!
//! Supports latest-chart fetches and chart listing; historical lookups are
//! not available through scraping and answer `NotSupported`.
//!
//! `Mode::Fixture` parses a supplied HTML body instead of touching the
//! network, with the same extraction and no-data policy as the HTTP path.

use crate::assemble::build_chart;
use crate::charts;
use crate::config::FetchOptions;
use crate::error::ChartError;
use crate::extract::page::scan_page;
use crate::fetch::{self, WorkerOutput};
use crate::model::{Chart, ChartDescriptor};
use crate::provider::{Capabilities, ChartProvider};

pub const PROVIDER_NAME: &str = "billboard";

pub struct BillboardProvider {
    options: FetchOptions,
    mode: Mode,
}

enum Mode {
    Http,
    Fixture(String),
}

impl Default for BillboardProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BillboardProvider {
    pub fn new() -> Self {
        Self::with_options(FetchOptions::default())
    }

    pub fn with_options(options: FetchOptions) -> Self {
        BillboardProvider {
            options,
            mode: Mode::Http,
        }
    }

    /// Parse the given page body instead of fetching. For tests and
    /// offline use.
    pub fn from_fixture(body: impl Into<String>, options: FetchOptions) -> Self {
        BillboardProvider {
            options,
            mode: Mode::Fixture(body.into()),
        }
    }

    fn fetch_output(
        &self,
        chart: &'static charts::ChartSpec,
    ) -> Result<WorkerOutput, ChartError> {
        match &self.mode {
            Mode::Http => fetch::fetch_isolated(chart, &self.options),
            Mode::Fixture(body) => {
                let (meta, records) = scan_page(
                    body,
                    &chart.url(),
                    chart,
                    self.options.include_images,
                    self.options.max_entries,
                );
                fetch::reject_empty(chart, WorkerOutput { records, meta })
            }
        }
    }
}

impl ChartProvider for BillboardProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::LATEST | Capabilities::LIST_CHARTS
    }

    fn latest(&self, chart_name: &str) -> Result<Chart, ChartError> {
        let chart = charts::resolve(chart_name, self.options.fallback_to_default)?;
        tracing::info!(chart = chart.id, "fetching latest chart");
        let output = self.fetch_output(chart)?;
        build_chart(PROVIDER_NAME, chart, output)
    }

    fn list_charts(&self) -> Result<Vec<ChartDescriptor>, ChartError> {
        Ok(charts::all()
            .iter()
            .map(|c| ChartDescriptor {
                source: PROVIDER_NAME.to_string(),
                title: c.title.to_string(),
                description: c.description.to_string(),
                url: c.url(),
                kind: c.kind,
            })
            .collect())
    }
}
