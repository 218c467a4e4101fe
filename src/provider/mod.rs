// src/provider/mod.rs
//! Provider abstraction: a closed set of capability flags plus the trait
//! every chart source implements. Absent capabilities answer uniformly
//! with [`ChartError::NotSupported`].

pub mod billboard;

use std::ops::BitOr;

use chrono::NaiveDate;

use crate::error::ChartError;
use crate::model::{Chart, ChartDescriptor};

/// Bitmask over the fixed capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    /// Fetching the latest edition of a chart.
    pub const LATEST: Capabilities = Capabilities(1);
    /// Fetching a chart for an arbitrary past date.
    pub const HISTORICAL: Capabilities = Capabilities(1 << 1);
    /// Listing the charts a provider knows about.
    pub const LIST_CHARTS: Capabilities = Capabilities(1 << 2);
    /// Free-text search.
    pub const SEARCH: Capabilities = Capabilities(1 << 3);

    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        Capabilities(self.0 | rhs.0)
    }
}

/// A source of chart documents.
pub trait ChartProvider {
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> Capabilities;

    fn supports(&self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }

    /// Latest edition of the named chart.
    fn latest(&self, chart_name: &str) -> Result<Chart, ChartError>;

    /// Chart edition for a specific past date. Default: not supported.
    fn chart_for_date(
        &self,
        chart_name: &str,
        chart_date: NaiveDate,
    ) -> Result<Chart, ChartError> {
        let _ = (chart_name, chart_date);
        Err(ChartError::NotSupported {
            provider: self.name(),
            capability: "historical chart lookup",
        })
    }

    /// Descriptors for every chart the provider offers.
    fn list_charts(&self) -> Result<Vec<ChartDescriptor>, ChartError>;
}
