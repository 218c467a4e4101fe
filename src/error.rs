// src/error.rs
//! Error surface of the crate.
//!
//! Four categories, matching what a caller can actually do about them:
//! fix the input (`InvalidChart`), pick another provider (`NotSupported`),
//! retry later (`FetchFailure`), or file a bug (`ValidationFailure`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The requested chart name cannot be resolved and fallback is disabled.
    #[error("unknown chart '{name}'; available charts: {}", .available.join(", "))]
    InvalidChart {
        name: String,
        available: Vec<String>,
    },

    /// The provider exists but does not implement the requested capability.
    #[error("provider '{provider}' does not support {capability}")]
    NotSupported {
        provider: &'static str,
        capability: &'static str,
    },

    /// The page could not be fetched, or fetched but yielded zero usable rows.
    /// Transient; re-invoking may succeed.
    #[error("chart fetch failed: {reason}")]
    FetchFailure { reason: String },

    /// An internal invariant broke during assembly. Not user-correctable;
    /// indicates a bug in the extraction path.
    #[error("chart validation failed: {reason}")]
    ValidationFailure { reason: String },
}

impl ChartError {
    pub(crate) fn fetch(reason: impl Into<String>) -> Self {
        ChartError::FetchFailure {
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        ChartError::ValidationFailure {
            reason: reason.into(),
        }
    }
}
