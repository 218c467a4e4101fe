// tests/provider_capabilities.rs
// Capability gating through the trait object, the way an embedding
// application would drive a provider.

use chrono::NaiveDate;
use mchart::{BillboardProvider, Capabilities, ChartError, ChartProvider, FetchOptions};

fn boxed_provider() -> Box<dyn ChartProvider> {
    Box::new(BillboardProvider::new())
}

#[test]
fn billboard_reports_latest_and_listing_only() {
    let provider = boxed_provider();
    assert!(provider.supports(Capabilities::LATEST));
    assert!(provider.supports(Capabilities::LIST_CHARTS));
    assert!(!provider.supports(Capabilities::HISTORICAL));
    assert!(!provider.supports(Capabilities::SEARCH));
}

#[test]
fn absent_capability_answers_not_supported() {
    let provider = boxed_provider();
    let err = provider
        .chart_for_date("hot-100", NaiveDate::from_ymd_opt(2020, 6, 1).unwrap())
        .unwrap_err();
    match err {
        ChartError::NotSupported {
            provider: name,
            capability,
        } => {
            assert_eq!(name, "billboard");
            assert!(capability.contains("historical"));
        }
        other => panic!("expected NotSupported, got {other:?}"),
    }
}

#[test]
fn listing_exposes_single_and_collection_charts() {
    let provider = boxed_provider();
    let listed = provider.list_charts().unwrap();
    assert!(listed.len() >= 3);
    assert!(listed
        .iter()
        .any(|d| d.kind == mchart::ChartKind::Single));
    assert!(listed
        .iter()
        .any(|d| d.kind == mchart::ChartKind::Collection));
}

#[test]
fn invalid_chart_error_lists_the_valid_identifiers() {
    let options = FetchOptions {
        fallback_to_default: false,
        ..FetchOptions::default()
    };
    let provider = BillboardProvider::with_options(options);
    let err = provider.latest("polka-top-40").unwrap_err();
    match err {
        ChartError::InvalidChart { name, available } => {
            assert_eq!(name, "polka-top-40");
            assert!(available.iter().any(|c| c == "hot-100"));
            assert!(available.iter().any(|c| c == "billboard-200"));
        }
        other => panic!("expected InvalidChart, got {other:?}"),
    }
}
