// tests/document_shape.rs
// Serialized document shape: one-of entry payload, ISO-8601 date,
// inferred-peak flag.

use mchart::{BillboardProvider, Chart, ChartProvider, FetchOptions};

const PAGE: &str = r#"
<html><body>
  <p>Week of 1/10/2026</p>
  <ul class="o-chart-results-list-row">
    <li><span class="c-label">1</span></li>
    <li><h3 class="c-title">Song A</h3>
        <a href="/artist/x">Artist X</a></li>
    <li><span class="c-label">Peak: 1</span></li>
    <li><span class="c-label">5 weeks</span></li>
  </ul>
  <ul class="o-chart-results-list-row">
    <li><span class="c-label">2</span></li>
    <li><h3 class="c-title">Song B</h3>
        <a href="/artist/y">Artist Y</a></li>
  </ul>
</body></html>"#;

fn fixture_chart() -> Chart {
    BillboardProvider::from_fixture(PAGE, FetchOptions::default())
        .latest("hot-100")
        .unwrap()
}

#[test]
fn serialized_entries_carry_exactly_one_payload_group() {
    let chart = fixture_chart();
    let v = serde_json::to_value(&chart).unwrap();

    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert!(entry.get("track").is_some());
        // Absent side is omitted, not null.
        assert!(entry.get("collection").is_none());
    }
    assert_eq!(entries[0]["track"]["artist"], "Artist X");
    assert_eq!(entries[0]["weeks_on_chart"], 5);
}

#[test]
fn published_date_serializes_as_iso_and_round_trips() {
    let chart = fixture_chart();
    let json = serde_json::to_string(&chart).unwrap();
    assert!(json.contains("\"published_date\":\"2026-01-10\""));

    let back: Chart = serde_json::from_str(&json).unwrap();
    assert_eq!(back.published_date, chart.published_date);
    back.validate().unwrap();
    assert_eq!(back, chart);
}

#[test]
fn scraped_peak_is_not_flagged_inferred_but_defaulted_peak_is() {
    let chart = fixture_chart();

    // Rank 1 had an explicit "Peak: 1" marker.
    assert_eq!(chart.entries[0].peak_position, 1);
    assert!(!chart.entries[0].peak_inferred);

    // Rank 2 had none; the peak is the row's own rank, flagged as inferred.
    assert_eq!(chart.entries[1].peak_position, 2);
    assert!(chart.entries[1].peak_inferred);

    let v = serde_json::to_value(&chart).unwrap();
    assert_eq!(v["entries"][1]["peak_inferred"], true);
}

#[test]
fn descriptor_kind_and_document_kind_agree() {
    let chart = fixture_chart();
    let v = serde_json::to_value(&chart).unwrap();
    assert_eq!(v["kind"], "single");
    assert_eq!(v["descriptor"]["kind"], "single");
    assert_eq!(v["descriptor"]["source"], "billboard");
}
