// tests/extract_pipeline.rs
// End-to-end over the fixture path: page body in, validated document out.

use mchart::{BillboardProvider, ChartError, ChartProvider, FetchOptions};

const TWO_ROW_PAGE: &str = r#"
<html>
<head><meta name="description" content="The week's biggest songs."></head>
<body>
  <p>Week of January 10, 2026</p>
  <ul class="o-chart-results-list-row">
    <li><span class="c-label">1</span></li>
    <li>
      <h3 class="c-title">Song A</h3>
      <a href="/artist/artist-x">Artist X</a>
    </li>
  </ul>
  <ul class="o-chart-results-list-row">
    <li><span class="c-label">2</span></li>
    <li>
      <h3 class="c-title">Song B</h3>
      <a href="/artist/artist-y">Artist Y</a>
    </li>
    <li><span class="c-label">LW: 1</span></li>
  </ul>
</body>
</html>"#;

#[test]
fn two_row_page_yields_two_entries_in_rank_order() {
    let provider = BillboardProvider::from_fixture(TWO_ROW_PAGE, FetchOptions::default());
    let chart = provider.latest("hot-100").unwrap();

    assert_eq!(chart.total_entries(), 2);
    assert_eq!(chart.entries[0].rank, 1);
    assert_eq!(chart.entries[0].title(), "Song A");
    assert_eq!(chart.entries[1].rank, 2);
    assert_eq!(chart.entries[1].last_week, 1);
    assert_eq!(
        chart.published_date,
        chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    );
    assert_eq!(chart.descriptor.description, "The week's biggest songs.");
    chart.validate().unwrap();
}

#[test]
fn zero_parsable_rows_is_a_fetch_failure_not_an_empty_chart() {
    let page = "<html><body><p>maintenance</p></body></html>";
    let provider = BillboardProvider::from_fixture(page, FetchOptions::default());
    let err = provider.latest("hot-100").unwrap_err();
    match err {
        ChartError::FetchFailure { reason } => assert!(reason.contains("no data")),
        other => panic!("expected FetchFailure, got {other:?}"),
    }
}

#[test]
fn max_entries_caps_the_document() {
    let options = FetchOptions {
        max_entries: Some(1),
        ..FetchOptions::default()
    };
    let provider = BillboardProvider::from_fixture(TWO_ROW_PAGE, options);
    let chart = provider.latest("hot-100").unwrap();
    assert_eq!(chart.total_entries(), 1);
    assert_eq!(chart.entries[0].rank, 1);
}

#[test]
fn include_images_false_blanks_all_image_fields() {
    let page = r#"
        <html><body>
          <ul class="o-chart-results-list-row">
            <li><span class="c-label">1</span></li>
            <li><h3 class="c-title">Song A</h3>
                <a href="/artist/x">Artist X</a></li>
            <li><img src="https://img.example/cover.jpg"></li>
          </ul>
        </body></html>"#;
    let options = FetchOptions {
        include_images: false,
        ..FetchOptions::default()
    };
    let provider = BillboardProvider::from_fixture(page, options);
    let chart = provider.latest("hot-100").unwrap();
    assert_eq!(chart.entries[0].track.as_ref().unwrap().image, "");
}

#[test]
fn joint_artist_credit_splits_into_ordered_list() {
    let page = r#"
        <html><body>
          <ul class="o-chart-results-list-row">
            <li><span class="c-label">1</span></li>
            <li><h3 class="c-title">Song A</h3>
                <span class="c-label">Artist X &amp; Artist Y</span></li>
          </ul>
        </body></html>"#;
    let provider = BillboardProvider::from_fixture(page, FetchOptions::default());
    let chart = provider.latest("hot-100").unwrap();
    let track = chart.entries[0].track.as_ref().unwrap();
    assert_eq!(track.artist, "Artist X");
    assert_eq!(track.artists, vec!["Artist X", "Artist Y"]);
}

#[test]
fn collection_chart_produces_collection_entries() {
    let page = r#"
        <html><body>
          <ul class="o-chart-results-list-row">
            <li><span class="c-label">1</span></li>
            <li><h3 class="c-title">Album A</h3>
                <a href="/artist/x">Artist X</a></li>
          </ul>
        </body></html>"#;
    let provider = BillboardProvider::from_fixture(page, FetchOptions::default());
    let chart = provider.latest("billboard-200").unwrap();
    assert_eq!(chart.kind, mchart::ChartKind::Collection);
    let entry = &chart.entries[0];
    assert!(entry.collection.is_some());
    assert!(entry.track.is_none());
    assert_eq!(entry.collection.as_ref().unwrap().title, "Album A");
}

#[test]
fn unknown_chart_falls_back_to_default_when_enabled() {
    let provider = BillboardProvider::from_fixture(TWO_ROW_PAGE, FetchOptions::default());
    let chart = provider.latest("definitely-not-a-chart").unwrap();
    assert_eq!(chart.descriptor.title, "Billboard Hot 100");
}
