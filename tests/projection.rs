use fieldlens::geometry::{Extent, Feature};
use fieldlens::models::{self, DateEntry, ImageryResponse, StatsResponse};
use fieldlens::project;

#[test]
fn one_date_option_per_entry_label_equals_value() {
    let entries = vec![
        DateEntry {
            date: "2023-10-01".into(),
            cloud_cover: Some(3.0),
        },
        DateEntry {
            date: "2023-10-07".into(),
            cloud_cover: None,
        },
        DateEntry {
            date: "2023-10-12".into(),
            cloud_cover: Some(88.1),
        },
    ];
    let options = project::date_options(&entries);
    assert_eq!(options.len(), entries.len());
    for (option, entry) in options.iter().zip(&entries) {
        assert_eq!(option.label, entry.date);
        assert_eq!(option.value, entry.date);
    }
    // Order follows the response array.
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["2023-10-01", "2023-10-07", "2023-10-12"]);
}

#[test]
fn statistics_projection_preserves_response_order() {
    let body = r#"{
      "stats": [
        {
          "data": [
            {"interval": {"from": "2023-09-26T00:00:00Z"}, "outputs": {"data": {"bands": {"B0": {"stats": {"mean": 0.31}}}}}},
            {"interval": {"from": "2023-10-01T00:00:00Z"}, "outputs": {"data": {"bands": {"B0": {"stats": {"mean": 0.42}}}}}},
            {"interval": {"from": "2023-10-06T00:00:00Z"}, "outputs": {"data": {"bands": {"B0": {"stats": {"mean": 0.47}}}}}}
          ]
        }
      ]
    }"#;
    let resp: StatsResponse = models::decode(body).unwrap();
    let series = project::statistics_series(&resp).unwrap();
    assert_eq!(series.len(), 3);
    for (i, sample) in resp.stats[0].data.iter().enumerate() {
        assert_eq!(series.labels[i], sample.interval.from);
        assert_eq!(series.values[i], sample.outputs.data.bands.b0.stats.mean);
    }
}

#[test]
fn empty_data_array_projects_to_an_empty_series() {
    let resp: StatsResponse = models::decode(r#"{"stats":[{"data":[]}]}"#).unwrap();
    let series = project::statistics_series(&resp).unwrap();
    assert!(series.is_empty());
}

#[test]
fn overlay_pairs_origin_joined_url_with_feature_extent() {
    let feature = Feature::from_ring(&[
        [70.912, 21.012],
        [70.911, 20.999],
        [70.924, 20.999],
        [70.912, 21.012],
    ])
    .unwrap();
    let resp = ImageryResponse {
        path: "imagery/out_1.png".into(),
    };
    let overlay = project::imagery_overlay(&resp, "http://127.0.0.1:8000", feature.extent());
    assert_eq!(overlay.url, "http://127.0.0.1:8000/imagery/out_1.png");
    assert_eq!(
        overlay.extent,
        Extent {
            min_x: 70.911,
            min_y: 20.999,
            max_x: 70.924,
            max_y: 21.012,
        }
    );
}
