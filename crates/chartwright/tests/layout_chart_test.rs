use chartwright::config::ChartConfig;
use chartwright::model::ChartLayout;
use chartwright::{Error, LayoutOptions, layout_chart};
use serde_json::json;

fn run(request: serde_json::Value) -> chartwright::Result<ChartLayout> {
    layout_chart(&request, &ChartConfig::default(), &LayoutOptions::default())
}

#[test]
fn boxplot_request_dispatches() {
    let layout = run(json!({
        "type": "boxplot",
        "series": [{ "name": "s", "data": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 100] }]
    }))
    .unwrap();
    let ChartLayout::BoxPlot(stats) = layout else {
        panic!("expected box plot layout");
    };
    assert_eq!(stats[0].stats.outliers, vec![100.0]);
}

#[test]
fn histogram_request_uses_config() {
    let config = ChartConfig::from_value(&json!({
        "histogram": { "binCount": 3, "showDensity": true }
    }));
    let layout = layout_chart(
        &json!({ "type": "histogram", "data": [1, 1, 1, 2, 2, 3] }),
        &config,
        &LayoutOptions::default(),
    )
    .unwrap();
    let ChartLayout::Histogram(h) = layout else {
        panic!("expected histogram layout");
    };
    assert_eq!(h.bins.len(), 3);
    assert!(h.density.is_some());
}

#[test]
fn waterfall_chord_wordcloud_and_mekko_dispatch() {
    assert!(matches!(
        run(json!({
            "type": "waterfall",
            "steps": [{ "name": "a", "value": 100 }, { "name": "b", "value": -30 }, { "name": "t", "isTotal": true }]
        })),
        Ok(ChartLayout::Waterfall(_))
    ));
    assert!(matches!(
        run(json!({
            "type": "chord",
            "names": ["a", "b"],
            "matrix": [[0, 1], [1, 0]]
        })),
        Ok(ChartLayout::Chord(_))
    ));
    assert!(matches!(
        run(json!({
            "type": "wordCloud",
            "words": [{ "text": "hello", "weight": 3 }]
        })),
        Ok(ChartLayout::WordCloud(_))
    ));
    assert!(matches!(
        run(json!({
            "type": "mekko",
            "categories": [{ "name": "c", "total": 1, "segments": [{ "name": "s", "value": 1 }] }]
        })),
        Ok(ChartLayout::Mekko(_))
    ));
}

#[test]
fn unknown_type_is_unsupported() {
    match run(json!({ "type": "sunburst" })) {
        Err(Error::UnsupportedChart { chart_type }) => assert_eq!(chart_type, "sunburst"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn missing_type_is_invalid_input() {
    assert!(matches!(
        run(json!({ "data": [1, 2] })),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn malformed_payload_is_a_json_error() {
    assert!(matches!(
        run(json!({ "type": "histogram", "data": "nope" })),
        Err(Error::Json(_))
    ));
}

#[test]
fn layouts_serialize_with_type_tag() {
    let layout = run(json!({
        "type": "chord",
        "names": ["a", "b"],
        "matrix": [[0, 2], [2, 0]]
    }))
    .unwrap();
    let v = serde_json::to_value(&layout).unwrap();
    assert_eq!(v["type"], "chord");
    assert!(v["layout"]["groups"][0]["startAngle"].is_number());
    assert!(v["layout"]["chords"][0]["source"]["endAngle"].is_number());
}
