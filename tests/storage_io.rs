use colchart_rs::storage;
use colchart_rs::viz::{ChartProps, Container, LegendPosition, render_column_chart};
use std::fs;
use tempfile::tempdir;

#[test]
fn load_data_dispatches_on_extension() {
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("in.CSV");
    fs::write(&csv_path, "quarter, North ,South\nQ1,10,15\nQ2,20,\n").unwrap();
    let from_csv = storage::load_data(&csv_path).unwrap();
    assert_eq!(from_csv.series_labels, vec!["North", "South"]);
    assert_eq!(from_csv.series, vec![vec![10.0, 20.0], vec![15.0]]);

    let json_path = dir.path().join("in.json");
    fs::write(
        &json_path,
        r#"{"series":[[10,20],[15]],"seriesLabels":["North","South"],"tickLabels":[["Q1","Q2"],["Q1"]]}"#,
    )
    .unwrap();
    let from_json = storage::load_data(&json_path).unwrap();
    assert_eq!(from_csv, from_json);
}

#[test]
fn props_file_uses_camel_case_keys() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("props.json");
    fs::write(
        &p,
        r#"{"displayLegend":true,"legendPosition":"west","xAxisTickLabelRotation":30,"locale":"de"}"#,
    )
    .unwrap();
    let props = storage::load_props(&p).unwrap();
    assert!(props.display_legend);
    assert_eq!(props.legend_position, LegendPosition::West);
    assert_eq!(props.x_axis_tick_label_rotation, 30.0);
    assert_eq!(props.multi_series_gap, 0.0);
    assert_eq!(props.locale, "de");
}

#[test]
fn layout_round_trips_through_json_file() {
    let dir = tempdir().unwrap();
    let mut c = Container::new(600, 400);
    let layout = render_column_chart(
        &[vec![3.0, 6.0]],
        &["A".to_string()],
        &[vec!["x".to_string(), "y".to_string()]],
        "chart",
        &mut c,
        &ChartProps::default(),
    )
    .unwrap();

    let p = dir.path().join("layout.json");
    storage::save_layout_json(&layout, &p).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
    assert_eq!(v["bars"].as_array().unwrap().len(), 2);
    assert_eq!(v["bars"][1]["category"], "y");
    assert_eq!(v["bars"][0]["color"], "#1f78b4");
    assert_eq!(v["categories"], serde_json::json!(["x", "y"]));
    assert!(v["plot_height"].as_f64().unwrap() > 0.0);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = storage::load_json("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, colchart_rs::ChartError::Io(_)));
}
