//! Chart Workflow Integration Tests

use crate::helpers::{SALES_CSV, uploaded_session};
use autoviz::data::{DataError, RenderFailure};
use autoviz::render::PlotlyRenderer;
use autoviz::session::Session;
use autoviz::types::{ChartConfig, ChartType, ColorScheme};
use serde_json::json;

#[test]
fn test_pie_counts_when_no_value_column() {
    let session = uploaded_session("fruit.csv", b"fruit\na\na\nb\n");

    let config = ChartConfig::new(ChartType::Pie).with_x("fruit");
    let response = session.generate_chart(config, &PlotlyRenderer).unwrap();

    let trace = &response.chart["data"][0];
    assert_eq!(trace["type"], "pie");
    assert_eq!(trace["labels"], json!(["a", "b"]));
    assert_eq!(trace["values"], json!([2, 1]));
}

#[test]
fn test_pie_with_absent_value_column_counts() {
    let session = uploaded_session("sales.csv", SALES_CSV.as_bytes());

    let config = ChartConfig::new(ChartType::Pie).with_axes("region", "revenue");
    let response = session.generate_chart(config, &PlotlyRenderer).unwrap();

    assert_eq!(response.chart["data"][0]["labels"], json!(["north", "south", "east"]));
    assert_eq!(response.chart["data"][0]["values"], json!([2, 1, 1]));
}

#[test]
fn test_pie_sums_value_column() {
    let session = uploaded_session("sales.csv", SALES_CSV.as_bytes());

    let config = ChartConfig::new(ChartType::Pie).with_axes("region", "units");
    let response = session.generate_chart(config, &PlotlyRenderer).unwrap();

    assert_eq!(response.chart["data"][0]["values"], json!([14, 0, 7]));
}

#[test]
fn test_heatmap_needs_numeric_columns() {
    let session = uploaded_session("names.csv", b"first,last\nada,lovelace\nalan,turing\n");

    let err = session
        .generate_chart(ChartConfig::new(ChartType::Heatmap), &PlotlyRenderer)
        .unwrap_err();

    assert!(matches!(
        err,
        DataError::ChartUnavailable(RenderFailure::NoNumericColumns)
    ));
    assert_eq!(err.to_string(), "Unable to generate chart");
}

#[test]
fn test_heatmap_correlates_numeric_columns() {
    let session = uploaded_session("sales.csv", SALES_CSV.as_bytes());

    let config = ChartConfig::new(ChartType::Heatmap).with_color_scheme(ColorScheme::Viridis);
    let response = session.generate_chart(config, &PlotlyRenderer).unwrap();

    let trace = &response.chart["data"][0];
    assert_eq!(trace["type"], "heatmap");
    assert_eq!(trace["x"], json!(["units", "price"]));
    assert_eq!(trace["z"][0][0], json!(1.0));
    assert_eq!(trace["z"][0][1], trace["z"][1][0]);
    assert!(trace["colorscale"].is_array());
}

#[test]
fn test_every_chart_type_renders_with_house_style() {
    let session = uploaded_session("sales.csv", SALES_CSV.as_bytes());

    for kind in ChartType::all() {
        let config = ChartConfig::new(kind.clone()).with_axes("region", "units");
        let response = session
            .generate_chart(config, &PlotlyRenderer)
            .unwrap_or_else(|err| panic!("{} chart failed: {}", kind.label(), err));

        let layout = &response.chart["layout"];
        assert_eq!(layout["height"], json!(500));
        assert_eq!(layout["title"]["x"], json!(0.5));
        assert_eq!(layout["plot_bgcolor"], "white");
    }
}

#[test]
fn test_missing_axis_is_unavailable() {
    let session = uploaded_session("sales.csv", SALES_CSV.as_bytes());

    let config = ChartConfig::new(ChartType::Scatter).with_x("units");
    assert!(matches!(
        session.generate_chart(config, &PlotlyRenderer),
        Err(DataError::ChartUnavailable(RenderFailure::MissingAxis { .. }))
    ));

    let config = ChartConfig::new(ChartType::Line).with_axes("units", "nope");
    assert!(matches!(
        session.generate_chart(config, &PlotlyRenderer),
        Err(DataError::ChartUnavailable(RenderFailure::ColumnNotFound(_)))
    ));
}

#[test]
fn test_config_from_flat_json() {
    let session = uploaded_session("sales.csv", SALES_CSV.as_bytes());

    let config: ChartConfig =
        serde_json::from_value(json!({ "chart_type": "LINE", "x_axis": "region", "y_axis": "price" }))
            .unwrap();
    let response = session.generate_chart(config, &PlotlyRenderer).unwrap();

    assert_eq!(response.config.chart_type, ChartType::Line);
    assert_eq!(response.config.title, "Data Visualization");
    assert_eq!(response.chart["data"][0]["mode"], "lines");
}

#[test]
fn test_unknown_chart_type_is_unavailable() {
    let session = uploaded_session("sales.csv", SALES_CSV.as_bytes());

    let config: ChartConfig =
        serde_json::from_value(json!({ "chart_type": "radar", "x_axis": "region" })).unwrap();

    assert!(matches!(
        session.generate_chart(config, &PlotlyRenderer),
        Err(DataError::ChartUnavailable(RenderFailure::UnknownChartType(name))) if name == "radar"
    ));
}

#[test]
fn test_readers_see_consistent_tables_during_uploads() {
    let session = Session::default();
    session.upload("sales.csv", SALES_CSV.as_bytes()).unwrap();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..20 {
                let body = if i % 2 == 0 { "a,b\n1,2\n" } else { SALES_CSV };
                session.upload("swap.csv", body.as_bytes()).unwrap();
            }
        });

        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let table = session.snapshot().unwrap();
                    for column in table.columns() {
                        assert_eq!(column.len(), table.row_count());
                    }
                    assert!(table.column_count() == 2 || table.column_count() == 4);
                }
            });
        }
    });
}
