//! Snapshot tests using the insta crate.
//!
//! Boundary payloads are serialized to JSON and compared against inline
//! snapshots, so a change in field names or ordering shows up as a diff.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{TestTableBuilder, uploaded_session};
use autoviz::data::{DataError, DataStats, classify};
use autoviz::session::ErrorResponse;
use autoviz::types::ChartConfig;

// ============================================================================
// Upload Boundary
// ============================================================================

#[test]
fn snapshot_upload_response() {
    let session = autoviz::session::Session::default();
    let response = session.upload("weather.csv", b"city,temp\nOslo,3\nRome,\n").unwrap();

    insta::assert_json_snapshot!(response, @r###"
    {
      "success": true,
      "data": [
        {
          "city": "Oslo",
          "temp": 3
        },
        {
          "city": "Rome",
          "temp": 0
        }
      ],
      "headers": [
        "city",
        "temp"
      ],
      "total_rows": 2,
      "total_columns": 2,
      "column_info": {
        "city": {
          "type": "categorical",
          "dtype": "text",
          "unique_values": 2,
          "null_values": 0,
          "sample_values": [
            "Oslo",
            "Rome"
          ]
        },
        "temp": {
          "type": "numeric",
          "dtype": "int64",
          "unique_values": 2,
          "null_values": 0,
          "sample_values": [
            3,
            0
          ]
        }
      }
    }
    "###);
}

#[test]
fn snapshot_column_info_keeps_column_order() {
    let table = TestTableBuilder::new()
        .with_int_column("zeta", &[Some(1), Some(1), Some(2)])
        .with_text_column("alpha", &["x", "y", "x"])
        .build();

    insta::assert_json_snapshot!(classify(&table), @r###"
    {
      "zeta": {
        "type": "numeric",
        "dtype": "int64",
        "unique_values": 2,
        "null_values": 0,
        "sample_values": [
          1,
          1,
          2
        ]
      },
      "alpha": {
        "type": "categorical",
        "dtype": "text",
        "unique_values": 2,
        "null_values": 0,
        "sample_values": [
          "x",
          "y",
          "x"
        ]
      }
    }
    "###);
}

// ============================================================================
// Stats Boundary
// ============================================================================

#[test]
fn snapshot_stats() {
    let table = TestTableBuilder::new()
        .with_text_column("region", &["north", "south"])
        .with_int_column("units", &[Some(10), None])
        .build();

    insta::assert_json_snapshot!(DataStats::from_table(&table), @r###"
    {
      "total_rows": 2,
      "total_columns": 2,
      "numeric_columns": 1,
      "categorical_columns": 1,
      "missing_values": 1,
      "memory_usage": 268
    }
    "###);
}

#[test]
fn snapshot_stats_after_upload() {
    let session = uploaded_session("regions.csv", b"region,units\nnorth,10\nsouth,\n");

    insta::assert_json_snapshot!(session.stats().unwrap(), @r###"
    {
      "total_rows": 2,
      "total_columns": 2,
      "numeric_columns": 1,
      "categorical_columns": 1,
      "missing_values": 0,
      "memory_usage": 268
    }
    "###);
}

// ============================================================================
// Chart and Error Shapes
// ============================================================================

#[test]
fn snapshot_default_chart_config() {
    insta::assert_json_snapshot!(ChartConfig::default(), @r###"
    {
      "chart_type": "bar",
      "x_axis": null,
      "y_axis": null,
      "color_scheme": "default",
      "title": "Data Visualization"
    }
    "###);
}

#[test]
fn snapshot_error_responses() {
    let errors: Vec<ErrorResponse> = [
        DataError::TooLarge {
            size_mb: 20,
            max_mb: 16,
        },
        DataError::UnsupportedFormat {
            extension: "txt".to_string(),
        },
        DataError::NoData,
    ]
    .iter()
    .map(ErrorResponse::from)
    .collect();

    insta::assert_json_snapshot!(errors, @r###"
    [
      {
        "error": "File too large: 20MB (max 16MB)"
      },
      {
        "error": "Unsupported file format: \"txt\""
      },
      {
        "error": "No data uploaded"
      }
    ]
    "###);
}
