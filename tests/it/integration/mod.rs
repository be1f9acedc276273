//! Integration tests for autoviz.
//!
//! These tests drive a `Session` through complete workflows: upload, chart
//! and export.

mod chart_workflow_tests;
