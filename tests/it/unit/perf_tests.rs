//! Unit tests for perf module.

use autoviz::perf::{Stage, StageTimer, measure};

#[test]
fn test_measure_passes_result_through() {
    let (result, elapsed_ms) = measure(|| "a,b,c".split(',').count());
    assert_eq!(result, 3);
    assert!(elapsed_ms >= 0.0);
}

#[test]
fn test_stage_timer_reports_its_stage() {
    let timer = StageTimer::start(Stage::Normalize);
    assert_eq!(timer.stage(), Stage::Normalize);
    assert!(timer.elapsed_ms() >= 0.0);
    drop(timer);
}

#[test]
fn test_nested_timers() {
    let outer = StageTimer::start(Stage::Load);
    {
        let inner = StageTimer::start(Stage::Classify);
        assert!(inner.elapsed_ms() <= outer.elapsed_ms() + 1.0);
    }
    assert_eq!(outer.stage().to_string(), "load");
}

#[test]
fn test_chart_is_the_tightest_threshold() {
    let stages = [Stage::Load, Stage::Normalize, Stage::Classify, Stage::Chart, Stage::Export];
    let tightest = stages
        .iter()
        .min_by(|a, b| a.slow_threshold_ms().total_cmp(&b.slow_threshold_ms()))
        .unwrap();
    assert_eq!(*tightest, Stage::Chart);
}
