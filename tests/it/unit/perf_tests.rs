//! Tests for timing instrumentation.

use erboard::perf::{PROFILING_THRESHOLD_MS, ScopedTimer, measure_and_log};

#[test]
fn test_measure_and_log_returns_value() {
    let value = measure_and_log("sum", 1000.0, || (1..=10).sum::<u32>());
    assert_eq!(value, 55);
}

#[test]
fn test_scoped_timer_reports_name_and_elapsed() {
    let timer = ScopedTimer::new("scope", PROFILING_THRESHOLD_MS);
    assert_eq!(timer.name(), "scope");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_profile_scope_compiles_in_functions() {
    fn instrumented() -> u8 {
        erboard::profile_scope!("instrumented");
        erboard::profile_scope!("instrumented_with_threshold", 5.0);
        7
    }
    assert_eq!(instrumented(), 7);
}
