//! Integration Test: Sleep Prohibition
//!
//! Production code must not sleep. Sessions wait on their streams, the
//! accept loop waits on the listener and the shutdown signal.

use architectural_enforcement::{find_violations, report};

#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_violations(&["thread::sleep(", "time::sleep(", ".sleep("]);
    report("Sleep calls found in production code", &violations);
}

#[test]
fn test_no_busy_polling_of_shutdown() {
    // The shutdown signal is awaited, never polled in a timed loop
    let violations = find_violations(&["time::interval(", "yield_now("]);
    report("Polling primitives found in production code", &violations);
}
