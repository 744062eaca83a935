//! Integration Test: Error Propagation
//!
//! Production code returns errors with `?` or logs and continues; it never
//! panics on them.

use architectural_enforcement::{find_violations, report};

#[test]
fn test_no_unwrap_or_expect_in_production_code() {
    let violations = find_violations(&[".unwrap()", ".expect("]);
    report("unwrap()/expect() found in production code", &violations);
}

#[test]
fn test_no_panicking_macros_in_production_code() {
    let violations = find_violations(&["panic!(", "todo!(", "unimplemented!("]);
    report("Panicking macros found in production code", &violations);
}
