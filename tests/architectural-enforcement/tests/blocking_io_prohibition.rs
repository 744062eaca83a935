//! Integration Test: Blocking I/O Prohibition
//!
//! Sockets and child processes go through `tokio::net` and
//! `tokio::process`. Reading the config file before the shell starts is
//! the only blocking I/O allowed.

use architectural_enforcement::{find_violations, report};

#[test]
fn test_no_blocking_sockets_or_processes() {
    let violations = find_violations(&[
        "std::net::TcpListener",
        "std::net::TcpStream",
        "std::process::Command",
        "std::io::stdin(",
    ]);
    report("Blocking I/O found in production code", &violations);
}
