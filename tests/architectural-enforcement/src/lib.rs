//! Architectural Enforcement Integration Tests
//!
//! Source scans that keep the shell crates honest:
//! - No thread sleeps in production code (wait on I/O or the shutdown signal)
//! - No blocking sockets or processes (the shell runs on tokio)
//! - No `unwrap()`/`expect()` in production code (propagate errors)
//!
//! "Production code" is every `.rs` file under `shell/*/src`, up to the
//! first `#[cfg(test)]` marker in the file.

use std::fs;
use std::path::{Path, PathBuf};

/// A forbidden pattern found in production code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.text)
    }
}

/// Root of the workspace
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// All Rust sources under `shell/*/src`
pub fn production_sources() -> Vec<PathBuf> {
    let shell = workspace_root().join("shell");
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&shell)
        .into_iter()
        .filter_map(Result::ok)
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter(|path| path.components().any(|c| c.as_os_str() == "src"))
        .collect();
    files.sort();
    files
}

/// The part of a source file before its test module
pub fn production_part(content: &str) -> &str {
    content
        .find("#[cfg(test)]")
        .map_or(content, |idx| &content[..idx])
}

/// Scan production code for lines containing any of `patterns`
///
/// Line comments are ignored.
pub fn find_violations(patterns: &[&str]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for path in production_sources() {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for (idx, line) in production_part(&content).lines().enumerate() {
            let code_part = line.split("//").next().unwrap_or(line);
            if patterns.iter().any(|p| code_part.contains(p)) {
                violations.push(Violation {
                    path: path.clone(),
                    line: idx + 1,
                    text: line.trim().to_string(),
                });
            }
        }
    }

    violations
}

/// Print violations and fail the test if there are any
pub fn report(rule: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {rule}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!(
        "\nFound {} violation(s) in production code.\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_part_stops_at_test_module() {
        let source = "fn a() {}\n#[cfg(test)]\nmod tests { fn b() { x.unwrap(); } }\n";
        assert_eq!(production_part(source), "fn a() {}\n");
    }

    #[test]
    fn test_production_part_without_tests() {
        assert_eq!(production_part("fn a() {}"), "fn a() {}");
    }

    #[test]
    fn test_sources_are_found() {
        let sources = production_sources();
        assert!(sources.iter().any(|p| p.ends_with("core/src/lib.rs")));
        assert!(sources.iter().any(|p| p.ends_with("daemon/src/main.rs")));
        assert!(!sources.iter().any(|p| p.ends_with("transport_tests.rs")));
    }
}
