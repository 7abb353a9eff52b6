//! Architectural Enforcement Integration Tests
//!
//! This package contains source-scanning tests that keep the engine's tick
//! loop pure:
//! - No sleep() calls in the core, and only frame pacing in the TUI
//! - No wall clock reads in the core (time arrives as frame deltas)
//! - No static mutable state in the core (a `Scene` owns everything)
//! - No async runtime in the core
//!
//! The helpers here are shared by the tests under `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Root of the workspace this package lives in
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// A forbidden pattern found in production code
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line_number: usize,
    pub line: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line_number, self.line)
    }
}

/// Every `.rs` file under `dir`, relative to the workspace root
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Production lines of a source file: comments stripped, and nothing
/// from the first `#[cfg(test)]` onwards
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("#[cfg(test)]") {
            break;
        }
        let code_part = line.split("//").next().unwrap_or(line);
        lines.push((idx, code_part));
    }
    lines
}

/// Scan `dir` for lines containing any of `patterns`
///
/// `allow` gets the whole file and the line index of a hit and may excuse it.
pub fn scan(
    dir: &str,
    patterns: &[&str],
    allow: impl Fn(&Path, &[&str], usize) -> bool,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for path in rust_files(dir) {
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => continue,
        };
        let all_lines: Vec<&str> = content.lines().collect();

        for (idx, code_part) in production_lines(&content) {
            if !patterns.iter().any(|p| code_part.contains(p)) {
                continue;
            }
            if allow(&path, &all_lines, idx) {
                continue;
            }
            violations.push(Violation {
                path: path.clone(),
                line_number: idx + 1,
                line: all_lines[idx].trim().to_string(),
            });
        }
    }

    violations
}

/// Check if sleep is used for frame rate limiting (acceptable in TUI)
pub fn is_frame_limiting_context(lines: &[&str], current_idx: usize) -> bool {
    let context_range = current_idx.saturating_sub(10)..std::cmp::min(current_idx + 5, lines.len());

    lines[context_range].iter().any(|line| {
        let line = line.to_lowercase();
        line.contains("frame") || line.contains("fps") || line.contains("tick_rate")
    })
}

/// Print violations and fail the test
pub fn report(title: &str, hint: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n{title}\n");
    for violation in violations {
        eprintln!("  {violation}");
    }
    eprintln!("\n{hint}");

    panic!("\nFound {} violation(s) in production code.", violations.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_tests() {
        let content = "fn a() {}\n// std::thread::sleep\n#[cfg(test)]\nmod tests { sleep(); }\n";
        let lines = production_lines(content);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], (1, ""));
    }

    #[test]
    fn test_frame_limiting_detection() {
        let code = [
            "async fn run() {",
            "    let frame_duration = Duration::from_millis(16);",
            "    loop {",
            "        tokio::time::sleep(frame_duration).await;",
            "    }",
            "}",
        ];

        assert!(is_frame_limiting_context(&code, 3));
    }

    #[test]
    fn test_plain_sleep_is_not_frame_limiting() {
        let code = [
            "fn wait_for_server() {",
            "    std::thread::sleep(Duration::from_millis(10));",
            "}",
        ];

        assert!(!is_frame_limiting_context(&code, 1));
    }

    #[test]
    fn test_workspace_root_has_core() {
        assert!(workspace_root().join("core/src/lib.rs").exists());
    }
}
