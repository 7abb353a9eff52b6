//! Integration Test: Tick Purity
//!
//! **Policy**: the core engine is a pure function of its inputs and the
//! frame deltas it is fed. Production code in `core/src` MUST NOT sleep,
//! read the wall clock, keep static mutable state or use an async runtime.
//! The TUI may sleep only to pace frames.
//!
//! **Exceptions**: test code (everything after `#[cfg(test)]`).

use architectural_enforcement::{is_frame_limiting_context, report, rust_files, scan};

const SLEEP: &[&str] = &["::sleep(", ".sleep("];

#[test]
fn test_core_sources_found() {
    assert!(
        !rust_files("core/src").is_empty(),
        "core/src should contain Rust sources"
    );
}

#[test]
fn test_no_sleep_in_core() {
    let violations = scan("core/src", SLEEP, |_, _, _| false);
    report(
        "Sleep calls found in core production code!",
        "The core advances only when Scene::tick is called; pace frames in the surface.",
        &violations,
    );
}

#[test]
fn test_tui_sleeps_only_for_frame_pacing() {
    let violations = scan("tui/src", SLEEP, |path, lines, idx| {
        path.ends_with("tui/src/app.rs") && is_frame_limiting_context(lines, idx)
    });
    report(
        "Sleep calls found in TUI production code!",
        "Only frame rate limiting in app.rs may sleep; wait on the event stream otherwise.",
        &violations,
    );
}

#[test]
fn test_no_wall_clock_in_core() {
    let violations = scan(
        "core/src",
        &["Instant::now", "SystemTime::now", "UNIX_EPOCH"],
        |_, _, _| false,
    );
    report(
        "Wall clock reads found in core production code!",
        "Take a Duration (or an Instant argument, like FrameClock::tick) instead.",
        &violations,
    );
}

#[test]
fn test_no_static_mutable_state_in_core() {
    let violations = scan(
        "core/src",
        &["static mut", "thread_local!", "lazy_static!", "OnceLock", "OnceCell", "AtomicUsize"],
        |_, _, _| false,
    );
    report(
        "Static mutable state found in core production code!",
        "Keep engine state inside Scene so every mutation goes through &mut Scene.",
        &violations,
    );
}

#[test]
fn test_no_async_runtime_in_core() {
    let violations = scan("core/src", &["tokio::", "async fn", ".await"], |_, _, _| false);
    report(
        "Async code found in core production code!",
        "The tick loop is synchronous; async belongs in the surface.",
        &violations,
    );
}
