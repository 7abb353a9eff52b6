//! Motion Engine
//!
//! Moves consoles along their [`MovePath`]s, one unit step at a time.
//!
//! Each path runs in two phases against the shared frame clock. While its
//! start delay is pending the path only counts the delay down; any part of
//! a frame left over once the delay runs out is spent on motion in that
//! same frame. During motion, time accrues toward the next step and
//! drains the path's time-to-live. A path ends when its time-to-live
//! reaches zero, whether or not every step has been taken, so every path
//! finishes a fixed time after its delay expires.

use std::collections::VecDeque;
use std::time::Duration;

use crate::console::{ConsoleId, ConsoleTree};
use crate::path::{net_displacement, Step};

/// An in-flight move of one console
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePath {
    /// Console being moved
    pub console: ConsoleId,
    /// Steps still to take, front first
    pub steps: VecDeque<Step>,
    /// Time per step
    pub per_step: Duration,
    /// Time left before motion starts
    pub delay_remaining: Duration,
    /// Time accrued toward the next step
    pub since_last_step: Duration,
    /// Time left until the path is forced to finish
    pub ttl_remaining: Duration,
}

impl MovePath {
    /// Create a path that spreads `steps` over `total` after `delay`
    ///
    /// Each step gets `floor(total_ms / steps)` whole milliseconds, so the
    /// steps are always used up before `total` runs out.
    pub fn new(console: ConsoleId, steps: VecDeque<Step>, total: Duration, delay: Duration) -> Self {
        let per_step_ms = match steps.len() as u128 {
            0 => total.as_millis(),
            n => total.as_millis() / n,
        };

        Self {
            console,
            steps,
            per_step: Duration::from_millis(u64::try_from(per_step_ms).unwrap_or(u64::MAX)),
            delay_remaining: delay,
            since_last_step: Duration::ZERO,
            ttl_remaining: total,
        }
    }

    /// Net `(d_col, d_row)` of the steps not yet taken
    pub fn remaining_displacement(&self) -> (i32, i32) {
        net_displacement(&self.steps)
    }

    pub fn is_finished(&self) -> bool {
        self.ttl_remaining.is_zero()
    }

    /// Advance this path by `dt`, moving its console in `tree`
    fn advance(&mut self, dt: Duration, tree: &mut ConsoleTree) {
        let mut dt = dt;

        if !self.delay_remaining.is_zero() {
            if dt > self.delay_remaining {
                dt -= self.delay_remaining;
                self.delay_remaining = Duration::ZERO;
            } else {
                self.delay_remaining -= dt;
                dt = Duration::ZERO;
            }
        }

        if dt.is_zero() {
            return;
        }

        self.since_last_step += dt;
        self.ttl_remaining = self.ttl_remaining.saturating_sub(dt);

        while self.since_last_step >= self.per_step {
            self.since_last_step -= self.per_step;
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            if let Some(layout) = tree.layout_mut(self.console) {
                layout.left += step.d_col;
                layout.top += step.d_row;
            }
        }
    }
}

/// Advances every in-flight move path
#[derive(Debug, Default)]
pub struct MotionEngine {
    paths: Vec<MovePath>,
}

impl MotionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a path; it runs alongside any others already in flight
    pub fn push(&mut self, path: MovePath) {
        self.paths.push(path);
    }

    /// In-flight paths, oldest first
    pub fn paths(&self) -> &[MovePath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Net displacement still pending for `console` across all its paths
    pub fn pending_displacement(&self, console: ConsoleId) -> (i32, i32) {
        self.paths
            .iter()
            .filter(|p| p.console == console)
            .map(MovePath::remaining_displacement)
            .fold((0, 0), |(col, row), (dc, dr)| (col + dc, row + dr))
    }

    /// Advance all paths by `dt`
    ///
    /// Returns the consoles whose paths finished during this call, in the
    /// order they finished. Paths are visited from the highest index down
    /// so removing a finished path never shifts one still to be visited.
    pub fn advance(&mut self, dt: Duration, tree: &mut ConsoleTree) -> Vec<ConsoleId> {
        let mut finished = Vec::new();

        for i in (0..self.paths.len()).rev() {
            let path = &mut self.paths[i];
            path.advance(dt, tree);

            if path.is_finished() {
                tracing::trace!(
                    console = path.console.index(),
                    steps_left = path.steps.len(),
                    "Move path finished"
                );
                finished.push(path.console);
                self.paths.remove(i);
            }
        }

        finished
    }
}
