//! List Choreographer
//!
//! Reorders a list of row consoles and turns the new order into motion.
//!
//! A reorder gives a random subset of items a new weight, stable-sorts the
//! list by weight, and queues one [`MovePath`] for every item whose row
//! changed. Each path gets its own random start delay so the moves play
//! out as a cascade rather than a single jump.

use std::time::Duration;

use rand::Rng;

use crate::console::{ConsoleId, ConsoleTree};
use crate::motion::{MotionEngine, MovePath};
use crate::path::generate_path;

/// A row slot in the list and its sort weight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListItem {
    pub console: ConsoleId,
    pub weight: u32,
}

/// Reorder tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReorderPolicy {
    /// Chance that an item draws a new weight on each reorder
    pub probability: f64,
    /// Largest weight an item can draw
    pub max_weight: u32,
    /// Time each move takes once it starts
    pub total_duration: Duration,
    /// Upper bound of the random start delay
    pub max_stagger: Duration,
}

impl Default for ReorderPolicy {
    fn default() -> Self {
        Self {
            probability: 0.2,
            max_weight: 200,
            total_duration: Duration::from_millis(300),
            max_stagger: Duration::from_millis(700),
        }
    }
}

impl ReorderPolicy {
    /// `probability` as a valid Bernoulli parameter
    ///
    /// Out-of-range values are clamped into `[0, 1]`; NaN never reweights.
    pub fn gate_probability(&self) -> f64 {
        if self.probability.is_nan() {
            0.0
        } else {
            self.probability.clamp(0.0, 1.0)
        }
    }
}

/// Owns the list order and spawns moves when it changes
#[derive(Debug, Default)]
pub struct ListChoreographer {
    items: Vec<ListItem>,
    policy: ReorderPolicy,
}

impl ListChoreographer {
    pub fn new(policy: ReorderPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
        }
    }

    /// Append a row slot
    pub fn push(&mut self, item: ListItem) {
        self.items.push(item);
    }

    /// Items in their current list order
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn policy(&self) -> &ReorderPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reweight, re-sort and queue moves for every item that changed row
    ///
    /// An item's start row is where it will rest once its in-flight paths
    /// have finished, so reordering mid-flight never leaves a console off
    /// its slot. Returns the number of paths queued.
    pub fn reorder<R: Rng + ?Sized>(
        &mut self,
        tree: &ConsoleTree,
        motion: &mut MotionEngine,
        rng: &mut R,
    ) -> usize {
        let probability = self.policy.gate_probability();
        let mut reweighted = 0;
        for item in &mut self.items {
            if rng.gen_bool(probability) {
                item.weight = rng.gen_range(0..=self.policy.max_weight);
                reweighted += 1;
            }
        }

        // Stable: equal weights keep their relative order
        self.items.sort_by_key(|item| item.weight);

        let max_stagger_ms = u64::try_from(self.policy.max_stagger.as_millis()).unwrap_or(u64::MAX);
        let mut spawned = 0;

        for (index, item) in self.items.iter().enumerate() {
            let Some(console) = tree.get(item.console) else {
                continue;
            };
            let (_, pending_rows) = motion.pending_displacement(item.console);
            let start_row = console.layout.top + pending_rows;
            let end_row = i32::try_from(index).unwrap_or(i32::MAX);

            if start_row == end_row {
                continue;
            }

            let delay = Duration::from_millis(rng.gen_range(0..=max_stagger_ms));
            motion.push(MovePath::new(
                item.console,
                generate_path(start_row, end_row),
                self.policy.total_duration,
                delay,
            ));
            spawned += 1;
        }

        tracing::debug!(
            items = self.items.len(),
            reweighted,
            spawned,
            "Reordered list"
        );

        spawned
    }
}
