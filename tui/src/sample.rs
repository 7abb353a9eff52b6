//! Sample list content
//!
//! Fills a scene with demo rows: a numbered green caption on the left and
//! a short accent bar pinned near the right edge of each row.

use rand::seq::SliceRandom;
use rand::Rng;
use reflow_core::{Anchor, ConsoleId, Scene, TextItem};

use crate::theme::{ACCENTS, BACKGROUND, GREEN_3, YELLOW_2};

/// Accent bar drawn on every row
pub const ACCENT_BAR: &str = "|||||||";

/// Distance from the right edge of the row to the accent bar
pub const ACCENT_OFFSET: i32 = 10;

/// Caption for a sample row
pub fn caption(n: u32) -> String {
    format!("█ HERE IS SOME TEXT!{n}")
}

/// Append `rows` sample rows to the scene
///
/// # Errors
///
/// Fails only if the scene rejects a row console or text.
pub fn populate<R: Rng + ?Sized>(
    scene: &mut Scene,
    rows: usize,
    rng: &mut R,
) -> reflow_core::Result<Vec<ConsoleId>> {
    let mut consoles = Vec::with_capacity(rows);

    for _ in 0..rows {
        let row = scene.push_row()?;

        let label = TextItem::new(row, caption(rng.gen_range(0..=1000)), GREEN_3, Anchor::Left(0))
            .with_background(BACKGROUND);
        scene.add_text(label)?;

        let accent = *ACCENTS.choose(rng).unwrap_or(&YELLOW_2);
        let bar = TextItem::new(row, ACCENT_BAR, accent, Anchor::Right(ACCENT_OFFSET))
            .with_background(BACKGROUND);
        scene.add_text(bar)?;

        consoles.push(row);
    }

    tracing::debug!(rows, "Populated sample rows");
    Ok(consoles)
}
