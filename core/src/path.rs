//! Rectangular Move Paths
//!
//! A row change is never drawn as a jump. The moving console peels out to
//! the left, travels vertically, then slides back into its column:
//!
//! ```text
//!  ▒▒▒ item at the start row
//!  ▒
//!  ▒
//!  ▒▒▒ item at the end row
//! ```
//!
//! The detour width grows with the distance travelled so that long moves
//! stand clear of short ones happening at the same time.

use std::collections::VecDeque;

/// A single unit move on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// Column delta (-1, 0 or 1)
    pub d_col: i32,
    /// Row delta (-1, 0 or 1)
    pub d_row: i32,
}

impl Step {
    pub const LEFT: Step = Step::new(-1, 0);
    pub const RIGHT: Step = Step::new(1, 0);
    pub const UP: Step = Step::new(0, -1);
    pub const DOWN: Step = Step::new(0, 1);

    pub const fn new(d_col: i32, d_row: i32) -> Self {
        Self { d_col, d_row }
    }
}

/// Build the step sequence that moves a console from `start_row` to `end_row`
///
/// The result is `w` steps left, `|end - start|` steps toward the end row,
/// then `w` steps right, where `w = |end - start| / 2 + 1`.
///
/// # Panics
///
/// Panics if `start_row == end_row`; callers skip items that do not move.
#[must_use]
pub fn generate_path(start_row: i32, end_row: i32) -> VecDeque<Step> {
    assert_ne!(
        start_row, end_row,
        "generate_path needs distinct rows (callers skip items that stay put)"
    );

    let vertical = if end_row > start_row { Step::DOWN } else { Step::UP };
    let row_count = (end_row - start_row).unsigned_abs() as usize;
    let rect_width = row_count / 2 + 1;

    let mut path = VecDeque::with_capacity(2 * rect_width + row_count);
    path.extend(std::iter::repeat(Step::LEFT).take(rect_width));
    path.extend(std::iter::repeat(vertical).take(row_count));
    path.extend(std::iter::repeat(Step::RIGHT).take(rect_width));
    path
}

/// Sum of all step vectors as `(d_col, d_row)`
pub fn net_displacement<'a>(steps: impl IntoIterator<Item = &'a Step>) -> (i32, i32) {
    steps
        .into_iter()
        .fold((0, 0), |(col, row), step| (col + step.d_col, row + step.d_row))
}
