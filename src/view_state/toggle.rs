//! Expand/collapse of folded rows.

use super::row::{Row, RowMetrics};

/// Flip the folded row at `index` between collapsed and expanded height.
///
/// The expanded height is `folded_commits_height + commit_height * folded_count`.
/// A row already at that height is reset to `folded_commits_height`; any
/// other height becomes the expanded one. The state is read from the height
/// itself, so toggling twice restores the original rows.
///
/// Returns a new sequence; the input is not modified.
///
/// # Panics
///
/// Panics if `index >= rows.len()`. In debug builds, also panics if the row
/// at `index` is not a folded row.
pub fn toggle_row_size_at_index(
    rows: &[Row],
    folded_count: usize,
    index: usize,
    metrics: &RowMetrics,
) -> Vec<Row> {
    assert!(
        index < rows.len(),
        "index {} out of bounds (len: {})",
        index,
        rows.len()
    );
    debug_assert!(
        matches!(rows[index], Row::Folded(_)),
        "row {} is not a folded row",
        index
    );

    let expanded = metrics.expanded_folded_height(folded_count);
    let collapsed = metrics.folded_commits_height;
    let target = &rows[index];
    let new_height = if target.row_height() != expanded {
        expanded
    } else {
        collapsed
    };

    let mut toggled = rows.to_vec();
    toggled[index] = target.with_row_height(new_height);
    toggled
}
