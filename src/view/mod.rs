//! Plain-text rendering of history rows (impure shell output).
//!
//! One line per row: index, vertical offset, height, a `*` for the
//! selected row, and the row body. Expanded folded rows are followed by
//! one indented line per rolled-up commit.

use std::fmt::Write as _;

use crate::model::Commit;
use crate::state::HistoryTableState;
use crate::view_state::{Row, RowMetrics};

/// Width of the index/offset/height/marker prefix, including trailing space.
const PREFIX_WIDTH: usize = 4 + 1 + 6 + 1 + 4 + 1 + 1 + 1;

/// Render every row.
pub fn render_rows(rows: &[Row], metrics: &RowMetrics) -> String {
    let mut out = String::new();
    let mut offset = 0u64;

    for (index, row) in rows.iter().enumerate() {
        let height = row.row_height().get();
        let marker = if row.is_selected() { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{:>4} {:>6} {:>4} {} {}",
            index,
            offset,
            height,
            marker,
            row_body(row, metrics)
        );

        if let Row::Folded(folded) = row {
            if row.is_expanded(metrics) {
                for commit in &folded.rolled_up_commits {
                    let _ = writeln!(
                        out,
                        "{:width$}  · {}",
                        "",
                        commit_label(commit),
                        width = PREFIX_WIDTH
                    );
                }
            }
        }

        offset += u64::from(height);
    }

    out
}

/// Render the table's rows followed by a short summary.
pub fn render_table(state: &HistoryTableState) -> String {
    let mut out = render_rows(state.rows(), state.row_metrics());
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&render_summary(state));
    out
}

/// Row count, selection, and column paging.
pub fn render_summary(state: &HistoryTableState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "rows: {}", state.item_count());

    match state.selected_commit() {
        Some(selected) => match (selected.row_index, state.selected_row_offset()) {
            (Some(index), Some(offset)) => {
                let _ = writeln!(
                    out,
                    "selected: #{} at row {} (offset {})",
                    selected.order, index, offset
                );
            }
            _ => {
                let _ = writeln!(out, "selected: #{} not loaded", selected.order);
            }
        },
        None => {
            let _ = writeln!(out, "selected: none");
        }
    }

    let columns = state.columns();
    let _ = writeln!(out, "column limit: {}", columns.column_limit());
    if !columns.columns().is_empty() {
        let _ = writeln!(
            out,
            "columns: {} (page {}/{})",
            columns.visible_columns().join(", "),
            columns.current_page() + 1,
            columns.page_count()
        );
    }
    out
}

fn row_body(row: &Row, metrics: &RowMetrics) -> String {
    match row {
        Row::DateSeparator(separator) => format!(
            "── {} ──",
            metrics.calendar_day(separator.date).format("%a %b %d %Y")
        ),
        Row::Commit(commit_row) => commit_label(&commit_row.commit),
        Row::Folded(folded) => {
            let arrow = if row.is_expanded(metrics) { '▾' } else { '▸' };
            let count = folded.rolled_up_commits.len();
            let noun = if count == 1 { "commit" } else { "commits" };
            format!("{} {} folded {}", arrow, count, noun)
        }
    }
}

fn commit_label(commit: &Commit) -> String {
    let mut parts = vec![format!("#{}", commit.order)];
    if !commit.revision.is_empty() {
        parts.push(commit.short_revision().to_string());
    }
    if !commit.author.is_empty() {
        parts.push(format!("({})", commit.author));
    }
    if !commit.summary().is_empty() {
        parts.push(commit.summary().to_string());
    }
    parts.join(" ")
}
