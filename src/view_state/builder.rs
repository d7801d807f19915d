//! Row builder: turns pages of mainline entries into display rows.
//!
//! The row sequence is append-only. Each call takes the rows built so far
//! and returns them extended with the rows for the new batch, inserting a
//! date separator whenever an entry starts a new calendar day. Splitting a
//! stream of entries across several calls yields the same rows as a single
//! call over the whole stream.

use tracing::debug;

use crate::model::{classify, ClassificationError, CommitOrder, MainlineEntry, RawEntry};

use super::row::{CommitRow, DateSeparatorRow, FoldedCommitsRow, Row, RowMetrics};

/// Result of one builder call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessedCommits {
    /// Existing rows followed by the rows built for this batch.
    pub rows: Vec<Row>,
    /// Index of the row holding the selected commit, if this batch contained it.
    pub selected_row_index: Option<usize>,
}

/// Classify a batch of raw entries and append their rows.
///
/// Every entry is classified before any row is built, so a bad entry
/// anywhere in the batch fails the whole call and no partial sequence
/// is returned.
///
/// # Errors
///
/// Returns the first entry's [`ClassificationError`] unmodified.
pub fn process_commits(
    new_entries: &[RawEntry],
    existing_rows: &[Row],
    selected_order: Option<CommitOrder>,
    metrics: &RowMetrics,
) -> Result<ProcessedCommits, ClassificationError> {
    let entries = new_entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            classify(entry).inspect_err(|err| {
                debug!(entry = idx, error = %err, "Rejecting batch with unclassifiable entry");
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(process_entries(
        &entries,
        existing_rows,
        selected_order,
        metrics,
    ))
}

/// Append rows for already-classified entries.
///
/// For each entry, in order: if the last row so far falls on a different
/// calendar day (or there is no row yet), a [`DateSeparatorRow`] is pushed
/// first; then the commit or folded row. The selected row index is the
/// position of the last row in this batch that holds `selected_order`.
///
/// If more than one entry matches, the last one wins. Orders are unique
/// upstream, so this is not a deliberate tie-break.
pub fn process_entries(
    new_entries: &[MainlineEntry],
    existing_rows: &[Row],
    selected_order: Option<CommitOrder>,
    metrics: &RowMetrics,
) -> ProcessedCommits {
    let mut rows = Vec::with_capacity(existing_rows.len() + new_entries.len() * 2);
    rows.extend_from_slice(existing_rows);

    let mut selected_row_index = None;
    let mut separators = 0usize;

    for entry in new_entries {
        let date = entry.date();
        let same_day = rows
            .last()
            .is_some_and(|prior: &Row| metrics.is_same_day(prior.date(), date));

        if !same_day {
            rows.push(Row::DateSeparator(DateSeparatorRow {
                date,
                row_height: metrics.date_separator_height,
            }));
            separators += 1;
        }

        let selected = entry.is_selected(selected_order);
        rows.push(content_row(entry, selected, metrics));

        if selected {
            selected_row_index = Some(rows.len() - 1);
        }
    }

    debug!(
        entries = new_entries.len(),
        appended = rows.len() - existing_rows.len(),
        separators,
        selected_row_index = ?selected_row_index,
        "Processed commit batch"
    );

    ProcessedCommits {
        rows,
        selected_row_index,
    }
}

/// Recompute selection flags for a different selected order.
///
/// Heights and row identities are untouched. Returns the new rows and the
/// index of the last row holding `selected_order`.
pub fn reselect(rows: &[Row], selected_order: Option<CommitOrder>) -> (Vec<Row>, Option<usize>) {
    let mut selected_row_index = None;
    let rows = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let selected = selected_order.is_some_and(|order| row.contains_order(order));
            if selected {
                selected_row_index = Some(idx);
            }
            if row.is_selected() == selected {
                row.clone()
            } else {
                row.with_selected(selected)
            }
        })
        .collect();
    (rows, selected_row_index)
}

fn content_row(entry: &MainlineEntry, selected: bool, metrics: &RowMetrics) -> Row {
    match entry {
        MainlineEntry::Commit(commit) => Row::Commit(CommitRow {
            commit: commit.clone(),
            date: commit.create_time,
            selected,
            row_height: metrics.commit_height,
        }),
        MainlineEntry::Folded(group) => Row::Folded(FoldedCommitsRow {
            rolled_up_commits: group.commits().to_vec(),
            date: group.date(),
            selected,
            row_height: metrics.folded_commits_height,
        }),
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
