//! History table state and transitions.
//!
//! Owns the running row sequence and threads it through pagination,
//! expand/collapse, resize, column paging and selection changes.
//! All transitions are synchronous; the caller decides when pages arrive.

use tracing::{debug, warn};

use crate::model::{ClassificationError, CommitOrder, RawEntry};
use crate::parser::MainlineCommitsPage;
use crate::view_state::{
    calc_column_limit_from_width, process_commits, reselect, toggle_row_size_at_index,
    ColumnMetrics, ColumnPager, HeightIndex, Row, RowHeight, RowMetrics,
};

/// The commit highlighted by external UI state (e.g. a query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedCommit {
    /// Order of the highlighted commit.
    pub order: CommitOrder,
    /// Row holding it, once a page containing it has been ingested.
    pub row_index: Option<usize>,
}

impl SelectedCommit {
    /// Whether the row holding the commit has been built.
    pub fn is_loaded(&self) -> bool {
        self.row_index.is_some()
    }
}

/// State of one history table.
#[derive(Debug, Clone)]
pub struct HistoryTableState {
    rows: Vec<Row>,
    heights: HeightIndex,
    selected: Option<SelectedCommit>,
    columns: ColumnPager,
    row_metrics: RowMetrics,
    column_metrics: ColumnMetrics,
    next_page_order: Option<u64>,
    prev_page_order: Option<u64>,
    pages_ingested: usize,
}

impl HistoryTableState {
    /// Create an empty table.
    pub fn new(row_metrics: RowMetrics, column_metrics: ColumnMetrics) -> Self {
        Self {
            rows: Vec::new(),
            heights: HeightIndex::new(0),
            selected: None,
            columns: ColumnPager::new(Vec::new(), 1),
            row_metrics,
            column_metrics,
            next_page_order: None,
            prev_page_order: None,
            pages_ingested: 0,
        }
    }

    /// Builder-style: start with a selected commit.
    pub fn with_selected_order(mut self, order: Option<CommitOrder>) -> Self {
        self.set_selected_order(order);
        self
    }

    /// All rows built so far.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn item_count(&self) -> usize {
        self.rows.len()
    }

    /// Height of row `index`, or `None` past the end.
    pub fn item_height(&self, index: usize) -> Option<RowHeight> {
        self.rows.get(index).map(Row::row_height)
    }

    /// Whether row `index` has been built.
    pub fn is_item_loaded(&self, index: usize) -> bool {
        index < self.rows.len()
    }

    /// Currently selected commit, if any.
    pub fn selected_commit(&self) -> Option<SelectedCommit> {
        self.selected
    }

    /// Number of pages ingested.
    pub fn pages_ingested(&self) -> usize {
        self.pages_ingested
    }

    /// Order at which the next page starts, as reported by the last page.
    pub fn next_page_order(&self) -> Option<u64> {
        self.next_page_order
    }

    /// Order at which the previous page starts, as reported by the last page.
    pub fn prev_page_order(&self) -> Option<u64> {
        self.prev_page_order
    }

    /// Whether the last page reported more history.
    pub fn has_next_page(&self) -> bool {
        self.next_page_order.is_some()
    }

    /// Row metrics in use.
    pub fn row_metrics(&self) -> &RowMetrics {
        &self.row_metrics
    }

    /// Column pager.
    pub fn columns(&self) -> &ColumnPager {
        &self.columns
    }

    /// Columns on the current column page.
    pub fn visible_columns(&self) -> &[String] {
        self.columns.visible_columns()
    }

    /// Current column limit.
    pub fn column_limit(&self) -> usize {
        self.columns.column_limit()
    }

    /// Total height of all rows.
    pub fn total_height(&self) -> u64 {
        self.heights.total()
    }

    /// Vertical offset of the selected row, once loaded.
    pub fn selected_row_offset(&self) -> Option<u64> {
        let index = self.selected?.row_index?;
        self.heights.offset_of(index)
    }

    /// Vertical offset at which row `index` starts.
    pub fn row_offset(&self, index: usize) -> Option<u64> {
        self.heights.offset_of(index)
    }

    /// Row under vertical offset `y`.
    pub fn row_at_offset(&self, y: u64) -> Option<usize> {
        self.heights.lower_bound(y)
    }

    /// Append one page of entries.
    ///
    /// The selected row index moves only when this page contains the
    /// selected commit; an earlier match is kept otherwise.
    ///
    /// # Errors
    ///
    /// Returns the builder's [`ClassificationError`]; the state is unchanged.
    pub fn ingest_page(&mut self, page: &MainlineCommitsPage) -> Result<(), ClassificationError> {
        self.ingest_entries(&page.versions)?;
        self.next_page_order = page.next_page_order_number;
        self.prev_page_order = page.prev_page_order_number;
        Ok(())
    }

    /// Append a batch of raw entries.
    ///
    /// # Errors
    ///
    /// Returns the builder's [`ClassificationError`]; the state is unchanged.
    pub fn ingest_entries(&mut self, entries: &[RawEntry]) -> Result<(), ClassificationError> {
        let selected_order = self.selected.map(|s| s.order);
        let processed = process_commits(entries, &self.rows, selected_order, &self.row_metrics)?;

        let previous_len = self.rows.len();
        self.heights.extend(&processed.rows[previous_len..]);
        self.rows = processed.rows;
        self.pages_ingested += 1;

        if let (Some(selected), Some(index)) = (self.selected.as_mut(), processed.selected_row_index)
        {
            selected.row_index = Some(index);
        }

        debug!(
            page = self.pages_ingested,
            rows = self.rows.len(),
            selected_row_index = ?self.selected.and_then(|s| s.row_index),
            "Ingested page"
        );
        Ok(())
    }

    /// Expand or collapse the folded row at `index`.
    ///
    /// Indices that are out of range or not folded rows are ignored.
    pub fn toggle_row(&mut self, index: usize) {
        let Some(folded_count) = self.rows.get(index).and_then(Row::folded_count) else {
            warn!(index, rows = self.rows.len(), "Ignoring toggle of non-folded row");
            return;
        };

        self.rows = toggle_row_size_at_index(&self.rows, folded_count, index, &self.row_metrics);
        self.heights.set(index, self.rows[index].row_height());
        debug!(index, height = self.rows[index].row_height().get(), "Toggled folded row");
    }

    /// Whether the folded row at `index` is currently expanded.
    pub fn is_row_expanded(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .is_some_and(|row| row.is_expanded(&self.row_metrics))
    }

    /// Recompute the column limit for a new table width.
    pub fn resize(&mut self, table_width: f64) {
        let limit = calc_column_limit_from_width(table_width, &self.column_metrics);
        if limit != self.columns.column_limit() {
            debug!(table_width, column_limit = limit, "Column limit changed");
        }
        self.columns.set_column_limit(limit);
    }

    /// Replace the variant column names.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.columns.set_columns(columns);
    }

    /// Show the next page of columns.
    pub fn next_column_page(&mut self) {
        self.columns.next_page();
    }

    /// Show the previous page of columns.
    pub fn prev_column_page(&mut self) {
        self.columns.prev_page();
    }

    /// Change which commit is highlighted, updating flags on existing rows.
    pub fn set_selected_order(&mut self, order: Option<CommitOrder>) {
        let (rows, row_index) = reselect(&self.rows, order);
        self.rows = rows;
        self.selected = order.map(|order| SelectedCommit { order, row_index });
    }
}

impl Default for HistoryTableState {
    fn default() -> Self {
        Self::new(RowMetrics::default(), ColumnMetrics::default())
    }
}

/// A transition of the history table.
#[derive(Debug, Clone)]
pub enum HistoryTableAction {
    /// A page of entries arrived.
    IngestPage(MainlineCommitsPage),
    /// The user clicked a folded row.
    ToggleRow(usize),
    /// The container was resized.
    Resize(f64),
    /// The variant column set changed.
    SetColumns(Vec<String>),
    /// Show later columns.
    NextColumnPage,
    /// Show earlier columns.
    PrevColumnPage,
    /// The highlighted commit changed.
    SetSelectedOrder(Option<CommitOrder>),
}

/// Apply an action to the table state.
///
/// # Errors
///
/// Only [`HistoryTableAction::IngestPage`] can fail; see
/// [`HistoryTableState::ingest_page`].
pub fn handle_action(
    mut state: HistoryTableState,
    action: HistoryTableAction,
) -> Result<HistoryTableState, ClassificationError> {
    match action {
        HistoryTableAction::IngestPage(page) => state.ingest_page(&page)?,
        HistoryTableAction::ToggleRow(index) => state.toggle_row(index),
        HistoryTableAction::Resize(width) => state.resize(width),
        HistoryTableAction::SetColumns(columns) => state.set_columns(columns),
        HistoryTableAction::NextColumnPage => state.next_column_page(),
        HistoryTableAction::PrevColumnPage => state.prev_column_page(),
        HistoryTableAction::SetSelectedOrder(order) => state.set_selected_order(order),
    }
    Ok(state)
}

// ===== Tests =====

#[cfg(test)]
#[path = "history_table_tests.rs"]
mod tests;
