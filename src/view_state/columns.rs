//! Column layout: how many variant columns fit, and which ones are shown.

/// Fixed widths of the history grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMetrics {
    /// Width of the commit label column on the left, in pixels.
    pub row_label_width: u32,
    /// Width of each variant column, in pixels.
    pub column_width: u32,
}

impl ColumnMetrics {
    /// Default row label width in pixels.
    pub const ROW_LABEL_WIDTH: u32 = 200;
    /// Default variant column width in pixels.
    pub const COLUMN_WIDTH: u32 = 200;

    /// Create new column metrics.
    pub fn new(row_label_width: u32, column_width: u32) -> Self {
        Self {
            row_label_width,
            column_width,
        }
    }
}

impl Default for ColumnMetrics {
    fn default() -> Self {
        Self::new(Self::ROW_LABEL_WIDTH, Self::COLUMN_WIDTH)
    }
}

/// Number of variant columns that fit next to the row label column.
///
/// `floor((table_width - row_label_width) / column_width)`, never less than 1.
pub fn calc_column_limit_from_width(table_width: f64, metrics: &ColumnMetrics) -> usize {
    if metrics.column_width == 0 {
        return 1;
    }
    let limit = ((table_width - f64::from(metrics.row_label_width))
        / f64::from(metrics.column_width))
    .floor();
    // NaN fails the comparison and falls through to 1.
    if limit >= 1.0 {
        limit as usize
    } else {
        1
    }
}

/// Pages through variant columns `column_limit` at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPager {
    columns: Vec<String>,
    column_limit: usize,
    current_page: usize,
}

impl ColumnPager {
    /// Create a pager over `columns`, showing at most `column_limit` at once.
    pub fn new(columns: Vec<String>, column_limit: usize) -> Self {
        Self {
            columns,
            column_limit: column_limit.max(1),
            current_page: 0,
        }
    }

    /// All column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Current column limit.
    pub fn column_limit(&self) -> usize {
        self.column_limit
    }

    /// 0-based index of the page being shown.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages, at least 1 even with no columns.
    pub fn page_count(&self) -> usize {
        self.columns.len().div_ceil(self.column_limit).max(1)
    }

    /// Columns on the current page.
    pub fn visible_columns(&self) -> &[String] {
        let start = (self.current_page * self.column_limit).min(self.columns.len());
        let end = (start + self.column_limit).min(self.columns.len());
        &self.columns[start..end]
    }

    /// Whether a later page exists.
    pub fn has_next_page(&self) -> bool {
        self.current_page + 1 < self.page_count()
    }

    /// Whether an earlier page exists.
    pub fn has_prev_page(&self) -> bool {
        self.current_page > 0
    }

    /// Advance one page; stays on the last page.
    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
        }
    }

    /// Go back one page; stays on the first page.
    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1);
    }

    /// Change the limit and clamp the current page into range.
    pub fn set_column_limit(&mut self, column_limit: usize) {
        self.column_limit = column_limit.max(1);
        self.current_page = self.current_page.min(self.page_count() - 1);
    }

    /// Replace the column list, back to the first page.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
        self.current_page = 0;
    }
}
