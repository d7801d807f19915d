//! View-state layer - row model, heights, and column layout
//!
//! This module turns classified mainline entries into the rows the
//! virtualized history table displays.
//!
//! # Module Structure
//!
//! - `row`: Row, RowHeight, RowMetrics - row variants and fixed heights
//! - `builder`: process_commits - append-only row building with day separators
//! - `toggle`: toggle_row_size_at_index - expand/collapse of folded rows
//! - `columns`: calc_column_limit_from_width, ColumnPager - variant column layout
//! - `height_index`: HeightIndex - O(log n) row offsets via Fenwick tree

pub mod builder;
pub mod columns;
pub mod height_index;
pub mod row;
pub mod toggle;

pub use builder::{process_commits, process_entries, reselect, ProcessedCommits};
pub use columns::{calc_column_limit_from_width, ColumnMetrics, ColumnPager};
pub use height_index::HeightIndex;
pub use row::{CommitRow, DateSeparatorRow, FoldedCommitsRow, Row, RowHeight, RowMetrics};
pub use toggle::toggle_row_size_at_index;
