//! Snapshot tests for the plain-text table rendering.
//!
//! Uses insta to verify the rendered rows and summary don't regress.

use histrow::model::CommitOrder;
use histrow::parser::parse_pages;
use histrow::state::HistoryTableState;
use histrow::view::render_table;
use histrow::view_state::{ColumnMetrics, RowMetrics};
use insta::assert_snapshot;

// ===== Test Helpers =====

const TWO_PAGE_FIXTURE: &str = include_str!("fixtures/two_pages.jsonl");

/// Table loaded from the two-page fixture with commit 3 selected and five columns.
fn loaded_table() -> HistoryTableState {
    let mut table = HistoryTableState::new(RowMetrics::new(80, 40, 40), ColumnMetrics::new(200, 200))
        .with_selected_order(Some(CommitOrder::new(3)));
    table.set_columns(
        ["linux", "windows", "macos", "android", "ios"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    table.resize(1000.0);
    for page in parse_pages(TWO_PAGE_FIXTURE).unwrap() {
        table.ingest_page(&page).unwrap();
    }
    table
}

// ===== Snapshots =====

#[test]
fn snapshot_collapsed_table() {
    let table = loaded_table();
    let output = render_table(&table);
    assert_snapshot!("collapsed_table", output);
}

#[test]
fn snapshot_expanded_folded_row_second_column_page() {
    let mut table = loaded_table();
    table.toggle_row(2);
    table.next_column_page();
    let output = render_table(&table);
    assert_snapshot!("expanded_folded_row_second_column_page", output);
}

#[test]
fn snapshot_empty_table() {
    let table = HistoryTableState::default();
    let output = render_table(&table);
    assert_snapshot!("empty_table", output);
}
