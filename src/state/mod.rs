//! Table state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod history_table;

// Re-export for convenience
pub use history_table::{handle_action, HistoryTableAction, HistoryTableState, SelectedCommit};
