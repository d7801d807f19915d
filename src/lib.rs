//! histrow
//!
//! Row model for a paginated commit-history table: classifies mainline
//! entries, groups them under date separators, folds rolled-up commits,
//! and works out how many variant columns fit.
//!
//! Pure core (`model`, `view_state`, `state`) with an impure shell
//! (`source`, `logging`, `view`, the binary).

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
