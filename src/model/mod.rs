//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod commit;
pub mod entry;
pub mod error;

// Re-export for convenience
pub use commit::{Commit, CommitOrder, FoldedGroup};
pub use entry::{classify, MainlineEntry, RawEntry};
pub use error::{AppError, ClassificationError, InputError, ParseError};
