//! Commit and folded-group records supplied by the upstream history source.
//!
//! These are read-only inputs to the row model. Smart constructors enforce
//! the shape invariants (a folded group is never empty).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ClassificationError;

/// Position of a commit in mainline history.
///
/// Unique per project; used both for sorting and as the selection key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitOrder(u64);

impl CommitOrder {
    /// Create a new CommitOrder from a raw value.
    pub fn new(order: u64) -> Self {
        Self(order)
    }

    /// Get the raw u64 value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CommitOrder {
    fn from(order: u64) -> Self {
        Self(order)
    }
}

impl fmt::Display for CommitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single mainline version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Upstream version identifier.
    #[serde(default)]
    pub id: String,
    /// Mainline order, the selection key.
    pub order: CommitOrder,
    /// When the version was created.
    pub create_time: DateTime<Utc>,
    /// Commit author.
    #[serde(default)]
    pub author: String,
    /// Commit message (first line is what gets displayed).
    #[serde(default)]
    pub message: String,
    /// Full revision hash.
    #[serde(default)]
    pub revision: String,
}

impl Commit {
    /// Create a commit with only the fields the row model reads.
    pub fn new(order: impl Into<CommitOrder>, create_time: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            order: order.into(),
            create_time,
            author: String::new(),
            message: String::new(),
            revision: String::new(),
        }
    }

    /// Builder-style setter for the display fields.
    pub fn with_details(
        mut self,
        revision: impl Into<String>,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.revision = revision.into();
        self.author = author.into();
        self.message = message.into();
        self
    }

    /// First seven characters of the revision, or the whole thing if shorter.
    pub fn short_revision(&self) -> &str {
        match self.revision.char_indices().nth(7) {
            Some((idx, _)) => &self.revision[..idx],
            None => &self.revision,
        }
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Consecutive commits the upstream source rolled up into one entry.
///
/// Always holds at least one commit. NEVER expose the raw constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedGroup(Vec<Commit>);

impl FoldedGroup {
    /// Smart constructor: rejects an empty group.
    pub fn new(commits: Vec<Commit>) -> Result<Self, ClassificationError> {
        if commits.is_empty() {
            return Err(ClassificationError::EmptyFoldedGroup);
        }
        Ok(Self(commits))
    }

    /// The rolled-up commits in upstream order.
    pub fn commits(&self) -> &[Commit] {
        &self.0
    }

    /// First member; its creation time is the group's date.
    pub fn first(&self) -> &Commit {
        &self.0[0]
    }

    /// Number of rolled-up commits (>= 1).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Effective date of the group.
    pub fn date(&self) -> DateTime<Utc> {
        self.first().create_time
    }

    /// Whether any member has the given order.
    pub fn contains(&self, order: CommitOrder) -> bool {
        self.0.iter().any(|commit| commit.order == order)
    }

    /// Consume the group, returning its commits.
    pub fn into_commits(self) -> Vec<Commit> {
        self.0
    }
}
