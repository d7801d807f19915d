//! Raw mainline entries and their classification.
//!
//! The upstream page lists entries that carry either a single `version` or a
//! list of `rolledUpVersions`. [`classify`] turns that structural shape into
//! the explicit [`MainlineEntry`] variant at the fetch boundary, so nothing
//! downstream inspects field presence again.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::commit::{Commit, CommitOrder, FoldedGroup};
use super::error::ClassificationError;

/// One entry of a mainline page, exactly as the upstream source sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    /// Present when the entry is a single displayed version.
    #[serde(default)]
    pub version: Option<Commit>,
    /// Present when the entry is a run of versions rolled up together.
    #[serde(default)]
    pub rolled_up_versions: Option<Vec<Commit>>,
}

impl RawEntry {
    /// Entry carrying one version.
    pub fn version(commit: Commit) -> Self {
        Self {
            version: Some(commit),
            rolled_up_versions: None,
        }
    }

    /// Entry carrying rolled-up versions.
    pub fn rolled_up(commits: Vec<Commit>) -> Self {
        Self {
            version: None,
            rolled_up_versions: Some(commits),
        }
    }
}

/// A classified mainline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainlineEntry {
    /// A single version.
    Commit(Commit),
    /// A run of versions shown as one collapsible row.
    Folded(FoldedGroup),
}

impl MainlineEntry {
    /// Effective date: the commit's creation time, or the first member's for a group.
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            MainlineEntry::Commit(commit) => commit.create_time,
            MainlineEntry::Folded(group) => group.date(),
        }
    }

    /// Whether this entry holds the commit with the given order.
    ///
    /// `None` never matches.
    pub fn is_selected(&self, selected: Option<CommitOrder>) -> bool {
        let Some(order) = selected else {
            return false;
        };
        match self {
            MainlineEntry::Commit(commit) => commit.order == order,
            MainlineEntry::Folded(group) => group.contains(order),
        }
    }
}

/// Classify one raw entry.
///
/// `version` is checked first, so an entry carrying both fields is a commit.
///
/// # Errors
///
/// - [`ClassificationError::EmptyFoldedGroup`] if `rolledUpVersions` is an empty list
/// - [`ClassificationError::UnrecognizedEntry`] if neither field is present
pub fn classify(entry: &RawEntry) -> Result<MainlineEntry, ClassificationError> {
    if let Some(version) = &entry.version {
        return Ok(MainlineEntry::Commit(version.clone()));
    }
    if let Some(rolled_up) = &entry.rolled_up_versions {
        return FoldedGroup::new(rolled_up.clone()).map(MainlineEntry::Folded);
    }
    Err(ClassificationError::UnrecognizedEntry)
}

impl TryFrom<RawEntry> for MainlineEntry {
    type Error = ClassificationError;

    fn try_from(entry: RawEntry) -> Result<Self, Self::Error> {
        match entry {
            RawEntry {
                version: Some(version),
                ..
            } => Ok(MainlineEntry::Commit(version)),
            RawEntry {
                rolled_up_versions: Some(rolled_up),
                ..
            } => FoldedGroup::new(rolled_up).map(MainlineEntry::Folded),
            RawEntry { .. } => Err(ClassificationError::UnrecognizedEntry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(order: u64) -> Commit {
        Commit::new(order, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn version_entry_classifies_as_commit() {
        let entry = RawEntry::version(commit(5));
        assert_eq!(classify(&entry).unwrap(), MainlineEntry::Commit(commit(5)));
    }

    #[test]
    fn rolled_up_entry_classifies_as_folded() {
        let entry = RawEntry::rolled_up(vec![commit(4), commit(3)]);
        match classify(&entry).unwrap() {
            MainlineEntry::Folded(group) => assert_eq!(group.len(), 2),
            other => panic!("expected folded group, got {:?}", other),
        }
    }

    #[test]
    fn version_wins_when_both_fields_present() {
        let entry = RawEntry {
            version: Some(commit(9)),
            rolled_up_versions: Some(vec![commit(8)]),
        };
        assert_eq!(classify(&entry).unwrap(), MainlineEntry::Commit(commit(9)));
    }

    #[test]
    fn empty_rolled_up_list_is_an_error() {
        let entry = RawEntry::rolled_up(Vec::new());
        assert_eq!(classify(&entry), Err(ClassificationError::EmptyFoldedGroup));
    }

    #[test]
    fn entry_without_payload_is_an_error() {
        assert_eq!(
            classify(&RawEntry::default()),
            Err(ClassificationError::UnrecognizedEntry)
        );
    }

    #[test]
    fn try_from_agrees_with_classify() {
        let entries = vec![
            RawEntry::version(commit(1)),
            RawEntry::rolled_up(vec![commit(2)]),
            RawEntry::rolled_up(Vec::new()),
            RawEntry::default(),
        ];
        for entry in entries {
            assert_eq!(MainlineEntry::try_from(entry.clone()), classify(&entry));
        }
    }

    #[test]
    fn selection_never_matches_none() {
        let entry = MainlineEntry::Commit(commit(1));
        assert!(!entry.is_selected(None));
        assert!(entry.is_selected(Some(CommitOrder::new(1))));
    }

    #[test]
    fn raw_entry_deserializes_from_page_json() {
        let json = r#"{"rolledUpVersions":[{"order":3,"createTime":"2024-01-01T00:00:00Z"}]}"#;
        let entry: RawEntry = serde_json::from_str(json).unwrap();
        assert!(entry.version.is_none());
        assert_eq!(entry.rolled_up_versions.map(|v| v.len()), Some(1));
    }
}
