//! Display rows of the history table.
//!
//! A row is either a single commit, a folded group of commits, or a
//! date separator marking the start of a calendar day. Every row carries
//! the pixel height the virtualized list needs to place it.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::model::{Commit, CommitOrder};

/// Height of a row in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RowHeight(u32);

impl RowHeight {
    /// Create a new RowHeight from a raw pixel value.
    pub const fn new(height: u32) -> Self {
        Self(height)
    }

    /// Get the raw pixel value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Fixed row heights and the offset used to decide calendar days.
///
/// Passed explicitly into the builder and toggler; nothing reads
/// process-wide constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMetrics {
    /// Height of a commit row, and of each commit inside an expanded folded row.
    pub commit_height: RowHeight,
    /// Height of a collapsed folded row.
    pub folded_commits_height: RowHeight,
    /// Height of a date separator row.
    pub date_separator_height: RowHeight,
    /// Offset in which calendar days are compared and displayed.
    pub utc_offset: FixedOffset,
}

impl RowMetrics {
    /// Default commit row height in pixels.
    pub const COMMIT_HEIGHT: RowHeight = RowHeight::new(80);
    /// Default collapsed folded row height in pixels.
    pub const FOLDED_COMMITS_HEIGHT: RowHeight = RowHeight::new(40);
    /// Default date separator height in pixels.
    pub const DATE_SEPARATOR_HEIGHT: RowHeight = RowHeight::new(40);

    /// Create metrics from raw pixel heights, comparing days in UTC.
    pub fn new(commit_height: u32, folded_commits_height: u32, date_separator_height: u32) -> Self {
        Self {
            commit_height: RowHeight::new(commit_height),
            folded_commits_height: RowHeight::new(folded_commits_height),
            date_separator_height: RowHeight::new(date_separator_height),
            utc_offset: utc(),
        }
    }

    /// Same metrics with days compared in a different offset.
    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Height of a folded row holding `folded_count` commits when expanded.
    pub fn expanded_folded_height(&self, folded_count: usize) -> RowHeight {
        let count = u32::try_from(folded_count).unwrap_or(u32::MAX);
        RowHeight::new(
            self.folded_commits_height
                .get()
                .saturating_add(self.commit_height.get().saturating_mul(count)),
        )
    }

    /// Calendar day of `date` in the configured offset.
    pub fn calendar_day(&self, date: DateTime<Utc>) -> NaiveDate {
        date.with_timezone(&self.utc_offset).date_naive()
    }

    /// Whether two timestamps fall on the same calendar day.
    ///
    /// Compares year, month and day; two instants a minute apart across
    /// midnight are different days, twenty hours apart on one date are not.
    pub fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.calendar_day(a) == self.calendar_day(b)
    }
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            commit_height: Self::COMMIT_HEIGHT,
            folded_commits_height: Self::FOLDED_COMMITS_HEIGHT,
            date_separator_height: Self::DATE_SEPARATOR_HEIGHT,
            utc_offset: utc(),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// A single commit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRow {
    /// The commit shown on this row.
    pub commit: Commit,
    /// The commit's creation time.
    pub date: DateTime<Utc>,
    /// Whether this is the highlighted commit.
    pub selected: bool,
    /// Current pixel height.
    pub row_height: RowHeight,
}

/// A row standing for several rolled-up commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedCommitsRow {
    /// Rolled-up commits in upstream order, never empty.
    pub rolled_up_commits: Vec<Commit>,
    /// Creation time of the first rolled-up commit.
    pub date: DateTime<Utc>,
    /// Whether any rolled-up commit is the highlighted one.
    pub selected: bool,
    /// Collapsed or expanded pixel height.
    pub row_height: RowHeight,
}

/// Marks the start of a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSeparatorRow {
    /// Timestamp of the entry that starts the day.
    pub date: DateTime<Utc>,
    /// Current pixel height.
    pub row_height: RowHeight,
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// One commit.
    Commit(CommitRow),
    /// Several rolled-up commits, collapsible.
    Folded(FoldedCommitsRow),
    /// Start of a calendar day.
    DateSeparator(DateSeparatorRow),
}

impl Row {
    /// Date the row is grouped under.
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Row::Commit(row) => row.date,
            Row::Folded(row) => row.date,
            Row::DateSeparator(row) => row.date,
        }
    }

    /// Current pixel height.
    pub fn row_height(&self) -> RowHeight {
        match self {
            Row::Commit(row) => row.row_height,
            Row::Folded(row) => row.row_height,
            Row::DateSeparator(row) => row.row_height,
        }
    }

    /// Whether the row holds the selected commit. Separators never do.
    pub fn is_selected(&self) -> bool {
        match self {
            Row::Commit(row) => row.selected,
            Row::Folded(row) => row.selected,
            Row::DateSeparator(_) => false,
        }
    }

    /// Number of rolled-up commits, for folded rows only.
    pub fn folded_count(&self) -> Option<usize> {
        match self {
            Row::Folded(row) => Some(row.rolled_up_commits.len()),
            _ => None,
        }
    }

    /// Whether this is a folded row at its expanded height.
    ///
    /// The state is read from the height alone, the same way the toggler
    /// decides which way to flip.
    pub fn is_expanded(&self, metrics: &RowMetrics) -> bool {
        self.folded_count()
            .is_some_and(|n| self.row_height() == metrics.expanded_folded_height(n))
    }

    /// Whether this is a date separator.
    pub fn is_date_separator(&self) -> bool {
        matches!(self, Row::DateSeparator(_))
    }

    /// Whether any commit in the row has the given order.
    pub fn contains_order(&self, order: CommitOrder) -> bool {
        match self {
            Row::Commit(row) => row.commit.order == order,
            Row::Folded(row) => row.rolled_up_commits.iter().any(|c| c.order == order),
            Row::DateSeparator(_) => false,
        }
    }

    /// Copy of this row with only the height replaced.
    pub fn with_row_height(&self, row_height: RowHeight) -> Self {
        let mut row = self.clone();
        match &mut row {
            Row::Commit(r) => r.row_height = row_height,
            Row::Folded(r) => r.row_height = row_height,
            Row::DateSeparator(r) => r.row_height = row_height,
        }
        row
    }

    /// Copy of this row with the selection flag replaced. Separators are unchanged.
    pub fn with_selected(&self, selected: bool) -> Self {
        let mut row = self.clone();
        match &mut row {
            Row::Commit(r) => r.selected = selected,
            Row::Folded(r) => r.selected = selected,
            Row::DateSeparator(_) => {}
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn same_day_uses_calendar_components_not_24h_window() {
        let metrics = RowMetrics::default();
        assert!(metrics.is_same_day(at(1, 0, 1), at(1, 23, 59)));
        assert!(!metrics.is_same_day(at(1, 23, 59), at(2, 0, 1)));
    }

    #[test]
    fn same_day_respects_utc_offset() {
        // 23:30 UTC on Jan 1 is already Jan 2 at UTC+1.
        let east = FixedOffset::east_opt(3600).unwrap();
        let metrics = RowMetrics::default().with_utc_offset(east);
        assert!(metrics.is_same_day(at(1, 23, 30), at(2, 10, 0)));
        assert!(!RowMetrics::default().is_same_day(at(1, 23, 30), at(2, 10, 0)));
    }

    #[test]
    fn expanded_height_adds_one_commit_height_per_member() {
        let metrics = RowMetrics::new(80, 40, 40);
        assert_eq!(metrics.expanded_folded_height(0), RowHeight::new(40));
        assert_eq!(metrics.expanded_folded_height(3), RowHeight::new(280));
    }

    #[test]
    fn with_row_height_keeps_variant_and_fields() {
        let row = Row::Folded(FoldedCommitsRow {
            rolled_up_commits: vec![Commit::new(1, at(1, 0, 0))],
            date: at(1, 0, 0),
            selected: true,
            row_height: RowHeight::new(40),
        });
        let resized = row.with_row_height(RowHeight::new(120));
        assert_eq!(resized.row_height(), RowHeight::new(120));
        assert!(resized.is_selected());
        assert_eq!(resized.folded_count(), Some(1));
        assert_eq!(row.row_height(), RowHeight::new(40));
    }

    #[test]
    fn separators_are_never_selected() {
        let row = Row::DateSeparator(DateSeparatorRow {
            date: at(1, 0, 0),
            row_height: RowHeight::new(40),
        });
        assert!(!row.with_selected(true).is_selected());
        assert!(!row.contains_order(CommitOrder::new(1)));
    }

    #[test]
    fn is_expanded_reads_folded_height() {
        let metrics = RowMetrics::new(80, 40, 40);
        let folded = Row::Folded(FoldedCommitsRow {
            rolled_up_commits: vec![Commit::new(2, at(1, 0, 0)), Commit::new(1, at(1, 0, 0))],
            date: at(1, 0, 0),
            selected: false,
            row_height: metrics.folded_commits_height,
        });
        assert!(!folded.is_expanded(&metrics));
        assert!(folded
            .with_row_height(metrics.expanded_folded_height(2))
            .is_expanded(&metrics));

        let commit = Row::Commit(CommitRow {
            commit: Commit::new(3, at(1, 0, 0)),
            date: at(1, 0, 0),
            selected: false,
            row_height: metrics.expanded_folded_height(2),
        });
        assert!(!commit.is_expanded(&metrics));
    }
}
