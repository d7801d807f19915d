//! HeightIndex - O(log n) row offsets via Fenwick tree
//!
//! Tracks cumulative pixel heights of the history rows so the virtualized
//! list can scroll to a row index, or find the row under a vertical offset,
//! without summing the whole sequence after every expand/collapse.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum` / `offset_of`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `push`: O(log n) amortized
//! - `len`: O(1)

use super::row::{Row, RowHeight};

/// Cumulative row heights backed by a Fenwick tree.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree storage, sized to capacity (>= heights.len()).
    tree: Vec<i64>,
    /// Plain per-row heights; the tree is rebuilt from these when it grows.
    heights: Vec<RowHeight>,
}

impl HeightIndex {
    /// Creates an empty index with room for `capacity` rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use histrow::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::new(100);
    /// assert_eq!(index.len(), 0);
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Builds an index over the heights of `rows`.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut index = Self::new(rows.len());
        index.extend(rows);
        index
    }

    /// Appends the heights of `rows`.
    pub fn extend(&mut self, rows: &[Row]) {
        for row in rows {
            self.push(row.row_height());
        }
    }

    /// Appends a row height, growing the tree if needed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use histrow::view_state::height_index::HeightIndex;
    /// # use histrow::view_state::row::RowHeight;
    /// let mut index = HeightIndex::new(1);
    /// index.push(RowHeight::new(40));
    /// index.push(RowHeight::new(80));
    /// assert_eq!(index.len(), 2);
    /// assert_eq!(index.total(), 120);
    /// ```
    pub fn push(&mut self, height: RowHeight) {
        let idx = self.heights.len();
        self.heights.push(height);

        if idx >= self.tree.len() {
            // Growing leaves zeroed nodes that should cover earlier rows,
            // so rebuild from the plain heights.
            self.rebuild(self.tree.len().max(1) * 2);
        } else {
            fenwick::array::update(&mut self.tree, idx, i64::from(height.get()));
        }
    }

    /// Replaces the height at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, height: RowHeight) {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let delta = i64::from(height.get()) - i64::from(self.heights[index].get());
        self.heights[index] = height;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Height of the row at `index`, if any.
    pub fn height(&self, index: usize) -> Option<RowHeight> {
        self.heights.get(index).copied()
    }

    /// Cumulative height up to and including `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn prefix_sum(&self, index: usize) -> u64 {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as u64
    }

    /// Vertical offset at which row `index` starts.
    ///
    /// `offset_of(len())` is the total height; larger indices return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use histrow::view_state::height_index::HeightIndex;
    /// # use histrow::view_state::row::RowHeight;
    /// let mut index = HeightIndex::new(4);
    /// index.push(RowHeight::new(40));
    /// index.push(RowHeight::new(80));
    /// assert_eq!(index.offset_of(0), Some(0));
    /// assert_eq!(index.offset_of(1), Some(40));
    /// assert_eq!(index.offset_of(2), Some(120));
    /// assert_eq!(index.offset_of(3), None);
    /// ```
    pub fn offset_of(&self, index: usize) -> Option<u64> {
        match index {
            0 => Some(0),
            i if i <= self.len() => Some(self.prefix_sum(i - 1)),
            _ => None,
        }
    }

    /// Row containing vertical offset `value`: the first index whose
    /// cumulative height exceeds it. `None` past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// # use histrow::view_state::height_index::HeightIndex;
    /// # use histrow::view_state::row::RowHeight;
    /// let mut index = HeightIndex::new(10);
    /// index.push(RowHeight::new(10));  // [0..10)
    /// index.push(RowHeight::new(20));  // [10..30)
    /// index.push(RowHeight::new(15));  // [30..45)
    ///
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(30), Some(2));
    /// assert_eq!(index.lower_bound(45), None);
    /// ```
    pub fn lower_bound(&self, value: u64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        if left >= self.len() {
            None
        } else {
            Some(left)
        }
    }

    /// Total height of all rows.
    pub fn total(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True if the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity.max(self.heights.len()), 0);
        for (idx, height) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, idx, i64::from(height.get()));
        }
    }
}
