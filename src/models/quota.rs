//! Quota sequences and block lookup.
//!
//! A quota sequence lists how many interchangeable units each group (or
//! work type) contributes. Units are laid out contiguously in index order,
//! so group 0 owns rows `[0, a0)`, group 1 owns `[a0, a0 + a1)`, and so on.

use serde::{Deserialize, Serialize};

/// Ordered unit counts for one axis of the problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas {
    counts: Vec<usize>,
}

impl Quotas {
    /// Wraps a count sequence. No validation is done here; see
    /// [`crate::validation`].
    pub fn new(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// The raw counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Unwraps the raw counts.
    pub fn into_counts(self) -> Vec<usize> {
        self.counts
    }

    /// Number of blocks (groups or work types).
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether there are no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of units across all blocks, or `None` if it does not
    /// fit in a `usize`.
    pub fn checked_total(&self) -> Option<usize> {
        self.counts
            .iter()
            .try_fold(0usize, |total, &count| total.checked_add(count))
    }

    /// Total number of units across all blocks, saturating at `usize::MAX`.
    /// Validated problems never saturate.
    pub fn total(&self) -> usize {
        self.checked_total().unwrap_or(usize::MAX)
    }

    /// Builds the boundary table for reverse lookup.
    pub fn block_index(&self) -> BlockIndex {
        BlockIndex::new(&self.counts)
    }
}

impl From<Vec<usize>> for Quotas {
    fn from(counts: Vec<usize>) -> Self {
        Self::new(counts)
    }
}

/// Precomputed block boundaries mapping a unit index back to its block.
///
/// `starts[k]` is the first unit of block `k`; the last entry is the total.
///
/// # Example
/// ```
/// use u_assign::models::BlockIndex;
///
/// let index = BlockIndex::new(&[1, 2, 3]);
/// assert_eq!(index.block_of(0), Some(0));
/// assert_eq!(index.block_of(1), Some(1)); // boundary belongs to the new block
/// assert_eq!(index.block_of(5), Some(2));
/// assert_eq!(index.block_of(6), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockIndex {
    starts: Vec<usize>,
}

impl BlockIndex {
    /// Builds the table from per-block counts. Boundaries saturate at
    /// `usize::MAX`.
    pub fn new(counts: &[usize]) -> Self {
        let mut starts = Vec::with_capacity(counts.len() + 1);
        let mut offset = 0usize;
        starts.push(offset);
        for &count in counts {
            offset = offset.saturating_add(count);
            starts.push(offset);
        }
        Self { starts }
    }

    /// Total number of units covered.
    pub fn total(&self) -> usize {
        self.starts.last().copied().unwrap_or(0)
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Unit range `[start, end)` of a block.
    pub fn range(&self, block: usize) -> Option<std::ops::Range<usize>> {
        if block >= self.block_count() {
            return None;
        }
        Some(self.starts[block]..self.starts[block + 1])
    }

    /// Returns the block owning `unit`, or `None` when out of range.
    ///
    /// O(log m) binary search over the boundaries. Zero-sized blocks never
    /// own a unit.
    pub fn block_of(&self, unit: usize) -> Option<usize> {
        if unit >= self.total() {
            return None;
        }
        // First boundary strictly greater than `unit`, minus one.
        let upper = self.starts.partition_point(|&start| start <= unit);
        Some(upper - 1)
    }
}
