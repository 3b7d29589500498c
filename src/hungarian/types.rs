//! Assignment result types.

use crate::matrix::Cost;

/// One matched (row, column) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentPair {
    /// Row index in the original matrix.
    pub row: usize,
    /// Column index in the original matrix.
    pub col: usize,
    /// Original (unpadded) cost of the edge.
    pub cost: Cost,
    /// The edge is forbidden: the row had no permitted column left and was
    /// placed here only to complete the matching.
    pub forced: bool,
}

/// Counters collected during a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStats {
    /// Side of the padded square matrix, max(R, C).
    pub padded_size: usize,
    /// Augmenting paths found (one per padded row).
    pub augmentations: usize,
    /// Potential updates performed across all searches.
    pub dual_updates: usize,
}

/// Result of solving an assignment problem.
///
/// When R ≤ C every row appears in exactly one pair. When R > C every
/// column is used once and the surplus rows are left unmatched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Matched pairs, ordered by row.
    pub pairs: Vec<AssignmentPair>,
    /// Sum of the finite costs of all non-forced pairs.
    pub total_cost: u64,
    /// Row count of the source matrix.
    pub rows: usize,
    /// Column count of the source matrix.
    pub cols: usize,
    /// Rows whose every cell is forbidden, whether or not they were
    /// matched.
    pub forbidden_rows: Vec<usize>,
    /// Solver counters.
    pub stats: SolveStats,
}

impl Assignment {
    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Column assigned to `row`, if any.
    pub fn col_for_row(&self, row: usize) -> Option<usize> {
        self.pairs
            .binary_search_by_key(&row, |p| p.row)
            .ok()
            .map(|idx| self.pairs[idx].col)
    }

    /// Row assigned to `col`, if any.
    pub fn row_for_col(&self, col: usize) -> Option<usize> {
        self.pairs.iter().find(|p| p.col == col).map(|p| p.row)
    }

    /// Rows without a pair (only possible when R > C).
    pub fn unmatched_rows(&self) -> Vec<usize> {
        let mut matched = vec![false; self.rows];
        for p in &self.pairs {
            matched[p.row] = true;
        }
        (0..self.rows).filter(|&r| !matched[r]).collect()
    }

    /// Columns without a pair (only possible when C > R).
    pub fn unmatched_cols(&self) -> Vec<usize> {
        let mut matched = vec![false; self.cols];
        for p in &self.pairs {
            matched[p.col] = true;
        }
        (0..self.cols).filter(|&c| !matched[c]).collect()
    }

    /// Number of pairs placed on a forbidden edge.
    pub fn forced_count(&self) -> usize {
        self.pairs.iter().filter(|p| p.forced).count()
    }

    /// Rows that got no permitted column: those matched over a forbidden
    /// edge plus all-forbidden rows left unmatched. Sorted.
    pub fn infeasible_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .pairs
            .iter()
            .filter(|p| p.forced)
            .map(|p| p.row)
            .chain(self.forbidden_rows.iter().copied())
            .collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }

    /// Returns `true` if every row with a pair got a permitted column and
    /// no row is entirely forbidden.
    pub fn is_feasible(&self) -> bool {
        self.forbidden_rows.is_empty() && self.pairs.iter().all(|p| !p.forced)
    }
}
