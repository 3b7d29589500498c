//! Square working buffer for the solver.

use crate::matrix::{Cost, CostMatrix};

/// N×N integer copy of a [`CostMatrix`], N = max(R, C).
///
/// Dummy rows and columns (index ≥ R or ≥ C) cost 0 against everything.
/// Forbidden cells become `sentinel`, which exceeds the cost of any
/// perfect matching built only from finite cells, so a forbidden edge is
/// used only when no finite alternative exists.
///
/// Dual potentials stay within `size * sentinel`, about
/// `(max_finite + 1) * size²`, which bounds the usable size in `i64`.
#[derive(Debug, Clone)]
pub(crate) struct PaddedMatrix {
    size: usize,
    rows: usize,
    cols: usize,
    sentinel: i64,
    cells: Vec<i64>,
}

impl PaddedMatrix {
    pub(crate) fn new(matrix: &CostMatrix) -> Self {
        let rows = matrix.rows();
        let cols = matrix.cols();
        let size = rows.max(cols);
        let max_finite = matrix.max_finite_cost().unwrap_or(0) as i64;
        // > size * max_finite
        let sentinel = (max_finite + 1) * size as i64 + 1;

        let mut cells = vec![0i64; size * size];
        for (i, row) in matrix.iter_rows().enumerate() {
            let dst = &mut cells[i * size..i * size + cols];
            for (slot, cost) in dst.iter_mut().zip(row) {
                *slot = match *cost {
                    Cost::Allowed(c) => c as i64,
                    Cost::Forbidden => sentinel,
                };
            }
        }

        Self {
            size,
            rows,
            cols,
            sentinel,
            cells,
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn sentinel(&self) -> i64 {
        self.sentinel
    }

    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> i64 {
        self.cells[row * self.size + col]
    }

    pub(crate) fn row_min(&self, row: usize) -> i64 {
        let start = row * self.size;
        self.cells[start..start + self.size]
            .iter()
            .copied()
            .min()
            .unwrap_or(0)
    }

    pub(crate) fn is_real_row(&self, row: usize) -> bool {
        row < self.rows
    }

    pub(crate) fn is_real_col(&self, col: usize) -> bool {
        col < self.cols
    }
}
