//! Rectangular cost table.

use super::cost::Cost;
use crate::error::AssignError;
use std::fmt;

/// An immutable, rectangular R×C table of [`Cost`] cells.
///
/// Stored densely in row-major order. Construction validates the shape;
/// once built, a `CostMatrix` always has at least one row and one column.
///
/// # Examples
///
/// ```
/// use u_assign::matrix::{Cost, CostMatrix};
///
/// let m = CostMatrix::new(vec![
///     vec![Cost::Allowed(1), Cost::Allowed(2), Cost::Allowed(3)],
///     vec![Cost::Allowed(3), Cost::Allowed(2), Cost::Forbidden],
/// ])
/// .unwrap();
/// assert_eq!(m.rows(), 2);
/// assert_eq!(m.cols(), 3);
/// assert_eq!(m.get(1, 2), Cost::Forbidden);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<Cost>>", into = "Vec<Vec<Cost>>")
)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<Cost>,
}

impl CostMatrix {
    /// Builds a matrix from a table of rows.
    ///
    /// Fails with [`AssignError::InvalidMatrix`] if there are no rows, no
    /// columns, or the rows have unequal lengths.
    pub fn new(table: Vec<Vec<Cost>>) -> Result<Self, AssignError> {
        let rows = table.len();
        if rows == 0 {
            return Err(AssignError::InvalidMatrix("matrix has no rows".into()));
        }
        let cols = table[0].len();
        if cols == 0 {
            return Err(AssignError::InvalidMatrix("matrix has no columns".into()));
        }
        if let Some((i, row)) = table.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(AssignError::InvalidMatrix(format!(
                "row {i} has {} columns, expected {cols}",
                row.len()
            )));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in table {
            cells.extend(row);
        }
        Ok(Self { rows, cols, cells })
    }

    /// Builds a matrix from optional costs, where `None` is forbidden.
    pub fn from_options(table: Vec<Vec<Option<u32>>>) -> Result<Self, AssignError> {
        Self::new(
            table
                .into_iter()
                .map(|row| row.into_iter().map(Cost::from).collect())
                .collect(),
        )
    }

    /// Number of rows (R).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (C).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if R == C.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Cost at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Cost {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col]
    }

    /// All cells of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[Cost] {
        assert!(
            row < self.rows,
            "row {row} out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterates over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cost]> {
        self.cells.chunks_exact(self.cols)
    }

    /// Largest finite cost in the matrix, or `None` if every cell is forbidden.
    pub fn max_finite_cost(&self) -> Option<u32> {
        self.cells.iter().filter_map(|c| c.value()).max()
    }

    /// Returns `true` if every cell in `row` is forbidden.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn is_row_forbidden(&self, row: usize) -> bool {
        self.row(row).iter().all(|c| c.is_forbidden())
    }

    /// Returns a copy with one cell replaced.
    pub fn with_cell(&self, row: usize, col: usize, cost: Cost) -> Self {
        assert!(row < self.rows && col < self.cols, "cell out of bounds");
        let mut next = self.clone();
        next.cells[row * self.cols + col] = cost;
        next
    }
}

impl TryFrom<Vec<Vec<Cost>>> for CostMatrix {
    type Error = AssignError;

    fn try_from(table: Vec<Vec<Cost>>) -> Result<Self, Self::Error> {
        Self::new(table)
    }
}

impl From<CostMatrix> for Vec<Vec<Cost>> {
    fn from(m: CostMatrix) -> Self {
        m.iter_rows().map(<[Cost]>::to_vec).collect()
    }
}

impl fmt::Display for CostMatrix {
    /// Column-aligned rendering, one bracketed row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);
        for row in self.iter_rows() {
            f.write_str("[")?;
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:>width$}", cell.to_string())?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
