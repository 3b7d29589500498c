//! Shortest augmenting path solver.

use super::config::SolverConfig;
use super::padded::PaddedMatrix;
use super::types::{Assignment, AssignmentPair, SolveStats};
use crate::error::AssignError;
use crate::matrix::{Cost, CostMatrix};

const UNASSIGNED: usize = usize::MAX;

/// Final matching on the padded matrix together with the dual potentials
/// that certify it.
#[derive(Debug)]
struct DualSolution {
    row_to_col: Vec<usize>,
    u: Vec<i64>,
    v: Vec<i64>,
}

impl DualSolution {
    // Widened: 2N potentials of up to N * sentinel each can exceed i64.
    fn dual_objective(&self) -> i128 {
        self.u.iter().chain(&self.v).map(|&p| i128::from(p)).sum()
    }

    fn primal_objective(&self, w: &PaddedMatrix) -> i128 {
        self.row_to_col
            .iter()
            .enumerate()
            .map(|(i, &j)| i128::from(w.at(i, j)))
            .sum()
    }
}

/// Minimum-cost rectangular assignment with forbidden edges.
///
/// The matrix is padded to N×N, then rows are inserted one at a time,
/// each by a Dijkstra-like search for the cheapest augmenting path under
/// reduced costs `c[i][j] - u[i] - v[j]`. Potentials are shifted by the
/// minimum slack whenever the search frontier stalls. Total work is
/// O(N³), N = max(R, C).
///
/// Ties between equal slacks go to the lowest column index and rows are
/// inserted in index order, so identical input always gives identical
/// output.
///
/// # Examples
///
/// ```
/// use u_assign::hungarian::HungarianSolver;
/// use u_assign::matrix::CostMatrix;
///
/// let m = CostMatrix::from_options(vec![
///     vec![Some(1), Some(2), Some(3)],
///     vec![Some(3), Some(2), Some(1)],
/// ])
/// .unwrap();
/// let result = HungarianSolver::solve(&m);
/// assert_eq!(result.total_cost, 2);
/// assert_eq!(result.col_for_row(0), Some(0));
/// assert_eq!(result.col_for_row(1), Some(2));
/// assert_eq!(result.unmatched_cols(), vec![1]);
/// ```
///
/// # References
///
/// - Kuhn (1955), "The Hungarian method for the assignment problem"
/// - Jonker & Volgenant (1987), "A shortest augmenting path algorithm for
///   dense and sparse linear assignment problems"
pub struct HungarianSolver;

impl HungarianSolver {
    /// Solves one assignment problem.
    ///
    /// The caller's matrix is only read. Pairs placed on a forbidden edge
    /// are returned with `forced = true` and excluded from `total_cost`.
    pub fn solve(matrix: &CostMatrix) -> Assignment {
        let padded = PaddedMatrix::new(matrix);
        tracing::debug!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            padded = padded.size(),
            sentinel = padded.sentinel(),
            "solving assignment"
        );

        let mut stats = SolveStats {
            padded_size: padded.size(),
            ..SolveStats::default()
        };
        let duals = shortest_augmenting_paths(&padded, &mut stats);
        debug_assert_eq!(duals.dual_objective(), duals.primal_objective(&padded));
        let result = extract(matrix, &padded, &duals.row_to_col, stats);

        for row in result.infeasible_rows() {
            match result.col_for_row(row) {
                Some(col) => tracing::warn!(row, col, "row matched over a forbidden edge"),
                None => tracing::warn!(row, "row has no permitted column"),
            }
        }
        tracing::debug!(
            total_cost = result.total_cost,
            pairs = result.len(),
            dual_updates = result.stats.dual_updates,
            "assignment solved"
        );
        result
    }

    /// Validates a raw table and solves it.
    ///
    /// Fails with [`AssignError::InvalidMatrix`] before any solving work
    /// if the table is empty or ragged.
    pub fn solve_rows(table: Vec<Vec<Cost>>) -> Result<Assignment, AssignError> {
        let matrix = CostMatrix::new(table)?;
        Ok(Self::solve(&matrix))
    }

    /// Solves independent problems, in parallel when configured.
    ///
    /// Results are in input order and identical to calling
    /// [`solve`](Self::solve) on each matrix.
    pub fn solve_batch(matrices: &[CostMatrix], config: &SolverConfig) -> Vec<Assignment> {
        config.validate().expect("invalid SolverConfig");

        if config.use_parallel(matrices.len()) {
            solve_parallel(matrices)
        } else {
            matrices.iter().map(Self::solve).collect()
        }
    }
}

#[cfg(feature = "parallel")]
fn solve_parallel(matrices: &[CostMatrix]) -> Vec<Assignment> {
    use rayon::prelude::*;
    matrices.par_iter().map(HungarianSolver::solve).collect()
}

#[cfg(not(feature = "parallel"))]
fn solve_parallel(matrices: &[CostMatrix]) -> Vec<Assignment> {
    matrices.iter().map(HungarianSolver::solve).collect()
}

/// Builds a perfect matching on the padded matrix.
///
/// Column index `n` is a virtual root holding the row being inserted.
/// Invariant: `w.at(i, j) - u[i] - v[j] >= 0` for every real cell, with
/// equality on matched edges.
fn shortest_augmenting_paths(w: &PaddedMatrix, stats: &mut SolveStats) -> DualSolution {
    let n = w.size();
    let root = n;

    let mut u: Vec<i64> = (0..n).map(|i| w.row_min(i)).collect();
    let mut v = vec![0i64; n + 1];
    let mut col_row = vec![UNASSIGNED; n + 1];
    let mut way = vec![root; n + 1];
    let mut min_slack = vec![i64::MAX; n + 1];
    let mut visited = vec![false; n + 1];

    for row in 0..n {
        col_row[root] = row;
        let mut j0 = root;
        min_slack.fill(i64::MAX);
        visited.fill(false);

        // Grow the search tree until it reaches a free column.
        loop {
            visited[j0] = true;
            let i0 = col_row[j0];
            let mut delta = i64::MAX;
            let mut j1 = root;

            for j in 0..n {
                if visited[j] {
                    continue;
                }
                let reduced = w.at(i0, j) - u[i0] - v[j];
                if reduced < min_slack[j] {
                    min_slack[j] = reduced;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if visited[j] {
                    u[col_row[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            stats.dual_updates += 1;

            j0 = j1;
            if col_row[j0] == UNASSIGNED {
                break;
            }
        }

        // Flip the alternating path back to the root.
        while j0 != root {
            let prev = way[j0];
            col_row[j0] = col_row[prev];
            j0 = prev;
        }
        stats.augmentations += 1;
        tracing::trace!(row, "augmented");
    }

    let mut row_to_col = vec![UNASSIGNED; n];
    for (col, &row) in col_row.iter().enumerate().take(n) {
        row_to_col[row] = col;
    }
    v.truncate(n);

    DualSolution { row_to_col, u, v }
}

/// Drops dummy pairs, tags each real pair with its original cost and
/// records the rows that have no permitted column.
fn extract(
    matrix: &CostMatrix,
    padded: &PaddedMatrix,
    row_to_col: &[usize],
    stats: SolveStats,
) -> Assignment {
    let mut pairs = Vec::with_capacity(matrix.rows().min(matrix.cols()));
    let mut total_cost = 0u64;

    for (row, &col) in row_to_col.iter().enumerate() {
        if !padded.is_real_row(row) || !padded.is_real_col(col) {
            continue;
        }
        let cost = matrix.get(row, col);
        if let Cost::Allowed(c) = cost {
            total_cost += u64::from(c);
        }
        pairs.push(AssignmentPair {
            row,
            col,
            cost,
            forced: cost.is_forbidden(),
        });
    }

    let forbidden_rows = (0..matrix.rows())
        .filter(|&r| matrix.is_row_forbidden(r))
        .collect();

    Assignment {
        pairs,
        total_cost,
        rows: matrix.rows(),
        cols: matrix.cols(),
        forbidden_rows,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(rows: &[&[Option<u32>]]) -> CostMatrix {
        CostMatrix::from_options(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn square(n: usize, value: u32) -> CostMatrix {
        CostMatrix::from_options(vec![vec![Some(value); n]; n]).unwrap()
    }

    /// Exhaustive optimum for small matrices, ordered by (forced edges,
    /// finite cost). The smaller side is matched into the larger one.
    fn brute_force(m: &CostMatrix) -> (usize, u64) {
        fn go(
            cost: &dyn Fn(usize, usize) -> Cost,
            small: usize,
            large: usize,
            i: usize,
            used: &mut Vec<bool>,
            acc: (usize, u64),
        ) -> (usize, u64) {
            if i == small {
                return acc;
            }
            let mut best = (usize::MAX, u64::MAX);
            for j in 0..large {
                if used[j] {
                    continue;
                }
                used[j] = true;
                let next = match cost(i, j) {
                    Cost::Allowed(c) => (acc.0, acc.1 + u64::from(c)),
                    Cost::Forbidden => (acc.0 + 1, acc.1),
                };
                best = best.min(go(cost, small, large, i + 1, used, next));
                used[j] = false;
            }
            best
        }
        if m.rows() <= m.cols() {
            let cost = |r: usize, c: usize| m.get(r, c);
            go(&cost, m.rows(), m.cols(), 0, &mut vec![false; m.cols()], (0, 0))
        } else {
            let cost = |c: usize, r: usize| m.get(r, c);
            go(&cost, m.cols(), m.rows(), 0, &mut vec![false; m.rows()], (0, 0))
        }
    }

    fn assert_valid_matching(m: &CostMatrix, a: &Assignment) {
        let mut row_seen = vec![false; m.rows()];
        let mut col_seen = vec![false; m.cols()];
        for p in &a.pairs {
            assert!(!row_seen[p.row], "row {} matched twice", p.row);
            assert!(!col_seen[p.col], "col {} matched twice", p.col);
            row_seen[p.row] = true;
            col_seen[p.col] = true;
            assert_eq!(p.cost, m.get(p.row, p.col));
            assert_eq!(p.forced, p.cost.is_forbidden());
        }
        assert_eq!(a.len(), m.rows().min(m.cols()));
        assert_eq!(a.rows, m.rows());
        assert_eq!(a.cols, m.cols());
        if m.rows() <= m.cols() {
            assert!(row_seen.iter().all(|&s| s));
        } else {
            assert!(col_seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_uniform_square() {
        for n in 1..=6 {
            let m = square(n, 7);
            let a = HungarianSolver::solve(&m);
            assert_valid_matching(&m, &a);
            assert_eq!(a.total_cost, 7 * n as u64);
        }
    }

    #[test]
    fn test_unbalanced_more_columns() {
        let m = matrix(&[&[Some(1), Some(2), Some(3)], &[Some(3), Some(2), Some(1)]]);
        let a = HungarianSolver::solve(&m);
        assert_eq!(a.total_cost, 2);
        assert_eq!(a.col_for_row(0), Some(0));
        assert_eq!(a.col_for_row(1), Some(2));
        assert_eq!(a.unmatched_cols(), vec![1]);
        assert!(a.is_feasible());
    }

    #[test]
    fn test_unbalanced_more_rows() {
        let m = matrix(&[&[Some(5)], &[Some(1)], &[Some(3)]]);
        let a = HungarianSolver::solve(&m);
        assert_valid_matching(&m, &a);
        assert_eq!(a.total_cost, 1);
        assert_eq!(a.row_for_col(0), Some(1));
        assert_eq!(a.unmatched_rows(), vec![0, 2]);
    }

    #[test]
    fn test_forbidden_diagonal() {
        let m = matrix(&[&[None, Some(1)], &[Some(1), None]]);
        let a = HungarianSolver::solve(&m);
        assert_eq!(a.total_cost, 2);
        assert_eq!(a.col_for_row(0), Some(1));
        assert_eq!(a.col_for_row(1), Some(0));
        assert!(a.is_feasible());
    }

    #[test]
    fn test_all_forbidden_row_is_flagged() {
        let m = matrix(&[
            &[Some(1), Some(4), Some(6)],
            &[None, None, None],
            &[Some(2), Some(1), Some(9)],
        ]);
        let a = HungarianSolver::solve(&m);
        assert_valid_matching(&m, &a);
        assert_eq!(a.infeasible_rows(), vec![1]);
        // rows 0 and 2 take their best disjoint columns
        assert_eq!(a.col_for_row(0), Some(0));
        assert_eq!(a.col_for_row(2), Some(1));
        assert_eq!(a.col_for_row(1), Some(2));
        assert_eq!(a.total_cost, 2);
    }

    #[test]
    fn test_all_forbidden_row_flagged_when_rows_outnumber_cols() {
        let m = matrix(&[&[Some(1), Some(2)], &[None, None], &[Some(2), Some(1)]]);
        let a = HungarianSolver::solve(&m);
        assert_valid_matching(&m, &a);
        assert_eq!(a.col_for_row(0), Some(0));
        assert_eq!(a.col_for_row(2), Some(1));
        assert_eq!(a.unmatched_rows(), vec![1]);
        assert_eq!(a.forced_count(), 0);
        assert_eq!(a.infeasible_rows(), vec![1]);
        assert!(!a.is_feasible());
        assert_eq!(a.total_cost, 2);
    }

    #[test]
    fn test_contested_single_column_forces_one_row() {
        let m = matrix(&[&[Some(1), None], &[Some(2), None]]);
        let a = HungarianSolver::solve(&m);
        assert_valid_matching(&m, &a);
        assert_eq!(a.infeasible_rows().len(), 1);
        assert_eq!(a.total_cost, 1);
        assert_eq!(a.col_for_row(0), Some(0));
    }

    #[test]
    fn test_forbidden_avoided_when_finite_exists() {
        // A finite perfect matching exists even though it is expensive.
        let m = matrix(&[&[Some(100), Some(1)], &[Some(100), None]]);
        let a = HungarianSolver::solve(&m);
        assert!(a.is_feasible());
        assert_eq!(a.col_for_row(1), Some(0));
        assert_eq!(a.total_cost, 101);
    }

    #[test]
    fn test_solve_rows_rejects_ragged() {
        let err = HungarianSolver::solve_rows(vec![
            vec![Cost::Allowed(1), Cost::Allowed(2)],
            vec![Cost::Allowed(1)],
        ])
        .unwrap_err();
        assert!(matches!(err, AssignError::InvalidMatrix(_)));
    }

    #[test]
    fn test_solve_does_not_mutate_input() {
        let m = matrix(&[&[Some(3), None], &[Some(1), Some(2)]]);
        let before = m.clone();
        let _ = HungarianSolver::solve(&m);
        assert_eq!(m, before);
    }

    #[test]
    fn test_idempotent() {
        let m = matrix(&[
            &[Some(1), Some(1), Some(1)],
            &[Some(1), Some(1), Some(1)],
        ]);
        let a = HungarianSolver::solve(&m);
        let b = HungarianSolver::solve(&m);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tie_break_prefers_lowest_column() {
        let pairing = |a: &Assignment| -> Vec<(usize, usize)> {
            a.pairs.iter().map(|p| (p.row, p.col)).collect()
        };

        let a = HungarianSolver::solve(&square(3, 0));
        assert_eq!(pairing(&a), vec![(0, 0), (1, 1), (2, 2)]);

        let wide = matrix(&[&[Some(4); 4], &[Some(4); 4]]);
        let a = HungarianSolver::solve(&wide);
        assert_eq!(pairing(&a), vec![(0, 0), (1, 1)]);
        assert_eq!(a.unmatched_cols(), vec![2, 3]);

        let tall = matrix(&[&[Some(4), Some(4)], &[Some(4), Some(4)], &[Some(4), Some(4)]]);
        let a = HungarianSolver::solve(&tall);
        // later rows displace earlier ones onto the zero-cost dummy column
        assert_eq!(pairing(&a), vec![(1, 0), (2, 1)]);
        assert_eq!(a.unmatched_rows(), vec![0]);
    }

    #[test]
    fn test_stats() {
        let m = matrix(&[&[Some(1), Some(2), Some(3)]]);
        let a = HungarianSolver::solve(&m);
        assert_eq!(a.stats.padded_size, 3);
        assert_eq!(a.stats.augmentations, 3);
        assert!(a.stats.dual_updates >= 3);
    }

    #[test]
    fn test_dual_certificate() {
        let m = matrix(&[
            &[Some(4), Some(1), Some(3), None],
            &[Some(2), Some(0), Some(5), Some(3)],
            &[Some(3), Some(2), Some(2), Some(1)],
        ]);
        let padded = PaddedMatrix::new(&m);
        let mut stats = SolveStats::default();
        let duals = shortest_augmenting_paths(&padded, &mut stats);
        let n = padded.size();
        for i in 0..n {
            for j in 0..n {
                let reduced = padded.at(i, j) - duals.u[i] - duals.v[j];
                assert!(reduced >= 0, "negative reduced cost at ({i}, {j})");
            }
            let j = duals.row_to_col[i];
            assert_eq!(padded.at(i, j), duals.u[i] + duals.v[j]);
        }
    }

    #[test]
    fn test_near_max_costs() {
        let n = 40;
        let rows: Vec<Vec<Option<u32>>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| match (i + j) % 7 {
                        0 => None,
                        k => Some(u32::MAX - k as u32),
                    })
                    .collect()
            })
            .collect();
        let m = CostMatrix::from_options(rows).unwrap();
        let a = HungarianSolver::solve(&m);
        assert_valid_matching(&m, &a);
        assert!(a.is_feasible());
        assert!(a.total_cost >= n as u64 * u64::from(u32::MAX - 6));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let batch = vec![
            square(3, 2),
            matrix(&[&[None, Some(1)], &[Some(1), None]]),
            matrix(&[&[Some(1), Some(2), Some(3)], &[Some(3), Some(2), Some(1)]]),
        ];
        let sequential: Vec<Assignment> = batch.iter().map(HungarianSolver::solve).collect();
        let config = SolverConfig::default();
        assert_eq!(HungarianSolver::solve_batch(&batch, &config), sequential);
        let config = SolverConfig::default().with_parallel(false);
        assert_eq!(HungarianSolver::solve_batch(&batch, &config), sequential);
    }

    fn arb_matrix(max_rows: usize, max_cols: usize) -> impl Strategy<Value = CostMatrix> {
        (1..=max_rows, 1..=max_cols).prop_flat_map(|(r, c)| {
            prop::collection::vec(
                prop::collection::vec(
                    prop_oneof![4 => (0u32..20).prop_map(Some), 1 => Just(None)],
                    c,
                ),
                r,
            )
            .prop_map(|t| CostMatrix::from_options(t).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_valid_matching(m in arb_matrix(7, 7)) {
            let a = HungarianSolver::solve(&m);
            assert_valid_matching(&m, &a);
        }

        #[test]
        fn prop_matches_brute_force(m in arb_matrix(6, 6)) {
            let a = HungarianSolver::solve(&m);
            let (forced, cost) = brute_force(&m);
            prop_assert_eq!(a.forced_count(), forced);
            prop_assert_eq!(a.total_cost, cost);
        }

        #[test]
        fn prop_forbidden_rows_always_infeasible(m in arb_matrix(6, 6)) {
            let a = HungarianSolver::solve(&m);
            let infeasible = a.infeasible_rows();
            for r in 0..m.rows() {
                if m.is_row_forbidden(r) {
                    prop_assert!(infeasible.contains(&r));
                }
            }
            prop_assert_eq!(a.is_feasible(), infeasible.is_empty());
        }

        #[test]
        fn prop_deterministic(m in arb_matrix(8, 8)) {
            prop_assert_eq!(HungarianSolver::solve(&m), HungarianSolver::solve(&m));
        }

        #[test]
        fn prop_monotone_in_cell_cost(
            m in arb_matrix(6, 6),
            r in any::<prop::sample::Index>(),
            c in any::<prop::sample::Index>(),
            bump in 1u32..10,
        ) {
            let row = r.index(m.rows());
            let col = c.index(m.cols());
            if let Cost::Allowed(old) = m.get(row, col) {
                let base = HungarianSolver::solve(&m);
                let raised = HungarianSolver::solve(&m.with_cell(row, col, Cost::Allowed(old + bump)));
                prop_assume!(base.infeasible_rows().len() == raised.infeasible_rows().len());
                prop_assert!(raised.total_cost >= base.total_cost);
            }
        }
    }
}
