//! Hungarian method for rectangular assignment problems.
//!
//! Finds a minimum-cost matching that saturates the smaller side of a
//! [`CostMatrix`](crate::matrix::CostMatrix), which may be non-square and
//! may contain forbidden cells.
//!
//! # Key Components
//!
//! - **Solver**: [`HungarianSolver`]: primal-dual shortest augmenting path
//! - **Result**: [`Assignment`] of [`AssignmentPair`]s with total cost
//! - **Config**: [`SolverConfig`]: batch parallelism
//!
//! # Forbidden edges
//!
//! A row whose every permitted column is taken (or that has none at all)
//! is matched over a forbidden edge when a column is free for it. Such pairs carry
//! `forced = true` and are listed by [`Assignment::infeasible_rows`] so
//! callers can warn instead of presenting the pairing as a real choice.
//! The solver always minimizes the number of forced pairs first.
//!
//! When rows outnumber columns an all-forbidden row is left unmatched
//! rather than forced; it is still listed by `infeasible_rows`.
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian method for the assignment problem"
//! - Munkres (1957), "Algorithms for the Assignment and Transportation Problems"
//! - Bourgeois & Lassalle (1971), "An extension of the Munkres algorithm for
//!   the assignment problem to rectangular matrices"

mod config;
mod padded;
mod runner;
mod types;

pub use config::SolverConfig;
pub use runner::HungarianSolver;
pub use types::{Assignment, AssignmentPair, SolveStats};
