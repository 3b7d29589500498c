//! Preference-based assignment of people to slots.
//!
//! Provides:
//!
//! - **Matrix**: [`matrix::CostMatrix`], a validated rectangular grid of
//!   rank costs where some edges are [`matrix::Cost::Forbidden`].
//! - **Hungarian**: [`hungarian::HungarianSolver`], a minimum-cost
//!   rectangular assignment solver that flags rows it could only place
//!   over forbidden edges.
//! - **Roster**: CSV loading of projects (with vacancy counts) and
//!   associate preference lists into a cost matrix, with per-row
//!   diagnostics instead of a global validity flag.
//! - **Report**: console rendering and CSV output of the final pairings.
//!
//! # Architecture
//!
//! The solver is pure and synchronous; it holds no state between calls.
//! Loading and reporting are thin layers around it used by the
//! `project-assigner` binary.

pub mod error;
pub mod hungarian;
pub mod matrix;
pub mod report;
pub mod roster;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::AssignError;
