//! Cost matrices for assignment problems.
//!
//! A [`CostMatrix`] is an immutable R×C grid of [`Cost`] cells. Rows are the
//! entities being assigned (associates), columns are the slots they can be
//! assigned to (vacancies). R and C need not be equal.
//!
//! Forbidden edges are a tagged [`Cost::Forbidden`] value rather than a
//! large integer. The solver converts them to a bounded numeric sentinel
//! internally.

mod cost;
mod table;

pub use cost::Cost;
pub use table::CostMatrix;
