//! Rendering and persisting assignment results.
//!
//! - [`console`]: column-aligned, optionally colored lines for the loaded
//!   projects, picks, diagnostics and final pairings.
//! - [`writer`]: the `Assignments.csv` output file.
//!
//! Both return data or write to a caller-supplied sink; printing is left
//! to the binary.

pub mod console;
pub mod writer;

pub use console::{
    format_columns, render_assignments, render_diagnostics, render_picks, render_projects, Palette,
};
pub use writer::{write_assignments, write_assignments_to, DEFAULT_OUTPUT};
