//! Assignments output file.

use crate::error::AssignError;
use crate::hungarian::Assignment;
use crate::roster::Roster;
use std::io::Write;
use std::path::Path;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "Assignments.csv";

/// Writes `associate name, associate id, project name` for every pair to
/// `path`, without a header row. Returns the number of rows written.
pub fn write_assignments(
    path: &Path,
    roster: &Roster,
    assignment: &Assignment,
) -> Result<usize, AssignError> {
    let file = std::fs::File::create(path).map_err(|source| AssignError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let written = write_assignments_to(file, path, roster, assignment)?;
    tracing::info!(path = %path.display(), rows = written, "wrote assignments");
    Ok(written)
}

/// Same as [`write_assignments`] for any writer. `target` names it in errors.
pub fn write_assignments_to<W: Write>(
    writer: W,
    target: &Path,
    roster: &Roster,
    assignment: &Assignment,
) -> Result<usize, AssignError> {
    let csv_err = |source: csv::Error| AssignError::Csv {
        path: target.to_path_buf(),
        source,
    };
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut written = 0;
    for pair in &assignment.pairs {
        let (name, id) = roster
            .picks
            .get(pair.row)
            .map_or(("", ""), |a| (a.name.as_str(), a.id.as_str()));
        let project = roster
            .projects
            .project_for_vacancy(pair.col)
            .map_or("", |p| p.name.as_str());
        wtr.write_record([name, id, project]).map_err(csv_err)?;
        written += 1;
    }
    wtr.flush().map_err(|source| AssignError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    Ok(written)
}
