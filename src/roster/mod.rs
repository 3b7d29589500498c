//! Loading projects and associate preferences into a cost matrix.
//!
//! Two CSV files feed the solver:
//!
//! - **Projects**: `name, vacancies, tech...`, one row per project; a
//!   project with `k` vacancies contributes `k` matrix columns.
//! - **Preferences**: `associate name, associate id, pick1, pick2, ...`;
//!   picks are project names (case-insensitive) or 0-based project indices.
//!
//! The cost of an associate/vacancy cell is the 1-based rank of the
//! vacancy's project in the associate's picks, or forbidden if the project
//! was not picked. An associate with no valid picks gets an all-zero row
//! and can fill any vacancy.
//!
//! Problems are collected per row in a [`LoadReport`]. A report with any
//! [`Severity::FixMe`] finding means the data must be corrected before
//! solving.

mod config;
mod diagnostics;
mod picks;
mod projects;

pub use config::LoaderConfig;
pub use diagnostics::{Diagnostic, LoadReport, Severity};
pub use picks::{AssociatePicks, PicksDirectory};
pub use projects::{Project, ProjectDirectory};

use crate::error::AssignError;
use crate::matrix::CostMatrix;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Projects and preferences loaded together, plus every finding.
#[derive(Debug, Clone)]
pub struct Roster {
    pub projects: ProjectDirectory,
    pub picks: PicksDirectory,
    pub report: LoadReport,
}

impl Roster {
    /// Loads both files. Only unreadable or malformed CSV is an error;
    /// data problems land in [`Roster::report`].
    pub fn load(
        projects_path: &Path,
        picks_path: &Path,
        config: &LoaderConfig,
    ) -> Result<Self, AssignError> {
        config.validate().map_err(AssignError::InvalidConfig)?;
        let (projects, mut report) = ProjectDirectory::load(projects_path, config)?;
        let (picks, picks_report) = PicksDirectory::load(picks_path, &projects, config)?;
        report.merge(picks_report);
        Ok(Self {
            projects,
            picks,
            report,
        })
    }

    /// Returns `true` if no finding requires a fix.
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Builds the associates × vacancies cost matrix.
    ///
    /// Fails with [`AssignError::InvalidMatrix`] when there are no
    /// associates or no vacancies.
    pub fn cost_matrix(&self) -> Result<CostMatrix, AssignError> {
        if self.projects.vacancy_count() == 0 {
            return Err(AssignError::InvalidMatrix(
                "projects file defines no vacancies".into(),
            ));
        }
        if self.picks.is_empty() {
            return Err(AssignError::InvalidMatrix(
                "preferences file lists no associates".into(),
            ));
        }
        CostMatrix::new(
            self.picks
                .associates()
                .iter()
                .map(|a| a.cost_row(&self.projects))
                .collect(),
        )
    }
}

pub(crate) fn open(path: &Path) -> Result<File, AssignError> {
    File::open(path).map_err(|source| AssignError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads every record as owned, trimmed cells. Rows may have any length.
pub(crate) fn read_rows<R: Read>(reader: R, source: &Path) -> Result<Vec<Vec<String>>, AssignError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|err| AssignError::Csv {
            path: source.to_path_buf(),
            source: err,
        })?;
        rows.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    if let Some(first) = rows.first_mut().and_then(|r| r.first_mut()) {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_owned();
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hungarian::HungarianSolver;
    use crate::matrix::Cost;
    use std::io::Write;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_and_build_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let projects = write(
            &dir,
            "Projects.csv",
            "Project Name,Vacancies,Tech\nApollo,2,Rust\nGemini,1,Go\n",
        );
        let picks = write(
            &dir,
            "Preferences.csv",
            "Associate Name,Associate Id,Pick 1,Pick 2\nAda,a1,Gemini,Apollo\nBob,b2,gemini\nCy,c3\n",
        );

        let roster = Roster::load(&projects, &picks, &LoaderConfig::default()).unwrap();
        assert!(roster.is_valid());
        assert_eq!(roster.report.warnings().count(), 1);

        let m = roster.cost_matrix().unwrap();
        assert_eq!((m.rows(), m.cols()), (3, 3));
        assert_eq!(m.row(1), &[Cost::Forbidden, Cost::Forbidden, Cost::Allowed(1)]);
        assert_eq!(m.row(2), &[Cost::Allowed(0); 3]);

        let a = HungarianSolver::solve(&m);
        assert!(a.is_feasible());
        // Bob only wants Gemini; Ada falls back to Apollo.
        assert_eq!(a.col_for_row(1), Some(2));
        assert_eq!(a.pairs[0].cost, Cost::Allowed(2));
        assert_eq!(a.total_cost, 3);
    }

    #[test]
    fn test_invalid_data_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let projects = write(&dir, "p.csv", "Apollo,1,Rust\n");
        let picks = write(&dir, "a.csv", "Ada,,Voyager\n");
        let roster = Roster::load(&projects, &picks, &LoaderConfig::default()).unwrap();
        assert!(!roster.is_valid());
        assert_eq!(roster.report.fixmes().count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Roster::load(
            &dir.path().join("nope.csv"),
            &dir.path().join("nope2.csv"),
            &LoaderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AssignError::Io { .. }));
    }

    #[test]
    fn test_empty_inputs_are_invalid_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let projects = write(&dir, "p.csv", "Project Name,Vacancies,Tech\n");
        let picks = write(&dir, "a.csv", "Ada,A1\n");
        let roster = Roster::load(&projects, &picks, &LoaderConfig::default()).unwrap();
        assert!(matches!(
            roster.cost_matrix(),
            Err(AssignError::InvalidMatrix(_))
        ));
    }
}
