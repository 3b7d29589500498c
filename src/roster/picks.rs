//! Preferences file: associates and their ranked project picks.

use super::config::LoaderConfig;
use super::diagnostics::LoadReport;
use super::projects::ProjectDirectory;
use super::{open, read_rows};
use crate::error::AssignError;
use crate::matrix::Cost;
use std::io::Read;
use std::path::Path;

/// One associate and their picks, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatePicks {
    pub name: String,
    /// Upper-cased associate identifier.
    pub id: String,
    /// Project indices in preference order. Unresolvable picks are
    /// dropped, so ranks count only valid picks.
    pub picks: Vec<usize>,
}

impl AssociatePicks {
    /// 1-based rank of `project`, taking its first occurrence.
    pub fn rank_of(&self, project: usize) -> Option<u32> {
        self.picks
            .iter()
            .position(|&p| p == project)
            .map(|pos| pos as u32 + 1)
    }

    /// Cost row over vacancy columns.
    ///
    /// An associate with no picks may take any vacancy at cost 0;
    /// otherwise unpicked projects are forbidden.
    pub fn cost_row(&self, projects: &ProjectDirectory) -> Vec<Cost> {
        if self.picks.is_empty() {
            return vec![Cost::Allowed(0); projects.vacancy_count()];
        }
        projects
            .vacancy_owners()
            .iter()
            .map(|&owner| self.rank_of(owner).map_or(Cost::Forbidden, Cost::Allowed))
            .collect()
    }
}

/// All associates in file order; row `i` of the cost matrix is
/// `associates()[i]`.
#[derive(Debug, Clone, Default)]
pub struct PicksDirectory {
    associates: Vec<AssociatePicks>,
}

impl PicksDirectory {
    /// Loads the preferences file at `path`, resolving picks against
    /// `projects`.
    pub fn load(
        path: &Path,
        projects: &ProjectDirectory,
        config: &LoaderConfig,
    ) -> Result<(Self, LoadReport), AssignError> {
        let file = open(path)?;
        Self::from_reader(file, path, projects, config)
    }

    /// Loads preferences from any CSV source. `source` names it in errors.
    pub fn from_reader<R: Read>(
        reader: R,
        source: &Path,
        projects: &ProjectDirectory,
        config: &LoaderConfig,
    ) -> Result<(Self, LoadReport), AssignError> {
        let rows = read_rows(reader, source)?;
        let mut associates = Vec::new();
        let mut report = LoadReport::new();

        for (idx, row) in rows.iter().enumerate() {
            let line = idx + 1;
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

            if idx == 0 && cell(0) == config.picks_header {
                continue;
            }

            let name = cell(0);
            let id = cell(1).to_uppercase();
            if name.is_empty() {
                report.warn(line, "Associate is missing a name.");
            }
            if id.is_empty() {
                report.fixme(line, "Associate is missing an associate id.");
            }

            let mut picks = Vec::new();
            for pick in row.iter().skip(2).filter(|p| !p.is_empty()) {
                if pick.bytes().all(|b| b.is_ascii_digit()) {
                    match pick.parse::<usize>().ok().filter(|&i| i < projects.len()) {
                        Some(i) => picks.push(i),
                        None => report.fixme(line, format!("Project index {pick} is out of bounds.")),
                    }
                } else {
                    match projects.find(pick) {
                        Some(project) => picks.push(project.index),
                        None => report.fixme(
                            line,
                            format!(
                                "couldn't find project '{pick}' in projects file. \
                                 Consider fixing spelling (case insensitive) or using a \
                                 project index in place of the name."
                            ),
                        ),
                    }
                }
            }
            if picks.is_empty() {
                report.warn(line, "No picks have been chosen.");
            }

            associates.push(AssociatePicks {
                name: name.to_owned(),
                id,
                picks,
            });
        }

        tracing::info!(associates = associates.len(), "loaded associate picks");
        Ok((Self { associates }, report))
    }

    pub fn from_associates(associates: Vec<AssociatePicks>) -> Self {
        Self { associates }
    }

    pub fn len(&self) -> usize {
        self.associates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associates.is_empty()
    }

    pub fn associates(&self) -> &[AssociatePicks] {
        &self.associates
    }

    pub fn get(&self, row: usize) -> Option<&AssociatePicks> {
        self.associates.get(row)
    }
}
