//! Projects file: named projects with vacancy counts.

use super::config::LoaderConfig;
use super::diagnostics::LoadReport;
use super::{open, read_rows};
use crate::error::AssignError;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One project row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// 0-based position among data rows; picks may refer to it by number.
    pub index: usize,
    pub name: String,
    pub vacancies: usize,
    /// Free-text attributes (columns after the vacancy count).
    pub tech: Vec<String>,
}

/// All projects, with lookup by case-insensitive name and by vacancy column.
///
/// A project with `k` vacancies owns `k` consecutive columns of the cost
/// matrix.
#[derive(Debug, Clone, Default)]
pub struct ProjectDirectory {
    projects: Vec<Project>,
    by_name: HashMap<String, usize>,
    vacancy_owner: Vec<usize>,
}

impl ProjectDirectory {
    /// Loads the projects file at `path`.
    pub fn load(path: &Path, config: &LoaderConfig) -> Result<(Self, LoadReport), AssignError> {
        let file = open(path)?;
        Self::from_reader(file, path, config)
    }

    /// Loads projects from any CSV source. `source` names it in errors.
    pub fn from_reader<R: Read>(
        reader: R,
        source: &Path,
        config: &LoaderConfig,
    ) -> Result<(Self, LoadReport), AssignError> {
        let rows = read_rows(reader, source)?;
        let mut dir = Self::default();
        let mut report = LoadReport::new();

        for (idx, row) in rows.iter().enumerate() {
            let line = idx + 1;
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

            if idx == 0 && cell(0) == config.projects_header {
                continue;
            }

            let name = cell(0);
            if name.is_empty() {
                report.fixme(line, "No name specified for project.");
            }

            let vacancies = match cell(1) {
                "" => {
                    report.warn(
                        line,
                        format!(
                            "No number of vacancies specified for project. Assuming {} free spot(s).",
                            config.default_vacancies
                        ),
                    );
                    config.default_vacancies
                }
                raw => match raw.parse::<usize>() {
                    Ok(n) if raw.bytes().all(|b| b.is_ascii_digit()) => n,
                    _ => {
                        report.warn(
                            line,
                            format!(
                                "Number of vacancies for project is not a number. Assuming {} free spot(s).",
                                config.default_vacancies
                            ),
                        );
                        config.default_vacancies
                    }
                },
            };

            let tech: Vec<String> = row
                .iter()
                .skip(2)
                .filter(|t| !t.is_empty())
                .cloned()
                .collect();
            if tech.is_empty() {
                report.warn(line, "Project has no tech specified.");
            }

            let key = name.to_lowercase();
            if !name.is_empty() && dir.by_name.contains_key(&key) {
                report.warn(
                    line,
                    format!("Duplicate project name '{name}'; lookups by name use the first one."),
                );
            }

            dir.push(Project {
                index: dir.projects.len(),
                name: name.to_owned(),
                vacancies,
                tech,
            });
        }

        tracing::info!(
            projects = dir.len(),
            vacancies = dir.vacancy_count(),
            "loaded projects"
        );
        Ok((dir, report))
    }

    fn push(&mut self, project: Project) {
        let idx = self.projects.len();
        if !project.name.is_empty() {
            self.by_name
                .entry(project.name.to_lowercase())
                .or_insert(idx);
        }
        self.vacancy_owner
            .extend(std::iter::repeat(idx).take(project.vacancies));
        self.projects.push(project);
    }

    /// Builds a directory from already-parsed projects, re-indexing them.
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let mut dir = Self::default();
        for mut project in projects {
            project.index = dir.projects.len();
            dir.push(project);
        }
        dir
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Project at 0-based `index`.
    pub fn get(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    /// Case-insensitive name lookup.
    pub fn find(&self, name: &str) -> Option<&Project> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.projects[idx])
    }

    /// Total vacancies, i.e. the number of cost-matrix columns.
    pub fn vacancy_count(&self) -> usize {
        self.vacancy_owner.len()
    }

    /// Project owning vacancy column `col`.
    pub fn project_for_vacancy(&self, col: usize) -> Option<&Project> {
        self.vacancy_owner.get(col).map(|&idx| &self.projects[idx])
    }

    /// Project index owning each vacancy column, in column order.
    pub fn vacancy_owners(&self) -> &[usize] {
        &self.vacancy_owner
    }
}
