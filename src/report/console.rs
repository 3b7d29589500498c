//! Column-aligned console rendering.

use crate::hungarian::Assignment;
use crate::matrix::Cost;
use crate::roster::{LoadReport, PicksDirectory, ProjectDirectory, Roster, Severity};

const OK_BLUE: &str = "\x1b[94m";
const OK_GREEN: &str = "\x1b[92m";
const WARNING: &str = "\x1b[93m";
const FAIL: &str = "\x1b[91m";
const BOLD: &str = "\x1b[1m";
const END: &str = "\x1b[0m";

/// Extra spaces after the widest cell of each column.
pub const COLUMN_PADDING: usize = 2;

/// ANSI coloring that can be switched off for pipes and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{END}")
        } else {
            text.to_owned()
        }
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(OK_BLUE, text)
    }

    pub fn ok(&self, text: &str) -> String {
        self.paint(OK_GREEN, text)
    }

    pub fn warn(&self, text: &str) -> String {
        self.paint(WARNING, text)
    }

    pub fn fail(&self, text: &str) -> String {
        self.paint(FAIL, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }
}

/// Pads every column to its widest cell plus `padding`.
///
/// Rows shorter than the first row are padded with empty cells. Trailing
/// whitespace is trimmed from each line.
pub fn format_columns(rows: &[Vec<String>], padding: usize) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let widths: Vec<usize> = (0..first.len())
        .map(|i| {
            rows.iter()
                .map(|r| r.get(i).map_or(0, |c| c.chars().count()))
                .max()
                .unwrap_or(0)
                + padding
        })
        .collect();

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, width) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                line.push_str(&format!("{cell:<width$}"));
            }
            line.trim_end().to_owned()
        })
        .collect()
}

/// One line per project: name, vacancies, tech.
pub fn render_projects(projects: &ProjectDirectory) -> Vec<String> {
    let rows: Vec<Vec<String>> = projects
        .projects()
        .iter()
        .map(|p| {
            vec![
                format!("{}:", p.name),
                format!("vacancies={}", p.vacancies),
                format!("tech={:?}", p.tech),
            ]
        })
        .collect();
    format_columns(&rows, COLUMN_PADDING)
}

/// One line per associate: id and resolved pick names.
pub fn render_picks(picks: &PicksDirectory, projects: &ProjectDirectory) -> Vec<String> {
    let rows: Vec<Vec<String>> = picks
        .associates()
        .iter()
        .map(|a| {
            let names: Vec<&str> = a
                .picks
                .iter()
                .filter_map(|&i| projects.get(i).map(|p| p.name.as_str()))
                .collect();
            vec![a.id.clone(), format!("picks={names:?}")]
        })
        .collect();
    format_columns(&rows, COLUMN_PADDING)
}

/// Warnings first, then FixMe findings, each colored by severity.
pub fn render_diagnostics(report: &LoadReport, palette: Palette) -> Vec<String> {
    report
        .warnings()
        .chain(report.fixmes())
        .map(|d| {
            let line = d.to_string();
            match d.severity {
                Severity::Warning => palette.warn(&line),
                Severity::FixMe => palette.fail(&line),
            }
        })
        .collect()
}

/// `<associate> -> <project> (pick #k)` for every pair.
///
/// Forced pairs are marked instead of showing a rank, associates who
/// picked nothing show `(no preference)`, and associates left without a
/// vacancy are listed last, as `(no permitted pick)` when none of their
/// picks has a vacancy at all.
pub fn render_assignments(roster: &Roster, assignment: &Assignment) -> Vec<String> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(assignment.rows);
    for pair in &assignment.pairs {
        let associate = roster.picks.get(pair.row);
        let name = associate.map_or("?", |a| a.name.as_str());
        let project = roster
            .projects
            .project_for_vacancy(pair.col)
            .map_or("?", |p| p.name.as_str());
        let note = match (pair.cost, associate) {
            (Cost::Forbidden, _) => "(no permitted pick)".to_owned(),
            (_, Some(a)) if a.picks.is_empty() => "(no preference)".to_owned(),
            (Cost::Allowed(rank), _) => format!("(pick #{rank})"),
        };
        rows.push(vec![name.to_owned(), "->".into(), project.to_owned(), note]);
    }
    for row in assignment.unmatched_rows() {
        let name = roster.picks.get(row).map_or("?", |a| a.name.as_str());
        let note = if assignment.forbidden_rows.contains(&row) {
            "(no permitted pick)"
        } else {
            "(no vacancy left)"
        };
        rows.push(vec![name.to_owned(), "->".into(), "-".into(), note.into()]);
    }
    format_columns(&rows, COLUMN_PADDING)
}
