//! Per-row loader diagnostics.

use std::fmt;

/// How serious a loader finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Data was accepted with an assumption (e.g. a default vacancy count).
    Warning,
    /// Data must be fixed before assignments can be computed.
    FixMe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("Wrn"),
            Severity::FixMe => f.write_str("FixMe"),
        }
    }
}

/// A single finding about one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based row number in the source file (header included).
    pub row: usize,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: (row {}) {}", self.severity, self.row, self.message)
    }
}

/// Findings collected while loading one or more files.
///
/// Replaces a shared "data is valid" flag: each loader returns its own
/// report and the caller decides whether to proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, row: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(row, %message, "loader warning");
        self.diagnostics.push(Diagnostic {
            row,
            severity: Severity::Warning,
            message,
        });
    }

    pub fn fixme(&mut self, row: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(row, %message, "loader error");
        self.diagnostics.push(Diagnostic {
            row,
            severity: Severity::FixMe,
            message,
        });
    }

    /// Appends all findings of `other`.
    pub fn merge(&mut self, other: LoadReport) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// `false` if any finding is [`Severity::FixMe`].
    pub fn is_valid(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|d| d.severity != Severity::FixMe)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn fixmes(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::FixMe)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
