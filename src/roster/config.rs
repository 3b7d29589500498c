//! Loader configuration.

/// Settings for reading the projects and preferences files.
///
/// # Examples
///
/// ```
/// use u_assign::roster::LoaderConfig;
///
/// let config = LoaderConfig::default().with_default_vacancies(2);
/// assert_eq!(config.projects_header, "Project Name");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// First cell that marks row 0 of the projects file as a header.
    pub projects_header: String,

    /// First cell that marks row 0 of the preferences file as a header.
    pub picks_header: String,

    /// Vacancies assumed when a project row leaves the count blank or
    /// gives something that is not a number.
    pub default_vacancies: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            projects_header: "Project Name".into(),
            picks_header: "Associate Name".into(),
            default_vacancies: 1,
        }
    }
}

impl LoaderConfig {
    pub fn with_projects_header(mut self, header: impl Into<String>) -> Self {
        self.projects_header = header.into();
        self
    }

    pub fn with_picks_header(mut self, header: impl Into<String>) -> Self {
        self.picks_header = header.into();
        self
    }

    pub fn with_default_vacancies(mut self, n: usize) -> Self {
        self.default_vacancies = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_vacancies == 0 {
            return Err("default_vacancies must be at least 1".into());
        }
        Ok(())
    }
}
