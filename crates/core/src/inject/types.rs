use serde::{Deserialize, Serialize};

/// A constructor-injected dependency to add to a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Class name of the injected service (e.g. `CompanyContext`).
    #[serde(rename = "type", default = "default_type_name")]
    pub type_name: String,
    /// Promoted property name, without the leading `$`.
    #[serde(rename = "name", default = "default_var_name")]
    pub var_name: String,
    /// Fully qualified class name to import with a `use` statement.
    #[serde(default)]
    pub import: Option<String>,
}

fn default_type_name() -> String {
    "CompanyContext".to_string()
}

fn default_var_name() -> String {
    "companyContext".to_string()
}

impl Default for Dependency {
    fn default() -> Self {
        Self {
            type_name: default_type_name(),
            var_name: default_var_name(),
            import: None,
        }
    }
}

impl Dependency {
    pub fn new(type_name: impl Into<String>, var_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            var_name: var_name.into(),
            import: None,
        }
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.import = Some(import.into());
        self
    }

    /// Parameter declaration, without indentation or trailing comma.
    ///
    /// `private readonly CompanyContext $companyContext`
    pub fn parameter(&self) -> String {
        format!("private readonly {} ${}", self.type_name, self.var_name)
    }
}

/// Which transformer a target goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectMode {
    /// Append the dependency to an existing constructor.
    Extend,
    /// Insert a brand-new constructor after the class header.
    Create,
}

/// Why a file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skip {
    PatternNotMatched,
    AlreadyInjected,
}

/// Result of running a transformer over one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rewritten file content.
    Injected(String),
    Skipped(Skip),
}

impl Outcome {
    /// True when a substitution occurred and the file should be written.
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Injected(_))
    }
}
