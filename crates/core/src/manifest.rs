//! Target manifest: which controllers get which treatment.
//!
//! A manifest is a small TOML document:
//!
//! ```toml
//! path_template = "src/Controller/{name}.php"
//! extend = ["BadgeController", "NpsController"]
//! create = ["PlanningController"]
//!
//! [dependency]
//! type = "CompanyContext"
//! name = "companyContext"
//! import = "App\\Security\\CompanyContext"
//!
//! [[fix]]
//! controller = "src/Controller/OrderController.php"
//! entity = "OrderLine"
//! method = "addLine"
//! line = 333
//! inherit_from = "order"
//! ```

use crate::inject::{Dependency, InjectMode};
use crate::plan::{Fix, PlanSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_PATH_TEMPLATE: &str = "src/Controller/{name}.php";
const NAME_PLACEHOLDER: &str = "{name}";

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid controller name: {0:?}")]
    InvalidName(String),

    #[error("Controller {0} is listed under both extend and create")]
    Conflicting(String),

    #[error("Controller {0} is listed more than once")]
    Duplicate(String),

    #[error("Path template must contain {{name}}: {0}")]
    InvalidTemplate(String),

    #[error("Invalid dependency {field}: {value:?}")]
    InvalidDependency { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Where a controller lives, relative to the project root.
    pub path_template: String,
    /// Controllers whose existing constructor gets the dependency appended.
    pub extend: Vec<String>,
    /// Controllers that get a brand-new constructor.
    pub create: Vec<String>,
    pub dependency: Dependency,
    pub plan: PlanSettings,
    #[serde(rename = "fix")]
    pub fixes: Vec<Fix>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            path_template: DEFAULT_PATH_TEMPLATE.to_string(),
            extend: Vec::new(),
            create: Vec::new(),
            dependency: Dependency::default(),
            plan: PlanSettings::default(),
            fixes: Vec::new(),
        }
    }
}

/// One controller to process, with its resolved file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub mode: InjectMode,
    pub path: PathBuf,
}

impl Manifest {
    pub fn from_toml(input: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(input)?)
    }

    /// Append names given on the command line after the manifest's own lists.
    pub fn merge_cli(&mut self, extend: Vec<String>, create: Vec<String>) {
        self.extend.extend(extend);
        self.create.extend(create);
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if !self.path_template.contains(NAME_PLACEHOLDER) {
            return Err(ManifestError::InvalidTemplate(self.path_template.clone()));
        }

        for (field, value) in [
            ("type", &self.dependency.type_name),
            ("name", &self.dependency.var_name),
        ] {
            if !is_identifier(value) {
                return Err(ManifestError::InvalidDependency {
                    field,
                    value: value.clone(),
                });
            }
        }

        let mut seen_extend = HashSet::new();
        for name in &self.extend {
            validate_name(name)?;
            if !seen_extend.insert(name.as_str()) {
                return Err(ManifestError::Duplicate(name.clone()));
            }
        }

        let mut seen_create = HashSet::new();
        for name in &self.create {
            validate_name(name)?;
            if seen_extend.contains(name.as_str()) {
                return Err(ManifestError::Conflicting(name.clone()));
            }
            if !seen_create.insert(name.as_str()) {
                return Err(ManifestError::Duplicate(name.clone()));
            }
        }

        Ok(())
    }

    /// File path for a controller name.
    pub fn path_for(&self, root: &Path, name: &str) -> PathBuf {
        root.join(self.path_template.replace(NAME_PLACEHOLDER, name))
    }

    /// Every target in processing order: all extend targets, then all create targets.
    pub fn targets(&self, root: &Path) -> Vec<Target> {
        let extend = self.extend.iter().map(|name| (name, InjectMode::Extend));
        let create = self.create.iter().map(|name| (name, InjectMode::Create));

        extend
            .chain(create)
            .map(|(name, mode)| Target {
                name: name.clone(),
                mode,
                path: self.path_for(root, name),
            })
            .collect()
    }

    /// Which list, if any, schedules the controller at `path`.
    ///
    /// `path` is compared against the template expansion relative to the root,
    /// which is how `[[fix]]` entries refer to controllers.
    pub fn mode_for_path(&self, path: &str) -> Option<InjectMode> {
        let wanted = Path::new(path);
        let relative = |name: &String| PathBuf::from(self.path_template.replace(NAME_PLACEHOLDER, name));

        if self.extend.iter().any(|name| relative(name) == wanted) {
            Some(InjectMode::Extend)
        } else if self.create.iter().any(|name| relative(name) == wanted) {
            Some(InjectMode::Create)
        } else {
            None
        }
    }
}

fn validate_name(name: &str) -> Result<(), ManifestError> {
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '/');
    let valid_segments = name.split('/').all(|segment| !segment.is_empty());

    if name.is_empty() || !valid_chars || !valid_segments {
        return Err(ManifestError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
