//! Fix planning: where each controller must stamp the injected context onto new entities.
//!
//! Injecting the dependency is only half the migration. Every place that creates
//! an entity must then call the setter, either with the current value from the
//! injected service or with the value inherited from a parent entity. The plan
//! lists those places so they can be fixed by hand.

use crate::inject::{Dependency, InjectMode};
use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};

/// Method names used in the generated instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Setter called on the new entity.
    pub setter: String,
    /// Getter called on the injected service.
    pub current_getter: String,
    /// Getter called on a parent entity.
    pub parent_getter: String,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            setter: "setCompany".to_string(),
            current_getter: "getCurrentCompany".to_string(),
            parent_getter: "getCompany".to_string(),
        }
    }
}

/// An entity creation site that needs fixing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Controller file, relative to the project root.
    pub controller: String,
    pub entity: String,
    pub method: String,
    /// Approximate line of the creation site.
    pub line: u32,
    /// Parent expression to inherit from (e.g. `order` or `section->order`).
    /// When absent the injected service provides the value.
    #[serde(default)]
    pub inherit_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedController {
    pub controller: String,
    /// How the run command handles this controller, `None` if it is not listed.
    pub mode: Option<InjectMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixInstruction {
    pub controller: String,
    pub method: String,
    pub line: u32,
    pub entity: String,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOutput {
    pub controllers: Vec<PlannedController>,
    pub total: usize,
    pub instructions: Vec<FixInstruction>,
}

/// Distinct controllers referenced by `fixes`, in first-seen order.
pub fn controllers_needing_injection(fixes: &[Fix]) -> Vec<&str> {
    let mut controllers: Vec<&str> = Vec::new();
    for fix in fixes {
        if !controllers.contains(&fix.controller.as_str()) {
            controllers.push(&fix.controller);
        }
    }
    controllers
}

/// `OrderLine` -> `$orderLine`
pub fn entity_variable(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => format!("${}{}", first.to_lowercase(), chars.as_str()),
        None => "$entity".to_string(),
    }
}

/// The PHP statement that fixes one creation site.
pub fn fix_instruction(fix: &Fix, dependency: &Dependency, settings: &PlanSettings) -> String {
    let source = match fix.inherit_from.as_deref() {
        Some(parent) => format!("${}->{}()", parent.trim_start_matches('$'), settings.parent_getter),
        None => format!(
            "$this->{}->{}()",
            dependency.var_name, settings.current_getter
        ),
    };

    format!(
        "{}->{}({});",
        entity_variable(&fix.entity),
        settings.setter,
        source
    )
}

pub fn build_plan(manifest: &Manifest) -> PlanOutput {
    let controllers: Vec<PlannedController> = controllers_needing_injection(&manifest.fixes)
        .into_iter()
        .map(|controller| PlannedController {
            controller: controller.to_string(),
            mode: manifest.mode_for_path(controller),
        })
        .collect();

    let instructions = manifest
        .fixes
        .iter()
        .map(|fix| FixInstruction {
            controller: fix.controller.clone(),
            method: fix.method.clone(),
            line: fix.line,
            entity: fix.entity.clone(),
            instruction: fix_instruction(fix, &manifest.dependency, &manifest.plan),
        })
        .collect();

    PlanOutput {
        total: controllers.len(),
        controllers,
        instructions,
    }
}
