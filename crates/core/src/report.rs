use crate::inject::{InjectMode, Outcome, Skip};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Injected,
    AlreadyInjected,
    PatternNotMatched,
}

impl From<&Outcome> for Status {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Injected(_) => Status::Injected,
            Outcome::Skipped(Skip::AlreadyInjected) => Status::AlreadyInjected,
            Outcome::Skipped(Skip::PatternNotMatched) => Status::PatternNotMatched,
        }
    }
}

impl Status {
    pub fn marker(&self) -> &'static str {
        match self {
            Status::Injected => "✓",
            Status::AlreadyInjected => "•",
            Status::PatternNotMatched => "✗",
        }
    }

    pub fn detail(&self) -> Option<&'static str> {
        match self {
            Status::Injected => None,
            Status::AlreadyInjected => Some("already injected"),
            Status::PatternNotMatched => Some("pattern not matched"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    pub name: String,
    pub path: String,
    pub mode: InjectMode,
    pub status: Status,
    /// Something worth a look even though the target was processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    pub injected: usize,
    pub already_injected: usize,
    pub unmatched: usize,
    pub reports: Vec<TargetReport>,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn record(&mut self, report: TargetReport) {
        match report.status {
            Status::Injected => self.injected += 1,
            Status::AlreadyInjected => self.already_injected += 1,
            Status::PatternNotMatched => self.unmatched += 1,
        }
        self.reports.push(report);
    }
}

/// Header printed before the targets of a mode.
pub fn section_header(mode: InjectMode) -> &'static str {
    match mode {
        InjectMode::Extend => "Extending existing constructors...",
        InjectMode::Create => "Creating new constructors...",
    }
}

/// `  ✓ BadgeController` or `  ✗ NpsController - pattern not matched`
pub fn marker_line(name: &str, status: Status) -> String {
    match status.detail() {
        Some(detail) => format!("  {} {} - {}", status.marker(), name, detail),
        None => format!("  {} {}", status.marker(), name),
    }
}
