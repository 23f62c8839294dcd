use std::path::PathBuf;

use qmap_validate::ValidationReport;

/// Result of one scripted edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// 1-based position in the script.
    pub index: usize,
    pub op: &'static str,
    /// Row key or field the command addressed.
    pub subject: String,
    /// Short description of what happened, or why the edit was rejected.
    pub outcome: Result<String, String>,
}

impl StepResult {
    pub fn is_rejected(&self) -> bool {
        self.outcome.is_err()
    }
}

#[derive(Debug)]
pub struct ApplyResult {
    pub steps: Vec<StepResult>,
    pub rows: usize,
    pub report: ValidationReport,
    /// Set when the edited rows were written.
    pub output: Option<PathBuf>,
}

impl ApplyResult {
    pub fn rejected_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_rejected()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.rejected_count() > 0 || self.report.has_errors()
    }
}
