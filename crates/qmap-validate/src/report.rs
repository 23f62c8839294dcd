//! Whole-store validation run before the rows are handed on.

use qmap_model::{LOGICAL_FIELDS, ORDER_FIELD, RowKey, RowStore};
use tracing::{debug, info};

use crate::order::OrderError;
use crate::validator::OrderValidator;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Blocks proceeding
    Error,
    /// Should review
    Warning,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A logical column is not present in the schema
    MissingLogicalField { field: String },
    /// Row has no order value
    EmptyOrder { key: RowKey },
    /// Row's order fails the full order check
    InvalidOrder { key: RowKey, error: OrderError },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingLogicalField { field } if field == ORDER_FIELD => Severity::Error,
            Issue::MissingLogicalField { .. } => Severity::Warning,
            Issue::EmptyOrder { .. } | Issue::InvalidOrder { .. } => Severity::Error,
        }
    }

    /// Row the issue applies to, `None` for schema-level issues.
    pub fn key(&self) -> Option<&RowKey> {
        match self {
            Issue::MissingLogicalField { .. } => None,
            Issue::EmptyOrder { key } | Issue::InvalidOrder { key, .. } => Some(key),
        }
    }

    /// Short code for tables and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::MissingLogicalField { .. } => "MissingLogicalField",
            Issue::EmptyOrder { .. } => "EmptyOrder",
            Issue::InvalidOrder { error, .. } => error.kind(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::MissingLogicalField { field } => {
                format!("no column is mapped to '{field}'")
            }
            Issue::EmptyOrder { .. } => "order is empty".to_string(),
            Issue::InvalidOrder { error, .. } => error.to_string(),
        }
    }
}

/// Issues found in one store snapshot.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub records: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn new(records: usize) -> Self {
        Self {
            records,
            issues: Vec::new(),
        }
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
            .count()
    }
}

/// Validates every row of the store against the others.
///
/// Row checks are skipped entirely when no column is mapped to `order`.
pub fn validate_store(store: &RowStore) -> ValidationReport {
    let mut report = ValidationReport::new(store.len());

    for field in LOGICAL_FIELDS {
        if !store.has_field(field) {
            report.add(Issue::MissingLogicalField {
                field: field.to_string(),
            });
        }
    }

    if store.has_field(ORDER_FIELD) {
        let validator = OrderValidator::new(store);
        for record in store {
            let order = record.order();
            if order.is_empty() {
                report.add(Issue::EmptyOrder {
                    key: record.key().clone(),
                });
                continue;
            }
            if let Err(error) = validator.validate(order, record.key()) {
                debug!(row = %record.key(), error = %error, "order rejected");
                report.add(Issue::InvalidOrder {
                    key: record.key().clone(),
                    error,
                });
            }
        }
    }

    info!(
        records = report.records,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation complete"
    );
    report
}
