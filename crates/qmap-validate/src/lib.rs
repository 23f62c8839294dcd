//! Order validation for questionnaire rows.
//!
//! Orders are hierarchical numbers (`1`, `1.1`, `1.2.1`). A proposed order is
//! accepted only when it parses, is not held by another row, every ancestor
//! exists, and every earlier sibling exists.
//!
//! # Example
//!
//! ```ignore
//! use qmap_validate::OrderValidator;
//!
//! let validator = OrderValidator::new(&store);
//! if validator.is_duplicate(typed, &key) {
//!     // live feedback while typing
//! }
//! validator.validate(typed, &key)?; // run before committing
//! ```

mod order;
mod report;
mod validator;

pub use order::{OrderError, OrderPath};
pub use report::{Issue, Severity, ValidationReport, validate_store};
pub use validator::OrderValidator;
