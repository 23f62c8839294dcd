//! Editing questionnaire rows.
//!
//! [`EditSession`] holds the current row store snapshot and applies edits to
//! it: order commits (validated first), question-type switches with their
//! option handling, option tag edits, row deletion, and column remaps. Each
//! edit either produces a new snapshot or fails with an [`EditError`] and
//! leaves the snapshot unchanged.

mod coercion;
mod command;
mod error;
mod session;

pub use coercion::{apply_question_type, displayed_options, normalize_options};
pub use command::{CommandOutcome, EditCommand};
pub use error::{EditError, Result};
pub use session::EditSession;
