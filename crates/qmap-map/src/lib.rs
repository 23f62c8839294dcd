//! Column remapping for questionnaire rows.
//!
//! A remap declares that a logical field (`order`, `variable_name`, ...) is
//! populated from a raw source column. [`ColumnRemapper`] rewrites every
//! record accordingly and keeps [`ColumnMappings`] in step so a front end can
//! show the current source of each column. [`SuggestionEngine`] proposes
//! likely sources by fuzzy name matching.

mod mappings;
mod remap;
mod suggest;

pub use mappings::{ColumnMappings, column_title};
pub use remap::{ColumnRemapper, RemapOutcome, Remapped, remap_records};
pub use suggest::{
    DEFAULT_MIN_CONFIDENCE, MappingSuggestion, SuggestionEngine, SuggestionResult,
};
