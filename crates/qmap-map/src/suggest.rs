//! Fuzzy suggestions for which source column feeds each logical field.
//!
//! Uses Jaro-Winkler similarity on normalized names, with a boost when every
//! word of the source column abbreviates the matching word of the field
//! (`var_name` for `variable_name`).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};

/// Default minimum confidence for a suggestion to be reported.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.75;

/// Boost for sources whose words abbreviate the field's words.
const ABBREVIATION_BOOST: f64 = 1.10;

/// A proposed source column for a logical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    pub logical_field: String,
    pub source_field: String,
    pub confidence: f32,
}

/// Result of a suggestion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionResult {
    /// One suggestion per matched logical field, in logical field order.
    pub suggestions: Vec<MappingSuggestion>,
    /// Logical fields with no source above the confidence threshold.
    pub unmatched: Vec<String>,
}

impl SuggestionResult {
    pub fn for_field(&self, logical: &str) -> Option<&MappingSuggestion> {
        self.suggestions.iter().find(|s| s.logical_field == logical)
    }
}

/// Scores source columns against logical fields.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine {
    min_confidence: f32,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

impl SuggestionEngine {
    pub fn new(min_confidence: f32) -> Self {
        Self { min_confidence }
    }

    /// Similarity of a source column name to a logical field name.
    pub fn score(&self, logical: &str, source: &str) -> f32 {
        let logical_norm = normalize_text(logical);
        let source_norm = normalize_text(source);
        if logical_norm == source_norm {
            return 1.0;
        }
        let mut score = jaro_winkler::similarity(logical_norm.chars(), source_norm.chars());
        if abbreviates(&source_norm, &logical_norm) {
            score *= ABBREVIATION_BOOST;
        }
        score.min(1.0) as f32
    }

    /// Suggests at most one source per logical field and one field per source.
    ///
    /// Pairs are assigned greedily from the highest score down; ties are
    /// broken by field order, then source order.
    pub fn suggest<L, S>(&self, logical_fields: &[L], source_fields: &[S]) -> SuggestionResult
    where
        L: AsRef<str>,
        S: AsRef<str>,
    {
        let mut candidates = Vec::new();
        for (field_index, logical) in logical_fields.iter().enumerate() {
            for (source_index, source) in source_fields.iter().enumerate() {
                let confidence = self.score(logical.as_ref(), source.as_ref());
                if confidence >= self.min_confidence {
                    candidates.push((confidence, field_index, source_index));
                }
            }
        }
        candidates.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
                .then(a.2.cmp(&b.2))
        });

        let mut assigned_fields = BTreeSet::new();
        let mut assigned_sources = BTreeSet::new();
        let mut chosen = Vec::new();
        for (confidence, field_index, source_index) in candidates {
            if assigned_fields.contains(&field_index) || assigned_sources.contains(&source_index) {
                continue;
            }
            assigned_fields.insert(field_index);
            assigned_sources.insert(source_index);
            chosen.push((field_index, source_index, confidence));
        }
        chosen.sort_by_key(|(field_index, _, _)| *field_index);

        let suggestions = chosen
            .into_iter()
            .map(|(field_index, source_index, confidence)| MappingSuggestion {
                logical_field: logical_fields[field_index].as_ref().to_string(),
                source_field: source_fields[source_index].as_ref().to_string(),
                confidence,
            })
            .collect();
        let unmatched = logical_fields
            .iter()
            .enumerate()
            .filter(|(index, _)| !assigned_fields.contains(index))
            .map(|(_, field)| field.as_ref().to_string())
            .collect();

        SuggestionResult {
            suggestions,
            unmatched,
        }
    }
}

/// Lower-cases and turns separators into single spaces.
fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when both names have the same number of words and each source word
/// is a prefix of the corresponding field word.
fn abbreviates(source: &str, logical: &str) -> bool {
    let source_words: Vec<&str> = source.split(' ').collect();
    let logical_words: Vec<&str> = logical.split(' ').collect();
    source_words.len() == logical_words.len()
        && source_words
            .iter()
            .zip(&logical_words)
            .all(|(s, l)| !s.is_empty() && l.starts_with(s))
}
