//! Load, remap, and edit steps shared by the commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use qmap_core::{CommandOutcome, EditCommand, EditSession};
use qmap_ingest::{IngestOptions, SourceKind, load_store};
use qmap_map::{ColumnMappings, RemapOutcome};
use tracing::{info, warn};

use crate::types::StepResult;

/// Loads an input file into a fresh edit session.
///
/// Preloaded mapping files already carry logical field names, so their
/// session starts from the logical defaults; other inputs start from the
/// identity over their own columns.
pub fn load_session(input: &Path, options: &IngestOptions) -> Result<EditSession> {
    let store = load_store(input, options)
        .with_context(|| format!("load {}", input.display()))?;
    let preloaded = matches!(SourceKind::from_path(input), Ok(SourceKind::Preloaded));
    Ok(if preloaded {
        EditSession::with_mappings(store, ColumnMappings::logical_defaults())
    } else {
        EditSession::new(store)
    })
}

/// Applies `TARGET=SOURCE` remaps in order.
pub fn apply_mappings(session: &mut EditSession, mappings: &[(String, String)]) -> Result<()> {
    for (target, source) in mappings {
        let outcome = session
            .remap(target, source)
            .with_context(|| format!("map {target} from {source}"))?;
        if outcome == RemapOutcome::SourceAbsent {
            warn!(logical = %target, source = %source, "source column not found; mapping recorded only");
        }
    }
    Ok(())
}

/// Reads a JSON array of edit commands.
pub fn load_script(path: &Path) -> Result<Vec<EditCommand>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse script {}", path.display()))
}

/// Applies every command, recording rejected edits instead of stopping.
pub fn apply_script(session: &mut EditSession, commands: &[EditCommand]) -> Vec<StepResult> {
    let steps: Vec<StepResult> = commands
        .iter()
        .enumerate()
        .map(|(position, command)| StepResult {
            index: position + 1,
            op: command.name(),
            subject: subject(command),
            outcome: session
                .apply(command)
                .map(|outcome| describe(&outcome))
                .map_err(|err| err.to_string()),
        })
        .collect();
    let rejected = steps.iter().filter(|step| step.is_rejected()).count();
    info!(commands = steps.len(), rejected, "script applied");
    steps
}

fn subject(command: &EditCommand) -> String {
    match command {
        EditCommand::Remap { target, source } => format!("{target} <- {source}"),
        EditCommand::Edit { key, field, .. } => format!("{key}.{field}"),
        EditCommand::SetType { key, .. }
        | EditCommand::SetOptions { key, .. }
        | EditCommand::Delete { key } => key.to_string(),
    }
}

fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Remapped(RemapOutcome::Renamed { records }) => {
            format!("renamed on {records} rows")
        }
        CommandOutcome::Remapped(RemapOutcome::SourceAbsent) => {
            "source column absent, nothing renamed".to_string()
        }
        CommandOutcome::Remapped(RemapOutcome::Unchanged) => "unchanged".to_string(),
        CommandOutcome::Updated => "updated".to_string(),
        CommandOutcome::Deleted(record) => format!("deleted {}", record.key()),
    }
}
