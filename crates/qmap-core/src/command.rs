//! Serializable edit commands, so a sequence of edits can be scripted.

use qmap_map::RemapOutcome;
use qmap_model::{FieldValue, QuestionType, Record, RowKey};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::EditSession;

/// One user edit.
///
/// JSON form is tagged by `op`, for example
/// `{"op": "remap", "target": "order", "source": "sno"}` or
/// `{"op": "set_type", "key": "row-4", "question_type": "BIN"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    Remap {
        target: String,
        source: String,
    },
    Edit {
        key: RowKey,
        field: String,
        value: FieldValue,
    },
    SetType {
        key: RowKey,
        question_type: QuestionType,
    },
    SetOptions {
        key: RowKey,
        options: Vec<String>,
    },
    Delete {
        key: RowKey,
    },
}

impl EditCommand {
    /// Operation name as written in scripts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Remap { .. } => "remap",
            Self::Edit { .. } => "edit",
            Self::SetType { .. } => "set_type",
            Self::SetOptions { .. } => "set_options",
            Self::Delete { .. } => "delete",
        }
    }
}

/// What an applied command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Remapped(RemapOutcome),
    Updated,
    Deleted(Record),
}

impl EditSession {
    /// Applies one command to the session.
    pub fn apply(&mut self, command: &EditCommand) -> Result<CommandOutcome> {
        match command {
            EditCommand::Remap { target, source } => {
                self.remap(target, source).map(CommandOutcome::Remapped)
            }
            EditCommand::Edit { key, field, value } => self
                .commit(key, field, value.clone())
                .map(|()| CommandOutcome::Updated),
            EditCommand::SetType { key, question_type } => self
                .set_question_type(key, question_type)
                .map(|()| CommandOutcome::Updated),
            EditCommand::SetOptions { key, options } => self
                .set_options(key, options)
                .map(|()| CommandOutcome::Updated),
            EditCommand::Delete { key } => self.delete(key).map(CommandOutcome::Deleted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json() {
        let json = r#"[
            {"op": "remap", "target": "order", "source": "sno"},
            {"op": "edit", "key": "row-2", "field": "questions", "value": "Age?"},
            {"op": "set_type", "key": "row-2", "question_type": "bin"},
            {"op": "set_options", "key": "row-3", "options": ["A", "B"]},
            {"op": "delete", "key": "row-4"}
        ]"#;
        let commands: Vec<EditCommand> = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = commands.iter().map(EditCommand::name).collect();
        assert_eq!(names, ["remap", "edit", "set_type", "set_options", "delete"]);
        assert_eq!(
            commands[2],
            EditCommand::SetType {
                key: RowKey::new("row-2"),
                question_type: QuestionType::Binary,
            }
        );
    }
}
