//! Board configuration
//!
//! Display labels, colour tags and the initial seed of tasks. Everything has
//! a default, so an empty TOML document yields the standard three-list board.

use crate::domain::{board::TaskBoard, list::ListName, task::TaskFields};
use crate::error::{Result, TaskBoardError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Display configuration for one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub list: ListName,
    pub label: String,
    pub color: String,
    /// Whether the list offers the "add task" affordance
    #[serde(default)]
    pub accepts_new: bool,
}

impl Column {
    pub fn new(list: ListName, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            list,
            label: label.into(),
            color: color.into(),
            accepts_new: false,
        }
    }

    pub fn accepting_new(mut self) -> Self {
        self.accepts_new = true;
        self
    }
}

/// A task present on the board when it is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTask {
    pub list: ListName,
    pub content: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub deadline: String,
}

impl SeedTask {
    fn fields(&self) -> Result<TaskFields> {
        TaskFields::parse(&self.content, &self.deadline, &self.priority)
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<Column>,
    pub seed: Vec<SeedTask>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Todo List".to_string(),
            columns: vec![
                Column::new(ListName::Todo, "TO DO", "red").accepting_new(),
                Column::new(ListName::InProgress, "IN PROGRESS", "blue"),
                Column::new(ListName::Done, "COMPLETED", "green"),
            ],
            seed: Vec::new(),
        }
    }
}

impl BoardConfig {
    /// Parses and validates a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BoardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Every list must have exactly one column, and every seed must be a
    /// valid task
    pub fn validate(&self) -> Result<()> {
        for list in ListName::ALL {
            let count = self.columns.iter().filter(|col| col.list == list).count();
            if count != 1 {
                return Err(TaskBoardError::ConfigError(format!(
                    "list '{}' must have exactly one column, found {}",
                    list, count
                )));
            }
        }

        for (index, seed) in self.seed.iter().enumerate() {
            seed.fields().map_err(|err| {
                TaskBoardError::ConfigError(format!("seed task {}: {}", index + 1, err))
            })?;
        }

        Ok(())
    }

    /// Gets the column configuration for a list
    pub fn column(&self, list: ListName) -> Option<&Column> {
        self.columns.iter().find(|col| col.list == list)
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        ListName::ALL.into_iter().filter_map(|list| self.column(list))
    }

    /// Label for a list, falling back to its identifier
    pub fn label(&self, list: ListName) -> &str {
        self.column(list)
            .map(|col| col.label.as_str())
            .unwrap_or(list.as_str())
    }

    /// Builds the starting board from the seed. Seeded `done` tasks are
    /// stamped as completed at `now`.
    pub fn initial_board(&self, now: DateTime<Utc>) -> Result<TaskBoard> {
        let mut board = TaskBoard::new();
        for seed in &self.seed {
            let fields = seed.fields()?;
            board.append_task(seed.list, &fields, now);
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_columns() {
        let config = BoardConfig::default();
        config.validate().unwrap();

        assert_eq!(config.label(ListName::Todo), "TO DO");
        assert_eq!(config.label(ListName::Done), "COMPLETED");
        assert_eq!(config.column(ListName::InProgress).unwrap().color, "blue");
        assert!(config.column(ListName::Todo).unwrap().accepts_new);
        assert!(!config.column(ListName::Done).unwrap().accepts_new);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_columns_iterate_in_display_order() {
        let toml = r#"
            [[columns]]
            list = "done"
            label = "Finished"
            color = "green"

            [[columns]]
            list = "todo"
            label = "Backlog"
            color = "red"
            accepts_new = true

            [[columns]]
            list = "inProgress"
            label = "Doing"
            color = "blue"
        "#;
        let config = BoardConfig::from_toml_str(toml).unwrap();

        let labels: Vec<_> = config.columns().map(|col| col.label.as_str()).collect();
        assert_eq!(labels, vec!["Backlog", "Doing", "Finished"]);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let toml = r#"
            [[columns]]
            list = "todo"
            label = "Todo"
            color = "red"
        "#;
        assert!(matches!(
            BoardConfig::from_toml_str(toml),
            Err(TaskBoardError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unknown_list_is_rejected() {
        let toml = r#"
            [[seed]]
            list = "archive"
            content = "Old"
        "#;
        assert!(matches!(
            BoardConfig::from_toml_str(toml),
            Err(TaskBoardError::TomlError(_))
        ));
    }

    #[test]
    fn test_blank_seed_is_rejected() {
        let toml = r#"
            [[seed]]
            list = "todo"
            content = "   "
        "#;
        assert!(matches!(
            BoardConfig::from_toml_str(toml),
            Err(TaskBoardError::ConfigError(_))
        ));
    }

    #[test]
    fn test_initial_board_from_seed() {
        let toml = r#"
            [[seed]]
            list = "todo"
            content = "Write tests"
            priority = "high"

            [[seed]]
            list = "todo"
            content = "Review"
            deadline = "2024-02-01"

            [[seed]]
            list = "done"
            content = "Set up repo"
        "#;
        let config = BoardConfig::from_toml_str(toml).unwrap();
        let now = Utc::now();
        let board = config.initial_board(now).unwrap();

        let todo: Vec<_> = board
            .list(ListName::Todo)
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(todo, vec!["Write tests", "Review"]);
        assert_eq!(board.list(ListName::Done)[0].completed_at, Some(now));
        assert_eq!(board.next_task_number(), 4);
        board.validate().unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = \"Sprint 12\"").unwrap();

        let config = BoardConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "Sprint 12");
        assert_eq!(config.columns.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            BoardConfig::load("/nonexistent/board.toml"),
            Err(TaskBoardError::IoError(_))
        ));
    }
}
