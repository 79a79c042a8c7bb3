use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskBoardError>;

#[derive(Debug, Error)]
pub enum TaskBoardError {
    #[error("Invalid task ID format: {0}")]
    InvalidTaskId(String),

    #[error("Invalid list name: {0}")]
    InvalidListName(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),

    #[error("Invalid drop target: {0}")]
    InvalidDropTarget(String),

    #[error("{0}")]
    InvalidSortKey(String),

    #[error("Task content must not be empty")]
    EmptyContent,

    #[error("Task {0} appears more than once on the board")]
    DuplicateTask(String),

    #[error("Task {id} in list {list} has an inconsistent completion timestamp")]
    CompletionMismatch { id: String, list: String },

    #[error("Id counter {next} would reuse an existing id; highest id on the board is {highest}")]
    StaleIdCounter { next: u64, highest: u64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}
