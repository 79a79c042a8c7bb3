use crate::domain::list::ListName;
use crate::error::{Result, TaskBoardError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a task (e.g., task-1, task-2, task-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(u64);

impl TaskId {
    const PREFIX: &'static str = "task-";

    /// Creates a new TaskId from a counter
    pub fn new(counter: u64) -> Self {
        Self(counter)
    }

    /// Returns the counter value the id was minted from
    pub fn number(&self) -> u64 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = TaskBoardError;

    /// Accepts only the canonical `task-<n>` form, so a parsed id always
    /// prints back as the same text
    fn from_str(s: &str) -> Result<Self> {
        s.strip_prefix(Self::PREFIX)
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .filter(|digits| *digits == "0" || !digits.starts_with('0'))
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(Self)
            .ok_or_else(|| TaskBoardError::InvalidTaskId(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskBoardError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskBoardError::InvalidPriority(s.to_string())),
        }
    }
}

/// Parses deadline text as submitted by a form.
///
/// Blank text means "no deadline". Accepted formats are RFC 3339,
/// `YYYY-MM-DDTHH:MM` (read as UTC) and `YYYY-MM-DD`, which resolves to the
/// last second of that day so a task finished on its due date counts as on
/// time.
pub fn parse_deadline(text: &str) -> Result<Option<DateTime<Utc>>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M") {
        return Ok(Some(naive.and_utc()));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| TaskBoardError::InvalidDeadline(text.to_string()))
}

fn deserialize_deadline<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) => parse_deadline(&text).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// The user-editable fields of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_deadline")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
}

impl TaskFields {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            deadline: None,
            priority: Priority::default(),
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builds fields from raw form text, rejecting blank content
    pub fn parse(content: &str, deadline: &str, priority: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(TaskBoardError::EmptyContent);
        }

        Ok(Self {
            content: content.trim().to_string(),
            deadline: parse_deadline(deadline)?,
            priority: priority.parse()?,
        })
    }

    /// Returns the trimmed content, or `None` when nothing is left
    pub fn normalized_content(&self) -> Option<&str> {
        let trimmed = self.content.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from the submitted fields, storing the content trimmed
    pub fn new(id: TaskId, fields: &TaskFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: fields.content.trim().to_string(),
            priority: fields.priority,
            deadline: fields.deadline,
            completed_at: None,
            created_at,
        }
    }

    /// Replaces the editable fields, leaving id and completion untouched
    pub fn apply_edit(&mut self, fields: &TaskFields) {
        self.content = fields.content.trim().to_string();
        self.deadline = fields.deadline;
        self.priority = fields.priority;
    }

    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    pub fn clear_completion(&mut self) {
        self.completed_at = None;
    }

    /// Whether the task was finished no later than its deadline.
    /// Tasks without a deadline are never on time.
    pub fn completed_on_time(&self) -> bool {
        match (self.completed_at, self.deadline) {
            (Some(completed), Some(deadline)) => completed <= deadline,
            _ => false,
        }
    }

    /// Whether the deadline has strictly passed while the task sits outside `done`
    pub fn is_past_deadline(&self, list: ListName, now: DateTime<Utc>) -> bool {
        list != ListName::Done && self.deadline.is_some_and(|deadline| deadline < now)
    }
}
