//! Resolution of drag-and-drop releases into board actions.
//!
//! The drag collaborator reports the id of whatever the pointer was released
//! over: either a list's drop zone or another task. Everything is resolved
//! against one snapshot before any change is applied.

use crate::domain::board::TaskBoard;
use crate::domain::list::ListName;
use crate::domain::task::TaskId;
use crate::error::{Result, TaskBoardError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What a dragged task was released over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DropTarget {
    /// A list's drop zone, typically an empty list
    List(ListName),
    /// Another task card
    Task(TaskId),
}

impl FromStr for DropTarget {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(list) = s.parse::<ListName>() {
            return Ok(Self::List(list));
        }
        s.parse::<TaskId>()
            .map(Self::Task)
            .map_err(|_| TaskBoardError::InvalidDropTarget(s.to_string()))
    }
}

impl TryFrom<String> for DropTarget {
    type Error = TaskBoardError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DropTarget> for String {
    fn from(target: DropTarget) -> Self {
        target.to_string()
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => write!(f, "{list}"),
            Self::Task(id) => write!(f, "{id}"),
        }
    }
}

/// The single change a drop resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    Move { id: TaskId, to: ListName },
    Reorder { id: TaskId, target: TaskId },
}

/// Decides what a drop means using only `board`.
///
/// Returns `None` when the dragged task or the target task is unknown, or
/// when a task is dropped on its own list's drop zone.
pub fn resolve_drop(board: &TaskBoard, active: TaskId, target: DropTarget) -> Option<DropAction> {
    let source = board.list_of(active)?;
    let destination = match target {
        DropTarget::List(list) => list,
        DropTarget::Task(over) => board.list_of(over)?,
    };

    match target {
        _ if source != destination => Some(DropAction::Move {
            id: active,
            to: destination,
        }),
        DropTarget::Task(over) if over != active => Some(DropAction::Reorder {
            id: active,
            target: over,
        }),
        _ => None,
    }
}
