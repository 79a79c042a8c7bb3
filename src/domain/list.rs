use crate::error::TaskBoardError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the three lists on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListName {
    Todo,
    InProgress,
    Done,
}

impl ListName {
    /// All lists in display order
    pub const ALL: [ListName; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the identifier used by the view layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|list| list.as_str() == s)
            .ok_or_else(|| TaskBoardError::InvalidListName(s.to_string()))
    }
}
