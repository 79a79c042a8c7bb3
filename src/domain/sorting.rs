use crate::domain::task::Task;
use crate::error::TaskBoardError;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting tasks in a rendered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Content,
    Priority,
    Deadline,
    Created,
    Completed,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "content" => Ok(SortField::Content),
            "priority" => Ok(SortField::Priority),
            "deadline" => Ok(SortField::Deadline),
            "created" => Ok(SortField::Created),
            "completed" => Ok(SortField::Completed),
            _ => Err(TaskBoardError::InvalidSortKey(format!(
                "Invalid sort field '{}'. Valid fields: id, content, priority, deadline, created, completed",
                s
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(TaskBoardError::InvalidSortKey(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            ))),
        }
    }
}

/// Sorts a copy of a list for display.
///
/// The board keeps its own user-controlled order; callers sort a cloned
/// `Vec` taken from a snapshot.
///
/// # Examples
/// ```
/// use taskboard_core::domain::sorting::{sort_tasks, SortField, SortOrder};
/// use taskboard_core::{Task, TaskFields, TaskId};
///
/// let now = chrono::Utc::now();
/// let mut tasks = vec![
///     Task::new(TaskId::new(3), &TaskFields::new("C"), now),
///     Task::new(TaskId::new(1), &TaskFields::new("A"), now),
///     Task::new(TaskId::new(2), &TaskFields::new("B"), now),
/// ];
///
/// sort_tasks(&mut tasks, SortField::Id, SortOrder::Ascending);
/// assert_eq!(tasks[0].id, TaskId::new(1));
/// ```
pub fn sort_tasks(tasks: &mut [Task], field: SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let apply = |cmp: Ordering| match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        };

        match field {
            SortField::Id => apply(a.id.cmp(&b.id)),
            SortField::Content => apply(a.content.to_lowercase().cmp(&b.content.to_lowercase())),
            SortField::Priority => apply(a.priority.cmp(&b.priority)),
            SortField::Created => apply(a.created_at.cmp(&b.created_at)),
            SortField::Deadline => compare_option_dates(a.deadline, b.deadline, order),
            SortField::Completed => compare_option_dates(a.completed_at, b.completed_at, order),
        }
    });
}

/// Compare optional dates with None always sorting to the end,
/// regardless of sort order
fn compare_option_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => match order {
            SortOrder::Ascending => a_date.cmp(&b_date),
            SortOrder::Descending => b_date.cmp(&a_date),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
