use crate::domain::list::ListName;
use crate::domain::task::{Task, TaskFields, TaskId};
use crate::error::{Result, TaskBoardError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Snapshot of the whole board: every list and the id counter.
///
/// Snapshots handed out by [`crate::TaskBoardStore`] are shared behind an
/// `Arc` and never change; the store writes by cloning the current snapshot
/// and swapping in the edited copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    lists: BTreeMap<ListName, Vec<Task>>,
    next_task_number: u64,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self {
            lists: ListName::ALL.into_iter().map(|list| (list, Vec::new())).collect(),
            next_task_number: 1,
        }
    }

    /// Tasks of one list in user-controlled order
    pub fn list(&self, list: ListName) -> &[Task] {
        self.lists.get(&list).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All lists in display order
    pub fn lists(&self) -> impl Iterator<Item = (ListName, &[Task])> + '_ {
        ListName::ALL.into_iter().map(move |list| (list, self.list(list)))
    }

    /// Finds the list holding a task and its index within it
    pub fn locate(&self, id: TaskId) -> Option<(ListName, usize)> {
        self.lists().find_map(|(list, tasks)| {
            tasks
                .iter()
                .position(|task| task.id == id)
                .map(|index| (list, index))
        })
    }

    pub fn list_of(&self, id: TaskId) -> Option<ListName> {
        self.locate(id).map(|(list, _)| list)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.locate(id)
            .and_then(|(list, index)| self.list(list).get(index))
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.locate(id).is_some()
    }

    pub fn total_tasks(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_tasks() == 0
    }

    /// Counter value the next created task will receive
    pub fn next_task_number(&self) -> u64 {
        self.next_task_number
    }

    /// Checks that every id is unique, that the id counter is ahead of every
    /// id on the board, and that only `done` tasks carry a completion
    /// timestamp
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for (list, tasks) in self.lists() {
            for task in tasks {
                if !seen.insert(task.id) {
                    return Err(TaskBoardError::DuplicateTask(task.id.to_string()));
                }
                if task.completed_at.is_some() != (list == ListName::Done) {
                    return Err(TaskBoardError::CompletionMismatch {
                        id: task.id.to_string(),
                        list: list.to_string(),
                    });
                }
            }
        }

        if let Some(highest) = seen.iter().map(TaskId::number).max() {
            if self.next_task_number <= highest {
                return Err(TaskBoardError::StaleIdCounter {
                    next: self.next_task_number,
                    highest,
                });
            }
        }

        Ok(())
    }

    fn list_mut(&mut self, list: ListName) -> &mut Vec<Task> {
        self.lists.entry(list).or_default()
    }

    fn next_task_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_task_number);
        self.next_task_number += 1;
        id
    }

    /// Creates a task at the head of `todo`. Returns `None` for blank content.
    pub(crate) fn insert_task(&mut self, fields: &TaskFields, now: DateTime<Utc>) -> Option<TaskId> {
        fields.normalized_content()?;
        let id = self.next_task_id();
        let task = Task::new(id, fields, now);
        self.list_mut(ListName::Todo).insert(0, task);
        Some(id)
    }

    /// Appends a task to the end of a list, used when seeding a board
    pub(crate) fn append_task(
        &mut self,
        list: ListName,
        fields: &TaskFields,
        now: DateTime<Utc>,
    ) -> Option<TaskId> {
        fields.normalized_content()?;
        let id = self.next_task_id();
        let mut task = Task::new(id, fields, now);
        if list == ListName::Done {
            task.mark_completed(now);
        }
        self.list_mut(list).push(task);
        Some(id)
    }

    pub(crate) fn update_task(&mut self, id: TaskId, fields: &TaskFields) -> bool {
        if fields.normalized_content().is_none() {
            return false;
        }
        let Some((list, index)) = self.locate(id) else {
            return false;
        };

        match self.list_mut(list).get_mut(index) {
            Some(task) => {
                task.apply_edit(fields);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let (list, index) = self.locate(id)?;
        Some(self.list_mut(list).remove(index))
    }

    /// Moves a task to the end of another list, keeping the completion
    /// timestamp in step with membership of `done`
    pub(crate) fn move_task(&mut self, id: TaskId, destination: ListName, now: DateTime<Utc>) -> bool {
        let Some((source, index)) = self.locate(id) else {
            return false;
        };
        if source == destination {
            return false;
        }

        let mut task = self.list_mut(source).remove(index);
        if source == ListName::Done {
            task.clear_completion();
        }
        if destination == ListName::Done {
            task.mark_completed(now);
        }
        self.list_mut(destination).push(task);
        true
    }

    /// Moves a task to the index currently held by `target` within the same
    /// list. The target index is read before removal and used as the
    /// insertion index afterwards.
    pub(crate) fn reorder_task(&mut self, id: TaskId, target: TaskId) -> bool {
        if id == target {
            return false;
        }
        let (Some((list, from)), Some((target_list, to))) = (self.locate(id), self.locate(target))
        else {
            return false;
        };
        if list != target_list {
            return false;
        }

        let tasks = self.list_mut(list);
        let task = tasks.remove(from);
        tasks.insert(to, task);
        true
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}
