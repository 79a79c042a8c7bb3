//! The single writer of board state.
//!
//! Every operation is total: unknown ids, same-list moves and blank content
//! leave the board as it was and hand back the current snapshot.

use crate::config::BoardConfig;
use crate::domain::{
    board::TaskBoard,
    drop::{resolve_drop, DropAction, DropTarget},
    list::ListName,
    stats::BoardStats,
    task::{TaskFields, TaskId},
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Owns the current [`TaskBoard`] snapshot and applies user actions to it
pub struct TaskBoardStore<C = DefaultClock>
where
    C: Clock,
{
    current: Arc<TaskBoard>,
    clock: C,
}

impl TaskBoardStore<DefaultClock> {
    /// Creates an empty board using the system clock
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for TaskBoardStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TaskBoardStore<C>
where
    C: Clock,
{
    /// Creates an empty board using the given clock
    pub fn with_clock(clock: C) -> Self {
        Self {
            current: Arc::new(TaskBoard::new()),
            clock,
        }
    }

    /// Creates a board seeded from configuration
    pub fn from_config(config: &BoardConfig, clock: C) -> Result<Self> {
        let board = config.initial_board(clock.utc())?;
        tracing::info!(
            board = %config.name,
            seeded = board.total_tasks(),
            "created task board"
        );
        Self::from_board(board, clock)
    }

    /// Adopts an existing snapshot after checking its invariants
    pub fn from_board(board: TaskBoard, clock: C) -> Result<Self> {
        board.validate()?;
        Ok(Self {
            current: Arc::new(board),
            clock,
        })
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<TaskBoard> {
        Arc::clone(&self.current)
    }

    /// Borrows the current snapshot without bumping the reference count
    pub fn board(&self) -> &TaskBoard {
        &self.current
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Creates a task at the head of `todo`
    pub fn add_task(&mut self, fields: TaskFields) -> Arc<TaskBoard> {
        let now = self.now();
        let mut next = TaskBoard::clone(&self.current);

        match next.insert_task(&fields, now) {
            Some(id) => {
                tracing::debug!(task_id = %id, priority = %fields.priority, "added task");
                self.commit(next)
            }
            None => {
                tracing::warn!("ignored task with empty content");
                self.snapshot()
            }
        }
    }

    /// Replaces a task's content, deadline and priority in place
    pub fn update_task(&mut self, id: TaskId, fields: TaskFields) -> Arc<TaskBoard> {
        let mut next = TaskBoard::clone(&self.current);

        if next.update_task(id, &fields) {
            tracing::debug!(task_id = %id, "updated task");
            self.commit(next)
        } else {
            tracing::debug!(task_id = %id, "ignored update for unknown task or empty content");
            self.snapshot()
        }
    }

    pub fn delete_task(&mut self, id: TaskId) -> Arc<TaskBoard> {
        let mut next = TaskBoard::clone(&self.current);

        if next.remove_task(id).is_some() {
            tracing::debug!(task_id = %id, "deleted task");
            self.commit(next)
        } else {
            tracing::debug!(task_id = %id, "ignored delete for unknown task");
            self.snapshot()
        }
    }

    /// Moves a task to the end of another list
    pub fn move_task(&mut self, id: TaskId, destination: ListName) -> Arc<TaskBoard> {
        let now = self.now();
        let source = self.current.list_of(id);
        let mut next = TaskBoard::clone(&self.current);

        if next.move_task(id, destination, now) {
            tracing::debug!(
                task_id = %id,
                from = ?source,
                to = %destination,
                "moved task"
            );
            self.commit(next)
        } else {
            tracing::debug!(task_id = %id, to = %destination, "ignored move");
            self.snapshot()
        }
    }

    /// Moves a task to the position of another task in the same list
    pub fn reorder_task(&mut self, id: TaskId, target: TaskId) -> Arc<TaskBoard> {
        let mut next = TaskBoard::clone(&self.current);

        if next.reorder_task(id, target) {
            tracing::debug!(task_id = %id, target = %target, "reordered task");
            self.commit(next)
        } else {
            tracing::debug!(task_id = %id, target = %target, "ignored reorder");
            self.snapshot()
        }
    }

    /// Applies a drop reported by the drag collaborator.
    ///
    /// The action is decided from the snapshot as it stands on entry and
    /// exactly one change is applied.
    pub fn handle_drop(&mut self, active: TaskId, target: DropTarget) -> Arc<TaskBoard> {
        match resolve_drop(&self.current, active, target) {
            Some(DropAction::Move { id, to }) => self.move_task(id, to),
            Some(DropAction::Reorder { id, target }) => self.reorder_task(id, target),
            None => {
                tracing::debug!(task_id = %active, target = %target, "drop resolved to no change");
                self.snapshot()
            }
        }
    }

    /// Summary figures for the current snapshot
    pub fn stats(&self) -> BoardStats {
        BoardStats::from_board(&self.current, self.now())
    }

    /// Whether a task is past its deadline right now
    pub fn is_past_deadline(&self, id: TaskId) -> bool {
        let now = self.now();
        self.current
            .locate(id)
            .and_then(|(list, index)| {
                self.current
                    .list(list)
                    .get(index)
                    .map(|task| task.is_past_deadline(list, now))
            })
            .unwrap_or(false)
    }

    fn commit(&mut self, board: TaskBoard) -> Arc<TaskBoard> {
        debug_assert!(board.validate().is_ok(), "board invariants violated");
        self.current = Arc::new(board);
        self.snapshot()
    }
}
