//! View-facing event handling.
//!
//! A [`BoardSession`] turns the events a view and its drag collaborator emit
//! into store operations, and keeps the ephemeral "task being dragged" state
//! out of the board snapshots.

use crate::config::{BoardConfig, Column};
use crate::domain::{
    board::TaskBoard,
    drop::DropTarget,
    task::{Task, TaskFields, TaskId},
};
use crate::error::Result;
use crate::store::TaskBoardStore;
use mockable::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Events emitted by the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BoardEvent {
    DragStart {
        task_id: TaskId,
    },
    DragEnd {
        active_id: TaskId,
        #[serde(default)]
        over: Option<DropTarget>,
    },
    SubmitNewTask {
        fields: TaskFields,
    },
    SubmitEdit {
        task_id: TaskId,
        fields: TaskFields,
    },
    RequestDelete {
        task_id: TaskId,
    },
}

pub struct BoardSession<C = DefaultClock>
where
    C: Clock,
{
    config: BoardConfig,
    store: TaskBoardStore<C>,
    active_drag: Option<TaskId>,
}

impl BoardSession<DefaultClock> {
    pub fn new(config: BoardConfig) -> Result<Self> {
        Self::with_clock(config, DefaultClock)
    }
}

impl<C> BoardSession<C>
where
    C: Clock,
{
    pub fn with_clock(config: BoardConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let store = TaskBoardStore::from_config(&config, clock)?;
        Ok(Self {
            config,
            store,
            active_drag: None,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn store(&self) -> &TaskBoardStore<C> {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<TaskBoard> {
        self.store.snapshot()
    }

    /// Columns in display order, paired with their tasks
    pub fn columns(&self) -> impl Iterator<Item = (&Column, &[Task])> {
        let board = self.store.board();
        self.config
            .columns()
            .map(move |column| (column, board.list(column.list)))
    }

    /// The task currently being dragged, for rendering a drag preview
    pub fn active_task(&self) -> Option<&Task> {
        self.active_drag.and_then(|id| self.store.board().task(id))
    }

    /// Applies one event and returns the resulting snapshot
    pub fn dispatch(&mut self, event: BoardEvent) -> Arc<TaskBoard> {
        match event {
            BoardEvent::DragStart { task_id } => {
                if self.store.board().contains(task_id) {
                    self.active_drag = Some(task_id);
                } else {
                    tracing::debug!(task_id = %task_id, "drag started on unknown task");
                }
                self.store.snapshot()
            }
            BoardEvent::DragEnd { active_id, over } => {
                self.active_drag = None;
                match over {
                    Some(target) => self.store.handle_drop(active_id, target),
                    None => self.store.snapshot(),
                }
            }
            BoardEvent::SubmitNewTask { fields } => self.store.add_task(fields),
            BoardEvent::SubmitEdit { task_id, fields } => self.store.update_task(task_id, fields),
            BoardEvent::RequestDelete { task_id } => {
                if self.active_drag == Some(task_id) {
                    self.active_drag = None;
                }
                self.store.delete_task(task_id)
            }
        }
    }

    /// Decodes one JSON-encoded event and applies it
    pub fn dispatch_json(&mut self, json: &str) -> Result<Arc<TaskBoard>> {
        let event: BoardEvent = serde_json::from_str(json)?;
        Ok(self.dispatch(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::list::ListName;
    use crate::error::TaskBoardError;
    use chrono::Utc;

    fn session() -> BoardSession<ManualClock> {
        BoardSession::with_clock(BoardConfig::default(), ManualClock::new(Utc::now())).unwrap()
    }

    fn add(session: &mut BoardSession<ManualClock>, content: &str) -> TaskId {
        let board = session.dispatch(BoardEvent::SubmitNewTask {
            fields: TaskFields::new(content),
        });
        board.list(ListName::Todo)[0].id
    }

    #[test]
    fn test_drag_start_sets_active_task() {
        let mut session = session();
        let id = add(&mut session, "Drag me");

        session.dispatch(BoardEvent::DragStart { task_id: id });
        assert_eq!(session.active_task().map(|t| t.id), Some(id));
    }

    #[test]
    fn test_drag_end_without_target_clears_active() {
        let mut session = session();
        let id = add(&mut session, "Drag me");
        session.dispatch(BoardEvent::DragStart { task_id: id });
        let before = session.snapshot();

        let after = session.dispatch(BoardEvent::DragEnd {
            active_id: id,
            over: None,
        });

        assert!(session.active_task().is_none());
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_drag_end_on_list_moves_task() {
        let mut session = session();
        let id = add(&mut session, "Finish");
        session.dispatch(BoardEvent::DragStart { task_id: id });

        let board = session.dispatch(BoardEvent::DragEnd {
            active_id: id,
            over: Some(DropTarget::List(ListName::Done)),
        });

        assert!(session.active_task().is_none());
        assert_eq!(board.list_of(id), Some(ListName::Done));
        assert!(board.task(id).unwrap().completed_at.is_some());
    }

    #[test]
    fn test_drag_start_on_unknown_task_is_ignored() {
        let mut session = session();
        session.dispatch(BoardEvent::DragStart {
            task_id: TaskId::new(9),
        });
        assert!(session.active_task().is_none());
    }

    #[test]
    fn test_edit_and_delete_events() {
        let mut session = session();
        let id = add(&mut session, "Draft");

        let board = session.dispatch(BoardEvent::SubmitEdit {
            task_id: id,
            fields: TaskFields::new("Edited"),
        });
        assert_eq!(board.task(id).unwrap().content, "Edited");

        session.dispatch(BoardEvent::DragStart { task_id: id });
        let board = session.dispatch(BoardEvent::RequestDelete { task_id: id });
        assert!(board.is_empty());
        assert!(session.active_task().is_none());
    }

    #[test]
    fn test_dispatch_json() {
        let mut session = session();
        let board = session
            .dispatch_json(
                r#"{"type": "submitNewTask", "fields": {"content": "From view", "deadline": "", "priority": "medium"}}"#,
            )
            .unwrap();
        let id = board.list(ListName::Todo)[0].id;
        assert_eq!(id.to_string(), "task-1");

        let board = session
            .dispatch_json(r#"{"type": "dragEnd", "activeId": "task-1", "over": "inProgress"}"#)
            .unwrap();
        assert_eq!(board.list_of(id), Some(ListName::InProgress));

        let board = session
            .dispatch_json(r#"{"type": "dragEnd", "activeId": "task-1", "over": null}"#)
            .unwrap();
        assert_eq!(board.list_of(id), Some(ListName::InProgress));
    }

    #[test]
    fn test_dispatch_json_rejects_bad_payload() {
        let mut session = session();

        assert!(matches!(
            session.dispatch_json(r#"{"type": "dragEnd", "activeId": "task-1", "over": "trash"}"#),
            Err(TaskBoardError::SerializationError(_))
        ));
        assert!(matches!(
            session.dispatch_json(r#"{"type": "launchRocket"}"#),
            Err(TaskBoardError::SerializationError(_))
        ));
    }

    #[test]
    fn test_columns_pair_config_with_tasks() {
        let mut session = session();
        add(&mut session, "One");

        let columns: Vec<_> = session
            .columns()
            .map(|(column, tasks)| (column.label.clone(), tasks.len()))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("TO DO".to_string(), 1),
                ("IN PROGRESS".to_string(), 0),
                ("COMPLETED".to_string(), 0)
            ]
        );
    }
}
