//! # Taskboard Core
//!
//! State machine and domain models for a three-list kanban task board.
//!
//! A [`TaskBoardStore`] owns an immutable [`TaskBoard`] snapshot and replaces
//! it on every user action: adding, editing, deleting, moving a task between
//! lists and reordering within a list. A [`BoardSession`] sits in front of
//! the store for a view layer, translating drag-and-drop and form events and
//! holding the transient drag state. Rendering, pointer handling and
//! persistence all live outside this crate.

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use clock::ManualClock;
pub use config::{BoardConfig, Column, SeedTask};
pub use domain::{
    board::TaskBoard,
    drop::{DropAction, DropTarget},
    list::ListName,
    stats::BoardStats,
    task::{Priority, Task, TaskFields, TaskId},
};
pub use error::{Result, TaskBoardError};
pub use session::{BoardEvent, BoardSession};
pub use store::TaskBoardStore;
