pub mod board;
pub mod drop;
pub mod list;
pub mod sorting;
pub mod stats;
pub mod task;

pub use board::TaskBoard;
pub use drop::{resolve_drop, DropAction, DropTarget};
pub use list::ListName;
pub use sorting::{sort_tasks, SortField, SortOrder};
pub use stats::BoardStats;
pub use task::{parse_deadline, Priority, Task, TaskFields, TaskId};
