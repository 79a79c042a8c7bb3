use crate::domain::board::TaskBoard;
use crate::domain::list::ListName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary figures derived from a single snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total_tasks: usize,
    pub completed_count: usize,
    pub on_time_count: usize,
    pub overdue_count: usize,
    pub per_list: BTreeMap<ListName, usize>,
}

impl BoardStats {
    /// Computes the figures for `board` as seen at `now`
    pub fn from_board(board: &TaskBoard, now: DateTime<Utc>) -> Self {
        let done = board.list(ListName::Done);

        Self {
            total_tasks: board.total_tasks(),
            completed_count: done.len(),
            on_time_count: done.iter().filter(|task| task.completed_on_time()).count(),
            overdue_count: board
                .lists()
                .map(|(list, tasks)| {
                    tasks
                        .iter()
                        .filter(|task| task.is_past_deadline(list, now))
                        .count()
                })
                .sum(),
            per_list: board
                .lists()
                .map(|(list, tasks)| (list, tasks.len()))
                .collect(),
        }
    }

    pub fn count(&self, list: ListName) -> usize {
        self.per_list.get(&list).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskFields;
    use chrono::TimeZone;

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, n, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_board_stats() {
        let stats = BoardStats::from_board(&TaskBoard::new(), day(1));

        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.on_time_count, 0);
        assert_eq!(stats.overdue_count, 0);
        assert_eq!(stats.count(ListName::Todo), 0);
    }

    #[test]
    fn test_late_completion_is_not_on_time() {
        let mut board = TaskBoard::new();
        let late = board
            .append_task(
                ListName::Todo,
                &TaskFields::new("Late").with_deadline(day(5)),
                day(1),
            )
            .unwrap();
        let early = board
            .append_task(
                ListName::Todo,
                &TaskFields::new("Early").with_deadline(day(5)),
                day(1),
            )
            .unwrap();
        board
            .append_task(ListName::Done, &TaskFields::new("No deadline"), day(1))
            .unwrap();

        board.move_task(late, ListName::Done, day(6));
        board.move_task(early, ListName::Done, day(4));

        let stats = BoardStats::from_board(&board, day(7));
        assert_eq!(stats.completed_count, 3);
        assert_eq!(stats.on_time_count, 1);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.count(ListName::Done), 3);
    }

    #[test]
    fn test_overdue_counts_only_unfinished_tasks() {
        let mut board = TaskBoard::new();
        for list in [ListName::Todo, ListName::InProgress, ListName::Done] {
            board
                .append_task(list, &TaskFields::new("Due").with_deadline(day(2)), day(1))
                .unwrap();
        }
        board
            .append_task(ListName::Todo, &TaskFields::new("Future").with_deadline(day(9)), day(1))
            .unwrap();

        let stats = BoardStats::from_board(&board, day(3));
        assert_eq!(stats.overdue_count, 2);
        assert_eq!(stats.count(ListName::Todo), 2);
        assert_eq!(stats.count(ListName::InProgress), 1);
    }
}
