//! Storage-id renumbering after structural changes.

use chrono::{DateTime, Utc};

use crate::model::Task;

/// Recompute storage ids for the whole record set: incomplete tasks first,
/// then completed, each group ascending by `created_at` with the previous id
/// as tie-break, then `id := position` (1-based).
///
/// Missing or unparseable timestamps sort last within their group. The
/// previous-id fallback makes the order total even when timestamps collide,
/// and makes the function idempotent: a second call sees ids that already
/// encode the sorted order.
pub fn reindex(tasks: &mut [Task]) {
    tasks.sort_by_key(sort_key);
    for (position, task) in tasks.iter_mut().enumerate() {
        task.id = position as u64 + 1;
    }
}

fn sort_key(task: &Task) -> (bool, bool, DateTime<Utc>, u64) {
    (
        task.completed,
        task.created_at.is_none(),
        task.created_at.unwrap_or(DateTime::<Utc>::MIN_UTC),
        task.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap())
    }

    fn task(id: u64, completed: bool, created_at: Option<DateTime<Utc>>) -> Task {
        Task {
            id,
            title: format!("task-{id}"),
            description: String::new(),
            completed,
            created_at,
            completed_at: completed.then(Utc::now),
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn ids_are_dense_from_one() {
        let mut tasks = vec![
            task(7, false, at(3)),
            task(2, true, at(1)),
            task(9, false, at(2)),
        ];
        reindex(&mut tasks);
        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn incomplete_before_completed_regardless_of_storage_order() {
        // Completed task created earliest must still sort after both
        // incomplete tasks.
        let mut tasks = vec![
            task(1, true, at(0)),
            task(2, false, at(2)),
            task(3, false, at(1)),
        ];
        reindex(&mut tasks);
        assert_eq!(titles(&tasks), vec!["task-3", "task-2", "task-1"]);
        assert!(!tasks[0].completed && !tasks[1].completed && tasks[2].completed);
    }

    #[test]
    fn reindex_is_idempotent() {
        let mut tasks = vec![
            task(4, true, at(1)),
            task(1, false, None),
            task(3, false, at(2)),
            task(2, false, at(2)),
        ];
        reindex(&mut tasks);
        let once = tasks.clone();
        reindex(&mut tasks);
        assert_eq!(tasks, once);
    }

    #[test]
    fn equal_timestamps_fall_back_to_previous_id() {
        let mut tasks = vec![
            task(5, false, at(1)),
            task(2, false, at(1)),
            task(8, false, at(1)),
        ];
        reindex(&mut tasks);
        assert_eq!(titles(&tasks), vec!["task-2", "task-5", "task-8"]);
    }

    #[test]
    fn missing_timestamps_sort_last_within_their_group() {
        let mut tasks = vec![
            task(1, false, None),
            task(2, false, at(5)),
            task(3, true, None),
            task(4, true, at(1)),
        ];
        reindex(&mut tasks);
        assert_eq!(titles(&tasks), vec!["task-2", "task-1", "task-4", "task-3"]);
    }

    #[test]
    fn empty_set_is_a_noop() {
        let mut tasks: Vec<Task> = vec![];
        reindex(&mut tasks);
        assert!(tasks.is_empty());
    }
}
