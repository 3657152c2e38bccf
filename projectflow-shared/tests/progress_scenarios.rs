/// End-to-end scenarios for the status/progress engine
///
/// These drive the pure engine functions through the lifecycles the
/// dashboard depends on, without a database: progress as tasks move across
/// the board, overdue classification, and stable zero-filled status
/// buckets.

use chrono::{DateTime, TimeZone, Utc};
use projectflow_shared::models::task::TaskStatus;
use projectflow_shared::progress::{derived_progress, is_overdue, overdue_days};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Counts done tasks the way the recompute query does
fn done_count(statuses: &[TaskStatus]) -> i64 {
    statuses.iter().filter(|s| **s == TaskStatus::Done).count() as i64
}

#[test]
fn project_progress_follows_task_completion() {
    // Four tasks, all todo: 0%.
    let mut statuses = vec![TaskStatus::Todo; 4];
    assert_eq!(derived_progress(done_count(&statuses), 4), 0.0);

    // One task finishes: 25%.
    statuses[0] = TaskStatus::Done;
    assert_eq!(derived_progress(done_count(&statuses), 4), 25.0);

    // Moving a task to in_progress changes nothing.
    statuses[1] = TaskStatus::InProgress;
    assert_eq!(derived_progress(done_count(&statuses), 4), 25.0);

    // Everything done: 100%.
    for s in statuses.iter_mut() {
        *s = TaskStatus::Done;
    }
    assert_eq!(derived_progress(done_count(&statuses), 4), 100.0);
}

#[test]
fn deleting_the_last_task_resets_progress_to_zero() {
    let statuses = vec![TaskStatus::Done];
    assert_eq!(derived_progress(done_count(&statuses), 1), 100.0);

    // The recompute runs over the remaining (empty) set.
    let remaining: Vec<TaskStatus> = Vec::new();
    let pct = derived_progress(done_count(&remaining), remaining.len() as i64);
    assert_eq!(pct, 0.0);
    assert!(!pct.is_nan());
}

#[test]
fn overdue_task_clears_when_completed() {
    let deadline = at(2025, 1, 10);
    let now = at(2025, 1, 20);

    // Ten days past deadline, still in progress: overdue by 10 days.
    assert!(is_overdue(Some(deadline), TaskStatus::InProgress, now));
    assert_eq!(overdue_days(deadline, now), 10);

    // Completing the task clears the overdue flag without touching the
    // deadline.
    assert!(!is_overdue(Some(deadline), TaskStatus::Done, now));
}

#[test]
fn future_deadlines_and_missing_deadlines_are_on_time() {
    let now = at(2025, 1, 20);

    assert!(!is_overdue(Some(at(2025, 2, 1)), TaskStatus::Todo, now));
    assert!(!is_overdue(None, TaskStatus::Todo, now));
    assert!(!is_overdue(None, TaskStatus::InProgress, now));
}

#[test]
fn status_filter_partitions_the_task_set() {
    let tasks = vec![
        TaskStatus::Todo,
        TaskStatus::Done,
        TaskStatus::InProgress,
        TaskStatus::Todo,
        TaskStatus::Done,
        TaskStatus::Todo,
    ];

    // Per-status selections are disjoint and jointly cover the whole set.
    let total: usize = TaskStatus::ALL
        .iter()
        .map(|status| tasks.iter().filter(|t| *t == status).count())
        .sum();
    assert_eq!(total, tasks.len());

    let todo = tasks.iter().filter(|t| **t == TaskStatus::Todo).count();
    let in_progress = tasks.iter().filter(|t| **t == TaskStatus::InProgress).count();
    let done = tasks.iter().filter(|t| **t == TaskStatus::Done).count();
    assert_eq!((todo, in_progress, done), (3, 1, 2));
}

#[test]
fn status_buckets_include_empty_statuses() {
    // A task set with nothing in progress still yields all three buckets.
    let tasks = vec![TaskStatus::Todo, TaskStatus::Done];

    let buckets: Vec<(TaskStatus, usize)> = TaskStatus::ALL
        .iter()
        .map(|status| (*status, tasks.iter().filter(|t| *t == status).count()))
        .collect();

    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[1], (TaskStatus::InProgress, 0));
}
