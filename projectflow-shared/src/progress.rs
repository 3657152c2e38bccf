/// Status/progress engine: the pure rules behind project completion
/// percentages and overdue classification.
///
/// A project's progress is normally *derived* from its tasks: the percentage
/// of tasks in `Done` over the total. The database-backed recomputation in
/// `models::project` applies exactly these functions; they live here so the
/// arithmetic and edge cases are testable without a database.
///
/// # Rules
///
/// - Derived progress is `100 * done / total`, and exactly `0.0` for a
///   project with no tasks (never NaN, never undefined).
/// - A task is overdue iff it has a deadline, the deadline is in the past,
///   and the task is not `Done`. Overdue-ness is derived on read, never
///   stored.
/// - Task status transitions are unrestricted: any status may move to any
///   other status. The UI only offers adjacent moves on the kanban board,
///   but the engine does not care.
///
/// # Example
///
/// ```
/// use projectflow_shared::progress::derived_progress;
///
/// assert_eq!(derived_progress(1, 4), 25.0);
/// assert_eq!(derived_progress(0, 0), 0.0);
/// ```

use chrono::{DateTime, Utc};

use crate::models::task::TaskStatus;

/// Seconds in a day, used to floor overdue durations to whole days.
const SECONDS_PER_DAY: i64 = 86_400;

/// Computes a project's derived progress percentage.
///
/// Returns `100 * done / total` clamped into `[0, 100]`. A project with no
/// tasks has progress `0.0` by definition.
pub fn derived_progress(done: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let pct = 100.0 * done as f64 / total as f64;
    pct.clamp(0.0, 100.0)
}

/// Returns true iff the task is overdue at `now`.
///
/// A `Done` task is never overdue, regardless of its deadline. A task
/// without a deadline is never overdue.
pub fn is_overdue(deadline: Option<DateTime<Utc>>, status: TaskStatus, now: DateTime<Utc>) -> bool {
    match deadline {
        Some(deadline) => deadline < now && status != TaskStatus::Done,
        None => false,
    }
}

/// Number of whole days a deadline is in the past at `now`.
///
/// Only meaningful when the corresponding task is overdue; callers should
/// check [`is_overdue`] first. The duration is floored, so a deadline missed
/// by 36 hours counts as 1 day late.
pub fn overdue_days(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = now.signed_duration_since(deadline).num_seconds();
    if elapsed <= 0 {
        return 0;
    }
    elapsed / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_derived_progress_basic() {
        assert_eq!(derived_progress(0, 4), 0.0);
        assert_eq!(derived_progress(1, 4), 25.0);
        assert_eq!(derived_progress(2, 4), 50.0);
        assert_eq!(derived_progress(4, 4), 100.0);
    }

    #[test]
    fn test_derived_progress_empty_project_is_zero() {
        // Never NaN or undefined, even with no tasks.
        let pct = derived_progress(0, 0);
        assert_eq!(pct, 0.0);
        assert!(!pct.is_nan());
    }

    #[test]
    fn test_derived_progress_stays_in_bounds() {
        for done in 0..=10 {
            for total in 0..=10 {
                let pct = derived_progress(done, total);
                assert!((0.0..=100.0).contains(&pct), "out of bounds: {}/{}", done, total);
            }
        }
    }

    #[test]
    fn test_derived_progress_exact_ratio() {
        assert_eq!(derived_progress(1, 3), 100.0 / 3.0);
        assert_eq!(derived_progress(2, 3), 200.0 / 3.0);
    }

    #[test]
    fn test_is_overdue_requires_past_deadline() {
        let now = at(2024, 1, 11);

        assert!(is_overdue(Some(at(2024, 1, 1)), TaskStatus::Todo, now));
        assert!(is_overdue(Some(at(2024, 1, 1)), TaskStatus::InProgress, now));
        assert!(!is_overdue(Some(at(2024, 2, 1)), TaskStatus::Todo, now));
    }

    #[test]
    fn test_done_task_is_never_overdue() {
        let now = at(2024, 1, 11);
        assert!(!is_overdue(Some(at(2024, 1, 1)), TaskStatus::Done, now));
    }

    #[test]
    fn test_missing_deadline_is_never_overdue() {
        let now = at(2024, 1, 11);
        assert!(!is_overdue(None, TaskStatus::Todo, now));
        assert!(!is_overdue(None, TaskStatus::InProgress, now));
    }

    #[test]
    fn test_overdue_days_whole_days() {
        let deadline = at(2024, 1, 1);

        assert_eq!(overdue_days(deadline, at(2024, 1, 11)), 10);
        assert_eq!(overdue_days(deadline, at(2024, 1, 2)), 1);

        // 36 hours late floors to 1 day.
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        assert_eq!(overdue_days(deadline, now), 1);
    }

    #[test]
    fn test_overdue_days_future_deadline_is_zero() {
        assert_eq!(overdue_days(at(2024, 2, 1), at(2024, 1, 1)), 0);
    }
}
