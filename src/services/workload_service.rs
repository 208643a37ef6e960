use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::task::{TaskRecord, UserRef};
use crate::models::workload::WorkloadSummary;

/// Counts one member's assigned tasks by state, priority and difficulty.
///
/// `now` decides which open tasks are overdue. Tasks assigned to other
/// users, or to nobody, are ignored.
pub fn compute_workload(
    user_id: &str,
    user_name: &str,
    tasks: &[TaskRecord],
    now: &DateTime<Utc>,
) -> WorkloadSummary {
    let mut summary = WorkloadSummary::empty(user_id, user_name);

    for task in tasks.iter().filter(|task| task.is_assigned_to(user_id)) {
        summary.total_tasks += 1;

        if task.status.is_completed() {
            summary.completed_tasks += 1;
        } else {
            summary.active_tasks += 1;
        }

        if task.is_overdue_at(now) {
            summary.overdue_tasks += 1;
        }

        summary.by_status.record(task.status);
        summary.by_priority.record(task.priority);
        summary.by_difficulty.record(task.effective_difficulty());
    }

    debug!(
        target: "app::scoring",
        user_id,
        total = summary.total_tasks,
        active = summary.active_tasks,
        overdue = summary.overdue_tasks,
        "workload computed"
    );

    summary
}

/// One summary per roster entry, in roster order.
pub fn compute_all_workloads(
    users: &[UserRef],
    tasks: &[TaskRecord],
    now: &DateTime<Utc>,
) -> Vec<WorkloadSummary> {
    users
        .iter()
        .map(|user| compute_workload(&user.id, &user.display_name, tasks, now))
        .collect()
}
