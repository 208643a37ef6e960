use chrono::{DateTime, TimeZone, Utc};
use teamhub_app_lib::models::task::{TaskDifficulty, TaskPriority, TaskRecord, TaskStatus, UserRef};
use teamhub_app_lib::services::productivity_score_service::{
    blend_productivity_score, compute_all_productivity, compute_productivity,
};
use teamhub_app_lib::services::snapshot_service::parse_snapshot;
use teamhub_app_lib::services::workload_service::{compute_all_workloads, compute_workload};

fn eval_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap()
}

fn roster_snapshot() -> &'static str {
    r#"{
        "users": [
            {"id": "u-ada", "display_name": "Ada"},
            {"id": "u-grace", "display_name": "Grace"},
            {"id": "u-linus", "display_name": "Linus"}
        ],
        "tasks": [
            {"id": "1", "title": "Frame welds", "status": "completed", "priority": "high",
             "difficulty": "medium", "due_date": "2024-01-10", "completion_date": "2024-01-08",
             "assigned_to": "u-ada", "project_id": "chassis"},
            {"id": "2", "title": "Sponsor report", "status": "completed", "priority": "low",
             "difficulty": "easy", "due_date": "2024-01-01", "completion_date": "2024-01-31",
             "assigned_to": "u-ada", "project_id": "business"},
            {"id": "3", "title": "Battery box", "status": "in_progress", "priority": "critical",
             "difficulty": "expert", "due_date": "2024-02-01",
             "assigned_to": "u-ada", "project_id": "powertrain"},
            {"id": "4", "title": "Wiring loom", "status": "review", "priority": "medium",
             "due_date": "2024-03-01", "assigned_to": "u-grace", "project_id": "electrical"},
            {"id": "5", "title": "Pedal box", "status": "completed", "priority": "critical",
             "difficulty": "hard", "assigned_to": "u-grace", "project_id": "chassis"},
            {"id": "6", "title": "Unassigned", "status": "blocked", "priority": "low",
             "project_id": "misc"}
        ]
    }"#
}

#[test]
fn roster_scoring_matches_documented_arithmetic() {
    let snapshot = parse_snapshot(roster_snapshot()).expect("valid snapshot");

    let workloads = compute_all_workloads(&snapshot.users, &snapshot.tasks, &eval_time());
    let productivity = compute_all_productivity(&snapshot.users, &snapshot.tasks);

    assert_eq!(workloads.len(), 3);
    assert_eq!(productivity.len(), 3);
    for (index, user) in snapshot.users.iter().enumerate() {
        assert_eq!(workloads[index].user_id, user.id);
        assert_eq!(productivity[index].user_id, user.id);
    }

    let ada_workload = &workloads[0];
    assert_eq!(ada_workload.total_tasks, 3);
    assert_eq!(ada_workload.completed_tasks, 2);
    assert_eq!(ada_workload.active_tasks, 1);
    assert_eq!(ada_workload.overdue_tasks, 1);

    // weights: 6 on time, 1 at half credit -> 6.5 / 7
    let ada = &productivity[0];
    assert_eq!(ada.total_completed, 2);
    assert_eq!(ada.completed_on_time, 1);
    assert_eq!(ada.completed_overdue, 1);
    assert_eq!(ada.on_time_completion_rate, 50);
    assert_eq!(ada.weighted_score, 93);
    assert_eq!(ada.average_days_on_time, 2.0);
    assert_eq!(ada.average_days_overdue, 30.0);
    assert_eq!(ada.productivity_score, 67);

    // Undated completion: full weight, no on-time/overdue counts.
    let grace = &productivity[1];
    assert_eq!(grace.total_completed, 1);
    assert_eq!(grace.completed_on_time, 0);
    assert_eq!(grace.completed_overdue, 0);
    assert_eq!(grace.weighted_score, 100);
    assert_eq!(grace.productivity_score, 40);

    let linus_workload = &workloads[2];
    assert_eq!(linus_workload.total_tasks, 0);
    assert_eq!(productivity[2].productivity_score, 0);
}

#[test]
fn buckets_partition_every_summary() {
    let snapshot = parse_snapshot(roster_snapshot()).expect("valid snapshot");

    for summary in compute_all_workloads(&snapshot.users, &snapshot.tasks, &eval_time()) {
        assert_eq!(summary.by_status.total(), summary.total_tasks);
        assert_eq!(summary.by_priority.total(), summary.total_tasks);
        assert_eq!(summary.by_difficulty.total(), summary.total_tasks);
        assert_eq!(summary.active_tasks + summary.completed_tasks, summary.total_tasks);
    }
}

#[test]
fn blended_score_matches_independent_computation() {
    let snapshot = parse_snapshot(roster_snapshot()).expect("valid snapshot");

    for summary in compute_all_productivity(&snapshot.users, &snapshot.tasks) {
        let expected = (f64::from(summary.on_time_completion_rate) * 0.6
            + f64::from(summary.weighted_score) * 0.4)
            .round() as u32;
        assert_eq!(summary.productivity_score, expected);
        assert_eq!(
            summary.productivity_score,
            blend_productivity_score(summary.on_time_completion_rate, summary.weighted_score)
        );
    }
}

#[test]
fn five_pending_tasks_have_workload_but_no_productivity() {
    let tasks: Vec<TaskRecord> = (0..5)
        .map(|i| TaskRecord {
            id: format!("p{i}"),
            title: format!("Pending {i}"),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            difficulty: Some(TaskDifficulty::Hard),
            due_date: None,
            completion_date: None,
            assigned_to: Some("u1".to_string()),
            project_id: "aero".to_string(),
        })
        .collect();

    let workload = compute_workload("u1", "Ada", &tasks, &eval_time());
    let productivity = compute_productivity("u1", "Ada", &tasks);

    assert_eq!(workload.total_tasks, 5);
    assert_eq!(workload.active_tasks, 5);
    assert_eq!(productivity.productivity_score, 0);
    assert_eq!(productivity.on_time_completion_rate, 0);
    assert_eq!(productivity.weighted_score, 0);
    assert_eq!(productivity.total_completed, 0);
}

#[test]
fn empty_inputs_yield_empty_outputs() {
    let users: Vec<UserRef> = Vec::new();
    assert!(compute_all_workloads(&users, &[], &eval_time()).is_empty());
    assert!(compute_all_productivity(&users, &[]).is_empty());
}

#[test]
fn summaries_serialize_in_camel_case() {
    let snapshot = parse_snapshot(roster_snapshot()).expect("valid snapshot");
    let summary = compute_productivity("u-ada", "Ada", &snapshot.tasks);

    let value = serde_json::to_value(&summary).expect("serializable");
    assert_eq!(value["onTimeCompletionRate"], 50);
    assert_eq!(value["averageDaysOverdue"], 30.0);
}
