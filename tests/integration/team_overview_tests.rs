use chrono::{DateTime, Duration, TimeZone, Utc};
use teamhub_app_lib::models::settings::WorkloadThresholds;
use teamhub_app_lib::models::snapshot::RosterSnapshot;
use teamhub_app_lib::models::task::{TaskPriority, TaskRecord, TaskStatus, UserRef};
use teamhub_app_lib::models::workload::WorkloadRiskLevel;
use teamhub_app_lib::services::team_overview_service::TeamOverviewService;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap()
}

fn open_task(id: &str, owner: &str, due_in_days: Option<i64>) -> TaskRecord {
    TaskRecord {
        id: id.to_string(),
        title: format!("Open {id}"),
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        difficulty: None,
        due_date: due_in_days.map(|days| now() + Duration::days(days)),
        completion_date: None,
        assigned_to: Some(owner.to_string()),
        project_id: "suspension".to_string(),
    }
}

fn done_task(id: &str, owner: &str, days_late: i64) -> TaskRecord {
    let due = now() - Duration::days(40);
    TaskRecord {
        id: id.to_string(),
        title: format!("Done {id}"),
        status: TaskStatus::Completed,
        priority: TaskPriority::High,
        difficulty: None,
        due_date: Some(due),
        completion_date: Some(due + Duration::days(days_late)),
        assigned_to: Some(owner.to_string()),
        project_id: "suspension".to_string(),
    }
}

fn snapshot() -> RosterSnapshot {
    let mut tasks = Vec::new();
    // Ada: 4 open tasks, one overdue, one early completion.
    for i in 0..4 {
        tasks.push(open_task(&format!("a{i}"), "ada", Some(if i == 0 { -2 } else { 5 })));
    }
    tasks.push(done_task("a-done", "ada", -1));
    // Grace: 6 open tasks against a capacity of 5, one late completion.
    for i in 0..6 {
        tasks.push(open_task(&format!("g{i}"), "grace", None));
    }
    tasks.push(done_task("g-done", "grace", 3));
    // Linus: nothing open, nothing done.

    RosterSnapshot::new(
        vec![
            UserRef::new("grace", "Grace"),
            UserRef::new("ada", "Ada"),
            UserRef::new("linus", "Linus"),
        ],
        tasks,
    )
}

fn service() -> TeamOverviewService {
    TeamOverviewService::new(WorkloadThresholds {
        active_task_capacity: 5,
        overdue_critical_count: 2,
    })
}

#[test]
fn overview_keeps_roster_order_and_classifies_load() {
    let overview = service().build_overview(&snapshot(), &now());

    let names: Vec<_> = overview.members.iter().map(|m| m.user_name()).collect();
    assert_eq!(names, vec!["Grace", "Ada", "Linus"]);

    assert_eq!(overview.members[0].risk_level, WorkloadRiskLevel::Critical);
    assert_eq!(overview.members[1].risk_level, WorkloadRiskLevel::Warning);
    assert_eq!(overview.members[2].risk_level, WorkloadRiskLevel::Ok);
    assert_eq!(overview.members_at_risk().len(), 2);
}

#[test]
fn totals_sum_members_and_average_scored_members() {
    let overview = service().build_overview(&snapshot(), &now());
    let totals = &overview.totals;

    assert_eq!(totals.members, 3);
    assert_eq!(totals.total_tasks, 12);
    assert_eq!(totals.active_tasks, 10);
    assert_eq!(totals.completed_tasks, 2);
    assert_eq!(totals.overdue_tasks, 1);

    // Ada 100, Grace: rate 0, weighted 90 -> 36; Linus excluded.
    assert_eq!(overview.members[1].productivity.productivity_score, 100);
    assert_eq!(overview.members[0].productivity.productivity_score, 36);
    assert_eq!(totals.average_productivity_score, 68);
    assert_eq!(overview.generated_at, "2024-05-20T08:00:00Z");
}

#[test]
fn ranking_orders_by_score_then_name() {
    let overview = service().build_overview(&snapshot(), &now());

    let ranked: Vec<_> = overview
        .ranked_by_productivity()
        .into_iter()
        .map(|member| member.user_name())
        .collect();
    assert_eq!(ranked, vec!["Ada", "Grace", "Linus"]);
}

#[test]
fn empty_roster_produces_empty_overview() {
    let overview = TeamOverviewService::default().build_overview(&RosterSnapshot::default(), &now());
    assert!(overview.members.is_empty());
    assert_eq!(overview.totals.members, 0);
    assert_eq!(overview.totals.average_productivity_score, 0);
}
