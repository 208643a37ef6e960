use chrono::{DateTime, TimeZone, Utc};
use tempfile::tempdir;
use teamhub_app_lib::models::analytics::{ReportExportFormat, TeamOverview};
use teamhub_app_lib::services::export_service::{render, ExportService};
use teamhub_app_lib::services::snapshot_service::parse_snapshot;
use teamhub_app_lib::services::team_overview_service::TeamOverviewService;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 18, 30, 0).unwrap()
}

fn overview() -> TeamOverview {
    let snapshot = parse_snapshot(
        r#"{
            "users": [
                {"id": "u1", "display_name": "Doe, Jane"},
                {"id": "u2", "display_name": "Sam"}
            ],
            "tasks": [
                {"id": "t1", "title": "Aero mount", "status": "completed", "priority": "medium",
                 "due_date": "2024-05-01", "completion_date": "2024-05-04T10:00:00Z",
                 "assigned_to": "u1", "project_id": "aero"},
                {"id": "t2", "title": "Tyre data", "status": "pending", "priority": "high",
                 "due_date": "2024-05-30", "assigned_to": "u2", "project_id": "vd"}
            ]
        }"#,
    )
    .expect("valid snapshot");

    TeamOverviewService::default().build_overview(&snapshot, &now())
}

#[test]
fn json_export_round_trips_through_file() {
    let dir = tempdir().expect("create temp dir");
    let service = ExportService::new(dir.path().join("reports"));

    let result = service
        .export(&overview(), ReportExportFormat::Json, &now())
        .expect("export succeeds");

    assert!(result.file_path.ends_with("team-report-20240603T183000Z.json"));
    assert_eq!(result.generated_at, "2024-06-03T18:30:00Z");
    assert_eq!(result.generated_at, overview().generated_at);
    let written = std::fs::read_to_string(&result.file_path).expect("report written");
    let parsed: TeamOverview = serde_json::from_str(&written).expect("valid json");
    assert_eq!(parsed, overview());
}

#[test]
fn csv_has_header_and_one_row_per_member() {
    let content = render(&overview(), ReportExportFormat::Csv).expect("render csv");
    let lines: Vec<_> = content.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("user_id,user_name,risk_level"));
    // 4 days late (ceil of 3.4): penalty 4/30, rate 0, weighted 87 -> 35
    assert_eq!(
        lines[1],
        "u1,\"Doe, Jane\",ok,1,0,1,0,35,0,87,0,1,0.0,4.0"
    );
    assert!(lines[2].starts_with("u2,Sam,warning,1,1,0,1,0,0,0"));
}

#[test]
fn markdown_lists_totals_and_members() {
    let content = render(&overview(), ReportExportFormat::Markdown).expect("render markdown");

    assert!(content.starts_with("# Team Workload Report"));
    assert!(content.contains("- Members: 2"));
    assert!(content.contains("| Doe, Jane | ok | 0 | 0 | 1 | 35 | 0 | 87 |"));
    assert!(content.contains("| Sam | warning | 1 | 1 | 0 | 0 | 0 | 0 |"));
}
