use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::error::AppResult;
use crate::models::analytics::{ReportExportFormat, ReportExportResult, TeamOverview};

const REPORT_PREFIX: &str = "team-report";
const CSV_HEADER: &str = "user_id,user_name,risk_level,total_tasks,active_tasks,completed_tasks,overdue_tasks,productivity_score,on_time_completion_rate,weighted_score,completed_on_time,completed_overdue,average_days_on_time,average_days_overdue";

/// Writes rendered team reports into a reports directory.
pub struct ExportService {
    reports_dir: PathBuf,
}

impl ExportService {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn export(
        &self,
        overview: &TeamOverview,
        format: ReportExportFormat,
        now: &DateTime<Utc>,
    ) -> AppResult<ReportExportResult> {
        std::fs::create_dir_all(&self.reports_dir)?;

        let timestamp = now.format("%Y%m%dT%H%M%SZ");
        let filename = format!("{REPORT_PREFIX}-{}.{}", timestamp, format.file_extension());
        let path = self.reports_dir.join(filename);

        let content = render(overview, format)?;
        std::fs::write(&path, content)?;

        info!(
            target: "app::export",
            path = %path.display(),
            format = format.as_str(),
            "team report written"
        );

        Ok(ReportExportResult {
            file_path: path.to_string_lossy().to_string(),
            format,
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

pub fn render(overview: &TeamOverview, format: ReportExportFormat) -> AppResult<String> {
    match format {
        ReportExportFormat::Json => Ok(serde_json::to_string_pretty(overview)?),
        ReportExportFormat::Markdown => Ok(render_markdown_report(overview)),
        ReportExportFormat::Csv => Ok(render_csv_report(overview)),
    }
}

fn render_markdown_report(overview: &TeamOverview) -> String {
    let totals = &overview.totals;
    let mut content = String::new();
    content.push_str("# Team Workload Report\n\n");
    content.push_str(&format!("Generated: {}\n\n", overview.generated_at));

    content.push_str("## Team totals\n");
    content.push_str(&format!(
        "- Members: {}\n- Tasks: {}\n- Active: {}\n- Completed: {}\n- Overdue: {}\n- Average productivity: {}\n\n",
        totals.members,
        totals.total_tasks,
        totals.active_tasks,
        totals.completed_tasks,
        totals.overdue_tasks,
        totals.average_productivity_score
    ));

    content.push_str("## Members\n\n");
    content.push_str("| Member | Load | Active | Overdue | Completed | Score | On-time % | Weighted |\n");
    content.push_str("|---|---|---|---|---|---|---|---|\n");
    for member in &overview.members {
        content.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            escape_markdown_cell(member.user_name()),
            member.risk_level,
            member.workload.active_tasks,
            member.workload.overdue_tasks,
            member.workload.completed_tasks,
            member.productivity.productivity_score,
            member.productivity.on_time_completion_rate,
            member.productivity.weighted_score
        ));
    }

    content
}

fn render_csv_report(overview: &TeamOverview) -> String {
    let mut content = String::from(CSV_HEADER);
    content.push('\n');

    for member in &overview.members {
        let workload = &member.workload;
        let productivity = &member.productivity;
        let row = [
            escape_csv_field(&workload.user_id),
            escape_csv_field(&workload.user_name),
            member.risk_level.to_string(),
            workload.total_tasks.to_string(),
            workload.active_tasks.to_string(),
            workload.completed_tasks.to_string(),
            workload.overdue_tasks.to_string(),
            productivity.productivity_score.to_string(),
            productivity.on_time_completion_rate.to_string(),
            productivity.weighted_score.to_string(),
            productivity.completed_on_time.to_string(),
            productivity.completed_overdue.to_string(),
            format!("{:.1}", productivity.average_days_on_time),
            format!("{:.1}", productivity.average_days_overdue),
        ];
        content.push_str(&row.join(","));
        content.push('\n');
    }

    content
}

fn escape_csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn escape_markdown_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
