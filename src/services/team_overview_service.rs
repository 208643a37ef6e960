use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

use crate::models::analytics::{TeamMemberOverview, TeamOverview, TeamTotals};
use crate::models::productivity::ProductivitySummary;
use crate::models::settings::WorkloadThresholds;
use crate::models::snapshot::RosterSnapshot;
use crate::models::workload::{WorkloadRiskLevel, WorkloadSummary};
use crate::services::productivity_score_service::compute_all_productivity;
use crate::services::workload_service::compute_all_workloads;

const WARNING_THRESHOLD_MULTIPLIER: f64 = 0.8;
const CRITICAL_THRESHOLD_MULTIPLIER: f64 = 1.0;

/// Load indicator for one member's open and overdue tasks.
pub fn classify_workload(
    summary: &WorkloadSummary,
    thresholds: &WorkloadThresholds,
) -> WorkloadRiskLevel {
    let capacity = f64::from(thresholds.active_task_capacity.max(1));
    let utilization = f64::from(summary.active_tasks) / capacity;

    if utilization > CRITICAL_THRESHOLD_MULTIPLIER
        || summary.overdue_tasks >= thresholds.overdue_critical_count.max(1)
    {
        WorkloadRiskLevel::Critical
    } else if utilization >= WARNING_THRESHOLD_MULTIPLIER || summary.overdue_tasks >= 1 {
        WorkloadRiskLevel::Warning
    } else {
        WorkloadRiskLevel::Ok
    }
}

/// Builds the roster card data: per-member summaries plus team totals.
pub struct TeamOverviewService {
    thresholds: WorkloadThresholds,
}

impl TeamOverviewService {
    pub fn new(thresholds: WorkloadThresholds) -> Self {
        Self { thresholds }
    }

    pub fn build_overview(&self, snapshot: &RosterSnapshot, now: &DateTime<Utc>) -> TeamOverview {
        let workloads = compute_all_workloads(&snapshot.users, &snapshot.tasks, now);
        let productivity = compute_all_productivity(&snapshot.users, &snapshot.tasks);

        let members: Vec<TeamMemberOverview> = workloads
            .into_iter()
            .zip(productivity)
            .map(|(workload, productivity)| {
                let risk_level = classify_workload(&workload, &self.thresholds);
                TeamMemberOverview {
                    workload,
                    productivity,
                    risk_level,
                }
            })
            .collect();

        let totals = summarize_totals(&members);

        let orphaned = snapshot.orphaned_task_count();
        if orphaned > 0 {
            debug!(
                target: "app::analytics",
                orphaned,
                "tasks without a rostered assignee were skipped"
            );
        }

        info!(
            target: "app::analytics",
            members = totals.members,
            active = totals.active_tasks,
            overdue = totals.overdue_tasks,
            average_score = totals.average_productivity_score,
            "team overview built"
        );

        TeamOverview {
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            members,
            totals,
        }
    }
}

impl Default for TeamOverviewService {
    fn default() -> Self {
        Self::new(WorkloadThresholds::default())
    }
}

fn summarize_totals(members: &[TeamMemberOverview]) -> TeamTotals {
    let mut totals = TeamTotals {
        members: members.len() as u32,
        ..TeamTotals::default()
    };

    for member in members {
        totals.total_tasks += member.workload.total_tasks;
        totals.active_tasks += member.workload.active_tasks;
        totals.completed_tasks += member.workload.completed_tasks;
        totals.overdue_tasks += member.workload.overdue_tasks;
    }

    let scored: Vec<&ProductivitySummary> = members
        .iter()
        .map(|member| &member.productivity)
        .filter(|summary| summary.has_completions())
        .collect();

    if !scored.is_empty() {
        let sum: u32 = scored.iter().map(|summary| summary.productivity_score).sum();
        totals.average_productivity_score = (f64::from(sum) / scored.len() as f64).round() as u32;
    }

    totals
}
