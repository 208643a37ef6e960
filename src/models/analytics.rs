use serde::{Deserialize, Serialize};

use crate::models::productivity::ProductivitySummary;
use crate::models::workload::{WorkloadRiskLevel, WorkloadSummary};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberOverview {
    pub workload: WorkloadSummary,
    pub productivity: ProductivitySummary,
    pub risk_level: WorkloadRiskLevel,
}

impl TeamMemberOverview {
    pub fn user_name(&self) -> &str {
        &self.workload.user_name
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamTotals {
    pub members: u32,
    pub total_tasks: u32,
    pub active_tasks: u32,
    pub completed_tasks: u32,
    pub overdue_tasks: u32,
    /// Mean score over members with at least one completed task.
    pub average_productivity_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamOverview {
    pub generated_at: String,
    pub members: Vec<TeamMemberOverview>,
    pub totals: TeamTotals,
}

impl TeamOverview {
    /// Members sorted by productivity score, highest first; ties by name.
    pub fn ranked_by_productivity(&self) -> Vec<&TeamMemberOverview> {
        let mut ranked: Vec<_> = self.members.iter().collect();
        ranked.sort_by(|a, b| {
            b.productivity
                .productivity_score
                .cmp(&a.productivity.productivity_score)
                .then_with(|| a.user_name().cmp(b.user_name()))
        });
        ranked
    }

    pub fn members_at_risk(&self) -> Vec<&TeamMemberOverview> {
        self.members
            .iter()
            .filter(|member| member.risk_level != WorkloadRiskLevel::Ok)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportExportFormat {
    Markdown,
    #[default]
    Json,
    Csv,
}

impl ReportExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportExportFormat::Markdown => "markdown",
            ReportExportFormat::Json => "json",
            ReportExportFormat::Csv => "csv",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ReportExportFormat::Markdown => "md",
            ReportExportFormat::Json => "json",
            ReportExportFormat::Csv => "csv",
        }
    }
}

impl TryFrom<&str> for ReportExportFormat {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "markdown" | "md" => Ok(ReportExportFormat::Markdown),
            "json" => Ok(ReportExportFormat::Json),
            "csv" => Ok(ReportExportFormat::Csv),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportExportResult {
    pub file_path: String,
    pub format: ReportExportFormat,
    pub generated_at: String,
}
