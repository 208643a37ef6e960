use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::task::{TaskDifficulty, TaskPriority, TaskStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadRiskLevel {
    Ok,
    Warning,
    Critical,
}

impl WorkloadRiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadRiskLevel::Ok => "ok",
            WorkloadRiskLevel::Warning => "warning",
            WorkloadRiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for WorkloadRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub pending: u32,
    pub in_progress: u32,
    pub review: u32,
    pub completed: u32,
    pub blocked: u32,
}

impl StatusBreakdown {
    pub fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Review => self.review += 1,
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::Blocked => self.blocked += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.pending + self.in_progress + self.review + self.completed + self.blocked
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl PriorityBreakdown {
    pub fn record(&mut self, priority: TaskPriority) {
        match priority {
            TaskPriority::Low => self.low += 1,
            TaskPriority::Medium => self.medium += 1,
            TaskPriority::High => self.high += 1,
            TaskPriority::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high + self.critical
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBreakdown {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub expert: u32,
}

impl DifficultyBreakdown {
    pub fn record(&mut self, difficulty: TaskDifficulty) {
        match difficulty {
            TaskDifficulty::Easy => self.easy += 1,
            TaskDifficulty::Medium => self.medium += 1,
            TaskDifficulty::Hard => self.hard += 1,
            TaskDifficulty::Expert => self.expert += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.easy + self.medium + self.hard + self.expert
    }
}

/// Count-based breakdown of one member's assigned tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSummary {
    pub user_id: String,
    pub user_name: String,
    pub total_tasks: u32,
    pub active_tasks: u32,
    pub completed_tasks: u32,
    pub overdue_tasks: u32,
    pub by_status: StatusBreakdown,
    pub by_priority: PriorityBreakdown,
    pub by_difficulty: DifficultyBreakdown,
}

impl WorkloadSummary {
    pub fn empty(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            total_tasks: 0,
            active_tasks: 0,
            completed_tasks: 0,
            overdue_tasks: 0,
            by_status: StatusBreakdown::default(),
            by_priority: PriorityBreakdown::default(),
            by_difficulty: DifficultyBreakdown::default(),
        }
    }
}
