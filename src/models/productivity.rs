use serde::{Deserialize, Serialize};

/// Timeliness-based productivity figures for one member.
///
/// Percentages and scores are integers in `0..=100`; day averages carry one
/// decimal place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductivitySummary {
    pub user_id: String,
    pub user_name: String,
    pub productivity_score: u32,
    pub on_time_completion_rate: u32,
    pub average_days_on_time: f64,
    pub average_days_overdue: f64,
    pub completed_on_time: u32,
    pub completed_overdue: u32,
    pub total_completed: u32,
    pub weighted_score: u32,
}

impl ProductivitySummary {
    pub fn zeroed(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            productivity_score: 0,
            on_time_completion_rate: 0,
            average_days_on_time: 0.0,
            average_days_overdue: 0.0,
            completed_on_time: 0,
            completed_overdue: 0,
            total_completed: 0,
            weighted_score: 0,
        }
    }

    pub fn has_completions(&self) -> bool {
        self.total_completed > 0
    }
}
