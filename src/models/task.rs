use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Review,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "completed" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            other => Err(format!("unsupported task status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }

    /// Scoring weight of the priority level.
    pub fn weight(&self) -> u32 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
            TaskPriority::Critical => 4,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "critical" => Ok(TaskPriority::Critical),
            other => Err(format!("unsupported task priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl TaskDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskDifficulty::Easy => "easy",
            TaskDifficulty::Medium => "medium",
            TaskDifficulty::Hard => "hard",
            TaskDifficulty::Expert => "expert",
        }
    }

    /// Scoring weight of the difficulty level.
    pub fn weight(&self) -> u32 {
        match self {
            TaskDifficulty::Easy => 1,
            TaskDifficulty::Medium => 2,
            TaskDifficulty::Hard => 3,
            TaskDifficulty::Expert => 4,
        }
    }
}

impl fmt::Display for TaskDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskDifficulty {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "easy" => Ok(TaskDifficulty::Easy),
            "medium" => Ok(TaskDifficulty::Medium),
            "hard" => Ok(TaskDifficulty::Hard),
            "expert" => Ok(TaskDifficulty::Expert),
            other => Err(format!("unsupported task difficulty: {other}")),
        }
    }
}

/// A task row as exported by the hosted task table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub difficulty: Option<TaskDifficulty>,
    #[serde(default, with = "flexible_datetime")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, with = "flexible_datetime")]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub project_id: String,
}

impl TaskRecord {
    pub fn effective_difficulty(&self) -> TaskDifficulty {
        self.difficulty.unwrap_or_default()
    }

    /// Priority weight times difficulty weight.
    pub fn weight(&self) -> u32 {
        self.priority.weight() * self.effective_difficulty().weight()
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(user_id)
    }

    pub fn is_overdue_at(&self, now: &DateTime<Utc>) -> bool {
        !self.status.is_completed() && self.due_date.map(|due| due < *now).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub display_name: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Parses either a bare `YYYY-MM-DD` date (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_task_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date value: {trimmed}"))
}

mod flexible_datetime {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => super::parse_task_datetime(value)
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}
