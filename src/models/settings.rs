use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_DIRECTIVES: &str = "info,app::scoring=debug";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_REPORTS_DIR: &str = "reports";
pub const DEFAULT_ACTIVE_TASK_CAPACITY: u32 = 8;
pub const DEFAULT_OVERDUE_CRITICAL_COUNT: u32 = 3;
pub const DEFAULT_NOTIFICATION_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_NOTIFICATION_INITIAL_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub log_directives: String,
    pub log_dir: String,
    pub reports_dir: String,
    /// Open tasks one member can carry before the load is flagged critical.
    pub active_task_capacity: u32,
    pub overdue_critical_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_webhook_url: Option<String>,
    pub notification_max_attempts: u32,
    pub notification_initial_delay_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_directives: DEFAULT_LOG_DIRECTIVES.to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
            reports_dir: DEFAULT_REPORTS_DIR.to_string(),
            active_task_capacity: DEFAULT_ACTIVE_TASK_CAPACITY,
            overdue_critical_count: DEFAULT_OVERDUE_CRITICAL_COUNT,
            discord_webhook_url: None,
            notification_max_attempts: DEFAULT_NOTIFICATION_MAX_ATTEMPTS,
            notification_initial_delay_ms: DEFAULT_NOTIFICATION_INITIAL_DELAY_MS,
        }
    }
}

impl AppSettings {
    pub fn workload_thresholds(&self) -> WorkloadThresholds {
        WorkloadThresholds {
            active_task_capacity: self.active_task_capacity,
            overdue_critical_count: self.overdue_critical_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkloadThresholds {
    pub active_task_capacity: u32,
    pub overdue_critical_count: u32,
}

impl Default for WorkloadThresholds {
    fn default() -> Self {
        Self {
            active_task_capacity: DEFAULT_ACTIVE_TASK_CAPACITY,
            overdue_critical_count: DEFAULT_OVERDUE_CRITICAL_COUNT,
        }
    }
}
