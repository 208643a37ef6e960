use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::settings::AppSettings;

pub const WEBHOOK_URL_ENV: &str = "TEAMHUB_DISCORD_WEBHOOK_URL";
const MAX_NOTIFICATION_ATTEMPTS: u32 = 10;

#[derive(Debug, Default, Clone)]
pub struct SettingsUpdateInput {
    pub active_task_capacity: Option<u32>,
    pub overdue_critical_count: Option<u32>,
    pub discord_webhook_url: Option<Option<String>>,
    pub notification_max_attempts: Option<u32>,
    pub reports_dir: Option<String>,
}

/// YAML-backed settings with an in-memory cache. The cache holds the file
/// contents only; the webhook env override is applied on read and never
/// persisted.
pub struct SettingsService {
    path: PathBuf,
    cache: RwLock<Option<AppSettings>>,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn get(&self) -> AppResult<AppSettings> {
        let settings = apply_env_override(self.stored()?);
        validate_settings(&settings)?;
        Ok(settings)
    }

    fn stored(&self) -> AppResult<AppSettings> {
        if let Ok(guard) = self.cache.read() {
            if let Some(settings) = guard.as_ref() {
                return Ok(settings.clone());
            }
        }

        let settings = self.load_settings_from_file()?;
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(settings.clone());
        }
        Ok(settings)
    }

    pub fn update(&self, input: SettingsUpdateInput) -> AppResult<AppSettings> {
        let mut current = self.stored()?;

        if let Some(capacity) = input.active_task_capacity {
            current.active_task_capacity = capacity;
        }

        if let Some(count) = input.overdue_critical_count {
            current.overdue_critical_count = count;
        }

        if let Some(attempts) = input.notification_max_attempts {
            current.notification_max_attempts = attempts;
        }

        if let Some(dir) = input.reports_dir {
            current.reports_dir = dir.trim().to_string();
        }

        match input.discord_webhook_url {
            None => {}
            Some(None) => current.discord_webhook_url = None,
            Some(Some(url)) => current.discord_webhook_url = Some(url.trim().to_string()),
        }

        validate_settings(&current)?;
        self.persist(&current)?;

        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(current.clone());
        }

        Ok(apply_env_override(current))
    }

    fn persist(&self, settings: &AppSettings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let yaml = serde_yaml::to_string(settings)?;
        std::fs::write(&self.path, yaml)?;
        info!(target: "app::settings", path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn load_settings_from_file(&self) -> AppResult<AppSettings> {
        let settings = if self.path.exists() {
            let raw = std::fs::read_to_string(&self.path)?;
            if raw.trim().is_empty() {
                AppSettings::default()
            } else {
                serde_yaml::from_str(&raw)?
            }
        } else {
            warn!(
                target: "app::settings",
                path = %self.path.display(),
                "settings file missing, using defaults"
            );
            AppSettings::default()
        };

        validate_settings(&settings)?;

        info!(
            target: "app::settings",
            capacity = settings.active_task_capacity,
            overdue_critical = settings.overdue_critical_count,
            webhook_from_env = env_webhook_url().is_some(),
            webhook = %settings
                .discord_webhook_url
                .as_deref()
                .map(mask_webhook_url)
                .unwrap_or_else(|| "<none>".to_string()),
            "settings loaded"
        );

        Ok(settings)
    }
}

fn env_webhook_url() -> Option<String> {
    std::env::var(WEBHOOK_URL_ENV)
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Returns `settings` with the webhook taken from the environment when set.
fn apply_env_override(mut settings: AppSettings) -> AppSettings {
    if let Some(url) = env_webhook_url() {
        settings.discord_webhook_url = Some(url);
    }
    settings
}

pub fn validate_settings(settings: &AppSettings) -> AppResult<()> {
    if settings.active_task_capacity == 0 {
        return Err(AppError::config("active_task_capacity must be at least 1"));
    }

    if settings.overdue_critical_count == 0 {
        return Err(AppError::config("overdue_critical_count must be at least 1"));
    }

    if !(1..=MAX_NOTIFICATION_ATTEMPTS).contains(&settings.notification_max_attempts) {
        return Err(AppError::config(format!(
            "notification_max_attempts must be between 1 and {MAX_NOTIFICATION_ATTEMPTS}"
        )));
    }

    if settings.reports_dir.trim().is_empty() {
        return Err(AppError::config("reports_dir cannot be empty"));
    }

    if let Some(url) = settings.discord_webhook_url.as_deref() {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AppError::config("discord_webhook_url must be an http(s) URL"));
        }
    }

    Ok(())
}

/// Hides the webhook token, which is the last path segment.
pub fn mask_webhook_url(url: &str) -> String {
    match url.rsplit_once('/') {
        Some((prefix, token)) if !token.is_empty() => {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() <= 4 {
                return format!("{prefix}/{}", "*".repeat(chars.len()));
            }
            let visible: String = chars[chars.len() - 4..].iter().collect();
            format!("{prefix}/{}{}", "*".repeat(chars.len() - 4), visible)
        }
        _ => url.to_string(),
    }
}
