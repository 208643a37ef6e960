use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::analytics::TeamOverview;
use crate::models::settings::AppSettings;
use crate::models::workload::WorkloadRiskLevel;
use crate::utils::retry::{retry_with_backoff, BackoffPolicy};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Discord rejects message content longer than this.
const DISCORD_CONTENT_LIMIT: usize = 2000;
const TOP_MEMBERS_IN_DIGEST: usize = 3;

/// Destination for the rendered team digest.
#[async_trait]
pub trait DigestNotifier: Send + Sync {
    async fn send(&self, content: &str) -> AppResult<()>;
}

pub struct DiscordWebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordWebhookNotifier {
    pub fn new(webhook_url: impl Into<String>) -> AppResult<Self> {
        Self::with_timeout(webhook_url, StdDuration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(webhook_url: impl Into<String>, timeout: StdDuration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::other(format!("failed to build webhook client: {err}")))?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }
}

/// Maps a non-success webhook status onto an error and whether it is worth retrying.
pub fn map_webhook_status(status: StatusCode) -> AppError {
    let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
    AppError::notification(
        format!("webhook responded with {}", status.as_u16()),
        Some(status.as_u16()),
        retryable,
    )
}

#[async_trait]
impl DigestNotifier for DiscordWebhookNotifier {
    async fn send(&self, content: &str) -> AppResult<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(|err| {
                AppError::notification(format!("webhook request failed: {err}"), None, true)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(map_webhook_status(status))
    }
}

/// Renders the digest posted to the team channel.
pub fn render_digest(overview: &TeamOverview) -> String {
    let totals = &overview.totals;
    let mut lines = vec![
        "**Team workload digest**".to_string(),
        format!(
            "{} members · {} active · {} overdue · avg productivity {}",
            totals.members, totals.active_tasks, totals.overdue_tasks, totals.average_productivity_score
        ),
    ];

    let top: Vec<_> = overview
        .ranked_by_productivity()
        .into_iter()
        .filter(|member| member.productivity.has_completions())
        .take(TOP_MEMBERS_IN_DIGEST)
        .collect();
    if !top.is_empty() {
        lines.push(String::new());
        lines.push("Top productivity:".to_string());
        for (index, member) in top.iter().enumerate() {
            lines.push(format!(
                "{}. {} ({}; {}% on time)",
                index + 1,
                member.user_name(),
                member.productivity.productivity_score,
                member.productivity.on_time_completion_rate
            ));
        }
    }

    let at_risk = overview.members_at_risk();
    if !at_risk.is_empty() {
        lines.push(String::new());
        lines.push("Needs attention:".to_string());
        for member in at_risk {
            let marker = match member.risk_level {
                WorkloadRiskLevel::Critical => "🔴",
                _ => "🟡",
            };
            lines.push(format!(
                "{marker} {}: {} active, {} overdue",
                member.user_name(),
                member.workload.active_tasks,
                member.workload.overdue_tasks
            ));
        }
    }

    truncate_content(lines.join("\n"), DISCORD_CONTENT_LIMIT)
}

fn truncate_content(content: String, limit: usize) -> String {
    if content.chars().count() <= limit {
        return content;
    }
    let mut truncated: String = content.chars().take(limit.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Best-effort publication of the team digest.
pub struct DigestService {
    notifier: Option<Arc<dyn DigestNotifier>>,
    policy: BackoffPolicy,
}

impl DigestService {
    pub fn new(notifier: Option<Arc<dyn DigestNotifier>>, policy: BackoffPolicy) -> Self {
        Self { notifier, policy }
    }

    pub fn from_settings(settings: &AppSettings) -> AppResult<Self> {
        let policy = BackoffPolicy::new(
            settings.notification_max_attempts,
            StdDuration::from_millis(settings.notification_initial_delay_ms),
        );

        let notifier = match settings.discord_webhook_url.as_deref() {
            Some(url) => Some(Arc::new(DiscordWebhookNotifier::new(url)?) as Arc<dyn DigestNotifier>),
            None => None,
        };

        Ok(Self::new(notifier, policy))
    }

    pub fn is_configured(&self) -> bool {
        self.notifier.is_some()
    }

    /// Returns `Ok(false)` when no destination is configured.
    pub async fn publish(&self, overview: &TeamOverview) -> AppResult<bool> {
        let Some(notifier) = self.notifier.as_ref() else {
            debug!(target: "app::notify", "no digest destination configured");
            return Ok(false);
        };

        let correlation_id = Uuid::new_v4().to_string();
        let content = render_digest(overview);

        let result = retry_with_backoff(self.policy, "digest.publish", |_| {
            let notifier = Arc::clone(notifier);
            let content = content.clone();
            async move { notifier.send(&content).await }
        })
        .await;

        match result {
            Ok(()) => {
                info!(
                    target: "app::notify",
                    correlation_id = %correlation_id,
                    members = overview.totals.members,
                    "team digest published"
                );
                Ok(true)
            }
            Err(err) => {
                warn!(
                    target: "app::notify",
                    correlation_id = %correlation_id,
                    error = %err,
                    "team digest not delivered"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limits_and_server_errors_are_retryable() {
        assert!(map_webhook_status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(map_webhook_status(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(!map_webhook_status(StatusCode::NOT_FOUND).is_retryable());
        assert!(!map_webhook_status(StatusCode::BAD_REQUEST).is_retryable());
    }

    #[test]
    fn long_content_is_truncated() {
        let content = "x".repeat(2500);
        let truncated = truncate_content(content, DISCORD_CONTENT_LIMIT);
        assert_eq!(truncated.chars().count(), DISCORD_CONTENT_LIMIT);
        assert!(truncated.ends_with('…'));
    }
}
