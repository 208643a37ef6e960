use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("record not found")]
    NotFound,

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("notification failed: {message}")]
    Notification {
        message: String,
        status: Option<u16>,
        retryable: bool,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation { message }
    }

    pub fn not_found() -> Self {
        warn!(target: "app::snapshot", "resource not found");
        AppError::NotFound
    }

    pub fn config(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::config", %message, "configuration error");
        AppError::Config { message }
    }

    pub fn notification(message: impl Into<String>, status: Option<u16>, retryable: bool) -> Self {
        let message = message.into();
        warn!(
            target: "app::notify",
            %message,
            status = ?status,
            retryable,
            "notification error"
        );
        AppError::Notification {
            message,
            status,
            retryable,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }

    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Notification { retryable, .. } => *retryable,
            AppError::Io(_) => true,
            _ => false,
        }
    }

    pub fn notification_status(&self) -> Option<u16> {
        match self {
            AppError::Notification { status, .. } => *status,
            _ => None,
        }
    }
}
