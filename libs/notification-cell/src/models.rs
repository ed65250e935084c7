use serde::{Deserialize, Serialize};

use shared_models::error::AppError;
use shared_store::StoreError;

/// Outcome counters for one scheduled notification sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderRunReport {
    pub reminders_sent: u32,
    pub confirmations_sent: u32,
    pub reminder_failures: u32,
    pub confirmation_failures: u32,
    pub high_risk_appointments: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationNoticeRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Clinic settings not configured")]
    SettingsNotConfigured,

    #[error("Scheduling error: {0}")]
    Scheduling(String),

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::SettingsNotConfigured => AppError::Conflict(err.to_string()),
            NotificationError::Scheduling(msg) | NotificationError::Prediction(msg) => {
                AppError::Internal(msg)
            }
            NotificationError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
