use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRiskRequest {
    pub patient_id: Uuid,
    pub appointment_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighRiskQuery {
    pub threshold: Option<f64>,
}

/// Aggregate no-show picture for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRiskProfile {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub total_appointments: usize,
    pub no_shows: usize,
    pub completed: usize,
    /// Percentage of all appointments that ended in a no-show.
    pub no_show_rate: f64,
    pub current_risk_score: f64,
    pub risk_level: String,
    pub last_appointment: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Patient or appointment not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::NotFound => AppError::NotFound(err.to_string()),
            PredictionError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
