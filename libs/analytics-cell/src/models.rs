use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::StoreError;

#[derive(Debug, Clone, Deserialize)]
pub struct RangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Status counts and derived rates for a date range. Rates are percentages
/// over attempted appointments (completed + no-show + cancelled).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStatistics {
    pub total_appointments: usize,
    pub status_breakdown: HashMap<String, usize>,
    pub no_show_rate: f64,
    pub completion_rate: f64,
    pub cancellation_rate: f64,
    pub appointment_types: HashMap<String, usize>,
    pub pending_appointments: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueAnalytics {
    pub actual_revenue: f64,
    pub potential_revenue: f64,
    pub lost_revenue_no_shows: f64,
    pub lost_revenue_cancellations: f64,
    pub total_lost_revenue: f64,
    pub revenue_efficiency: f64,
    pub insurance_collection_rate: f64,
    pub avg_appointment_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoShowPatterns {
    pub by_day: HashMap<String, usize>,
    pub by_hour: HashMap<u32, usize>,
    pub top_no_show_patients: Vec<(Uuid, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicDashboard {
    pub appointment_statistics: AppointmentStatistics,
    pub revenue_analytics: RevenueAnalytics,
    pub no_show_patterns: NoShowPatterns,
    pub high_risk_patient_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
