use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::InsuranceStatus;
use shared_store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyInsuranceRequest {
    pub patient_id: Uuid,
    pub appointment_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsibilityQuery {
    pub patient_id: Uuid,
    pub appointment_id: Uuid,
    pub service_cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentOptionsQuery {
    pub patient_id: Uuid,
    pub amount: f64,
}

/// Simulated coverage details for a provider/policy pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageInfo {
    pub active: bool,
    pub copay: f64,
    pub deductible: f64,
    pub reason: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub status: InsuranceStatus,
    pub message: String,
    pub coverage: Option<CoverageInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientResponsibility {
    pub total_cost: f64,
    pub insurance_coverage: f64,
    pub patient_responsibility: f64,
    pub copay: f64,
    pub deductible: f64,
    pub remaining_deductible: f64,
    pub payment_required: bool,
    pub insurance_status: InsuranceStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOption {
    #[serde(rename = "type")]
    pub option_type: String,
    pub description: String,
    pub amount: f64,
    pub available: bool,
    pub installments: Option<u32>,
    pub requires_application: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum InsuranceError {
    #[error("Patient or appointment not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<InsuranceError> for AppError {
    fn from(err: InsuranceError) -> Self {
        match err {
            InsuranceError::NotFound => AppError::NotFound(err.to_string()),
            InsuranceError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
