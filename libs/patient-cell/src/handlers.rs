use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{PatientSearchQuery, RegisterPatientRequest};
use crate::services::PatientRegistryService;

#[axum::debug_handler]
pub async fn register_patient(
    State(store): State<Arc<dyn ClinicStore>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistryService::new(store);

    let patient_id = service
        .register_patient(request)
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    Ok(Json(json!({ "patient_id": patient_id })))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(store): State<Arc<dyn ClinicStore>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistryService::new(store);

    let patient = service
        .get_patient(patient_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn search_patients(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<PatientSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistryService::new(store);

    let patients = service
        .find_patients(query)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len(),
    })))
}

#[axum::debug_handler]
pub async fn list_high_risk_patients(
    State(store): State<Arc<dyn ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = PatientRegistryService::new(store);

    let patients = service
        .high_risk_patients()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len(),
    })))
}
