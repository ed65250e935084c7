use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::CreateDoctorRequest;
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn create_doctor(
    State(store): State<Arc<dyn ClinicStore>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(store);

    let doctor = service
        .create_doctor(request)
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(store): State<Arc<dyn ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(store);

    let doctor = service
        .get_doctor(doctor_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(store): State<Arc<dyn ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = DoctorService::new(store);

    let doctors = service
        .list_doctors()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len(),
    })))
}
