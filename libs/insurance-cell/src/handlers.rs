use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{PaymentOptionsQuery, ResponsibilityQuery, VerifyInsuranceRequest};
use crate::services::InsuranceVerificationService;

#[axum::debug_handler]
pub async fn verify_insurance(
    State(store): State<Arc<dyn ClinicStore>>,
    Json(request): Json<VerifyInsuranceRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceVerificationService::new(store);

    let outcome = service
        .verify(request.patient_id, request.appointment_id)
        .await?;

    Ok(Json(json!(outcome)))
}

#[axum::debug_handler]
pub async fn calculate_responsibility(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<ResponsibilityQuery>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceVerificationService::new(store);

    let responsibility = service
        .patient_responsibility(query.patient_id, query.appointment_id, query.service_cost)
        .await?;

    Ok(Json(json!(responsibility)))
}

#[axum::debug_handler]
pub async fn list_payment_options(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<PaymentOptionsQuery>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceVerificationService::new(store);

    let options = service
        .payment_options(query.patient_id, query.amount)
        .await?;

    Ok(Json(json!({
        "payment_options": options,
        "total": options.len(),
    })))
}
