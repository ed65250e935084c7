use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{HighRiskQuery, PredictRiskRequest};
use crate::services::NoShowPredictor;

const DEFAULT_RISK_THRESHOLD: f64 = 0.6;

#[axum::debug_handler]
pub async fn predict_risk(
    State(store): State<Arc<dyn ClinicStore>>,
    Json(request): Json<PredictRiskRequest>,
) -> Result<Json<Value>, AppError> {
    let predictor = NoShowPredictor::new(store);

    let prediction = predictor
        .predict(request.patient_id, request.appointment_id)
        .await?;

    Ok(Json(json!({
        "prediction": prediction,
        "risk_level": prediction.risk_level().to_string(),
    })))
}

#[axum::debug_handler]
pub async fn list_high_risk_appointments(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<HighRiskQuery>,
) -> Result<Json<Value>, AppError> {
    let predictor = NoShowPredictor::new(store);
    let threshold = query.threshold.unwrap_or(DEFAULT_RISK_THRESHOLD);

    let high_risk = predictor.high_risk_appointments(threshold).await?;

    let entries: Vec<Value> = high_risk
        .into_iter()
        .map(|(appointment, prediction)| {
            json!({
                "appointment": appointment,
                "prediction": prediction,
            })
        })
        .collect();

    Ok(Json(json!({
        "threshold": threshold,
        "appointments": entries,
        "total": entries.len(),
    })))
}

#[axum::debug_handler]
pub async fn get_mitigation_recommendations(
    State(store): State<Arc<dyn ClinicStore>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let predictor = NoShowPredictor::new(store.clone());

    let prediction = store
        .get_prediction(appointment_id)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("No prediction for appointment".to_string()))?;

    let recommendations = predictor.mitigation_recommendations(&prediction);

    Ok(Json(json!({
        "appointment_id": appointment_id,
        "risk_score": prediction.risk_score,
        "recommendations": recommendations,
    })))
}

#[axum::debug_handler]
pub async fn get_patient_risk_profile(
    State(store): State<Arc<dyn ClinicStore>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let predictor = NoShowPredictor::new(store);

    let profile = predictor.patient_risk_profile(patient_id).await?;

    Ok(Json(json!(profile)))
}
