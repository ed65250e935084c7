use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::CancellationNoticeRequest;
use crate::services::sink::NotificationSink;
use crate::services::NotificationService;

/// Notification wiring injected at startup: the gateway plus whatever
/// transport stands behind the sink.
pub struct NotificationState {
    pub store: Arc<dyn ClinicStore>,
    pub sink: Arc<dyn NotificationSink>,
}

impl NotificationState {
    pub fn service(&self) -> NotificationService {
        NotificationService::new(Arc::clone(&self.store), Arc::clone(&self.sink))
    }
}

#[axum::debug_handler]
pub async fn send_reminder(
    State(state): State<Arc<NotificationState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let sent = state.service().send_reminder(appointment_id).await?;
    Ok(Json(json!({ "sent": sent })))
}

#[axum::debug_handler]
pub async fn send_confirmation(
    State(state): State<Arc<NotificationState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let sent = state.service().send_confirmation(appointment_id).await?;
    Ok(Json(json!({ "sent": sent })))
}

#[axum::debug_handler]
pub async fn send_no_show_follow_up(
    State(state): State<Arc<NotificationState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let sent = state.service().send_no_show_follow_up(appointment_id).await?;
    Ok(Json(json!({ "sent": sent })))
}

#[axum::debug_handler]
pub async fn send_cancellation(
    State(state): State<Arc<NotificationState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancellationNoticeRequest>,
) -> Result<Json<Value>, AppError> {
    let sent = state
        .service()
        .send_cancellation(appointment_id, &request.reason)
        .await?;
    Ok(Json(json!({ "sent": sent })))
}

#[axum::debug_handler]
pub async fn run_scheduled_notifications(
    State(state): State<Arc<NotificationState>>,
) -> Result<Json<Value>, AppError> {
    let report = state.service().process_scheduled().await?;
    Ok(Json(json!(report)))
}
