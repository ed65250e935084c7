use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{
    BookAppointmentRequest, CancelAppointmentRequest, CompleteAppointmentRequest,
    PatientAppointmentsQuery, RescheduleAppointmentRequest, ScheduleQuery, SlotQuery,
};
use crate::services::BookingService;

/// Shared scheduling state wired once at startup; the booking service
/// carries the per-doctor locks and must outlive individual requests.
pub struct SchedulingState {
    pub booking: BookingService,
}

impl SchedulingState {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self {
            booking: BookingService::new(store),
        }
    }
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<SchedulingState>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = state
        .booking
        .availability()
        .available_slots(doctor_id, query.date, query.duration_minutes)
        .await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": query.date,
        "available_slots": slots,
    })))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<SchedulingState>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment_id = state.booking.book(request).await?;

    Ok(Json(json!({
        "appointment_id": appointment_id,
    })))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<SchedulingState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let success = state
        .booking
        .reschedule(appointment_id, request.new_datetime)
        .await?;

    Ok(Json(json!({ "success": success })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<SchedulingState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let success = state.booking.cancel(appointment_id, &request.reason).await?;

    Ok(Json(json!({ "success": success })))
}

#[axum::debug_handler]
pub async fn mark_no_show(
    State(state): State<Arc<SchedulingState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let success = state.booking.mark_no_show(appointment_id).await?;

    Ok(Json(json!({ "success": success })))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<SchedulingState>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CompleteAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let success = state
        .booking
        .complete(appointment_id, &request.notes)
        .await?;

    Ok(Json(json!({ "success": success })))
}

#[axum::debug_handler]
pub async fn list_patient_appointments(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<PatientAppointmentsQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .booking
        .patient_appointments(query.patient_id, query.upcoming_only.unwrap_or(true))
        .await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len(),
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_schedule(
    State(state): State<Arc<SchedulingState>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.booking.doctor_schedule(doctor_id, query.date).await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": query.date,
        "appointments": appointments,
    })))
}
