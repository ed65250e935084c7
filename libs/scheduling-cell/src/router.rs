use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, SchedulingState};

pub fn scheduling_routes(state: Arc<SchedulingState>) -> Router {
    Router::new()
        .route("/doctors/{doctor_id}/slots", get(handlers::get_available_slots))
        .route("/doctors/{doctor_id}/schedule", get(handlers::get_doctor_schedule))
        .route("/appointments", post(handlers::book_appointment))
        .route("/appointments", get(handlers::list_patient_appointments))
        .route(
            "/appointments/{appointment_id}/reschedule",
            post(handlers::reschedule_appointment),
        )
        .route(
            "/appointments/{appointment_id}/cancel",
            post(handlers::cancel_appointment),
        )
        .route(
            "/appointments/{appointment_id}/no-show",
            post(handlers::mark_no_show),
        )
        .route(
            "/appointments/{appointment_id}/complete",
            post(handlers::complete_appointment),
        )
        .with_state(state)
}
