use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn prediction_routes(store: Arc<dyn ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::predict_risk))
        .route("/high-risk", get(handlers::list_high_risk_appointments))
        .route(
            "/{appointment_id}/recommendations",
            get(handlers::get_mitigation_recommendations),
        )
        .route(
            "/patients/{patient_id}/profile",
            get(handlers::get_patient_risk_profile),
        )
        .with_state(store)
}
