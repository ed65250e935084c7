use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn patient_routes(store: Arc<dyn ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::register_patient))
        .route("/search", get(handlers::search_patients))
        .route("/high-risk", get(handlers::list_high_risk_patients))
        .route("/{patient_id}", get(handlers::get_patient))
        .with_state(store)
}
