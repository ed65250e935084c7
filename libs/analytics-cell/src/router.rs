use std::sync::Arc;

use axum::{routing::get, Router};

use shared_store::ClinicStore;

use crate::handlers;

pub fn analytics_routes(store: Arc<dyn ClinicStore>) -> Router {
    Router::new()
        .route("/statistics", get(handlers::get_appointment_statistics))
        .route("/revenue", get(handlers::get_revenue_analytics))
        .route("/no-shows", get(handlers::get_no_show_patterns))
        .route("/dashboard", get(handlers::get_dashboard))
        .with_state(store)
}
