use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn insurance_routes(store: Arc<dyn ClinicStore>) -> Router {
    Router::new()
        .route("/verify", post(handlers::verify_insurance))
        .route("/responsibility", get(handlers::calculate_responsibility))
        .route("/payment-options", get(handlers::list_payment_options))
        .with_state(store)
}
