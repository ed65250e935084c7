use std::sync::Arc;

use axum::{routing::get, Router};

use analytics_cell::router::analytics_routes;
use doctor_cell::router::doctor_routes;
use insurance_cell::router::insurance_routes;
use notification_cell::handlers::NotificationState;
use notification_cell::router::notification_routes;
use patient_cell::router::patient_routes;
use prediction_cell::router::prediction_routes;
use scheduling_cell::handlers::SchedulingState;
use scheduling_cell::router::scheduling_routes;
use shared_store::ClinicStore;

pub fn create_router(
    store: Arc<dyn ClinicStore>,
    scheduling: Arc<SchedulingState>,
    notifications: Arc<NotificationState>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "MedAssist API is running!" }))
        .nest("/patients", patient_routes(store.clone()))
        .nest("/doctors", doctor_routes(store.clone()))
        .nest("/scheduling", scheduling_routes(scheduling))
        .nest("/predictions", prediction_routes(store.clone()))
        .nest("/insurance", insurance_routes(store.clone()))
        .nest("/notifications", notification_routes(notifications))
        .nest("/analytics", analytics_routes(store))
}
