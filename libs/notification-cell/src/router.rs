use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers::{self, NotificationState};

pub fn notification_routes(state: Arc<NotificationState>) -> Router {
    Router::new()
        .route(
            "/appointments/{appointment_id}/reminder",
            post(handlers::send_reminder),
        )
        .route(
            "/appointments/{appointment_id}/confirmation",
            post(handlers::send_confirmation),
        )
        .route(
            "/appointments/{appointment_id}/no-show-follow-up",
            post(handlers::send_no_show_follow_up),
        )
        .route(
            "/appointments/{appointment_id}/cancellation",
            post(handlers::send_cancellation),
        )
        .route("/run", post(handlers::run_scheduled_notifications))
        .with_state(state)
}
