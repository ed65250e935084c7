use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::RangeQuery;
use crate::services::AnalyticsService;

#[axum::debug_handler]
pub async fn get_appointment_statistics(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AnalyticsService::new(store);

    let statistics = service
        .appointment_statistics(query.start, query.end)
        .await?;

    Ok(Json(json!(statistics)))
}

#[axum::debug_handler]
pub async fn get_revenue_analytics(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AnalyticsService::new(store);

    let revenue = service.revenue_analytics(query.start, query.end).await?;

    Ok(Json(json!(revenue)))
}

#[axum::debug_handler]
pub async fn get_no_show_patterns(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AnalyticsService::new(store);

    let patterns = service.no_show_patterns(query.start, query.end).await?;

    Ok(Json(json!(patterns)))
}

#[axum::debug_handler]
pub async fn get_dashboard(
    State(store): State<Arc<dyn ClinicStore>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AnalyticsService::new(store);

    let dashboard = service.dashboard(query.start, query.end).await?;

    Ok(Json(json!(dashboard)))
}
