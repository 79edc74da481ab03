//! Year-over-year and revenue-drop routes.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::models::filters::YearQuery;
use crate::services::yoy::{self as yoy_service, DropFilters, DropGranularity};
use crate::AppState;

/// GET /api/yoy/revenue-growth: single-row growth summary.
pub async fn revenue_growth(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = yoy_service::revenue_growth(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/yoy/monthly-comparison
pub async fn monthly_comparison(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = yoy_service::monthly_comparison(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/yoy/revenue-decrease-ratio
pub async fn revenue_decrease_ratio(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = yoy_service::revenue_decrease_ratio(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/revenue-drop/monthly
pub async fn monthly_drops(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<DropFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows =
        yoy_service::revenue_drops(state.store.as_ref(), DropGranularity::Monthly, &filters).await?;
    Ok(Json(rows))
}

/// GET /api/revenue-drop/weekly
pub async fn weekly_drops(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<DropFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows =
        yoy_service::revenue_drops(state.store.as_ref(), DropGranularity::Weekly, &filters).await?;
    Ok(Json(rows))
}

/// GET /api/revenue-drop/yearly
pub async fn yearly_drops(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<DropFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows =
        yoy_service::revenue_drops(state.store.as_ref(), DropGranularity::Yearly, &filters).await?;
    Ok(Json(rows))
}
