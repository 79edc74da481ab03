//! Revenue routes: monthly trends, order counts, AOV and per-dimension revenue.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::models::filters::YearQuery;
use crate::services::revenue as revenue_service;
use crate::AppState;

/// GET /api/years: years with sales, for the year selector.
pub async fn years(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    let rows = revenue_service::available_years(state.store.as_ref()).await?;
    Ok(Json(rows))
}

/// GET /api/monthly-revenue: revenue per month.
pub async fn monthly_revenue(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = revenue_service::monthly_revenue(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/monthly-order-count: orders per month.
pub async fn monthly_order_count(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = revenue_service::monthly_order_count(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/average-order-value: AOV per month.
pub async fn average_order_value(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = revenue_service::average_order_value(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/revenue/by-product
pub async fn by_product(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = revenue_service::by_product(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/revenue/by-category
pub async fn by_category(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = revenue_service::by_category(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/revenue/by-seller
pub async fn by_seller(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = revenue_service::by_seller(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}
