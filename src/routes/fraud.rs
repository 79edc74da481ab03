//! Fraud signal routes.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::services::fraud::{
    self as fraud_service, FailedPaymentFilters, HighReturnCustomerFilters, SellerReturnFilters,
};
use crate::AppState;

/// GET /api/fraud/failed-payments: `days` (15), `min_attempts` (2).
pub async fn failed_payments(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<FailedPaymentFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = fraud_service::failed_payments(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}

/// GET /api/fraud/high-return-customers: `min_orders` (5), `min_return_rate` (0.30).
pub async fn high_return_customers(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<HighReturnCustomerFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = fraud_service::high_return_customers(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}

/// GET /api/fraud/seller-returns-recent: `days` (30), `min_items` (10), `min_return_rate` (0.30).
pub async fn seller_returns_recent(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<SellerReturnFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = fraud_service::seller_returns_recent(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}

/// GET /api/fraud/seller-returns-alltime: `min_items` (10), `min_return_rate` (0.30).
pub async fn seller_returns_alltime(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<SellerReturnFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = fraud_service::seller_returns_alltime(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}
