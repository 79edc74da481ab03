//! Profit margin routes.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::models::filters::YearQuery;
use crate::services::profit as profit_service;
use crate::AppState;

/// GET /api/profit-margin/product
pub async fn by_product(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = profit_service::by_product(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/profit-margin/category
pub async fn by_category(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = profit_service::by_category(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}
