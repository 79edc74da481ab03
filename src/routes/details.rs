//! Drill-down routes. Each requires its key parameter.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::services::details::{
    self as details_service, CategoryDetailFilters, ProductDetailFilters, SellerDetailFilters,
};
use crate::AppState;

/// GET /api/details/product?product_id=
pub async fn product(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<ProductDetailFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = details_service::product(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}

/// GET /api/details/seller?seller_id=
pub async fn seller(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<SellerDetailFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = details_service::seller(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}

/// GET /api/details/category?category=
pub async fn category(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<CategoryDetailFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = details_service::category(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}
