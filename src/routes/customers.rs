//! Customer routes: lifetime value, segmentation, top customers and churn.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::models::filters::YearQuery;
use crate::services::customers::{
    self as customer_service, InactiveCustomerFilters, TopCustomerFilters,
};
use crate::AppState;

/// GET /api/customer-lifetime-value: CLTV per customer.
pub async fn lifetime_value(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = customer_service::lifetime_value(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/customers/segments
pub async fn segments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<YearQuery>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = customer_service::segments(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// GET /api/customers/top: highest-revenue customers (limit defaults to 10).
pub async fn top(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<TopCustomerFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = customer_service::top_customers(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}

/// GET /api/customers/inactive: customers idle for `months` months (default 6).
pub async fn inactive(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<InactiveCustomerFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = customer_service::inactive_customers(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}
