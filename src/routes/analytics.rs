//! Analytics routes: inactive sellers and grouped return statistics.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::models::returns::ReturnAnalyticsRow;
use crate::services::returns::{self as returns_service, ReturnFilters};
use crate::services::sellers::{self as seller_service, InactiveSellerFilters};
use crate::AppState;

/// GET /api/analytics/inactive-sellers?startMonth=YYYY-MM&endMonth=YYYY-MM
pub async fn inactive_sellers(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<InactiveSellerFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = seller_service::inactive_sellers(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}

/// GET /api/analytics/returns?type=<all|year|month>&year=&month=
pub async fn returns(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<ReturnFilters>,
) -> Result<Json<Vec<ReturnAnalyticsRow>>, AppError> {
    let rows = returns_service::get_return_analytics(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}
