//! Quantity-sold route.

use axum::{
    extract::State,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::middleware::query::ApiQuery;
use crate::services::quantity::{self as quantity_service, QuantityFilters};
use crate::AppState;

/// GET /api/quantity-sold?type=<product|year|category|category_year>&year=
pub async fn quantity_sold(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<QuantityFilters>,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = quantity_service::quantity_sold(state.store.as_ref(), &filters).await?;
    Ok(Json(rows))
}
