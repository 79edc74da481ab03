//! Revenue, order count and average order value by month or dimension.

use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::YearQuery;
use crate::store::{AnalyticsStore, RpcCall};

use super::{by_year, fetch};

pub const AVAILABLE_YEARS: &str = "get_available_years";
pub const MONTHLY_REVENUE: &str = "get_monthly_revenue";
pub const MONTHLY_ORDER_COUNT: &str = "get_monthly_order_count";
pub const AVERAGE_ORDER_VALUE: &str = "get_average_order_value";
pub const REVENUE_BY_PRODUCT: &str = "get_revenue_by_product";
pub const REVENUE_BY_CATEGORY: &str = "get_revenue_by_category";
pub const REVENUE_BY_SELLER: &str = "get_revenue_by_seller";

/// Years that have sales, feeding every dashboard's year selector.
pub async fn available_years(store: &dyn AnalyticsStore) -> Result<Vec<Value>, AppError> {
    fetch(store, RpcCall::new(AVAILABLE_YEARS)).await
}

pub async fn monthly_revenue(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, MONTHLY_REVENUE, query).await
}

pub async fn monthly_order_count(
    store: &dyn AnalyticsStore,
    query: &YearQuery,
) -> Result<Vec<Value>, AppError> {
    by_year(store, MONTHLY_ORDER_COUNT, query).await
}

pub async fn average_order_value(
    store: &dyn AnalyticsStore,
    query: &YearQuery,
) -> Result<Vec<Value>, AppError> {
    by_year(store, AVERAGE_ORDER_VALUE, query).await
}

pub async fn by_product(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, REVENUE_BY_PRODUCT, query).await
}

pub async fn by_category(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, REVENUE_BY_CATEGORY, query).await
}

pub async fn by_seller(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, REVENUE_BY_SELLER, query).await
}
