//! Profit margin by product and by category.

use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::YearQuery;
use crate::store::AnalyticsStore;

use super::by_year;

pub const PRODUCT_PROFIT_MARGIN: &str = "get_product_profit_margin";
pub const CATEGORY_PROFIT_MARGIN: &str = "get_category_profit_margin";

pub async fn by_product(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, PRODUCT_PROFIT_MARGIN, query).await
}

pub async fn by_category(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, CATEGORY_PROFIT_MARGIN, query).await
}
