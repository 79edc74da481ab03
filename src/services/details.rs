//! Drill-down lookups for a single product, seller or category.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::{required_param, YearFilter};
use crate::store::{AnalyticsStore, RpcCall};

use super::fetch;

pub const PRODUCT_DETAILS: &str = "get_product_sales_details";
pub const SELLER_DETAILS: &str = "get_seller_sales_details";
pub const CATEGORY_DETAILS: &str = "get_category_sales_details";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDetailFilters {
    pub product_id: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellerDetailFilters {
    pub seller_id: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryDetailFilters {
    pub category: Option<String>,
    pub year: Option<String>,
}

pub async fn product(
    store: &dyn AnalyticsStore,
    filters: &ProductDetailFilters,
) -> Result<Vec<Value>, AppError> {
    let product_id = required_param(filters.product_id.as_deref(), "Product ID")?;
    lookup(store, PRODUCT_DETAILS, "p_product_id", product_id, filters.year.as_deref()).await
}

pub async fn seller(
    store: &dyn AnalyticsStore,
    filters: &SellerDetailFilters,
) -> Result<Vec<Value>, AppError> {
    let seller_id = required_param(filters.seller_id.as_deref(), "Seller ID")?;
    lookup(store, SELLER_DETAILS, "p_seller_id", seller_id, filters.year.as_deref()).await
}

pub async fn category(
    store: &dyn AnalyticsStore,
    filters: &CategoryDetailFilters,
) -> Result<Vec<Value>, AppError> {
    let category = required_param(filters.category.as_deref(), "Category")?;
    lookup(store, CATEGORY_DETAILS, "p_category_name", category, filters.year.as_deref()).await
}

// Identifiers are forwarded as text; the SQL side casts to its key type.
async fn lookup(
    store: &dyn AnalyticsStore,
    function: &'static str,
    key_param: &'static str,
    key: &str,
    year: Option<&str>,
) -> Result<Vec<Value>, AppError> {
    let year = YearFilter::from_param(year)?;
    let call = RpcCall::new(function)
        .arg(key_param, key.to_string())
        .arg("p_year", year);
    fetch(store, call).await
}
