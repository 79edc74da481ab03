//! Customer lifetime value, segments, top spenders and churn candidates.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::{int_param, YearFilter, YearQuery};
use crate::store::{AnalyticsStore, RpcCall};

use super::{by_year, fetch};

pub const CUSTOMER_LIFETIME_VALUE: &str = "get_customer_lifetime_value";
pub const CUSTOMER_SEGMENTS: &str = "get_customer_segments";
pub const TOP_CUSTOMERS: &str = "get_top_customers";
pub const INACTIVE_CUSTOMERS: &str = "get_inactive_customers";

pub const DEFAULT_TOP_LIMIT: i32 = 10;
pub const DEFAULT_INACTIVE_MONTHS: i32 = 6;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopCustomerFilters {
    pub year: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InactiveCustomerFilters {
    pub months: Option<String>,
}

pub async fn lifetime_value(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, CUSTOMER_LIFETIME_VALUE, query).await
}

pub async fn segments(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, CUSTOMER_SEGMENTS, query).await
}

pub async fn top_customers(
    store: &dyn AnalyticsStore,
    filters: &TopCustomerFilters,
) -> Result<Vec<Value>, AppError> {
    let year = YearFilter::from_param(filters.year.as_deref())?;
    let limit = int_param(filters.limit.as_deref(), "limit", DEFAULT_TOP_LIMIT)?;

    let call = RpcCall::new(TOP_CUSTOMERS)
        .arg("p_year", year)
        .arg("p_limit", limit);
    fetch(store, call).await
}

/// Customers with no purchase in the last `months` months.
pub async fn inactive_customers(
    store: &dyn AnalyticsStore,
    filters: &InactiveCustomerFilters,
) -> Result<Vec<Value>, AppError> {
    let months = int_param(filters.months.as_deref(), "months", DEFAULT_INACTIVE_MONTHS)?;
    fetch(store, RpcCall::new(INACTIVE_CUSTOMERS).arg("p_months", months)).await
}
