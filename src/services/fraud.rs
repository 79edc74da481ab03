//! Fraud signals: repeated payment failures and abnormal return behaviour.
//!
//! Every threshold is independently defaulted and forwarded as-is; range
//! checking is left to the SQL functions.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::{float_param, int_param};
use crate::store::{AnalyticsStore, RpcCall};

use super::fetch;

pub const FAILED_PAYMENTS: &str = "get_failed_payment_customers";
pub const HIGH_RETURN_CUSTOMERS: &str = "get_high_return_customers";
pub const SELLER_RETURNS_RECENT: &str = "get_seller_high_returns_recent";
pub const SELLER_RETURNS_ALLTIME: &str = "get_seller_high_returns_alltime";

pub const DEFAULT_FAILED_PAYMENT_DAYS: i32 = 15;
pub const DEFAULT_MIN_ATTEMPTS: i32 = 2;
pub const DEFAULT_MIN_ORDERS: i32 = 5;
pub const DEFAULT_SELLER_RECENT_DAYS: i32 = 30;
pub const DEFAULT_MIN_ITEMS: i32 = 10;
pub const DEFAULT_MIN_RETURN_RATE: f64 = 0.30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FailedPaymentFilters {
    pub days: Option<String>,
    pub min_attempts: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighReturnCustomerFilters {
    pub min_orders: Option<String>,
    pub min_return_rate: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellerReturnFilters {
    pub days: Option<String>,
    pub min_items: Option<String>,
    pub min_return_rate: Option<String>,
}

/// Customers with at least `min_attempts` failed payments in the last `days` days.
pub async fn failed_payments(
    store: &dyn AnalyticsStore,
    filters: &FailedPaymentFilters,
) -> Result<Vec<Value>, AppError> {
    let days = int_param(filters.days.as_deref(), "days", DEFAULT_FAILED_PAYMENT_DAYS)?;
    let min_attempts = int_param(
        filters.min_attempts.as_deref(),
        "min_attempts",
        DEFAULT_MIN_ATTEMPTS,
    )?;

    let call = RpcCall::new(FAILED_PAYMENTS)
        .arg("p_days", days)
        .arg("p_min_attempts", min_attempts);
    fetch(store, call).await
}

pub async fn high_return_customers(
    store: &dyn AnalyticsStore,
    filters: &HighReturnCustomerFilters,
) -> Result<Vec<Value>, AppError> {
    let min_orders = int_param(filters.min_orders.as_deref(), "min_orders", DEFAULT_MIN_ORDERS)?;
    let min_return_rate = float_param(
        filters.min_return_rate.as_deref(),
        "min_return_rate",
        DEFAULT_MIN_RETURN_RATE,
    )?;

    let call = RpcCall::new(HIGH_RETURN_CUSTOMERS)
        .arg("p_min_orders", min_orders)
        .arg("p_min_return_rate", min_return_rate);
    fetch(store, call).await
}

/// Sellers with a high return rate over the last `days` days.
pub async fn seller_returns_recent(
    store: &dyn AnalyticsStore,
    filters: &SellerReturnFilters,
) -> Result<Vec<Value>, AppError> {
    let days = int_param(filters.days.as_deref(), "days", DEFAULT_SELLER_RECENT_DAYS)?;
    let (min_items, min_return_rate) = seller_thresholds(filters)?;

    let call = RpcCall::new(SELLER_RETURNS_RECENT)
        .arg("p_days", days)
        .arg("p_min_items", min_items)
        .arg("p_min_return_rate", min_return_rate);
    fetch(store, call).await
}

/// Sellers with a high return rate across their whole history. `days` is ignored.
pub async fn seller_returns_alltime(
    store: &dyn AnalyticsStore,
    filters: &SellerReturnFilters,
) -> Result<Vec<Value>, AppError> {
    let (min_items, min_return_rate) = seller_thresholds(filters)?;

    let call = RpcCall::new(SELLER_RETURNS_ALLTIME)
        .arg("p_min_items", min_items)
        .arg("p_min_return_rate", min_return_rate);
    fetch(store, call).await
}

fn seller_thresholds(filters: &SellerReturnFilters) -> Result<(i32, f64), AppError> {
    let min_items = int_param(filters.min_items.as_deref(), "min_items", DEFAULT_MIN_ITEMS)?;
    let min_return_rate = float_param(
        filters.min_return_rate.as_deref(),
        "min_return_rate",
        DEFAULT_MIN_RETURN_RATE,
    )?;
    Ok((min_items, min_return_rate))
}
