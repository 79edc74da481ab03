//! Sellers without sales inside a month range.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::required_param;
use crate::store::{AnalyticsStore, RpcCall};

use super::fetch;

pub const INACTIVE_SELLERS: &str = "get_inactive_sellers_analytics";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InactiveSellerFilters {
    #[serde(rename = "startMonth")]
    pub start_month: Option<String>,
    #[serde(rename = "endMonth")]
    pub end_month: Option<String>,
}

/// First day of a `YYYY-MM` month.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

pub async fn inactive_sellers(
    store: &dyn AnalyticsStore,
    filters: &InactiveSellerFilters,
) -> Result<Vec<Value>, AppError> {
    let start_raw = required_param(filters.start_month.as_deref(), "startMonth")?;
    let end_raw = required_param(filters.end_month.as_deref(), "endMonth")?;

    let start = parse_month(start_raw).ok_or_else(|| AppError::invalid("startMonth"))?;
    let end = parse_month(end_raw)
        .and_then(month_end)
        .ok_or_else(|| AppError::invalid("endMonth"))?;

    if start > end {
        return Err(AppError::Validation(
            "startMonth must not be after endMonth".to_string(),
        ));
    }

    let call = RpcCall::new(INACTIVE_SELLERS)
        .arg("p_start_date", start)
        .arg("p_end_date", end);
    fetch(store, call).await
}
