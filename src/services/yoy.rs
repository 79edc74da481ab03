//! Year-over-year comparisons and revenue-drop detection.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::{float_param, YearFilter, YearQuery};
use crate::store::{AnalyticsStore, RpcCall};

use super::{by_year, fetch};

pub const YOY_REVENUE_GROWTH: &str = "get_yoy_revenue_growth";
pub const YOY_MONTHLY_COMPARISON: &str = "get_yoy_monthly_comparison";
pub const REVENUE_DECREASE_RATIO: &str = "get_revenue_decrease_ratio";
pub const MONTHLY_REVENUE_DROPS: &str = "get_monthly_revenue_drops";
pub const WEEKLY_REVENUE_DROPS: &str = "get_weekly_revenue_drops";
pub const YEARLY_REVENUE_DROPS: &str = "get_yearly_revenue_drops";

/// Minimum drop, in percent, reported when `threshold` is absent.
pub const DEFAULT_DROP_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropGranularity {
    Monthly,
    Weekly,
    Yearly,
}

impl DropGranularity {
    fn function(self) -> &'static str {
        match self {
            Self::Monthly => MONTHLY_REVENUE_DROPS,
            Self::Weekly => WEEKLY_REVENUE_DROPS,
            Self::Yearly => YEARLY_REVENUE_DROPS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DropFilters {
    pub year: Option<String>,
    pub threshold: Option<String>,
}

/// Growth against the previous year; the function yields a single row.
pub async fn revenue_growth(store: &dyn AnalyticsStore, query: &YearQuery) -> Result<Vec<Value>, AppError> {
    by_year(store, YOY_REVENUE_GROWTH, query).await
}

pub async fn monthly_comparison(
    store: &dyn AnalyticsStore,
    query: &YearQuery,
) -> Result<Vec<Value>, AppError> {
    by_year(store, YOY_MONTHLY_COMPARISON, query).await
}

pub async fn revenue_decrease_ratio(
    store: &dyn AnalyticsStore,
    query: &YearQuery,
) -> Result<Vec<Value>, AppError> {
    by_year(store, REVENUE_DECREASE_RATIO, query).await
}

/// Periods whose revenue fell by at least `threshold` percent. The yearly
/// variant spans every year and takes no year filter.
pub async fn revenue_drops(
    store: &dyn AnalyticsStore,
    granularity: DropGranularity,
    filters: &DropFilters,
) -> Result<Vec<Value>, AppError> {
    let threshold = float_param(filters.threshold.as_deref(), "threshold", DEFAULT_DROP_THRESHOLD)?;

    let mut call = RpcCall::new(granularity.function());
    if granularity != DropGranularity::Yearly {
        let year = YearFilter::from_param(filters.year.as_deref())?;
        call = call.arg("p_year", year);
    }
    fetch(store, call.arg("p_threshold", threshold)).await
}
