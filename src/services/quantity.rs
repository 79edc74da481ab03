//! Units sold, grouped by product, year, category or category and year.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::YearFilter;
use crate::store::{AnalyticsStore, RpcCall};

use super::fetch;

pub const BY_PRODUCT: &str = "get_quantity_sold_by_product";
pub const BY_YEAR: &str = "get_quantity_sold_by_year";
pub const BY_CATEGORY: &str = "get_quantity_sold_by_category";
pub const BY_CATEGORY_YEAR: &str = "get_quantity_sold_by_category_year";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityGrouping {
    Product,
    Year,
    Category,
    CategoryYear,
}

impl QuantityGrouping {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") | Some("product") => Ok(Self::Product),
            Some("year") => Ok(Self::Year),
            Some("category") => Ok(Self::Category),
            Some("category_year") => Ok(Self::CategoryYear),
            Some(_) => Err(AppError::invalid("type")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuantityFilters {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub year: Option<String>,
}

pub async fn quantity_sold(
    store: &dyn AnalyticsStore,
    filters: &QuantityFilters,
) -> Result<Vec<Value>, AppError> {
    let grouping = QuantityGrouping::parse(filters.kind.as_deref())?;

    // The per-year groupings already span every year.
    let call = match grouping {
        QuantityGrouping::Product | QuantityGrouping::Category => {
            let year = YearFilter::from_param(filters.year.as_deref())?;
            let function = if grouping == QuantityGrouping::Product {
                BY_PRODUCT
            } else {
                BY_CATEGORY
            };
            RpcCall::new(function).arg("p_year", year)
        }
        QuantityGrouping::Year => RpcCall::new(BY_YEAR),
        QuantityGrouping::CategoryYear => RpcCall::new(BY_CATEGORY_YEAR),
    };
    fetch(store, call).await
}
