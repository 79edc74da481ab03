//! Return statistics: per-product-per-period input rows and grouped output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rows::lenient;

/// One row of the `product_returns_analytics` view.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReturnStatsRow {
    /// Kept as raw JSON so it is echoed back in its original type.
    #[serde(default)]
    pub product_id: Value,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub month: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub total_sold: i64,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub total_returned: i64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub revenue_lost: f64,
}

/// A grouped return-analytics row. Grouping keys not used by the
/// requested grouping are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnAnalyticsRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i32>,
    pub total_sold: i64,
    pub total_returned: i64,
    pub revenue_lost: f64,
    pub return_rate: f64,
}
