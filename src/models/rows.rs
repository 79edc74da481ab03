//! Typed views of the row shapes returned by the analytic functions.
//!
//! The data layer serializes `numeric` columns as JSON strings, so every
//! numeric field goes through the lenient deserializers below and arrives
//! as a real number exactly once.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Interpret a JSON scalar as a finite float. Numeric strings are accepted.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Interpret a JSON scalar as an integer. Integral floats and numeric strings are accepted.
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

/// Identifier as text, so `1` and `"1"` compare equal. Blank strings and
/// non-scalars have no id.
pub fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integral(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

/// Serde adapters for string-or-number columns.
pub mod lenient {
    use super::*;

    pub fn f64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(value_as_f64))
    }

    pub fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(f64_opt(d)?.unwrap_or(0.0))
    }

    pub fn i64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(value_as_i64))
    }

    pub fn i64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(i64_opt(d)?.unwrap_or(0))
    }

    pub fn i32_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
        Ok(i64_opt(d)?.and_then(|v| i32::try_from(v).ok()))
    }

    /// Identifiers may be integers, UUIDs or codes; keep them as text.
    pub fn id_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(value_as_id))
    }
}

/// Revenue/order row: one per (month, year) or per dimension value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueRow {
    #[serde(default)]
    pub month_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub sales_year: Option<i32>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub total_orders: i64,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub avg_order_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub total_products_sold: Option<i64>,
}

impl RevenueRow {
    /// Row label: the most specific dimension present, else "Month Year".
    pub fn label(&self) -> String {
        if let Some(name) = self
            .product_name
            .as_ref()
            .or(self.seller_name.as_ref())
            .or(self.category_name.as_ref())
        {
            return name.clone();
        }
        match (&self.month_name, self.sales_year) {
            (Some(month), Some(year)) => format!("{} {year}", month.trim()),
            (Some(month), None) => month.trim().to_string(),
            (None, Some(year)) => year.to_string(),
            (None, None) => "-".to_string(),
        }
    }
}

/// Customer lifetime value row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerValueRow {
    #[serde(default, deserialize_with = "lenient::id_opt")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub total_orders: i64,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub avg_order_value: Option<f64>,
    #[serde(default)]
    pub customer_segment: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub customer_lifetime_days: Option<i64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub purchase_frequency: Option<f64>,
    #[serde(default)]
    pub first_purchase_date: Option<String>,
    #[serde(default)]
    pub last_purchase_date: Option<String>,
}

/// Profit margin row, by product or by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitMarginRow {
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_cost: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub profit_margin_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub product_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub total_units_sold: Option<i64>,
}

/// Year-over-year and revenue-drop row. Period columns vary by granularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropAnalysisRow {
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub current_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub current_month: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub current_week: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub previous_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub previous_month: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub previous_week: Option<i32>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub current_revenue: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub previous_revenue: f64,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub change_percentage: Option<f64>,
    #[serde(default)]
    pub drop_severity: Option<String>,
    /// Free text or a text array, depending on the function.
    #[serde(default)]
    pub recommendations: Option<Value>,
}

/// Fraud signal row for customers or sellers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudSignalRow {
    #[serde(default, deserialize_with = "lenient::id_opt")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id_opt")]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub failed_attempts: Option<i64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub return_percentage: Option<f64>,
    #[serde(default)]
    pub last_failed_date: Option<String>,
}

impl FraudSignalRow {
    /// The flagged customer or seller.
    pub fn subject_id(&self) -> Option<&str> {
        self.customer_id.as_deref().or(self.seller_id.as_deref())
    }
}

/// Row of the available-years list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct YearRow {
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub sales_year: Option<i32>,
}

impl YearRow {
    pub fn value(&self) -> Option<i32> {
        self.year.or(self.sales_year)
    }
}
