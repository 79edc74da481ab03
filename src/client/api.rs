//! HTTP client for the analytics API.

use std::env;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ErrorBody;
use crate::models::filters::YearFilter;
use crate::models::returns::ReturnAnalyticsRow;
use crate::models::rows::{
    CustomerValueRow, DropAnalysisRow, FraudSignalRow, ProfitMarginRow, RevenueRow, YearRow,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            env::var("DASHBOARD_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let timeout_secs = env::var("DASHBOARD_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Decode a response body into rows. An empty body, `null` or any non-array
/// JSON counts as "no rows", not as an error.
pub fn parse_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ClientError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(ClientError::from),
        _ => Ok(Vec::new()),
    }
}

/// Pull the human-readable message out of an error response.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => match err.details {
            Some(details) => format!("{} ({details})", err.error),
            None => err.error,
        },
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` with the given query pairs and decode the rows.
    pub async fn fetch_rows<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ClientError> {
        let url = Url::parse_with_params(&format!("{}{path}", self.base_url), query)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        tracing::debug!(%url, "Fetching dashboard data");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        parse_rows(&body)
    }

    /// Years with sales, most recent first.
    pub async fn available_years(&self) -> Result<Vec<i32>, ClientError> {
        let rows: Vec<YearRow> = self.fetch_rows("/api/years", &[]).await?;
        let mut years: Vec<i32> = rows.iter().filter_map(YearRow::value).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }

    pub async fn monthly_revenue(&self, year: YearFilter) -> Result<Vec<RevenueRow>, ClientError> {
        self.fetch_rows("/api/monthly-revenue", &year_query(year)).await
    }

    pub async fn customer_lifetime_value(
        &self,
        year: YearFilter,
    ) -> Result<Vec<CustomerValueRow>, ClientError> {
        self.fetch_rows("/api/customer-lifetime-value", &year_query(year))
            .await
    }

    pub async fn category_profit_margin(
        &self,
        year: YearFilter,
    ) -> Result<Vec<ProfitMarginRow>, ClientError> {
        self.fetch_rows("/api/profit-margin/category", &year_query(year))
            .await
    }

    pub async fn monthly_revenue_drops(
        &self,
        year: YearFilter,
        threshold: Option<f64>,
    ) -> Result<Vec<DropAnalysisRow>, ClientError> {
        let mut query = year_query(year);
        if let Some(threshold) = threshold {
            query.push(("threshold", threshold.to_string()));
        }
        self.fetch_rows("/api/revenue-drop/monthly", &query).await
    }

    /// Unset filters are left out so the server defaults apply.
    pub async fn failed_payments(
        &self,
        days: Option<i32>,
        min_attempts: Option<i32>,
    ) -> Result<Vec<FraudSignalRow>, ClientError> {
        let mut query = Vec::new();
        if let Some(days) = days {
            query.push(("days", days.to_string()));
        }
        if let Some(min_attempts) = min_attempts {
            query.push(("min_attempts", min_attempts.to_string()));
        }
        self.fetch_rows("/api/fraud/failed-payments", &query).await
    }

    pub async fn return_analytics(
        &self,
        year: YearFilter,
    ) -> Result<Vec<ReturnAnalyticsRow>, ClientError> {
        let mut query = vec![("type", "all".to_string())];
        query.extend(year_query(year));
        self.fetch_rows("/api/analytics/returns", &query).await
    }
}

fn year_query(year: YearFilter) -> Vec<(&'static str, String)> {
    vec![("year", year.to_string())]
}
