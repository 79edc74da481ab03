//! Backing-call seam between the HTTP controllers and the analytic functions.
//!
//! Every endpoint resolves to exactly one named PostgreSQL function (an
//! "RPC") or one SQL view. Rows come back as flat JSON objects and are
//! handed to the caller untouched.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::models::filters::YearFilter;

/// Errors raised by the data layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Missing relation: {0}")]
    MissingRelation(String),

    #[error("Backing call failed: {0}")]
    Failed(String),
}

impl StoreError {
    /// Classify a sqlx error, separating undefined function/table from other failures.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            // 42P01 undefined_table, 42883 undefined_function
            if matches!(db.code().as_deref(), Some("42P01") | Some("42883")) {
                return Self::MissingRelation(db.message().to_string());
            }
        }
        Self::Database(err)
    }
}

/// A single named argument value. Nulls stay typed so Postgres can resolve
/// the function signature.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcArg {
    Int(Option<i32>),
    Numeric(Option<f64>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
}

impl RpcArg {
    pub fn sql_type(&self) -> &'static str {
        match self {
            RpcArg::Int(_) => "integer",
            RpcArg::Numeric(_) => "numeric",
            RpcArg::Text(_) => "text",
            RpcArg::Date(_) => "date",
        }
    }
}

impl From<i32> for RpcArg {
    fn from(value: i32) -> Self {
        RpcArg::Int(Some(value))
    }
}

impl From<f64> for RpcArg {
    fn from(value: f64) -> Self {
        RpcArg::Numeric(Some(value))
    }
}

impl From<String> for RpcArg {
    fn from(value: String) -> Self {
        RpcArg::Text(Some(value))
    }
}

impl From<NaiveDate> for RpcArg {
    fn from(value: NaiveDate) -> Self {
        RpcArg::Date(Some(value))
    }
}

impl From<YearFilter> for RpcArg {
    fn from(value: YearFilter) -> Self {
        RpcArg::Int(value.as_param())
    }
}

/// Invocation of a named analytic function with named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
    pub function: &'static str,
    pub args: Vec<(&'static str, RpcArg)>,
}

impl RpcCall {
    pub fn new(function: &'static str) -> Self {
        Self {
            function,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, name: &'static str, value: impl Into<RpcArg>) -> Self {
        self.args.push((name, value.into()));
        self
    }

    /// Look up an argument by parameter name.
    pub fn param(&self, name: &str) -> Option<&RpcArg> {
        self.args
            .iter()
            .find(|(arg_name, _)| *arg_name == name)
            .map(|(_, value)| value)
    }

    /// Render the call as a single-row query that aggregates the function's
    /// result set into one JSON array.
    pub fn to_sql(&self, schema: &str) -> String {
        let args = self
            .args
            .iter()
            .enumerate()
            .map(|(i, (name, arg))| format!("{name} => ${}::{}", i + 1, arg.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "SELECT COALESCE(json_agg(t), '[]'::json) FROM {}.{}({args}) AS t",
            quote_ident(schema),
            quote_ident(self.function),
        )
    }
}

/// Render a view read as a single-row JSON array query.
pub fn view_sql(schema: &str, view: &str) -> String {
    format!(
        "SELECT COALESCE(json_agg(t), '[]'::json) FROM {}.{} AS t",
        quote_ident(schema),
        quote_ident(view),
    )
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Unwrap the aggregated JSON into its rows. `json_agg` yields an array;
/// anything else is treated as a single row.
pub fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Data layer the controllers forward to.
#[async_trait]
pub trait AnalyticsStore: Send + Sync + std::fmt::Debug {
    /// Invoke a named analytic function and return its rows verbatim.
    async fn call(&self, call: &RpcCall) -> Result<Vec<Value>, StoreError>;

    /// Read every row of a pre-built view.
    async fn select_view(&self, view: &'static str) -> Result<Vec<Value>, StoreError>;

    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), StoreError>;
}
