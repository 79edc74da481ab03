//! Analytic services: parameter normalization and backing-call dispatch.
//!
//! Each service turns a raw query string into one named RPC invocation and
//! hands back the rows untouched. `returns` is the exception and groups a
//! view in memory.

pub mod customers;
pub mod details;
pub mod fraud;
pub mod profit;
pub mod quantity;
pub mod returns;
pub mod revenue;
pub mod sellers;
pub mod yoy;

use serde_json::Value;

use crate::errors::AppError;
use crate::models::filters::YearQuery;
use crate::store::{AnalyticsStore, RpcCall};

/// Invoke a backing function and return its rows verbatim.
pub async fn fetch(store: &dyn AnalyticsStore, call: RpcCall) -> Result<Vec<Value>, AppError> {
    tracing::debug!(rpc = call.function, args = ?call.args, "Invoking backing function");
    let rows = store.call(&call).await?;
    tracing::debug!(rpc = call.function, rows = rows.len(), "Backing function returned");
    Ok(rows)
}

/// Shape A: a function whose only parameter is the optional `p_year`.
pub async fn by_year(
    store: &dyn AnalyticsStore,
    function: &'static str,
    query: &YearQuery,
) -> Result<Vec<Value>, AppError> {
    let year = query.year()?;
    fetch(store, RpcCall::new(function).arg("p_year", year)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::RpcArg;
    use serde_json::json;

    #[tokio::test]
    async fn by_year_binds_null_for_all_and_omitted() {
        let store = MemoryStore::new().with_function("get_monthly_revenue", vec![json!({"x": 1})]);

        let omitted = by_year(&store, "get_monthly_revenue", &YearQuery { year: None })
            .await
            .unwrap();
        let all = by_year(
            &store,
            "get_monthly_revenue",
            &YearQuery {
                year: Some("all".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(omitted, all);
        let calls = store.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].param("p_year"), Some(&RpcArg::Int(None)));
    }

    #[tokio::test]
    async fn by_year_rejects_garbage_without_calling() {
        let store = MemoryStore::new();
        let err = by_year(
            &store,
            "get_monthly_revenue",
            &YearQuery {
                year: Some("twenty".into()),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Invalid year");
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_store_error() {
        let store = MemoryStore::new().with_failing_function("get_monthly_revenue", "timeout");
        let err = by_year(&store, "get_monthly_revenue", &YearQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
