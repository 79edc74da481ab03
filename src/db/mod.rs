//! Database connection pool and the PostgreSQL-backed analytics store.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::store::{into_rows, view_sql, AnalyticsStore, RpcArg, RpcCall, StoreError};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Invokes analytic functions and views by name in a fixed schema.
#[derive(Debug, Clone)]
pub struct PgAnalyticsStore {
    pool: PgPool,
    schema: String,
}

impl PgAnalyticsStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }
}

#[async_trait]
impl AnalyticsStore for PgAnalyticsStore {
    async fn call(&self, call: &RpcCall) -> Result<Vec<Value>, StoreError> {
        let sql = call.to_sql(&self.schema);
        let mut query = sqlx::query_scalar::<_, Value>(&sql);
        for (_, arg) in &call.args {
            query = match arg {
                RpcArg::Int(v) => query.bind(*v),
                RpcArg::Numeric(v) => query.bind(*v),
                RpcArg::Text(v) => query.bind(v.clone()),
                RpcArg::Date(v) => query.bind(*v),
            };
        }

        let value = query
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(into_rows(value))
    }

    async fn select_view(&self, view: &'static str) -> Result<Vec<Value>, StoreError> {
        let sql = view_sql(&self.schema, view);
        let value = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(into_rows(value))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(())
    }
}
