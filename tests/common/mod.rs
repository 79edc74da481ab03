//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use salesdash::config::AppConfig;
use salesdash::store::memory::MemoryStore;
use salesdash::store::{AnalyticsStore, RpcCall, StoreError};
use salesdash::{routes, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        frontend_url: "http://localhost:5173".to_string(),
        rpc_schema: "public".to_string(),
        request_timeout_secs: 5,
    }
}

/// Router over the given store; the store handle stays with the caller for assertions.
pub fn app(store: Arc<MemoryStore>) -> Router {
    routes::router(AppState {
        store,
        config: test_config(),
    })
}

/// Router over any store with an explicit configuration.
pub fn app_with(store: Arc<dyn AnalyticsStore>, config: AppConfig) -> Router {
    routes::router(AppState { store, config })
}

/// Store that answers like `inner` after sleeping for `delay`.
#[derive(Debug)]
pub struct SlowStore {
    pub inner: MemoryStore,
    pub delay: Duration,
}

impl SlowStore {
    pub fn new(inner: MemoryStore, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl AnalyticsStore for SlowStore {
    async fn call(&self, call: &RpcCall) -> Result<Vec<Value>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.call(call).await
    }

    async fn select_view(&self, view: &'static str) -> Result<Vec<Value>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.select_view(view).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Issue a GET and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
