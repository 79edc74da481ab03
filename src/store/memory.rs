//! In-memory store with canned rows, used by tests and offline demos.
//!
//! Every invocation is recorded so callers can assert which backing call a
//! request produced, and with which parameters.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{AnalyticsStore, RpcCall, StoreError};

#[derive(Debug, Clone)]
enum Canned {
    Rows(Vec<Value>),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    functions: Mutex<HashMap<String, Canned>>,
    views: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<RpcCall>>,
    view_reads: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rows a function returns regardless of its arguments.
    pub fn with_function(self, name: &str, rows: Vec<Value>) -> Self {
        lock(&self.functions).insert(name.to_string(), Canned::Rows(rows));
        self
    }

    /// Make a function fail with the given data-layer message.
    pub fn with_failing_function(self, name: &str, message: &str) -> Self {
        lock(&self.functions).insert(name.to_string(), Canned::Failure(message.to_string()));
        self
    }

    pub fn with_view(self, name: &str, rows: Vec<Value>) -> Self {
        lock(&self.views).insert(name.to_string(), Canned::Rows(rows));
        self
    }

    /// Every function call received so far, in order.
    pub fn calls(&self) -> Vec<RpcCall> {
        lock(&self.calls).clone()
    }

    pub fn view_reads(&self) -> Vec<String> {
        lock(&self.view_reads).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn last_call(&self) -> Option<RpcCall> {
        lock(&self.calls).last().cloned()
    }
}

// A poisoned lock only means another test thread panicked mid-call; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn answer(canned: Option<Canned>, name: &str) -> Result<Vec<Value>, StoreError> {
    match canned {
        Some(Canned::Rows(rows)) => Ok(rows),
        Some(Canned::Failure(message)) => Err(StoreError::Failed(message)),
        None => Err(StoreError::MissingRelation(format!(
            "relation or function \"{name}\" does not exist"
        ))),
    }
}

#[async_trait]
impl AnalyticsStore for MemoryStore {
    async fn call(&self, call: &RpcCall) -> Result<Vec<Value>, StoreError> {
        lock(&self.calls).push(call.clone());
        let canned = lock(&self.functions).get(call.function).cloned();
        answer(canned, call.function)
    }

    async fn select_view(&self, view: &'static str) -> Result<Vec<Value>, StoreError> {
        lock(&self.view_reads).push(view.to_string());
        let canned = lock(&self.views).get(view).cloned();
        answer(canned, view)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
