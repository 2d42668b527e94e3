//! Scripted collaborators for tests: deterministic, in-memory, recording
//! every invocation so assertions can check ordering and suppression.

use crate::model::CaseIdentity;
use crate::providers::{FunctionalityClient, PersistenceClient, QueryResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// A functionality client that always yields the same scripted result (or
/// error) and records the payloads it was invoked with.
pub struct FakeFunctionality {
    response: Result<Value, String>,
    calls: Mutex<Vec<Value>>,
}

impl FakeFunctionality {
    pub fn returning(response: Value) -> Self {
        Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn erroring(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().expect("fake functionality lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("fake functionality lock").len()
    }
}

#[async_trait]
impl FunctionalityClient for FakeFunctionality {
    async fn invoke(&self, _identity: &CaseIdentity, payload: Value) -> anyhow::Result<Value> {
        self.calls
            .lock()
            .expect("fake functionality lock")
            .push(payload);
        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

/// A persistence client scripted per statement.
///
/// Executes succeed and queries answer `YES` unless told otherwise; failures
/// and responses are matched by substring so tests can key on the raw
/// statement regardless of the predicate wrapper.
#[derive(Default)]
pub struct FakePersistence {
    failing_executes: Vec<(String, String)>,
    failing_queries: Vec<(String, String)>,
    query_responses: Vec<(String, QueryResponse)>,
    executed: Mutex<Vec<String>>,
    queried: Mutex<Vec<String>>,
}

impl FakePersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `execute` fail with `error` for statements containing `needle`.
    pub fn fail_execute(mut self, needle: impl Into<String>, error: impl Into<String>) -> Self {
        self.failing_executes.push((needle.into(), error.into()));
        self
    }

    /// Make `query` fail with `error` for statements containing `needle`.
    pub fn fail_query(mut self, needle: impl Into<String>, error: impl Into<String>) -> Self {
        self.failing_queries.push((needle.into(), error.into()));
        self
    }

    /// Script the response for queries containing `needle`.
    pub fn respond(mut self, needle: impl Into<String>, response: QueryResponse) -> Self {
        self.query_responses.push((needle.into(), response));
        self
    }

    /// Statements passed to `execute`, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().expect("fake persistence lock").clone()
    }

    /// Statements passed to `query`, in order (after wrapping).
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().expect("fake persistence lock").clone()
    }
}

#[async_trait]
impl PersistenceClient for FakePersistence {
    async fn execute(&self, statement: &str) -> anyhow::Result<()> {
        self.executed
            .lock()
            .expect("fake persistence lock")
            .push(statement.to_string());
        for (needle, error) in &self.failing_executes {
            if statement.contains(needle.as_str()) {
                anyhow::bail!("{error}");
            }
        }
        Ok(())
    }

    async fn query(&self, statement: &str) -> anyhow::Result<QueryResponse> {
        self.queried
            .lock()
            .expect("fake persistence lock")
            .push(statement.to_string());
        for (needle, error) in &self.failing_queries {
            if statement.contains(needle.as_str()) {
                anyhow::bail!("{error}");
            }
        }
        for (needle, response) in &self.query_responses {
            if statement.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }
        Ok(QueryResponse::yes())
    }
}
