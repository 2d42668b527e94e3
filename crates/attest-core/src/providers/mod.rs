//! External collaborator contracts the engine depends on. The engine only
//! ever sees these trait objects; transports live elsewhere.

use crate::model::CaseIdentity;
use async_trait::async_trait;
use serde_json::Value;

pub mod fake;

/// The call under test: invoke a functionality by identity with a structured
/// payload, yielding a structured result or a transport error.
#[async_trait]
pub trait FunctionalityClient: Send + Sync {
    async fn invoke(&self, identity: &CaseIdentity, payload: Value) -> anyhow::Result<Value>;
}

/// One row of a query response: `(column name, text value)` pairs in column
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRow {
    pub columns: Vec<(String, String)>,
}

impl QueryRow {
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            columns: vec![(name.into(), value.into())],
        }
    }
}

/// Rows returned by a read-only predicate statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    pub rows: Vec<QueryRow>,
}

impl QueryResponse {
    /// The affirmative single-row, single-column response the epilogue
    /// sequencer requires.
    pub fn yes() -> Self {
        Self {
            rows: vec![QueryRow::single("result", "YES")],
        }
    }

    pub fn no() -> Self {
        Self {
            rows: vec![QueryRow::single("result", "NO")],
        }
    }
}

/// Persistence side of a case: mutating preamble statements and read-only
/// epilogue predicates.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Execute one mutating statement.
    async fn execute(&self, statement: &str) -> anyhow::Result<()>;

    /// Run one read-only query, yielding rows of named text columns.
    async fn query(&self, statement: &str) -> anyhow::Result<QueryResponse>;
}
