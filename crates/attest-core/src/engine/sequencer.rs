//! Ordered execution of a case's persistence phases.
//!
//! Both phases run their statements strictly one at a time, in list order;
//! the next statement is only dispatched after the previous one's future
//! resolved. They differ in error policy: the preamble stops at the first
//! failure, the epilogue records each failure and keeps going.

use crate::providers::{PersistenceClient, QueryResponse};
use anyhow::bail;
use std::sync::Arc;
use tracing::debug;

/// Literal text the predicate wrapper must come back with.
const AFFIRMATIVE: &str = "YES";

/// Wrap a raw predicate statement into the single-row, single-column
/// existence probe dispatched to the persistence service.
pub fn wrap_predicate(statement: &str) -> String {
    format!("SELECT (CASE WHEN EXISTS ({statement}) THEN 'YES' ELSE 'NO' END) AS result")
}

/// Drives one case's preamble and epilogue statement lists.
pub struct ActionSequencer {
    persistence: Arc<dyn PersistenceClient>,
}

impl ActionSequencer {
    pub fn new(persistence: Arc<dyn PersistenceClient>) -> Self {
        Self { persistence }
    }

    /// Fail-fast phase: run every mutating statement in order, stopping at
    /// the first failure. `Err` carries the single diagnostic for the phase;
    /// later statements are never dispatched.
    pub async fn run_preamble(&self, actions: &[String]) -> Result<(), String> {
        for action in actions {
            debug!(statement = %action, "running preamble action");
            if let Err(error) = self.persistence.execute(action).await {
                return Err(format!(
                    "Persistence preamble action\n\n{action}\n\nreturned the following error:\n\n{error:#}"
                ));
            }
        }
        Ok(())
    }

    /// Collect-all phase: check every predicate in order; each failure
    /// appends one diagnostic and the sequence continues regardless.
    pub async fn run_epilogue(&self, verifications: &[String], diagnostics: &mut Vec<String>) {
        for verification in verifications {
            debug!(statement = %verification, "running epilogue verification");
            if let Err(error) = self.check_predicate(verification).await {
                diagnostics.push(format!(
                    "Persistence epilogue verification\n\n{verification}\n\nreturned the following error:\n\n{error:#}"
                ));
            }
        }
    }

    async fn check_predicate(&self, verification: &str) -> anyhow::Result<()> {
        let response: QueryResponse = self.persistence.query(&wrap_predicate(verification)).await?;
        if response.rows.len() != 1 {
            bail!("query result must return just one row, got {}", response.rows.len());
        }
        let row = &response.rows[0];
        if row.columns.len() != 1 {
            bail!(
                "query result must return just one column, got {}",
                row.columns.len()
            );
        }
        let value = &row.columns[0].1;
        if value != AFFIRMATIVE {
            bail!("expected {AFFIRMATIVE}, found {value}");
        }
        Ok(())
    }
}
