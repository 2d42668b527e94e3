//! Suite definition files: a YAML document declaring the functionality group
//! and its cases. Replaces any convention-based derivation of case identity
//! with explicit data.
//!
//! ```yaml
//! group: product.create
//! cases:
//!   - id: 1
//!     title: creates a product
//!     description: happy path
//!     input: '{"name":"Chair"}'
//!     expected: '{"id":"+","name":"Chair"}'
//!     preamble:
//!       - DELETE FROM products WHERE name = 'Chair'
//!     epilogue:
//!       - SELECT 1 FROM products WHERE name = 'Chair'
//! ```

use crate::model::{CaseIdentity, CaseSpec};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One suite: a functionality group plus its ordered cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub group: String,
    #[serde(default)]
    pub cases: Vec<CaseSpec>,
}

impl SuiteConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let suite: SuiteConfig =
            serde_yaml::from_str(text).context("failed to parse suite yaml")?;
        suite.validate()?;
        Ok(suite)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read suite config {}", path.display()))?;
        Self::from_yaml(&text)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.group.trim().is_empty() {
            anyhow::bail!("suite group must not be empty");
        }
        let mut seen = HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.id) {
                anyhow::bail!("duplicate case id {} in suite '{}'", case.id, self.group);
            }
            if case.title.trim().is_empty() {
                anyhow::bail!("case {} in suite '{}' has an empty title", case.id, self.group);
            }
        }
        Ok(())
    }

    /// Explicit identity for one of this suite's cases.
    pub fn identity_for(&self, case: &CaseSpec) -> CaseIdentity {
        CaseIdentity::new(self.group.clone(), case.id)
    }
}
