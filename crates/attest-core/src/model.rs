use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of one functionality case, supplied explicitly at construction.
///
/// `group` names the functionality under test (e.g. `product.create`) and
/// `id` distinguishes cases within the group. Both are forwarded verbatim to
/// the invocation client and the failure report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseIdentity {
    pub group: String,
    pub id: u64,
}

impl CaseIdentity {
    pub fn new(group: impl Into<String>, id: u64) -> Self {
        Self {
            group: group.into(),
            id,
        }
    }
}

/// Immutable definition of one case: what to send, what to expect, and the
/// persistence work surrounding the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSpec {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// JSON text of the input payload.
    pub input: String,
    /// JSON text of the expected output pattern; may embed wildcard markers.
    pub expected: String,
    /// Mutating statements executed in order before the call under test.
    #[serde(default)]
    pub preamble: Vec<String>,
    /// Read-only predicate statements checked in order after verification.
    #[serde(default)]
    pub epilogue: Vec<String>,
}

/// Final state of one verification run.
///
/// Diagnostics from a preamble short-circuit, from structural mismatches and
/// from epilogue verification failures all land in the same ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Failed(Vec<String>),
}

impl CaseOutcome {
    /// `Passed` iff no diagnostics were accumulated.
    pub fn from_diagnostics(diagnostics: Vec<String>) -> Self {
        if diagnostics.is_empty() {
            CaseOutcome::Passed
        } else {
            CaseOutcome::Failed(diagnostics)
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }

    pub fn diagnostics(&self) -> &[String] {
        match self {
            CaseOutcome::Passed => &[],
            CaseOutcome::Failed(diagnostics) => diagnostics,
        }
    }
}

/// Parse JSON text leniently: anything unparseable degrades to `Null`, so a
/// malformed expected pattern surfaces as ordinary mismatches instead of a
/// separate error path.
pub fn parse_lenient(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or(Value::Null)
}
