//! Operator-visible failure reporting. Formatting is a pure function so it
//! stays deterministic and unit-testable; only the emit step touches stderr.
//! A passing case produces no output at all.

use crate::model::{CaseIdentity, CaseSpec};

/// Render the failure block printed to the operator error channel.
#[must_use]
pub fn format_failure(identity: &CaseIdentity, spec: &CaseSpec, diagnostics: &[String]) -> String {
    let mut out = String::new();
    out.push_str("\n------ ASSERTION FAILED ------\n");
    out.push_str(&format!("\nFunctionality: {}\n", identity.group));
    out.push_str(&format!("\nCase: {}\n", identity.id));
    out.push_str(&format!("\nTitle: {}\n", spec.title));
    out.push_str(&format!("\nDescription: {}\n", spec.description));
    out.push_str("\nErrors:\n");
    for diagnostic in diagnostics {
        out.push_str(&format!("\n\t- {diagnostic};\n"));
    }
    out.push_str("\n-------------------------------------\n");
    out
}

/// Write a failure block to stderr.
pub fn emit_failure(block: &str) {
    eprintln!("{block}");
}

/// Render the assertion message attached to the failed test itself: every
/// diagnostic as one bullet, in accumulation order.
#[must_use]
pub fn assertion_message(diagnostics: &[String]) -> String {
    let mut message = String::new();
    for diagnostic in diagnostics {
        message.push_str(&format!("\n\n- {diagnostic};"));
    }
    message.trim().to_string()
}
