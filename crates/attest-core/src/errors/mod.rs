//! Fatal error taxonomy.
//!
//! Everything non-fatal in a case run (structural mismatches, epilogue
//! verification failures, the preamble short-circuit) travels as accumulated
//! diagnostic strings inside [`crate::model::CaseOutcome`]. The types here
//! cover the conditions that terminate a case or the battery outright.

use thiserror::Error;

/// Lifecycle hook phases, used to name the failing hook in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Init,
    PreBeforeTest,
    BeforeTest,
    PostBeforeTest,
    PreAfterTest,
    AfterTest,
    PostAfterTest,
}

impl HookPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            HookPhase::Init => "init",
            HookPhase::PreBeforeTest => "pre-before-test",
            HookPhase::BeforeTest => "before-test",
            HookPhase::PostBeforeTest => "post-before-test",
            HookPhase::PreAfterTest => "pre-after-test",
            HookPhase::AfterTest => "after-test",
            HookPhase::PostAfterTest => "post-after-test",
        }
    }
}

impl std::fmt::Display for HookPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal condition around a case run. Hook failures are propagated, never
/// swallowed; only the supervisor `end` hook is exempt (logged by the
/// harness instead).
#[derive(Debug, Error)]
pub enum BatteryError {
    #[error("error while running supervisor {phase} hook: {source}")]
    SupervisorHook {
        phase: HookPhase,
        #[source]
        source: anyhow::Error,
    },

    #[error("error while running case {phase} hook: {source}")]
    CaseHook {
        phase: HookPhase,
        #[source]
        source: anyhow::Error,
    },

    #[error("battery harness already initialized")]
    AlreadyInitialized,
}
