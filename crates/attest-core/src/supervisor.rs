//! Battery supervisor hooks and the harness that wires them around cases.
//!
//! The supervisor is injected explicitly at construction (there is no
//! convention-based discovery); every hook failure is fatal to the case it
//! surrounds except `end`, which is logged and swallowed during shutdown.

use crate::engine::runner::CaseRunner;
use crate::errors::{BatteryError, HookPhase};
use crate::model::CaseOutcome;
use crate::report;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

/// Process-wide lifecycle hooks around a test battery. Every method defaults
/// to a no-op so implementors only override what they need.
pub trait BatterySupervisor: Send + Sync {
    fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }
    fn pre_before_test(&self) -> anyhow::Result<()> {
        Ok(())
    }
    fn post_before_test(&self) -> anyhow::Result<()> {
        Ok(())
    }
    fn pre_after_test(&self) -> anyhow::Result<()> {
        Ok(())
    }
    fn post_after_test(&self) -> anyhow::Result<()> {
        Ok(())
    }
    fn end(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Optional per-case callback run between the supervisor's pre/post hooks.
pub type CaseHook = Box<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Per-case before/after callbacks.
#[derive(Default)]
pub struct CaseHooks {
    pub before: Option<CaseHook>,
    pub after: Option<CaseHook>,
}

/// Wires an optional supervisor and per-case hooks around case executions,
/// emits the failure report for failing cases, and guards one-time battery
/// initialization.
pub struct Harness {
    supervisor: Option<Arc<dyn BatterySupervisor>>,
    initialized: AtomicBool,
}

impl Harness {
    pub fn new(supervisor: Option<Arc<dyn BatterySupervisor>>) -> Self {
        Self {
            supervisor,
            initialized: AtomicBool::new(false),
        }
    }

    /// One-time battery start. Calling this twice is a defect.
    pub fn init(&self) -> Result<(), BatteryError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(BatteryError::AlreadyInitialized);
        }
        if let Some(supervisor) = &self.supervisor {
            supervisor
                .init()
                .map_err(|source| BatteryError::SupervisorHook {
                    phase: HookPhase::Init,
                    source,
                })?;
        }
        debug!("battery harness initialized");
        Ok(())
    }

    /// Battery shutdown. A failing `end` hook is logged, never propagated.
    pub fn shutdown(&self) {
        if let Some(supervisor) = &self.supervisor {
            if let Err(err) = supervisor.end() {
                error!(error = %format!("{err:#}"), "supervisor end hook failed");
            }
        }
    }

    /// Run one case surrounded by its lifecycle hooks. Hook failures abort
    /// the case and propagate; a failed outcome additionally prints the
    /// operator failure report to stderr.
    pub async fn run_case(
        &self,
        runner: &CaseRunner,
        hooks: &CaseHooks,
    ) -> Result<CaseOutcome, BatteryError> {
        self.before_case(hooks)?;
        let outcome = runner.run().await;
        if let CaseOutcome::Failed(diagnostics) = &outcome {
            report::emit_failure(&report::format_failure(
                &runner.identity,
                &runner.spec,
                diagnostics,
            ));
        }
        self.after_case(hooks)?;
        Ok(outcome)
    }

    fn before_case(&self, hooks: &CaseHooks) -> Result<(), BatteryError> {
        self.supervisor_hook(HookPhase::PreBeforeTest, |s| s.pre_before_test())?;
        Self::case_hook(HookPhase::BeforeTest, hooks.before.as_ref())?;
        self.supervisor_hook(HookPhase::PostBeforeTest, |s| s.post_before_test())
    }

    fn after_case(&self, hooks: &CaseHooks) -> Result<(), BatteryError> {
        self.supervisor_hook(HookPhase::PreAfterTest, |s| s.pre_after_test())?;
        Self::case_hook(HookPhase::AfterTest, hooks.after.as_ref())?;
        self.supervisor_hook(HookPhase::PostAfterTest, |s| s.post_after_test())
    }

    fn supervisor_hook(
        &self,
        phase: HookPhase,
        hook: impl Fn(&dyn BatterySupervisor) -> anyhow::Result<()>,
    ) -> Result<(), BatteryError> {
        if let Some(supervisor) = &self.supervisor {
            hook(supervisor.as_ref())
                .map_err(|source| BatteryError::SupervisorHook { phase, source })?;
        }
        Ok(())
    }

    fn case_hook(phase: HookPhase, hook: Option<&CaseHook>) -> Result<(), BatteryError> {
        if let Some(hook) = hook {
            hook().map_err(|source| BatteryError::CaseHook { phase, source })?;
        }
        Ok(())
    }
}
