//! Per-case verification orchestrator.
//!
//! One run walks the phases RunningPreamble → Invoking → Verifying →
//! RunningEpilogue → Done and resolves a one-shot completion gate exactly
//! once, from exactly one of two paths: the preamble short-circuit or the
//! end of the epilogue phase. All phases are strictly sequential; the next
//! step is only started after the previous one's future resolved. Distinct
//! cases may run concurrently, each owning its own gate and diagnostic
//! buffer.

use crate::engine::sequencer::ActionSequencer;
use crate::matcher;
use crate::model::{parse_lenient, CaseIdentity, CaseOutcome, CaseSpec};
use crate::providers::{FunctionalityClient, PersistenceClient};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    RunningPreamble,
    Invoking,
    Verifying,
    RunningEpilogue,
    Done,
}

/// One-shot completion latch: released exactly once per case run, observed
/// by exactly one waiter.
struct CompletionGate {
    tx: Option<oneshot::Sender<CaseOutcome>>,
}

impl CompletionGate {
    fn new() -> (Self, oneshot::Receiver<CaseOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx: Some(tx) }, rx)
    }

    fn release(&mut self, outcome: CaseOutcome) {
        match self.tx.take() {
            Some(tx) => {
                let _ = tx.send(outcome);
            }
            None => error!("completion gate released twice; outcome dropped"),
        }
    }
}

/// Runs one case end to end against the injected collaborators.
///
/// The case data is immutable after construction; the diagnostic buffer and
/// completion gate are created fresh inside every [`CaseRunner::run`] call,
/// so the same runner can execute repeatedly (and concurrently with other
/// runners) without shared mutable state.
pub struct CaseRunner {
    pub identity: CaseIdentity,
    pub spec: CaseSpec,
    pub functionality: Arc<dyn FunctionalityClient>,
    pub persistence: Arc<dyn PersistenceClient>,
}

impl CaseRunner {
    pub fn new(
        identity: CaseIdentity,
        spec: CaseSpec,
        functionality: Arc<dyn FunctionalityClient>,
        persistence: Arc<dyn PersistenceClient>,
    ) -> Self {
        Self {
            identity,
            spec,
            functionality,
            persistence,
        }
    }

    /// Execute the full case and wait for the single completion.
    pub async fn run(&self) -> CaseOutcome {
        let (mut gate, done) = CompletionGate::new();
        self.drive(&mut gate).await;
        done.await.unwrap_or_else(|_| {
            CaseOutcome::Failed(vec![
                "case run finished without releasing its completion gate".to_string(),
            ])
        })
    }

    async fn drive(&self, gate: &mut CompletionGate) {
        let sequencer = ActionSequencer::new(self.persistence.clone());

        self.enter(Phase::RunningPreamble);
        if let Err(diagnostic) = sequencer.run_preamble(&self.spec.preamble).await {
            // Short-circuit: the call under test, the matcher and the
            // epilogue must never run.
            self.enter(Phase::Done);
            gate.release(CaseOutcome::Failed(vec![diagnostic]));
            return;
        }

        self.enter(Phase::Invoking);
        let actual = self.invoke().await;

        self.enter(Phase::Verifying);
        let expected = parse_lenient(&self.spec.expected);
        let mut diagnostics: Vec<String> = matcher::verify_root(&expected, &actual)
            .iter()
            .map(ToString::to_string)
            .collect();

        // The epilogue runs regardless of the match outcome.
        self.enter(Phase::RunningEpilogue);
        sequencer
            .run_epilogue(&self.spec.epilogue, &mut diagnostics)
            .await;

        self.enter(Phase::Done);
        gate.release(CaseOutcome::from_diagnostics(diagnostics));
    }

    async fn invoke(&self) -> Value {
        let payload = parse_lenient(&self.spec.input);
        match self.functionality.invoke(&self.identity, payload).await {
            Ok(result) => result,
            Err(err) => {
                // Transport errors keep the mismatch-only user-visible
                // behavior: the result becomes Null and surfaces through the
                // matcher. The log line is the only place they stay distinct.
                warn!(
                    group = %self.identity.group,
                    case = self.identity.id,
                    error = %format!("{err:#}"),
                    "call under test failed; verifying against a null result"
                );
                Value::Null
            }
        }
    }

    fn enter(&self, phase: Phase) {
        debug!(
            group = %self.identity.group,
            case = self.identity.id,
            phase = ?phase,
            "phase transition"
        );
    }
}
