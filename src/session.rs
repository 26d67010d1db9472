use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sitecompat_core_types::{EvaluationScope, ExtensionId, SessionId};
use sitecompat_issue_checker::{CompatChecker, RunReport};
use sitecompat_lifecycle::{Effect, Envelope, PageLifecycleTracker};
use sitecompat_page_inspect::{ElementEvaluator, InspectedPage};
use sitecompat_rule_catalog::CatalogLoader;

use crate::config::SessionConfig;
use crate::sink::ReportSink;

/// Completed evaluation pass, delivered back to the session loop.
struct FinishedRun {
    scope: EvaluationScope,
    epoch: u64,
    report: RunReport,
}

/// Re-entrancy state for evaluation runs: at most one in flight, and at
/// most one pending follow-up. A follow-up requested while one is already
/// pending replaces it (last-run-wins).
#[derive(Default)]
struct RunGate {
    inflight: bool,
    pending: Option<EvaluationScope>,
}

/// Handle to a running session loop.
pub struct SessionHandle {
    commands: mpsc::Sender<EvaluationScope>,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl SessionHandle {
    /// Request an evaluation pass outside the lifecycle protocol. A freshly
    /// opened observer calls this for its initial display, since events from
    /// before it opened were dropped, not buffered. The request goes through
    /// the same serialization and staleness policy as lifecycle-driven runs.
    pub async fn request_evaluation(&self, scope: EvaluationScope) -> bool {
        self.commands.send(scope).await.is_ok()
    }

    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.join.await;
    }
}

/// The evaluating context: owns the mirror lifecycle tracker, the checker,
/// and the run policy. All state mutation happens inside the message loop,
/// one message at a time.
pub struct DevtoolsSession {
    id: SessionId,
    extension: ExtensionId,
    mirror: PageLifecycleTracker,
    checker: Arc<CompatChecker>,
    evaluator: ElementEvaluator,
    sink: Arc<dyn ReportSink>,
}

impl DevtoolsSession {
    pub fn new(
        config: &SessionConfig,
        page: Arc<dyn InspectedPage>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        let loader = Arc::new(CatalogLoader::new(config.install_root.clone()));
        let evaluator = ElementEvaluator::new(page);
        let checker = Arc::new(CompatChecker::new(loader, evaluator.clone()));

        Self {
            id: SessionId::new(),
            extension: config.extension.clone(),
            mirror: PageLifecycleTracker::new(),
            checker,
            evaluator,
            sink,
        }
    }

    /// Start the session loop. `inbox` carries lifecycle envelopes forwarded
    /// by the notification bridge.
    pub fn spawn(self, inbox: mpsc::Receiver<Envelope>) -> SessionHandle {
        let (commands, command_rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let join = tokio::spawn(self.run(inbox, command_rx, cancel.clone()));
        SessionHandle {
            commands,
            cancel,
            join,
        }
    }

    async fn run(
        mut self,
        mut inbox: mpsc::Receiver<Envelope>,
        mut commands: mpsc::Receiver<EvaluationScope>,
        cancel: CancellationToken,
    ) {
        info!(target: "session", session = %self.id, "devtools session started");

        let (done_tx, mut done_rx) = mpsc::channel::<FinishedRun>(1);
        let mut gate = RunGate::default();

        loop {
            // Biased so queued lifecycle messages are applied before a
            // finished run is published; a navigation that already started
            // must mark the run stale.
            tokio::select! {
                biased;
                envelope = inbox.recv() => match envelope {
                    Some(envelope) => self.handle_envelope(envelope, &mut gate, &done_tx).await,
                    None => break,
                },
                Some(scope) = commands.recv() => {
                    self.schedule(scope, &mut gate, &done_tx);
                }
                Some(run) = done_rx.recv() => {
                    self.finish_run(run, &mut gate, &done_tx).await;
                }
                _ = cancel.cancelled() => break,
            }
        }

        info!(target: "session", session = %self.id, "devtools session stopped");
    }

    async fn handle_envelope(
        &mut self,
        envelope: Envelope,
        gate: &mut RunGate,
        done: &mpsc::Sender<FinishedRun>,
    ) {
        if envelope.sender != self.extension {
            warn!(
                target: "session",
                sender = %envelope.sender,
                "ignoring lifecycle message from foreign extension"
            );
            return;
        }

        match self.mirror.apply(&envelope.message) {
            Effect::None => {}
            Effect::EvaluationDue(scope) => self.schedule(scope, gate, done),
            Effect::SelectionCheckDue => {
                // Selection changes also fire during navigation with nothing
                // selected; only a real selection starts a pass.
                if self.evaluator.selection_present().await {
                    self.schedule(EvaluationScope::SingleElement, gate, done);
                } else {
                    debug!(target: "session", "selection change without a selected element");
                }
            }
        }
    }

    fn schedule(&self, scope: EvaluationScope, gate: &mut RunGate, done: &mpsc::Sender<FinishedRun>) {
        if gate.inflight {
            debug!(
                target: "session",
                scope = %scope,
                "run already in flight, queuing follow-up"
            );
            gate.pending = Some(scope);
            return;
        }

        self.start_run(scope, gate, done);
    }

    fn start_run(
        &self,
        scope: EvaluationScope,
        gate: &mut RunGate,
        done: &mpsc::Sender<FinishedRun>,
    ) {
        // Race window: a navigation may have started since this run became
        // due. Check the flag one last time before committing.
        if self.mirror.page_loading() {
            debug!(target: "session", scope = %scope, "page is loading, skipping evaluation");
            return;
        }

        let epoch = self.mirror.load_epoch();
        let checker = Arc::clone(&self.checker);
        let done = done.clone();
        tokio::spawn(async move {
            let report = checker.run(scope).await;
            let _ = done.send(FinishedRun {
                scope,
                epoch,
                report,
            })
            .await;
        });
        gate.inflight = true;
    }

    async fn finish_run(
        &self,
        run: FinishedRun,
        gate: &mut RunGate,
        done: &mpsc::Sender<FinishedRun>,
    ) {
        gate.inflight = false;

        if run.epoch == self.mirror.load_epoch() {
            self.sink.publish(run.scope, run.report).await;
        } else {
            debug!(
                target: "session",
                scope = %run.scope,
                "discarding stale evaluation result"
            );
        }

        if let Some(scope) = gate.pending.take() {
            self.start_run(scope, gate, done);
        }
    }
}
