//! Notification bridge: the background-context relay that watches the host
//! tab-navigation feed and forwards lifecycle messages to the evaluating
//! context, but only while an observer UI is open. Dropped events are not
//! buffered or replayed; a freshly opened observer requests its own initial
//! evaluation instead.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sitecompat_core_types::{ExtensionId, TabId};
use sitecompat_lifecycle::{Envelope, LifecycleMessage, PageLifecycleTracker, TabEvent};

#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Tab this DevTools session is attached to; events for any other tab
    /// are ignored.
    pub tab: TabId,
    /// Our own extension identity. Envelopes from any other sender are
    /// dropped without a state change.
    pub extension: ExtensionId,
}

/// Counters kept for telemetry; returned when the bridge shuts down.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BridgeStats {
    pub forwarded: u64,
    pub dropped: u64,
    pub foreign: u64,
}

/// Handle to a running bridge task.
pub struct BridgeHandle {
    cancel: CancellationToken,
    join: JoinHandle<BridgeStats>,
}

impl BridgeHandle {
    pub async fn shutdown(self) -> BridgeStats {
        self.cancel.cancel();
        self.join.await.unwrap_or_default()
    }
}

pub struct NotificationBridge {
    config: BridgeConfig,
    tracker: PageLifecycleTracker,
    stats: BridgeStats,
    outbound: mpsc::Sender<Envelope>,
}

impl NotificationBridge {
    pub fn new(config: BridgeConfig, outbound: mpsc::Sender<Envelope>) -> Self {
        Self {
            config,
            tracker: PageLifecycleTracker::new(),
            stats: BridgeStats::default(),
            outbound,
        }
    }

    /// Start the relay loop. `tabs` is the host navigation feed; `observers`
    /// carries open/close and selection envelopes from observer UIs.
    pub fn spawn(
        self,
        tabs: broadcast::Receiver<TabEvent>,
        observers: mpsc::Receiver<Envelope>,
    ) -> BridgeHandle {
        let cancel = CancellationToken::new();
        let join = tokio::spawn(self.run(tabs, observers, cancel.clone()));
        BridgeHandle { cancel, join }
    }

    async fn run(
        mut self,
        mut tabs: broadcast::Receiver<TabEvent>,
        mut observers: mpsc::Receiver<Envelope>,
        cancel: CancellationToken,
    ) -> BridgeStats {
        info!(target: "bridge", tab = %self.config.tab, "notification bridge started");

        loop {
            // Biased so that events already queued are relayed before a
            // cancellation is honored.
            tokio::select! {
                biased;
                event = tabs.recv() => match event {
                    Ok(event) => {
                        if !self.on_tab_event(event).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // The feed is lossy by contract; consumers re-derive
                        // state rather than depending on every event.
                        warn!(target: "bridge", missed, "tab event feed lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                envelope = observers.recv() => match envelope {
                    Some(envelope) => {
                        if !self.on_observer_envelope(envelope).await {
                            break;
                        }
                    }
                    None => break,
                },
                _ = cancel.cancelled() => break,
            }
        }

        info!(target: "bridge", stats = ?self.stats, "notification bridge stopped");
        self.stats
    }

    /// Returns false once the evaluating context is gone.
    async fn on_tab_event(&mut self, event: TabEvent) -> bool {
        if event.tab != self.config.tab {
            return true;
        }

        let message = event.status.to_message();
        self.tracker.apply(&message);

        if !self.tracker.observer_open() {
            self.stats.dropped += 1;
            debug!(
                target: "bridge",
                status = ?event.status,
                "no observer open, dropping tab event"
            );
            return true;
        }

        self.forward(message).await
    }

    async fn on_observer_envelope(&mut self, envelope: Envelope) -> bool {
        if envelope.sender != self.config.extension {
            self.stats.foreign += 1;
            warn!(
                target: "bridge",
                sender = %envelope.sender,
                "ignoring lifecycle message from foreign extension"
            );
            return true;
        }

        self.tracker.apply(&envelope.message);

        let forward = match envelope.message {
            LifecycleMessage::ObserverOpened { .. } | LifecycleMessage::ObserverClosed { .. } => {
                true
            }
            _ => self.tracker.observer_open(),
        };

        if !forward {
            self.stats.dropped += 1;
            return true;
        }

        self.forward(envelope.message).await
    }

    async fn forward(&mut self, message: LifecycleMessage) -> bool {
        let envelope = Envelope {
            sender: self.config.extension.clone(),
            message,
        };

        if self.outbound.send(envelope).await.is_err() {
            warn!(target: "bridge", "evaluating context went away, stopping bridge");
            return false;
        }

        self.stats.forwarded += 1;
        true
    }
}
