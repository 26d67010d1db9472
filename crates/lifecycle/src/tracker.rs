use sitecompat_core_types::EvaluationScope;

use crate::model::LifecycleMessage;

/// Mutable lifecycle state for one DevTools session. `load_epoch` increments
/// on every navigation start; a run started under an older epoch is stale
/// and its result must be discarded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LifecycleState {
    pub open_observers: usize,
    pub page_loading: bool,
    pub load_epoch: u64,
}

/// What the session should do after applying one message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    None,
    /// The page finished loading: a fresh evaluation pass is due, subject to
    /// the caller re-checking `page_loading` right before it starts.
    EvaluationDue(EvaluationScope),
    /// The inspected selection changed: a single-element pass is due once
    /// the caller confirms an element is actually selected.
    SelectionCheckDue,
}

/// State machine driven only by inbound lifecycle messages. Lives for the
/// whole DevTools session; there is no terminal state. Sender validation
/// happens before messages reach this tracker.
#[derive(Debug, Default)]
pub struct PageLifecycleTracker {
    state: LifecycleState,
}

impl PageLifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// True iff at least one observer UI (panel or sidebar) is visible.
    pub fn observer_open(&self) -> bool {
        self.state.open_observers > 0
    }

    pub fn page_loading(&self) -> bool {
        self.state.page_loading
    }

    pub fn load_epoch(&self) -> u64 {
        self.state.load_epoch
    }

    pub fn apply(&mut self, message: &LifecycleMessage) -> Effect {
        match message {
            LifecycleMessage::ObserverOpened { .. } => {
                self.state.open_observers += 1;
                Effect::None
            }
            LifecycleMessage::ObserverClosed { .. } => {
                self.state.open_observers = self.state.open_observers.saturating_sub(1);
                Effect::None
            }
            LifecycleMessage::PageLoading => {
                self.state.page_loading = true;
                self.state.load_epoch += 1;
                Effect::None
            }
            LifecycleMessage::PageComplete => {
                self.state.page_loading = false;
                if self.observer_open() {
                    Effect::EvaluationDue(EvaluationScope::WholePage)
                } else {
                    Effect::None
                }
            }
            LifecycleMessage::SelectionChanged => {
                if self.observer_open() {
                    Effect::SelectionCheckDue
                } else {
                    Effect::None
                }
            }
        }
    }
}
