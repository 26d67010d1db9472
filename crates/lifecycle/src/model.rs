use serde::{Deserialize, Serialize};

use sitecompat_core_types::{EvaluationScope, ExtensionId, TabId};

/// Which observer UI surface opened or closed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObserverKind {
    Panel,
    Sidebar,
}

impl ObserverKind {
    /// The evaluation scope an observer of this kind displays: the panel
    /// shows page-wide issues, the sidebar shows issues for the selected
    /// element.
    pub fn scope(self) -> EvaluationScope {
        match self {
            Self::Panel => EvaluationScope::WholePage,
            Self::Sidebar => EvaluationScope::SingleElement,
        }
    }
}

/// Status-tagged lifecycle notification. These are the only message types
/// exchanged between contexts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum LifecycleMessage {
    #[serde(rename = "observer:opened")]
    ObserverOpened { observer: ObserverKind },
    #[serde(rename = "observer:closed")]
    ObserverClosed { observer: ObserverKind },
    #[serde(rename = "page:loading")]
    PageLoading,
    #[serde(rename = "page:complete")]
    PageComplete,
    #[serde(rename = "selection:changed")]
    SelectionChanged,
}

/// A lifecycle message plus the identity of the extension build that sent
/// it. Receivers drop envelopes from any other installed build.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub sender: ExtensionId,
    #[serde(flatten)]
    pub message: LifecycleMessage,
}

/// Navigation status for one browser tab, as reported by the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

impl TabStatus {
    pub fn to_message(self) -> LifecycleMessage {
        match self {
            Self::Loading => LifecycleMessage::PageLoading,
            Self::Complete => LifecycleMessage::PageComplete,
        }
    }
}

/// One event on the host's tab-navigation feed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TabEvent {
    pub tab: TabId,
    pub status: TabStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_serialize_with_status_tag() {
        let json = serde_json::to_value(&LifecycleMessage::PageComplete).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "page:complete" }));

        let json = serde_json::to_value(&LifecycleMessage::ObserverOpened {
            observer: ObserverKind::Sidebar,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "observer:opened", "observer": "sidebar" })
        );
    }

    #[test]
    fn envelope_flattens_the_message() {
        let envelope = Envelope {
            sender: ExtensionId::new("compat-tools@example.org"),
            message: LifecycleMessage::PageLoading,
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sender": "compat-tools@example.org",
                "status": "page:loading",
            })
        );
        let parsed: Envelope = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn observer_kind_maps_to_its_scope() {
        assert_eq!(ObserverKind::Panel.scope(), EvaluationScope::WholePage);
        assert_eq!(ObserverKind::Sidebar.scope(), EvaluationScope::SingleElement);
    }
}
