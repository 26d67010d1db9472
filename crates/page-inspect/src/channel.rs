use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use sitecompat_core_types::RequestId;

use crate::errors::EvalError;
use crate::model::EvalRequest;
use crate::ports::InspectedPage;

/// Request as it crosses the boundary to the host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageCommand {
    pub id: RequestId,
    pub request: EvalRequest,
}

/// Response as it comes back from the inspected page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageResponse {
    pub id: RequestId,
    pub result: Option<bool>,
    pub error: Option<String>,
}

/// `InspectedPage` client over a pair of host channels. Each call gets a
/// fresh request id and its own responder, so multiple evaluations may be
/// in flight at once with no ordering assumption between them. There is no
/// timeout: a hung host request stalls only the caller that issued it.
pub struct ChannelInspectedPage {
    commands: mpsc::Sender<PageCommand>,
    pending: Arc<DashMap<RequestId, oneshot::Sender<PageResponse>>>,
}

impl ChannelInspectedPage {
    pub fn new(
        commands: mpsc::Sender<PageCommand>,
        mut responses: mpsc::Receiver<PageResponse>,
    ) -> Arc<Self> {
        let pending: Arc<DashMap<RequestId, oneshot::Sender<PageResponse>>> =
            Arc::new(DashMap::new());

        let table = Arc::clone(&pending);
        tokio::spawn(async move {
            while let Some(response) = responses.recv().await {
                match table.remove(&response.id) {
                    Some((_, responder)) => {
                        let _ = responder.send(response);
                    }
                    None => {
                        warn!(
                            target: "page-inspect",
                            id = %response.id,
                            "response for unknown request dropped"
                        );
                    }
                }
            }
            // Host hung up: fail every caller still waiting for a response.
            table.clear();
        });

        Arc::new(Self { commands, pending })
    }
}

#[async_trait]
impl InspectedPage for ChannelInspectedPage {
    async fn eval(&self, request: EvalRequest) -> Result<Option<bool>, EvalError> {
        let id = RequestId::new();
        let (responder, receiver) = oneshot::channel();
        self.pending.insert(id, responder);

        if self.commands.send(PageCommand { id, request }).await.is_err() {
            self.pending.remove(&id);
            return Err(EvalError::ChannelClosed);
        }

        let response = receiver.await.map_err(|_| EvalError::ChannelClosed)?;

        if let Some(message) = response.error {
            return Err(EvalError::Page(message));
        }

        Ok(response.result)
    }
}
