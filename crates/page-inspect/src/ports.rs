use async_trait::async_trait;

use crate::errors::EvalError;
use crate::model::EvalRequest;

/// Host-supplied capability to run a request inside the inspected page's
/// execution context. Completion is never synchronous; `Ok(None)` is the
/// page's "undefined" result.
#[async_trait]
pub trait InspectedPage: Send + Sync {
    async fn eval(&self, request: EvalRequest) -> Result<Option<bool>, EvalError>;
}
