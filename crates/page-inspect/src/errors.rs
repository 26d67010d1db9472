use thiserror::Error;

/// Failure of one remote evaluation. Treated as a non-match by the checker,
/// never as a batch abort, but kept distinguishable from an honest `false`.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EvalError {
    /// The inspected page's context reported an error for this request.
    #[error("inspected page rejected the request: {0}")]
    Page(String),
    /// The boundary channel closed before a response arrived.
    #[error("page inspection channel closed")]
    ChannelClosed,
}
