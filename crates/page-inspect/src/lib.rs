//! Page inspection: the one-shot request/response boundary into the
//! inspected page's execution context, and the evaluator that resolves a
//! rule's probe into a concrete request for the current evaluation scope.

pub mod channel;
pub mod errors;
pub mod evaluator;
pub mod model;
pub mod ports;

pub use channel::{ChannelInspectedPage, PageCommand, PageResponse};
pub use errors::EvalError;
pub use evaluator::ElementEvaluator;
pub use model::{EvalRequest, Verdict};
pub use ports::InspectedPage;
