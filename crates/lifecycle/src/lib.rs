//! Lifecycle protocol between the page-observing context and the evaluating
//! context: the wire messages, and the state tracker that decides when a new
//! evaluation pass is due.

pub mod model;
pub mod tracker;

pub use model::{Envelope, LifecycleMessage, ObserverKind, TabEvent, TabStatus};
pub use tracker::{Effect, LifecycleState, PageLifecycleTracker};
