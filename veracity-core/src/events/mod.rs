//! Engine lifecycle events: run and weights notifications for
//! operator-visible handlers.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::EngineEventHandler;
pub use types::*;
