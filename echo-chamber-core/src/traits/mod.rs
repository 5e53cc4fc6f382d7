//! Platform abstraction trait definitions

mod document;
mod notifier;
mod query_handler;
mod transport;

pub use document::Document;
pub use notifier::Notifier;
pub use query_handler::{HandlerFn, HandlerRegistry, QueryHandler};
pub use transport::{Connection, ReadyState, SocketEvent, Transport};
