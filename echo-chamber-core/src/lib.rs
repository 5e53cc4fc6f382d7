//! Echo Chamber Core Library
//!
//! Provides the client-side logic of the Echo Chamber web client, including:
//! - Tree rendering (declarative node descriptions to document nodes)
//! - Feedback box
//! - Socket message dispatch by query tag
//!
//! This library is designed to be platform-independent, abstracting the page and the
//! socket through traits. An in-memory document is provided in [`dom`].

pub mod dom;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{FeedbackBox, SocketClient, TreeRenderer};
pub use traits::{Connection, Document, HandlerRegistry, Notifier, QueryHandler, Transport};
