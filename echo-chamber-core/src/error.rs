//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Node description failed validation
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// Node id does not belong to the document
    #[error("Node not found: {0}")]
    NodeNotFound(usize),

    /// No element matches the selector
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Inbound frame is not a `{ query, content }` envelope
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// No handler is registered for a known query tag
    #[error("No handler registered for query: {0}")]
    HandlerNotRegistered(String),

    /// Handler rejected the message content
    #[error("Handler error: {query} - {message}")]
    HandlerFailed { query: String, message: String },

    /// Operation needs an open connection
    #[error("WebSocket is not connected")]
    NotConnected,

    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (bad server input, missing page element, etc.),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidNode(_)
            | Self::MalformedMessage(_)
            | Self::HandlerFailed { .. }
            | Self::NotConnected => true,
            Self::NodeNotFound(_)
            | Self::ElementNotFound(_)
            | Self::HandlerNotRegistered(_)
            | Self::Transport(_)
            | Self::SerializationError(_) => false,
        }
    }

    /// Build a `HandlerFailed` error for `query`.
    pub fn handler_failed(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFailed {
            query: query.into(),
            message: message.into(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
