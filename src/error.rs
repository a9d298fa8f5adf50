//! Error types for editor operations.
//!
//! Every error here is recoverable: the editor converts them into toasts at
//! its boundary and returns to idle. Empty selections and an empty clipboard
//! are not errors; those operations simply do nothing.

use crate::types::{ConnectionId, ElementId};
use crate::validation::ConnectionRejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    /// Illegal connection between two element types
    #[error("Invalid connection: {0}")]
    ValidationRejected(#[from] ConnectionRejection),

    /// Both ends of a connection are the same element
    #[error("Element {0} cannot connect to itself")]
    SelfConnection(ElementId),

    /// Referenced element does not exist
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    /// Referenced connection does not exist
    #[error("Unknown connection: {0}")]
    UnknownConnection(ConnectionId),

    /// Persisted payload could not be parsed or is structurally invalid
    #[error("Malformed diagram: {0}")]
    MalformedImport(String),
}

/// Result type alias for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

impl EditorError {
    /// Whether this error came from the connection rules.
    pub fn is_rejection(&self) -> bool {
        matches!(self, EditorError::ValidationRejected(_))
    }
}
